// ==========================================
// 产线 OEE 指标 - 配置层
// ==========================================
// 职责: 数据源连接参数 + 指标计算参数 (时区/查询上界)
// ==========================================

pub mod data_source_config;
pub mod metrics_config;

pub use data_source_config::DataSourceConfig;
pub use metrics_config::{MetricsConfig, QueryUpperBound};

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("缺少配置项: {0}")]
    MissingVar(&'static str),

    #[error("配置值无效 (key={key}): {value}")]
    InvalidValue { key: &'static str, value: String },
}
