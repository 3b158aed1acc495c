// ==========================================
// 产线 OEE 指标 - 核心库
// ==========================================
// 职责: 按产线/时间窗口聚合生产测试记录，计算质量/性能/OEE
// 技术栈: Rust + SQLite (rusqlite)
// 系统定位: 无状态分析层 (数据源/展示层均为外部协作方)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与时间规则
pub mod domain;

// 数据仓储层 - 生产记录数据源
pub mod repository;

// 引擎层 - 指标推导
pub mod engine;

// 配置层 - 数据源/指标参数
pub mod config;

// 数据库基础设施（只读连接/统一参数）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use api::{ApiError, ApiResult, ProductionApi};
pub use config::{DataSourceConfig, MetricsConfig, QueryUpperBound};
pub use domain::{HourlyMetric, InputTimestamp, ModelMetric, OperationalZone, UnitMetricsSummary};
pub use repository::{ProductionLogRepository, ProductionLogSource, RepositoryError};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线 OEE 指标";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
