// ==========================================
// 产线 OEE 指标 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑 (只取聚合数，不算指标)
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod production_log_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use production_log_repo::{
    ModelCountRow, ProductionLogRepository, ProductionLogSource, RECORD_TIMESTAMP_FORMAT,
};
