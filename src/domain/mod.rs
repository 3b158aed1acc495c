// ==========================================
// 产线 OEE 指标 - 领域层
// ==========================================
// 职责: 值对象与时间归一规则
// ==========================================

pub mod metrics;
pub mod time;

pub use metrics::{HourlyMetric, ModelMetric, UnitMetricsSummary};
pub use time::{InputTimestamp, OperationalZone, TimestampParseError, DEFAULT_UTC_OFFSET_SECONDS};
