// ==========================================
// 产线 OEE 指标 - 引擎层
// ==========================================
// 红线: 引擎只做纯计算，不访问数据源
// ==========================================

pub mod hourly;
pub mod oee;
pub mod summary;
pub mod window;

pub use hourly::{hour_slots, HourSlot};
pub use oee::OeeCalculator;
pub use summary::{AggregateTotals, MetricsSummarizer};
pub use window::MetricsWindow;
