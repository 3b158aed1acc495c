// ==========================================
// 产线 OEE 指标 - API 层
// ==========================================

pub mod error;
pub mod production_api;

pub use error::{ApiError, ApiResult};
pub use production_api::{ProductionApi, MAX_HOURLY_SLOTS};
