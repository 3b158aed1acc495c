// ==========================================
// 产线 OEE 指标 - 单型号指标推导
// ==========================================
// quality     = success / total              (total = 0 时为 0)
// ideal_cycle = 3600 / target                (秒/件)
// performance = total × ideal_cycle / 运行秒数  (运行秒数 = 0 时为 0)
// oee         = quality × performance
// 无目标节拍 (None 或 0): performance/oee 为 None
// ==========================================

use crate::domain::metrics::ModelMetric;
use crate::repository::ModelCountRow;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub struct OeeCalculator;

impl OeeCalculator {
    pub fn quality(success_qty: u64, total_qty: u64) -> f64 {
        if total_qty == 0 {
            return 0.0;
        }
        success_qty as f64 / total_qty as f64
    }

    /// 有效目标节拍；0 视为未定义
    pub fn effective_target(target: Option<f64>) -> Option<f64> {
        target.filter(|t| *t != 0.0)
    }

    pub fn ideal_cycle_time_seconds(target: f64) -> f64 {
        SECONDS_PER_HOUR / target
    }

    pub fn performance(total_qty: u64, target: f64, operation_seconds: f64) -> f64 {
        if operation_seconds <= 0.0 {
            return 0.0;
        }
        total_qty as f64 * Self::ideal_cycle_time_seconds(target) / operation_seconds
    }

    /// 由一行聚合数推导型号指标
    pub fn derive(row: &ModelCountRow, operation_seconds: f64) -> ModelMetric {
        let total_qty = row.success_qty + row.fail_qty;
        let quality = Self::quality(row.success_qty, total_qty);

        let (performance, oee) = match Self::effective_target(row.target) {
            Some(target) => {
                let performance = Self::performance(total_qty, target, operation_seconds);
                (Some(performance), Some(quality * performance))
            }
            None => (None, None),
        };

        ModelMetric {
            model: row.model.clone(),
            success_qty: row.success_qty,
            fail_qty: row.fail_qty,
            total_qty,
            target: row.target,
            quality,
            performance,
            oee,
        }
    }

    pub fn derive_all(rows: &[ModelCountRow], operation_seconds: f64) -> Vec<ModelMetric> {
        rows.iter()
            .map(|row| Self::derive(row, operation_seconds))
            .collect()
    }
}
