// ==========================================
// 产线 OEE 指标 - 多型号汇总
// ==========================================
// 规则:
// 1. 按型号合并 (同一型号可能因目标节拍不同分成多行)
// 2. quality     = Σ合格 / Σ总数
// 3. performance = Σ(型号 performance × 型号总数) / Σ型号总数  (仅带目标的型号)
// 4. oee         = Σ(型号 quality × performance × 型号总数) / Σ型号总数
// ==========================================

use crate::domain::metrics::ModelMetric;
use crate::engine::oee::OeeCalculator;

/// 汇总结果；无任何带目标型号时 performance/oee 为 None
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTotals {
    pub success_qty: u64,
    pub fail_qty: u64,
    pub total_qty: u64,
    pub quality: f64,
    pub performance: Option<f64>,
    pub oee: Option<f64>,
}

struct ModelGroup<'a> {
    model: &'a str,
    success_qty: u64,
    fail_qty: u64,
    // 型号内第一个带 performance 的行
    performance: Option<f64>,
}

pub struct MetricsSummarizer;

impl MetricsSummarizer {
    pub fn aggregate(metrics: &[ModelMetric]) -> AggregateTotals {
        let groups = Self::group_by_model(metrics);

        let mut success_qty = 0u64;
        let mut fail_qty = 0u64;
        let mut perf_weighted = 0.0;
        let mut oee_weighted = 0.0;
        let mut perf_qty = 0u64;
        let mut has_performance = false;

        for group in &groups {
            let group_total = group.success_qty + group.fail_qty;
            success_qty += group.success_qty;
            fail_qty += group.fail_qty;

            if let Some(performance) = group.performance {
                let group_quality = OeeCalculator::quality(group.success_qty, group_total);
                has_performance = true;
                perf_weighted += performance * group_total as f64;
                oee_weighted += group_quality * performance * group_total as f64;
                perf_qty += group_total;
            }
        }

        let total_qty = success_qty + fail_qty;
        let weighted = |sum: f64| {
            if perf_qty > 0 {
                sum / perf_qty as f64
            } else {
                0.0
            }
        };

        AggregateTotals {
            success_qty,
            fail_qty,
            total_qty,
            quality: OeeCalculator::quality(success_qty, total_qty),
            performance: has_performance.then(|| weighted(perf_weighted)),
            oee: has_performance.then(|| weighted(oee_weighted)),
        }
    }

    /// 保持首次出现顺序
    fn group_by_model(metrics: &[ModelMetric]) -> Vec<ModelGroup<'_>> {
        let mut groups: Vec<ModelGroup<'_>> = Vec::new();

        for metric in metrics {
            match groups.iter_mut().find(|g| g.model == metric.model) {
                Some(group) => {
                    group.success_qty += metric.success_qty;
                    group.fail_qty += metric.fail_qty;
                    if group.performance.is_none() {
                        group.performance = metric.performance;
                    }
                }
                None => groups.push(ModelGroup {
                    model: &metric.model,
                    success_qty: metric.success_qty,
                    fail_qty: metric.fail_qty,
                    performance: metric.performance,
                }),
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ModelCountRow;

    fn metric(model: &str, success: u64, fail: u64, target: Option<f64>, op_secs: f64) -> ModelMetric {
        OeeCalculator::derive(
            &ModelCountRow {
                model: model.to_string(),
                success_qty: success,
                fail_qty: fail,
                target,
            },
            op_secs,
        )
    }

    #[test]
    fn test_empty_input() {
        let totals = MetricsSummarizer::aggregate(&[]);
        assert_eq!(totals.total_qty, 0);
        assert_eq!(totals.quality, 0.0);
        assert_eq!(totals.performance, None);
        assert_eq!(totals.oee, None);
    }

    #[test]
    fn test_weighting_skips_models_without_target() {
        let metrics = vec![
            metric("X100", 100, 10, Some(120.0), 14_400.0),
            metric("Y200", 50, 0, None, 14_400.0),
        ];
        let totals = MetricsSummarizer::aggregate(&metrics);

        assert_eq!(totals.total_qty, 160);
        assert!((totals.quality - 150.0 / 160.0).abs() < 1e-9);
        // 仅 X100 参与加权
        assert!((totals.performance.unwrap() - 110.0 * 30.0 / 14_400.0).abs() < 1e-9);
        assert!((totals.oee.unwrap() - metrics[0].oee.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_rows_of_same_model_are_merged() {
        // 同型号两行: 一行无目标，一行有目标
        let metrics = vec![
            metric("X100", 10, 10, None, 3_600.0),
            metric("X100", 20, 0, Some(60.0), 3_600.0),
        ];
        let totals = MetricsSummarizer::aggregate(&metrics);

        assert_eq!(totals.success_qty, 30);
        assert_eq!(totals.fail_qty, 10);
        let perf = metrics[1].performance.unwrap();
        assert!((totals.performance.unwrap() - perf).abs() < 1e-9);
        // 合并后的型号质量率 30/40
        assert!((totals.oee.unwrap() - 0.75 * perf).abs() < 1e-9);
    }
}
