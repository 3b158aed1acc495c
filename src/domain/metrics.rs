// ==========================================
// 产线 OEE 指标 - 指标领域模型
// ==========================================
// 职责: 计算结果的值对象 (每次调用新建，不持久化)
// 约束: total_qty = success_qty + fail_qty
// 约束: 无目标节拍时 performance/oee 为 None (不是 0)
// ==========================================

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ==========================================
// ModelMetric - 单型号指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetric {
    pub model: String,            // 型号
    pub success_qty: u64,         // 合格数
    pub fail_qty: u64,            // 不合格数
    pub total_qty: u64,           // 总数
    pub target: Option<f64>,      // 目标节拍 (件/小时)
    pub quality: f64,             // 质量率 [0, 1]
    pub performance: Option<f64>, // 性能率
    pub oee: Option<f64>,         // OEE = quality × performance
}

// ==========================================
// UnitMetricsSummary - 产线汇总
// ==========================================
// 按型号合并后，以 total_qty 加权汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMetricsSummary {
    pub unit_name: String,

    // ===== 时间窗口 (运营时区) =====
    pub window_start: DateTime<FixedOffset>,
    pub window_end: DateTime<FixedOffset>,
    pub operation_end: DateTime<FixedOffset>,

    // ===== 汇总数量 =====
    pub total_success_qty: u64,
    pub total_fail_qty: u64,
    pub total_qty: u64,

    // ===== 汇总比率 (无数据时为 0) =====
    pub quality: f64,
    pub performance: f64,
    pub oee: f64,

    pub models: Vec<ModelMetric>,
}

// ==========================================
// HourlyMetric - 小时段指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyMetric {
    pub hour_start: DateTime<FixedOffset>,
    pub hour_end: DateTime<FixedOffset>,
    pub success_qty: u64,
    pub fail_qty: u64,
    pub total_qty: u64,
    pub quality: f64,
    pub performance: Option<f64>, // 该时段无任何带目标型号时为 None
    pub oee: Option<f64>,
}
