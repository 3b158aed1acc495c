// ==========================================
// 产线 OEE 指标 - 生产指标 API
// ==========================================
// 职责: 产线列表 / 型号指标 / 产线汇总 / 小时分段
// 架构: API 层 → Engine (纯计算) + ProductionLogSource (数据源)
// 约束: 无状态，每次调用新建结果，不跨调用缓存
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{DataSourceConfig, MetricsConfig};
use crate::domain::metrics::{HourlyMetric, ModelMetric, UnitMetricsSummary};
use crate::domain::time::InputTimestamp;
use crate::engine::{hour_slots, MetricsSummarizer, MetricsWindow, OeeCalculator};
use crate::repository::{ProductionLogRepository, ProductionLogSource};

/// 小时分段最多时段数 (7 天)；每个时段一次独立查询
pub const MAX_HOURLY_SLOTS: usize = 7 * 24;

/// 查询上界的区间语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryEnd {
    Inclusive,
    Exclusive,
}

// ==========================================
// ProductionApi - 生产指标 API
// ==========================================
pub struct ProductionApi {
    source: Arc<dyn ProductionLogSource>,
    config: MetricsConfig,
}

impl ProductionApi {
    pub fn new(source: Arc<dyn ProductionLogSource>, config: MetricsConfig) -> Self {
        Self { source, config }
    }

    /// 使用 SQLite 生产记录仓储
    pub fn from_data_source(data_source: DataSourceConfig, config: MetricsConfig) -> Self {
        Self::new(Arc::new(ProductionLogRepository::new(data_source)), config)
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// 产线列表：去重、升序
    pub fn list_units(&self) -> ApiResult<Vec<String>> {
        let mut units = self.source.list_unit_names()?;
        units.sort();
        units.dedup();
        Ok(units)
    }

    /// 查询产线各型号的质量/性能/OEE
    ///
    /// # 参数
    /// - unit_name: 产线名称 (非空)
    /// - start_time / end_time: 统计窗口
    /// - current_time: 运行时间终点，缺省为 end_time
    ///
    /// # 返回
    /// - Ok(Vec<ModelMetric>): 按 (型号, 目标节拍) 排序
    /// - Err(ApiError): 输入为空或数据源失败
    pub fn get_production_data(
        &self,
        unit_name: &str,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
    ) -> ApiResult<Vec<ModelMetric>> {
        self.get_production_data_at(unit_name, start_time, end_time, current_time, Utc::now())
    }

    /// 同 `get_production_data`，查询时刻由调用方给定
    pub fn get_production_data_at(
        &self,
        unit_name: &str,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
        now: DateTime<Utc>,
    ) -> ApiResult<Vec<ModelMetric>> {
        let unit_name = Self::validate_unit_name(unit_name)?;
        let window = self.resolve_window(start_time, end_time, current_time, now);
        self.collect_model_metrics(unit_name, &window, QueryEnd::Inclusive)
    }

    /// 产线汇总 (按型号合并后加权)
    pub fn get_unit_summary(
        &self,
        unit_name: &str,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
    ) -> ApiResult<UnitMetricsSummary> {
        self.get_unit_summary_at(unit_name, start_time, end_time, current_time, Utc::now())
    }

    pub fn get_unit_summary_at(
        &self,
        unit_name: &str,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
        now: DateTime<Utc>,
    ) -> ApiResult<UnitMetricsSummary> {
        let unit_name = Self::validate_unit_name(unit_name)?;
        let window = self.resolve_window(start_time, end_time, current_time, now);
        let models = self.collect_model_metrics(unit_name, &window, QueryEnd::Inclusive)?;
        let totals = MetricsSummarizer::aggregate(&models);

        Ok(UnitMetricsSummary {
            unit_name: unit_name.to_string(),
            window_start: window.start,
            window_end: window.end,
            operation_end: window.operation_end,
            total_success_qty: totals.success_qty,
            total_fail_qty: totals.fail_qty,
            total_qty: totals.total_qty,
            quality: totals.quality,
            performance: totals.performance.unwrap_or(0.0),
            oee: totals.oee.unwrap_or(0.0),
            models,
        })
    }

    /// 小时分段指标
    ///
    /// 非末段按半开区间 [时段起点, 时段终点) 查询，末段与整窗查询一致取闭区间，
    /// 各时段合计等于 [start, end] 整窗合计；
    /// 运行时间终点取 min(current_time, 时段终点)
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 时段数超过 MAX_HOURLY_SLOTS
    pub fn get_hourly_breakdown(
        &self,
        unit_name: &str,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
    ) -> ApiResult<Vec<HourlyMetric>> {
        let unit_name = Self::validate_unit_name(unit_name)?;
        let zone = &self.config.zone;
        let start = zone.normalize(start_time);
        let end = zone.normalize(end_time);
        let cutoff = zone.normalize(current_time.unwrap_or(end_time));

        let slots = hour_slots(start, end);
        if slots.len() > MAX_HOURLY_SLOTS {
            return Err(ApiError::InvalidInput(format!(
                "小时分段窗口过长: {} 个时段 (上限 {})",
                slots.len(),
                MAX_HOURLY_SLOTS
            )));
        }
        let last_index = slots.len().saturating_sub(1);
        let mut hours = Vec::with_capacity(slots.len());

        for (index, slot) in slots.iter().enumerate() {
            let query_end = if index == last_index {
                QueryEnd::Inclusive
            } else {
                QueryEnd::Exclusive
            };
            let window = MetricsWindow::new(slot.start, slot.end, slot.operation_end(cutoff), slot.end);
            let models = self.collect_model_metrics(unit_name, &window, query_end)?;
            let totals = MetricsSummarizer::aggregate(&models);

            hours.push(HourlyMetric {
                hour_start: slot.start,
                hour_end: slot.end,
                success_qty: totals.success_qty,
                fail_qty: totals.fail_qty,
                total_qty: totals.total_qty,
                quality: totals.quality,
                performance: totals.performance,
                oee: totals.oee,
            });
        }

        tracing::debug!(unit_name, slots = hours.len(), "小时分段计算完成");
        Ok(hours)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 仅拒绝空白名称；查询按原样绑定，与 list_units 返回值一致
    fn validate_unit_name(unit_name: &str) -> ApiResult<&str> {
        if unit_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("产线名称不能为空".to_string()));
        }
        Ok(unit_name)
    }

    fn resolve_window(
        &self,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
        now: DateTime<Utc>,
    ) -> MetricsWindow {
        MetricsWindow::resolve(
            &self.config.zone,
            start_time,
            end_time,
            current_time,
            self.config.query_upper_bound,
            now,
        )
    }

    fn collect_model_metrics(
        &self,
        unit_name: &str,
        window: &MetricsWindow,
        query_end: QueryEnd,
    ) -> ApiResult<Vec<ModelMetric>> {
        let zone = &self.config.zone;
        tracing::debug!(
            unit_name,
            start = %window.start,
            end = %window.end,
            operation_end = %window.operation_end,
            query_end = %window.query_end,
            exclusive = query_end == QueryEnd::Exclusive,
            "查询型号聚合数"
        );

        let start = zone.wall_clock(window.start);
        let end = zone.wall_clock(window.query_end);
        let rows = match query_end {
            QueryEnd::Inclusive => self.source.query_model_counts(unit_name, start, end)?,
            QueryEnd::Exclusive => self.source.query_model_counts_before(unit_name, start, end)?,
        };

        Ok(OeeCalculator::derive_all(&rows, window.operation_seconds()))
    }
}
