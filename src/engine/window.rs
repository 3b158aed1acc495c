// ==========================================
// 产线 OEE 指标 - 时间窗口解析
// ==========================================
// 职责: 归一 start/end/current 到运营时区，推导
//   - operation_end: 运行时间终点 (current 或 end，不早于 start)
//   - query_end:     聚合查询上界 (墙钟 now 或 end，由配置决定)
// ==========================================

use crate::config::QueryUpperBound;
use crate::domain::time::{InputTimestamp, OperationalZone};
use chrono::{DateTime, FixedOffset, Utc};

/// 一次指标计算的时间窗口 (均为运营时区)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub operation_end: DateTime<FixedOffset>,
    pub query_end: DateTime<FixedOffset>,
}

impl MetricsWindow {
    /// 解析调用方输入
    ///
    /// # 参数
    /// - current_time: 缺省时取 end_time
    /// - now: 查询执行时刻 (仅 WallClockNow 模式使用)
    pub fn resolve(
        zone: &OperationalZone,
        start_time: InputTimestamp,
        end_time: InputTimestamp,
        current_time: Option<InputTimestamp>,
        upper_bound: QueryUpperBound,
        now: DateTime<Utc>,
    ) -> Self {
        let start = zone.normalize(start_time);
        let end = zone.normalize(end_time);
        let operation_end = zone.normalize(current_time.unwrap_or(end_time));

        let query_end = match upper_bound {
            QueryUpperBound::WallClockNow => zone.at(now),
            QueryUpperBound::RequestedEnd => end,
        };

        Self::new(start, end, operation_end, query_end)
    }

    /// 直接由归一后的时间构造；operation_end 早于 start 时钳制到 start
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        operation_end: DateTime<FixedOffset>,
        query_end: DateTime<FixedOffset>,
    ) -> Self {
        let operation_end = if operation_end < start {
            tracing::warn!(
                start = %start,
                operation_end = %operation_end,
                "运行终点早于起点，已钳制为起点"
            );
            start
        } else {
            operation_end
        };

        Self {
            start,
            end,
            operation_end,
            query_end,
        }
    }

    /// 运行时间 (秒)，恒 >= 0
    pub fn operation_seconds(&self) -> f64 {
        let elapsed = self.operation_end - self.start;
        match elapsed.num_microseconds() {
            Some(micros) => micros as f64 / 1_000_000.0,
            // 超出微秒可表示范围 (约 29 万年) 时退回毫秒
            None => elapsed.num_milliseconds() as f64 / 1000.0,
        }
    }
}
