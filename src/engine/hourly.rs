// ==========================================
// 产线 OEE 指标 - 小时分段
// ==========================================
// 将 [start, end) 切分为按整点对齐的时段，首尾时段可不足一小时
// ==========================================

use chrono::{DateTime, Duration, FixedOffset, Timelike};

/// 一个小时时段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl HourSlot {
    /// 时段内的运行终点：不晚于 cutoff，不早于时段起点
    pub fn operation_end(&self, cutoff: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        cutoff.min(self.end).max(self.start)
    }
}

fn truncate_to_hour(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.with_minute(0)
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// 生成整点对齐的时段；start >= end 时为空
pub fn hour_slots(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Vec<HourSlot> {
    let mut slots = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let next_hour = truncate_to_hour(cursor) + Duration::hours(1);
        let slot_end = next_hour.min(end);
        slots.push(HourSlot {
            start: cursor,
            end: slot_end,
        });
        cursor = slot_end;
    }

    slots
}
