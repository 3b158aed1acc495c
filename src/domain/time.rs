// ==========================================
// 产线 OEE 指标 - 时间与运营时区
// ==========================================
// 职责: 输入时间戳 (带/不带时区) 统一归一到固定运营时区
// 约束: 运营时区为固定 UTC 偏移 (默认 UTC+3)，不做夏令时
// ==========================================

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 默认运营时区偏移 (秒): UTC+3
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 3 * 3600;

/// 无时区时间戳支持的解析格式
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ==========================================
// InputTimestamp - 调用方传入的时间戳
// ==========================================

/// 调用方传入的时间戳
///
/// - Naive: 视为运营时区的墙钟时间，只打标签不换算
/// - Aware: 带偏移的时间，换算到运营时区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTimestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl From<NaiveDateTime> for InputTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        InputTimestamp::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for InputTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        InputTimestamp::Aware(value)
    }
}

impl From<DateTime<Utc>> for InputTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        InputTimestamp::Aware(value.fixed_offset())
    }
}

/// 时间戳解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法解析时间戳: {0}")]
pub struct TimestampParseError(pub String);

impl FromStr for InputTimestamp {
    type Err = TimestampParseError;

    /// 先尝试 RFC 3339 (带偏移)，再尝试常见的无时区格式
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
            return Ok(InputTimestamp::Aware(aware));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(InputTimestamp::Naive)
            .ok_or_else(|| TimestampParseError(raw.to_string()))
    }
}

// ==========================================
// OperationalZone - 运营时区
// ==========================================

/// 固定偏移的运营时区
///
/// 由调用方显式传入 (见 `MetricsConfig`)，不存在进程级全局状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationalZone {
    offset: FixedOffset,
}

impl OperationalZone {
    /// 按 UTC 偏移秒数创建；超出 ±24h 返回 None
    pub fn from_offset_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 将输入时间戳归一到运营时区
    ///
    /// # 规则
    /// - Naive: 直接视为运营时区墙钟时间
    /// - Aware: 换算 (保持同一时刻)，不重新解释墙钟
    pub fn normalize(&self, ts: InputTimestamp) -> DateTime<FixedOffset> {
        match ts {
            InputTimestamp::Naive(naive) => self
                .offset
                .from_local_datetime(&naive)
                .single()
                // 仅在超出 chrono 可表示范围时出现，按 UTC 墙钟保留
                .unwrap_or_else(|| DateTime::from_naive_utc_and_offset(naive, self.offset)),
            InputTimestamp::Aware(aware) => aware.with_timezone(&self.offset),
        }
    }

    /// 当前时刻 (运营时区)
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }

    /// 指定 UTC 时刻在运营时区下的表示
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// 运营时区墙钟时间 (用于绑定数据库参数)
    pub fn wall_clock(&self, dt: DateTime<FixedOffset>) -> NaiveDateTime {
        dt.with_timezone(&self.offset).naive_local()
    }
}

impl Default for OperationalZone {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl fmt::Display for OperationalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC{}", self.offset)
    }
}
