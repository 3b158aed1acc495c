// ==========================================
// 产线 OEE 指标 - 指标计算配置
// ==========================================
// OEE_UTC_OFFSET_MINUTES: 运营时区偏移 (分钟，默认 180)
// OEE_QUERY_UPPER_BOUND:  查询上界 now | end (默认 now)
// ==========================================

use crate::config::ConfigError;
use crate::domain::time::OperationalZone;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_UTC_OFFSET_MINUTES: &str = "OEE_UTC_OFFSET_MINUTES";
pub const ENV_QUERY_UPPER_BOUND: &str = "OEE_QUERY_UPPER_BOUND";

/// 聚合查询使用的时间上界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryUpperBound {
    /// 查询执行时刻的墙钟时间 (实时数据，忽略 end_time)
    #[default]
    WallClockNow,
    /// 归一后的 end_time
    RequestedEnd,
}

impl FromStr for QueryUpperBound {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "now" | "wall_clock_now" => Ok(QueryUpperBound::WallClockNow),
            "end" | "requested_end" => Ok(QueryUpperBound::RequestedEnd),
            other => Err(ConfigError::InvalidValue {
                key: ENV_QUERY_UPPER_BOUND,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsConfig {
    pub zone: OperationalZone,
    pub query_upper_bound: QueryUpperBound,
}

impl MetricsConfig {
    pub fn new(zone: OperationalZone, query_upper_bound: QueryUpperBound) -> Self {
        Self {
            zone,
            query_upper_bound,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 未设置的键使用默认值；设置了但无法解析则报错
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            let invalid = || ConfigError::InvalidValue {
                key: ENV_UTC_OFFSET_MINUTES,
                value: raw.clone(),
            };
            let minutes: i32 = raw.trim().parse().map_err(|_| invalid())?;
            config.zone = minutes
                .checked_mul(60)
                .and_then(OperationalZone::from_offset_seconds)
                .ok_or_else(invalid)?;
        }

        if let Some(raw) = lookup(ENV_QUERY_UPPER_BOUND) {
            config.query_upper_bound = raw.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetricsConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.zone, OperationalZone::default());
        assert_eq!(config.query_upper_bound, QueryUpperBound::WallClockNow);
    }

    #[test]
    fn test_overrides() {
        let config = MetricsConfig::from_lookup(|key| match key {
            ENV_UTC_OFFSET_MINUTES => Some("120".to_string()),
            ENV_QUERY_UPPER_BOUND => Some("END".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.zone.offset().local_minus_utc(), 7200);
        assert_eq!(config.query_upper_bound, QueryUpperBound::RequestedEnd);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = MetricsConfig::from_lookup(|key| {
            (key == ENV_UTC_OFFSET_MINUTES).then(|| "three".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_UTC_OFFSET_MINUTES, .. }));

        assert!("later".parse::<QueryUpperBound>().is_err());
    }
}
