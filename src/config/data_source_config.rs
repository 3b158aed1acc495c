// ==========================================
// 产线 OEE 指标 - 数据源配置
// ==========================================
// 来源: 环境变量 (可由 .env 文件提供)
//   DB_SERVER / DB_NAME / DB_USER / DB_PASSWORD
// 红线: 密码不得出现在任何日志或 Debug 输出中
// ==========================================

use crate::config::ConfigError;
use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use std::fmt;
use std::path::PathBuf;

pub const ENV_DB_SERVER: &str = "DB_SERVER";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";

/// 数据源连接参数
///
/// SQLite 实现中 `server` 为数据库文件所在目录，`database` 为文件名；
/// `user`/`password` 仅为与服务端数据库保持一致而保留。
#[derive(Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    pub server: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub busy_timeout_ms: u64,
}

impl DataSourceConfig {
    pub fn new(server: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            database: database.into(),
            user: String::new(),
            password: String::new(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// 从进程环境读取 (先加载 .env，文件不存在不报错)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取
    ///
    /// # 返回
    /// - Err(ConfigError::MissingVar): DB_SERVER 或 DB_NAME 缺失/为空
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let server = required(ENV_DB_SERVER)?;
        let database = required(ENV_DB_NAME)?;
        let user = lookup(ENV_DB_USER).unwrap_or_default();
        let password = lookup(ENV_DB_PASSWORD).unwrap_or_default();

        Ok(Self::new(server, database).with_credentials(user, password))
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.server).join(&self.database)
    }
}

// 手写 Debug，屏蔽密码
impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_fields() {
        let config = DataSourceConfig::from_lookup(lookup_from(&[
            ("DB_SERVER", "/var/lib/plant"),
            ("DB_NAME", "records.db"),
            ("DB_USER", "reader"),
            ("DB_PASSWORD", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.server, "/var/lib/plant");
        assert_eq!(config.user, "reader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/plant/records.db")
        );
    }

    #[test]
    fn test_from_lookup_requires_server_and_name() {
        let err = DataSourceConfig::from_lookup(lookup_from(&[("DB_NAME", "records.db")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("DB_SERVER"));

        let err = DataSourceConfig::from_lookup(lookup_from(&[
            ("DB_SERVER", "/tmp"),
            ("DB_NAME", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("DB_NAME"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DataSourceConfig::new("/tmp", "records.db").with_credentials("reader", "s3cret");
        let printed = format!("{:?}", config);
        assert!(printed.contains("reader"));
        assert!(!printed.contains("s3cret"));
    }
}
