// ==========================================
// 产线 OEE 指标 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 连接失败 (网络/认证/文件) 与 查询失败 (语法/结构不匹配/超时)
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库连接失败: {0}")]
    ConnectionError(String),

    #[error("数据库查询失败: {0}")]
    QueryError(String),
}

// 打开连接之后的 rusqlite 错误一律视为查询失败；
// 连接阶段的错误由调用方显式映射为 ConnectionError
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::QueryError(msg),
            _ => RepositoryError::QueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
