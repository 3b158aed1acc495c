// ==========================================
// 产线 OEE 指标 - API层错误类型
// ==========================================
// 职责: 将仓储层错误转换为调用方可区分的错误
// 说明: 面向用户的文案由外部调用方 (如 HTTP 层) 负责
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据源连接失败: {0}")]
    DataSourceConnection(String),

    #[error("数据源查询失败: {0}")]
    DataSourceQuery(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionError(msg) => ApiError::DataSourceConnection(msg),
            RepositoryError::QueryError(msg) => ApiError::DataSourceQuery(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
