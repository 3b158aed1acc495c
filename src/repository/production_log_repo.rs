// ==========================================
// 产线 OEE 指标 - 生产记录仓储
// ==========================================
// 数据源: ProductRecordLogView (只读)
//   UnitName / Model / KayitTarihi / TestSonucu / ModelSuresiSN
// 约束: 所有查询使用参数化 (?1 ?2 ?3)，防止 SQL 注入
// 约束: 每次调用获取独立连接，任何退出路径都释放
// ==========================================

use crate::config::DataSourceConfig;
use crate::db::open_read_only_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult};

/// KayitTarihi 的存储/绑定格式 (运营时区墙钟)
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// ModelCountRow - 聚合查询行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCountRow {
    pub model: String,
    pub success_qty: u64,
    pub fail_qty: u64,
    pub target: Option<f64>, // ModelSuresiSN
}

// ==========================================
// Trait: ProductionLogSource
// ==========================================
// 用途: 数据源网关，API 层只依赖此接口
pub trait ProductionLogSource: Send + Sync {
    /// 去重后的产线名称
    fn list_unit_names(&self) -> RepositoryResult<Vec<String>>;

    /// 按 (型号, 目标节拍) 分组的合格/不合格数
    ///
    /// 时间范围为闭区间 [start, end]，参数为运营时区墙钟时间；
    /// 无记录的分组不出现在结果中
    fn query_model_counts(
        &self,
        unit_name: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepositoryResult<Vec<ModelCountRow>>;

    /// 同 `query_model_counts`，但时间范围为半开区间 [start, end)
    ///
    /// 用于相邻时段切分，保证每条记录只落入一个时段
    fn query_model_counts_before(
        &self,
        unit_name: &str,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    ) -> RepositoryResult<Vec<ModelCountRow>>;
}

/// KayitTarihi 区间谓词
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeRangePredicate {
    Closed,   // [start, end]
    HalfOpen, // [start, end)
}

impl TimeRangePredicate {
    fn sql(self) -> &'static str {
        match self {
            TimeRangePredicate::Closed => "KayitTarihi BETWEEN ?2 AND ?3",
            TimeRangePredicate::HalfOpen => "KayitTarihi >= ?2 AND KayitTarihi < ?3",
        }
    }
}

// ==========================================
// ProductionLogRepository - SQLite 实现
// ==========================================
pub struct ProductionLogRepository {
    config: DataSourceConfig,
}

impl ProductionLogRepository {
    pub fn new(config: DataSourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// 在独立连接上执行一次操作
    ///
    /// 连接在本函数返回前关闭（含错误路径）；失败时记录
    /// server/database/user 诊断信息后向上传播，绝不记录密码
    fn with_connection<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&Connection) -> RepositoryResult<T>,
    {
        let conn = open_read_only_connection(&self.config.database_path(), self.config.busy_timeout_ms)
            .map_err(|e| {
                let err = RepositoryError::ConnectionError(e.to_string());
                self.log_failure(operation, &err);
                err
            })?;

        let result = f(&conn);

        if let Err((_conn, e)) = conn.close() {
            tracing::warn!(operation, error = %e, "关闭数据库连接失败");
        }

        result.map_err(|err| {
            self.log_failure(operation, &err);
            err
        })
    }

    /// 型号聚合查询；区间谓词为固定 SQL 片段，时间值一律参数绑定
    fn fetch_model_counts(
        &self,
        operation: &'static str,
        predicate: TimeRangePredicate,
        unit_name: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepositoryResult<Vec<ModelCountRow>> {
        let start_str = start.format(RECORD_TIMESTAMP_FORMAT).to_string();
        let end_str = end.format(RECORD_TIMESTAMP_FORMAT).to_string();
        let sql = format!(
            r#"
            SELECT
                Model,
                SUM(CASE WHEN TestSonucu = 1 THEN 1 ELSE 0 END) AS SuccessQty,
                SUM(CASE WHEN TestSonucu = 0 THEN 1 ELSE 0 END) AS FailQty,
                ModelSuresiSN AS Target
            FROM ProductRecordLogView
            WHERE UnitName = ?1
              AND {}
            GROUP BY Model, ModelSuresiSN
            ORDER BY Model, ModelSuresiSN
            "#,
            predicate.sql()
        );

        self.with_connection(operation, |conn| {
            let mut stmt = conn.prepare(&sql)?;

            let rows = stmt
                .query_map(params![unit_name, start_str, end_str], |row| {
                    Ok(ModelCountRow {
                        model: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                        success_qty: row.get::<_, i64>(1)?.max(0) as u64,
                        fail_qty: row.get::<_, i64>(2)?.max(0) as u64,
                        target: row.get(3)?,
                    })
                })?
                .collect::<SqliteResult<Vec<ModelCountRow>>>()?;

            tracing::debug!(
                unit_name,
                start = %start_str,
                end = %end_str,
                predicate = ?predicate,
                rows = rows.len(),
                "型号聚合查询完成"
            );

            Ok(rows)
        })
    }

    fn log_failure(&self, operation: &str, err: &RepositoryError) {
        tracing::error!(
            operation,
            server = %self.config.server,
            database = %self.config.database,
            user = %self.config.user,
            error = %err,
            "生产记录数据源访问失败"
        );
    }
}

impl ProductionLogSource for ProductionLogRepository {
    fn list_unit_names(&self) -> RepositoryResult<Vec<String>> {
        self.with_connection("list_unit_names", |conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT UnitName FROM ProductRecordLogView ORDER BY UnitName",
            )?;

            let names = stmt
                .query_map([], |row| row.get::<_, Option<String>>(0))?
                .collect::<SqliteResult<Vec<Option<String>>>>()?;

            // NULL 产线名不是有效产线
            Ok(names.into_iter().flatten().collect())
        })
    }

    fn query_model_counts(
        &self,
        unit_name: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepositoryResult<Vec<ModelCountRow>> {
        self.fetch_model_counts(
            "query_model_counts",
            TimeRangePredicate::Closed,
            unit_name,
            start,
            end,
        )
    }

    fn query_model_counts_before(
        &self,
        unit_name: &str,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    ) -> RepositoryResult<Vec<ModelCountRow>> {
        self.fetch_model_counts(
            "query_model_counts_before",
            TimeRangePredicate::HalfOpen,
            unit_name,
            start,
            end_exclusive,
        )
    }
}
