// ==========================================
// 产线 OEE 指标 - SQLite 连接初始化
// ==========================================
// 目标:
// - 生产记录为只读数据源，统一以只读方式打开
// - 统一 busy_timeout，避免与写入方并发时的偶发 busy 错误
// ==========================================

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一参数
///
/// busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
///
/// 文件不存在时直接失败（不会创建空库）
pub fn open_read_only_connection(db_path: &Path, busy_timeout_ms: u64) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(db_path, flags)?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    Ok(conn)
}
