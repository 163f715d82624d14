// ==========================================
// ERP 产品目录 - SQL 性能观测
// ==========================================
// 基于 rusqlite profile 回调（每条语句完成时触发一次）:
// - 统计每个操作内执行的 SQL 条数
// - 超过阈值的慢 SQL 以 warn 级别输出
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = const { Cell::new(0) };
    static SQL_COUNT: Cell<u64> = const { Cell::new(0) };
    static SLOW_SQL_COUNT: Cell<u64> = const { Cell::new(0) };
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn truncate_sql(sql: &str, max_chars: usize) -> String {
    let s = sql.trim().replace('\n', " ");
    if s.chars().count() <= max_chars {
        return s;
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{}…", head)
}

/// 默认慢 SQL 阈值（毫秒）
pub const DEFAULT_SLOW_SQL_MS: u64 = 100;

/// SQL 观测开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl PerfSettings {
    /// 读取环境变量
    ///
    /// - `ERP_CATALOG_PERF_SQL=1` 开启（默认关闭）
    /// - `ERP_CATALOG_SLOW_SQL_MS=50` 慢 SQL 阈值（毫秒）
    pub fn from_env() -> Self {
        Self::parse(
            std::env::var("ERP_CATALOG_PERF_SQL").ok().as_deref(),
            std::env::var("ERP_CATALOG_SLOW_SQL_MS").ok().as_deref(),
        )
    }

    fn parse(enabled: Option<&str>, slow_sql_ms: Option<&str>) -> Self {
        Self {
            enabled: enabled.map(is_true).unwrap_or(false),
            slow_sql_ms: slow_sql_ms
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_SLOW_SQL_MS),
        }
    }
}

/// 按环境变量安装 SQLite 语句 profile
pub fn install_sqlite_tracing(conn: &mut Connection) {
    apply_settings(conn, PerfSettings::from_env());
}

/// 按给定设置安装（关闭时卸载回调）
pub fn apply_settings(conn: &mut Connection, settings: PerfSettings) {
    SLOW_SQL_THRESHOLD_MS.store(settings.slow_sql_ms, Ordering::Relaxed);

    // 旧版 profile 钩子会覆盖 trace 钩子，计数只放在 profile 中
    if settings.enabled {
        conn.profile(Some(sql_profile_callback));
    } else {
        conn.profile(None);
    }
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    let in_guard = PERF_DEPTH.with(|d| d.get() > 0);
    if in_guard {
        SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        tracing::warn!(
            target: "slow_sql",
            duration_ms = ms,
            sql = %truncate_sql(sql, 300),
            "慢 SQL"
        );
        if in_guard {
            SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
        }
    }
}

/// 操作级耗时统计，drop 时以 debug 输出耗时与 SQL 条数
///
/// ```ignore
/// let _perf = erp_catalog::perf::PerfGuard::new("import_reconcile");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
    slow_sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            slow_sql_start: SLOW_SQL_COUNT.with(|c| c.get()),
        }
    }
}

impl PerfGuard {
    /// 本 Guard 生命周期内已执行的 SQL 条数（未开启观测时为 0）
    pub fn sql_count(&self) -> u64 {
        SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = self.sql_count();
        let slow_sql_count = SLOW_SQL_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_sql_start);

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count,
            slow_sql_count,
            "操作完成"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_sql_multibyte() {
        let sql = "SELECT '产品' FROM erp_product";
        let short = truncate_sql(sql, 9);
        assert_eq!(short, "SELECT '产…");
        assert_eq!(truncate_sql("SELECT 1", 50), "SELECT 1");
    }

    #[test]
    fn test_settings_parse() {
        let settings = PerfSettings::parse(Some(" ON "), Some("25"));
        assert!(settings.enabled);
        assert_eq!(settings.slow_sql_ms, 25);

        let settings = PerfSettings::parse(Some("0"), Some("abc"));
        assert!(!settings.enabled);
        assert_eq!(settings.slow_sql_ms, DEFAULT_SLOW_SQL_MS);
    }

    #[test]
    fn test_guard_counts_statements_when_enabled() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_settings(
            &mut conn,
            PerfSettings {
                enabled: true,
                slow_sql_ms: 0,
            },
        );
        let guard = PerfGuard::new("test");
        conn.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();
        conn.execute("INSERT INTO t (x) VALUES (1)", []).unwrap();
        conn.execute("INSERT INTO t (x) VALUES (2)", []).unwrap();
        assert!(guard.sql_count() >= 3);
        drop(guard);
        apply_settings(
            &mut conn,
            PerfSettings {
                enabled: false,
                slow_sql_ms: DEFAULT_SLOW_SQL_MS,
            },
        );

        // 卸载后不再计数
        let guard = PerfGuard::new("test_disabled");
        conn.execute("INSERT INTO t (x) VALUES (3)", []).unwrap();
        assert_eq!(guard.sql_count(), 0);
    }
}
