// ==========================================
// SQL statement tracing
// ==========================================
// rusqlite trace/profile hooks: statement count per report operation and
// a warn log for slow statements. Each report logs its scope (period or
// lot code) and how many rows it produced.
// ==========================================

use crate::config::PerfSettings;
use crate::domain::DateRange;
use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static PERF_SQL_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static OPERATION_DEPTH: Cell<u32> = const { Cell::new(0) };
    static STATEMENT_COUNT: Cell<u64> = const { Cell::new(0) };
    static SLOW_STATEMENT_COUNT: Cell<u64> = const { Cell::new(0) };
}

fn one_line(sql: &str, max_len: usize) -> String {
    let s = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s,
    }
}

/// Install (or clear) the statement hooks on a connection
///
/// The switches are process-wide; the hooks themselves are per connection.
pub fn install_sqlite_tracing(conn: &mut Connection, settings: &PerfSettings) {
    PERF_SQL_ENABLED.store(settings.enabled, Ordering::Relaxed);

    if !settings.enabled {
        // reused connections must not keep an old callback
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_SQL_THRESHOLD_MS.store(settings.slow_sql_ms, Ordering::Relaxed);
    conn.trace(Some(on_statement));
    conn.profile(Some(on_statement_done));
}

fn on_statement(_sql: &str) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    if OPERATION_DEPTH.with(|d| d.get() == 0) {
        return;
    }
    STATEMENT_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

fn on_statement_done(sql: &str, duration: Duration) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %one_line(sql, 400),
        "slow sql"
    );
    if OPERATION_DEPTH.with(|d| d.get() > 0) {
        SLOW_STATEMENT_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// Per-report guard: logs elapsed time, statements run, and rows produced
///
/// ```ignore
/// let mut perf = steelworks_ops::perf::PerfGuard::for_lot("lot_report", "LOT-1");
/// // queries...
/// perf.rows(report.defects.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    scope: Option<String>,
    rows: Option<usize>,
    start: Instant,
    statements_at_start: u64,
    slow_at_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        OPERATION_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            scope: None,
            rows: None,
            start: Instant::now(),
            statements_at_start: STATEMENT_COUNT.with(|c| c.get()),
            slow_at_start: SLOW_STATEMENT_COUNT.with(|c| c.get()),
        }
    }

    /// Report over a reporting period
    pub fn for_range(op: &'static str, range: &DateRange) -> Self {
        let mut guard = Self::new(op);
        guard.scope = Some(range.to_string());
        guard
    }

    /// Drill-down into one lot
    pub fn for_lot(op: &'static str, lot_code: &str) -> Self {
        let mut guard = Self::new(op);
        guard.scope = Some(format!("lot {}", lot_code));
        guard
    }

    /// Row count of the finished report; unset when the report failed
    pub fn rows(&mut self, count: usize) {
        self.rows = Some(count);
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = STATEMENT_COUNT
            .with(|c| c.get())
            .saturating_sub(self.statements_at_start);
        let slow_sql_count = SLOW_STATEMENT_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_at_start);

        tracing::debug!(
            target: "perf",
            op = self.op,
            scope = self.scope.as_deref().unwrap_or("-"),
            rows = self.rows,
            elapsed_ms,
            sql_count,
            slow_sql_count,
            "done"
        );

        OPERATION_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
