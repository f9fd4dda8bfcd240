// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber
// Level filter from RUST_LOG, output format from STEELWORKS_LOG_FORMAT
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the output format (`text` | `json`)
pub const LOG_FORMAT_ENV: &str = "STEELWORKS_LOG_FORMAT";

/// Initialise the global subscriber
///
/// # Environment
/// - RUST_LOG: filter directive (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=steelworks_ops=trace
/// - STEELWORKS_LOG_FORMAT=json: one JSON object per line
///
/// Logs go to stderr so report output on stdout stays machine-readable.
///
/// # Example
/// ```no_run
/// use steelworks_ops::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init();
    }
}

/// Subscriber for tests: debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
