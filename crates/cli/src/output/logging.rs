//! Logging setup
//!
//! Log lines go to stdout with a local `YYYY-MM-DD HH:MM:SS` timestamp.

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Timestamp layout for log lines
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time rendered with [`TIME_FORMAT`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", jiff::Zoned::now().strftime(TIME_FORMAT))
    }
}

/// Filter used when RUST_LOG is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,thaw=debug,thaw_cli=debug,thaw_core=debug,thaw_s3=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_timer(LocalTime)
                .with_target(false),
        )
        .with(filter)
        .init();
}
