//! Output utilities
//!
//! Logging setup and the reporter that turns restore notices into log lines.

pub mod logging;
mod reporter;

pub use reporter::TracingReporter;
