//! Tracing-backed reporter
//!
//! Restore notices become info lines, failed restores become warnings.

use console::{Emoji, Term};
use thaw_core::{Notice, Reporter, expiry_label};

static WOULD_RESTORE: Emoji<'static, 'static> = Emoji("🔍 ", "");
static REQUESTING: Emoji<'static, 'static> = Emoji("🚀 ", "");
static RESTORED: Emoji<'static, 'static> = Emoji("✅ ", "");
static UNTIL: Emoji<'static, 'static> = Emoji("⌛ ", "");
static RESTORING: Emoji<'static, 'static> = Emoji("🏗️ ", "");
static NONE: Emoji<'static, 'static> = Emoji("", "");

/// Reporter that writes each notice through `tracing`
#[derive(Debug, Clone, Copy)]
pub struct TracingReporter {
    emoji: bool,
}

impl TracingReporter {
    /// Use emoji icons when stdout supports them
    pub fn new() -> Self {
        Self {
            emoji: Term::stdout().features().wants_emoji(),
        }
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn icon(notice: &Notice<'_>) -> &'static Emoji<'static, 'static> {
    match notice {
        Notice::WouldRestore { .. } => &WOULD_RESTORE,
        Notice::Requesting { .. } => &REQUESTING,
        Notice::Restored { .. } => &RESTORED,
        Notice::Restoring { .. } => &RESTORING,
        _ => &NONE,
    }
}

/// Render a notice as one log line, with or without emoji
fn render(notice: &Notice<'_>, emoji: bool) -> String {
    let pick = |e: &Emoji<'static, 'static>| if emoji { e.0 } else { e.1 };

    match notice {
        Notice::Restored { key, expiry } => format!(
            "{}Restored: {key}, {}until: {}",
            pick(&RESTORED),
            pick(&UNTIL),
            expiry_label(*expiry)
        ),
        _ => format!("{}{notice}", pick(icon(notice))),
    }
}

impl Reporter for TracingReporter {
    fn notice(&self, notice: Notice<'_>) {
        let line = render(&notice, self.emoji);
        if notice.is_warning() {
            tracing::warn!("{line}");
        } else {
            tracing::info!("{line}");
        }
    }
}
