//! Status reporting
//!
//! The restore pipeline never prints anything itself. It hands [`Notice`]s
//! to a [`Reporter`] supplied by the caller.

use jiff::Timestamp;

use crate::error::Error;
use crate::path::StoragePath;

/// Placeholder shown when a restored object has no expiry date
pub const NO_EXPIRY: &str = "N/A";

/// RFC 3339 expiry, or [`NO_EXPIRY`] when the service reported none
pub fn expiry_label(expiry: Option<Timestamp>) -> String {
    expiry.map_or_else(|| NO_EXPIRY.to_string(), |ts| ts.to_string())
}

/// Something worth telling the operator about
#[derive(Debug)]
pub enum Notice<'a> {
    /// Scanning is about to start
    Started { path: &'a StoragePath },
    /// Dry run: this object would get a restore request
    WouldRestore { key: &'a str },
    /// A restore request is being sent
    Requesting { key: &'a str },
    /// The object is already readable
    Restored {
        key: &'a str,
        expiry: Option<Timestamp>,
    },
    /// A restore is already running
    Restoring { key: &'a str },
    /// The restore request failed; the run continues
    RestoreFailed { key: &'a str, error: &'a Error },
    /// Every page has been processed
    Completed,
}

impl Notice<'_> {
    /// Whether the notice reports a problem
    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::RestoreFailed { .. })
    }
}

impl std::fmt::Display for Notice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Started { path } => write!(f, "Processing objects in {path}"),
            Notice::WouldRestore { key } => write!(f, "Would restore: {key}"),
            Notice::Requesting { key } => write!(f, "Requesting restoration: {key}"),
            Notice::Restored { key, expiry } => {
                write!(f, "Restored: {key}, until: {}", expiry_label(*expiry))
            }
            Notice::Restoring { key } => write!(f, "Restoring: {key}"),
            Notice::RestoreFailed { key, error } => write!(f, "Failed to restore {key}: {error}"),
            Notice::Completed => f.write_str("Processing complete."),
        }
    }
}

/// Receives status notices from a restore run
pub trait Reporter {
    fn notice(&self, notice: Notice<'_>);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Reporter that keeps every notice as text
    #[derive(Default)]
    pub(crate) struct RecordingReporter {
        pub(crate) lines: RefCell<Vec<String>>,
        pub(crate) warnings: RefCell<usize>,
    }

    impl RecordingReporter {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn notice(&self, notice: Notice<'_>) {
            if notice.is_warning() {
                *self.warnings.borrow_mut() += 1;
            }
            self.lines.borrow_mut().push(notice.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_with_expiry_is_rfc3339() {
        let expiry: Timestamp = "2024-03-01T12:00:00Z".parse().unwrap();
        let notice = Notice::Restored {
            key: "a.bin",
            expiry: Some(expiry),
        };
        assert_eq!(
            notice.to_string(),
            "Restored: a.bin, until: 2024-03-01T12:00:00Z"
        );
    }

    #[test]
    fn test_restored_without_expiry() {
        let notice = Notice::Restored {
            key: "a.bin",
            expiry: None,
        };
        assert_eq!(notice.to_string(), "Restored: a.bin, until: N/A");
    }

    #[test]
    fn test_started_shows_path() {
        let path = StoragePath::new("bucket", "folder");
        let notice = Notice::Started { path: &path };
        assert_eq!(notice.to_string(), "Processing objects in s3://bucket/folder");
    }

    #[test]
    fn test_only_failures_are_warnings() {
        let err = Error::Network("timeout".into());
        assert!(
            Notice::RestoreFailed {
                key: "k",
                error: &err
            }
            .is_warning()
        );
        assert!(!Notice::Restoring { key: "k" }.is_warning());
        assert!(!Notice::Completed.is_warning());
    }
}
