//! Restore classification and dispatch
//!
//! Decides, for each listed object, whether it needs a restore request and
//! sends one when it does.

use futures::TryStreamExt;

use crate::config::RunConfig;
use crate::error::Result;
use crate::lister::list_pages;
use crate::report::{Notice, Reporter};
use crate::traits::{ObjectRef, ObjectStore, RestoreRequest, RestoreStatus, StorageClass};

/// Storage class thaw restores from
pub const ARCHIVAL_CLASS: StorageClass = StorageClass::DeepArchive;

/// What to do with a listed object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not archived; ignored without a notice
    SkipWrongTier,
    /// A restored copy is already readable
    AlreadyRestored,
    /// A restore is running
    InProgress,
    /// No restore was requested yet
    NeedsRestore,
}

/// Classify an object by storage class and restore status
///
/// Rules are checked in order and the first match wins. A running restore
/// always reports `InProgress`, whatever its expiry date.
pub fn classify(storage_class: &StorageClass, status: Option<&RestoreStatus>) -> Disposition {
    if *storage_class != ARCHIVAL_CLASS {
        return Disposition::SkipWrongTier;
    }

    let Some(status) = status else {
        return Disposition::NeedsRestore;
    };

    match (status.in_progress.unwrap_or(false), status.expiry_date) {
        (false, None) => Disposition::NeedsRestore,
        (false, Some(_)) => Disposition::AlreadyRestored,
        (true, _) => Disposition::InProgress,
    }
}

/// Classify one object, report it and request a restore if needed
///
/// A failed restore request is reported as a warning and not returned.
pub async fn process_object(
    store: &dyn ObjectStore,
    config: &RunConfig,
    object: &ObjectRef,
    reporter: &dyn Reporter,
) -> Disposition {
    let key = object.key.as_str();
    let disposition = classify(&object.storage_class, object.restore_status.as_ref());

    match disposition {
        Disposition::SkipWrongTier => {}
        Disposition::AlreadyRestored => reporter.notice(Notice::Restored {
            key,
            expiry: object.restore_status.and_then(|s| s.expiry_date),
        }),
        Disposition::InProgress => reporter.notice(Notice::Restoring { key }),
        Disposition::NeedsRestore => dispatch(store, config, key, reporter).await,
    }

    disposition
}

async fn dispatch(store: &dyn ObjectStore, config: &RunConfig, key: &str, reporter: &dyn Reporter) {
    if config.dry_run {
        reporter.notice(Notice::WouldRestore { key });
        return;
    }

    reporter.notice(Notice::Requesting { key });

    let request = RestoreRequest::bulk(config.retention_days);
    if let Err(error) = store
        .restore_object(&config.path.bucket, key, request)
        .await
    {
        reporter.notice(Notice::RestoreFailed { key, error: &error });
    }
}

/// Scan every object under the configured path and restore what needs it
///
/// Objects are handled one at a time in listing order. A listing failure
/// aborts the run; restore failures do not.
pub async fn run(store: &dyn ObjectStore, config: &RunConfig, reporter: &dyn Reporter) -> Result<()> {
    reporter.notice(Notice::Started { path: &config.path });

    let pages = list_pages(store, &config.path.bucket, &config.path.prefix);
    futures::pin_mut!(pages);

    while let Some(objects) = pages.try_next().await? {
        for object in &objects {
            process_object(store, config, object, reporter).await;
        }
    }

    reporter.notice(Notice::Completed);
    Ok(())
}
