//! ObjectStore trait definition
//!
//! This trait defines the listing and restore operations thaw needs.
//! It allows the restore pipeline to be decoupled from the S3 SDK.

use async_trait::async_trait;
use jiff::Timestamp;

use crate::error::Result;

/// Storage class reported for a listed object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageClass {
    /// Standard storage (also used when the listing omits the class)
    #[default]
    Standard,
    /// Deep Archive: must be restored before the data can be read
    DeepArchive,
    /// Any other storage class, by its S3 name
    Other(String),
}

impl StorageClass {
    /// Map an S3 storage class name
    pub fn from_name(name: &str) -> Self {
        match name {
            "STANDARD" => Self::Standard,
            "DEEP_ARCHIVE" => Self::DeepArchive,
            other => Self::Other(other.to_string()),
        }
    }

    /// S3 name of this storage class
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "STANDARD",
            Self::DeepArchive => "DEEP_ARCHIVE",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restore state attached to a listed object
///
/// Only present when a restore was requested at some point. `in_progress`
/// keeps "not reported" apart from an explicit `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoreStatus {
    /// Whether a restore is currently running
    pub in_progress: Option<bool>,
    /// When the restored copy expires
    pub expiry_date: Option<Timestamp>,
}

impl RestoreStatus {
    /// A restore that is still running
    pub fn in_progress() -> Self {
        Self {
            in_progress: Some(true),
            expiry_date: None,
        }
    }

    /// A finished restore whose copy is readable until `expiry`
    pub fn restored_until(expiry: Timestamp) -> Self {
        Self {
            in_progress: Some(false),
            expiry_date: Some(expiry),
        }
    }
}

/// An object produced by a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Object key
    pub key: String,
    /// Storage class
    pub storage_class: StorageClass,
    /// Restore status, `None` when no restore was ever requested
    pub restore_status: Option<RestoreStatus>,
}

impl ObjectRef {
    /// Create an ObjectRef without restore status
    pub fn new(key: impl Into<String>, storage_class: StorageClass) -> Self {
        Self {
            key: key.into(),
            storage_class,
            restore_status: None,
        }
    }

    /// Attach a restore status
    pub fn with_restore_status(mut self, status: RestoreStatus) -> Self {
        self.restore_status = Some(status);
        self
    }
}

/// Retrieval speed for a restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalTier {
    /// Slowest and cheapest
    #[default]
    Bulk,
    /// Default S3 retrieval speed
    Standard,
    /// Fastest; not available for Deep Archive
    Expedited,
}

impl RetrievalTier {
    /// S3 name of this tier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bulk => "Bulk",
            Self::Standard => "Standard",
            Self::Expedited => "Expedited",
        }
    }
}

/// Parameters of a restore request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreRequest {
    /// Days the restored copy stays available
    pub days: u32,
    /// Retrieval speed
    pub tier: RetrievalTier,
}

impl RestoreRequest {
    /// A bulk-tier restore kept for `days`
    pub fn bulk(days: u32) -> Self {
        Self {
            days,
            tier: RetrievalTier::Bulk,
        }
    }
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Key prefix to filter by
    pub prefix: Option<String>,

    /// Ask the service to include each object's restore status
    ///
    /// Without it `restore_status` is always `None`.
    pub include_restore_status: bool,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,

    /// Maximum number of keys to return per request
    pub max_keys: Option<i32>,
}

/// One page of a listing
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Objects on this page, in listing order
    pub objects: Vec<ObjectRef>,

    /// Whether more pages follow
    pub truncated: bool,

    /// Token to request the next page
    pub next_continuation_token: Option<String>,
}

/// Trait for the storage operations thaw performs
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage>;

    /// Start restoring an archived object
    ///
    /// Returns once the service accepted the request; completion is not awaited.
    async fn restore_object(&self, bucket: &str, key: &str, request: RestoreRequest)
    -> Result<()>;
}
