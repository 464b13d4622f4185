//! thaw-core: Core library for the thaw restore tool
//!
//! This crate provides the core functionality for thaw, including:
//! - Run configuration and the optional config file
//! - Storage path parsing
//! - ObjectStore trait for listing and restoring objects
//! - Restore classification and dispatch
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! so the whole restore pipeline can be tested against a mock store.

pub mod config;
pub mod error;
pub mod lister;
pub mod path;
pub mod report;
pub mod restore;
pub mod traits;

pub use config::{ClientSettings, Config, ConfigManager, RunConfig};
pub use error::{Error, Result};
pub use lister::list_pages;
pub use path::{StoragePath, parse_storage_path};
pub use report::{Notice, Reporter, expiry_label};
pub use restore::{Disposition, classify, process_object, run};
pub use traits::{
    ListOptions, ListPage, ObjectRef, ObjectStore, RestoreRequest, RestoreStatus, RetrievalTier,
    StorageClass,
};
