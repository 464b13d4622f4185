//! Storage path parsing
//!
//! Handles paths of the form `s3://bucket[/prefix]`.

use crate::error::{Error, Result};

/// URI scheme every storage path must start with
pub const SCHEME: &str = "s3://";

/// A parsed storage path: a bucket and an optional key prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    /// Bucket name
    pub bucket: String,
    /// Key prefix (empty for the whole bucket)
    pub prefix: String,
}

impl StoragePath {
    /// Create a new StoragePath
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }
}

impl std::fmt::Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.bucket, self.prefix)
    }
}

impl std::str::FromStr for StoragePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_storage_path(s)
    }
}

/// Parse a storage URI into bucket and prefix
///
/// The scheme is stripped and the rest is split on the first `/`.
/// Without a separator the prefix is empty.
pub fn parse_storage_path(path: &str) -> Result<StoragePath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("path is required".into()));
    }

    let rest = path
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::InvalidPath(format!("'{path}' must start with {SCHEME}")))?;

    let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));

    if bucket.is_empty() {
        return Err(Error::InvalidPath(format!(
            "'{path}' has no bucket. Use format: {SCHEME}bucket[/prefix]"
        )));
    }

    Ok(StoragePath::new(bucket, prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_and_prefix() {
        let path = parse_storage_path("s3://bucket/a/b").unwrap();
        assert_eq!(path.bucket, "bucket");
        assert_eq!(path.prefix, "a/b");
    }

    #[test]
    fn test_parse_bucket_only() {
        let path = parse_storage_path("s3://bucket").unwrap();
        assert_eq!(path.bucket, "bucket");
        assert_eq!(path.prefix, "");
    }

    #[test]
    fn test_parse_trailing_slash_kept_in_prefix() {
        let path = parse_storage_path("s3://bucket/folder/").unwrap();
        assert_eq!(path.prefix, "folder/");

        let path = parse_storage_path("s3://bucket/").unwrap();
        assert_eq!(path.bucket, "bucket");
        assert_eq!(path.prefix, "");
    }

    #[test]
    fn test_parse_missing_scheme() {
        let err = parse_storage_path("bucket/a/b").unwrap_err();
        assert!(err.to_string().contains("must start with s3://"));

        assert!(parse_storage_path("gs://bucket/a").is_err());
        assert!(parse_storage_path("S3://bucket/a").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_storage_path("").is_err());
    }

    #[test]
    fn test_parse_empty_bucket() {
        assert!(parse_storage_path("s3://").is_err());
        assert!(parse_storage_path("s3:///prefix").is_err());
    }

    #[test]
    fn test_display() {
        let path = StoragePath::new("bucket", "a/b");
        assert_eq!(path.to_string(), "s3://bucket/a/b");

        let path = StoragePath::new("bucket", "");
        assert_eq!(path.to_string(), "s3://bucket/");
    }

    #[test]
    fn test_from_str() {
        let path: StoragePath = "s3://logs/2024".parse().unwrap();
        assert_eq!(path, StoragePath::new("logs", "2024"));
    }
}
