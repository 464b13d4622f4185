//! Error types for thaw-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for thaw-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for thaw-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid storage path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid command-line or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file or SDK configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Authentication or permission error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Bucket or object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// Conflicting request, e.g. a restore that is already running
    #[error("Conflict: {0}")]
    Conflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::InvalidArgument(_) => 1, // UsageError
            Error::Config(_) | Error::Io(_) | Error::TomlParse(_) => 2, // ConfigError
            Error::Network(_) | Error::Conflict(_) | Error::General(_) => 3, // NetworkError
            Error::Auth(_) => 4,                                    // AuthError
            Error::NotFound(_) => 5,                                // NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidPath("test".into()).exit_code(), 1);
        assert_eq!(Error::InvalidArgument("test".into()).exit_code(), 1);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidPath("bucket/key".into());
        assert_eq!(err.to_string(), "Invalid path: bucket/key");

        let err = Error::NotFound("Bucket not found: archive".into());
        assert_eq!(err.to_string(), "Not found: Bucket not found: archive");
    }
}
