//! Error types for inventory operations.
//!
//! This module defines [`InventoryError`], the error returned to the command
//! line, plus the two narrower errors the cache refresh path distinguishes:
//!
//! - [`RemoteQueryError`] fails the invocation. Serving expired data would
//!   break the TTL the operator configured.
//! - [`CacheWriteError`] is reported and absorbed. A failed cache write only
//!   costs a rebuild on the next call.
//!
//! Cache *read* failures have no error type at all; they surface as a miss.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Configuration file named explicitly but not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The management server could not produce VM records.
    #[error(transparent)]
    RemoteQuery(#[from] RemoteQueryError),

    /// Inventory document could not be serialized or read back.
    #[error("Inventory JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure of the remote-query collaborator.
#[derive(Debug, Error)]
pub enum RemoteQueryError {
    /// Server unreachable, TLS failure, timeout.
    #[error("Could not connect to vSphere at {host}: {message}")]
    Connection { host: String, message: String },

    /// Credentials rejected.
    #[error("vSphere rejected the credentials for '{username}'")]
    Authentication { username: String },

    /// Request reached the server but the answer was unusable.
    #[error("vSphere query failed: {message}")]
    Query { message: String },
}

/// Failure to persist a snapshot.
#[derive(Debug, Error)]
#[error("Failed to write inventory cache at {path}: {source}")]
pub struct CacheWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = InventoryError::ConfigNotFound {
            path: PathBuf::from("/etc/vsphere-inventory.yml"),
        };
        assert!(err.to_string().contains("/etc/vsphere-inventory.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = InventoryError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn remote_query_error_is_transparent() {
        let err: InventoryError = RemoteQueryError::Authentication {
            username: "readonly".into(),
        }
        .into();
        assert!(matches!(err, InventoryError::RemoteQuery(_)));
        assert_eq!(
            err.to_string(),
            "vSphere rejected the credentials for 'readonly'"
        );
    }

    #[test]
    fn connection_error_displays_host() {
        let err = RemoteQueryError::Connection {
            host: "vcenter.local".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("vcenter.local"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn cache_write_error_keeps_source() {
        let err = CacheWriteError {
            path: PathBuf::from("/ro/cache.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/ro/cache.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InventoryError = io_err.into();
        assert!(matches!(err, InventoryError::Io(_)));
    }
}
