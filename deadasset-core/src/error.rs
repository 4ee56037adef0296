//! Typed error handling for deadasset.
//!
//! Every failure the analyzer can hit is local: a single file that cannot be
//! read, a tracked-file query that fails, a bad config file. Library
//! consumers can match on the variant and decide whether to carry on.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deadasset operations.
#[derive(Error, Debug)]
pub enum DeadassetError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// File content is not valid UTF-8
    #[error("Decode error in {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Version-control query failed
    #[error("VCS error: {message}")]
    Vcs { message: String },

    /// Removal script could not be produced
    #[error("Script error at {path}: {message}")]
    Script { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DeadassetError {
    /// Create an I/O error with path context.
    ///
    /// Invalid UTF-8 surfaces from `read_to_string` as `InvalidData`; that
    /// case is reported as [`DeadassetError::Decode`] instead.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            return Self::decode(path, err.to_string());
        }
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a VCS error.
    pub fn vcs(message: impl Into<String>) -> Self {
        Self::Vcs {
            message: message.into(),
        }
    }

    /// Create a script error.
    pub fn script(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Script {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (analysis continues without the item).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Decode { .. } | Self::Vcs { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Decode { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::Script { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for deadasset results.
pub type DeadassetResult<T> = Result<T, DeadassetError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadassetResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadassetResult<T> {
        self.map_err(|e| DeadassetError::io(path, e))
    }
}
