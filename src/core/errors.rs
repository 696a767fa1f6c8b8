//! Shared error types for the generator

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while discovering, reading, or writing project files.
///
/// Duplicate or unsupported signatures are not errors at this level; they
/// are recorded as skip annotations in the generated output.
#[derive(Debug, Error)]
pub enum Error {
    /// No workspace file could be located
    #[error("Workspace not found (searched {})", searched.display())]
    WorkspaceNotFound { searched: PathBuf },

    /// A workspace file was found but could not be interpreted
    #[error("Invalid workspace {}: {message}", path.display())]
    Workspace { path: PathBuf, message: String },

    /// A source file listed for scanning does not exist
    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a workspace error for a malformed `.apw` file
    pub fn workspace(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Workspace {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error was caused by missing input rather than a failure
    /// of the file system itself.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::WorkspaceNotFound { .. } | Self::SourceNotFound { .. }
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_not_found_message_names_search_root() {
        let err = Error::WorkspaceNotFound {
            searched: PathBuf::from("/projects/lobby"),
        };
        assert_eq!(
            err.to_string(),
            "Workspace not found (searched /projects/lobby)"
        );
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_file_system_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_system("Failed to read", "main.axs", io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_missing_input());
    }
}
