use std::path::PathBuf;
use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while segmenting a file.
///
/// Every variant except `InvalidConfig` is scoped to a single file: callers
/// record it and move on to the next file.
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The grammar parser rejected the file
    #[error("Parse error in {path}: {reason}")]
    ParseFailure { path: String, reason: String },

    /// No strategy is registered for the file's extension
    #[error("Unsupported file kind for {path}: {extension:?}")]
    UnsupportedFileKind { path: String, extension: String },

    /// The file could not be read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse error category, used for per-run tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    ParseFailure,
    UnsupportedFileKind,
    Io,
    InvalidConfig,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "parse_failure",
            Self::UnsupportedFileKind => "unsupported_file_kind",
            Self::Io => "io",
            Self::InvalidConfig => "invalid_config",
        }
    }
}

impl ChunkerError {
    /// Create a parse error
    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported file kind error
    pub fn unsupported(path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFileKind {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ParseFailure { .. } => ErrorKind::ParseFailure,
            Self::UnsupportedFileKind { .. } => ErrorKind::UnsupportedFileKind,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
