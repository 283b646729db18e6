use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the archive core. Every variant carries the archive's
/// display name (or path) so callers can format per-archive diagnostics.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("corrupt archive '{name}': {reason}")]
    Corrupt { name: String, reason: String },

    /// Extension unrecognized, or recognized but the codec is compiled out.
    #[error("unsupported archive format: '{name}'")]
    UnsupportedFormat { name: String },

    #[error("entry '{entry}' not found in '{name}'")]
    EntryNotFound { name: String, entry: String },

    #[error("could not create directory '{}': {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected error reading '{name}': {reason}")]
    Unexpected { name: String, reason: String },
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Failures raised by the collaborator layer (registry + installer).
/// Archive failures pass through unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("load-order registry error: {0}")]
    Registry(String),

    #[error("no installable content found in '{0}'")]
    NoInstallableContent(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("not installed: '{0}'")]
    NotInstalled(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
