//! Error types for harbor-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from settings-store operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path context.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error (save path).
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `dirs::home_dir()` returned `None` — cannot derive default paths.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`SettingsError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.into(),
        source,
    }
}
