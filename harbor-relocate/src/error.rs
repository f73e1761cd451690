//! Error types for harbor-relocate.

use std::path::PathBuf;

use thiserror::Error;

use harbor_core::SettingsError;

/// All failures from the directory mover.
///
/// The orchestrator treats every kind identically: abort the workflow and
/// leave the configuration untouched.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("source {path} does not exist or is not a directory")]
    SourceNotADirectory { path: PathBuf },

    #[error("destination {path} already exists")]
    DestinationExists { path: PathBuf },

    #[error("destination parent {path} does not exist")]
    ParentMissing { path: PathBuf },

    #[error("destination {destination} is inside source {source_path}")]
    DestinationInsideSource {
        source_path: PathBuf,
        destination: PathBuf,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree was copied completely but the old copy could not be removed.
    /// The destination is complete and the source is still intact.
    #[error("copied to destination but failed to remove source {path}: {source}")]
    SourceCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`MoveError::Io`].
pub(crate) fn move_io(path: impl Into<PathBuf>, source: std::io::Error) -> MoveError {
    MoveError::Io {
        path: path.into(),
        source,
    }
}

/// All failures from the launcher script patcher. Non-fatal to the overall
/// relocation outcome: the settings record is the primary launch mechanism.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("launcher script not found at {path}")]
    ScriptMissing { path: PathBuf },

    /// Zero or multiple assignment lines matched; patching would be
    /// ambiguous, so the script is left untouched.
    #[error("expected exactly one IPFS_PATH assignment line in {path}, found {found}")]
    AmbiguousAssignment { path: PathBuf, found: usize },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`PatchError::Io`].
pub(crate) fn patch_io(path: impl Into<PathBuf>, source: std::io::Error) -> PatchError {
    PatchError::Io {
        path: path.into(),
        source,
    }
}

/// Error reported by the external service lifecycle controller.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

/// Fatal relocation failures.
///
/// Launcher-patch and daemon-start failures are not listed here: they are
/// surfaced as warnings on a successful outcome instead.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("repository path {path} has no directory name to preserve")]
    InvalidRepositoryPath { path: PathBuf },

    #[error("settings error: {0}")]
    Config(#[from] SettingsError),

    #[error("failed to stop the daemon: {0}")]
    ServiceStop(#[source] ServiceError),

    #[error("failed to move the repository: {0}")]
    Move(#[from] MoveError),
}
