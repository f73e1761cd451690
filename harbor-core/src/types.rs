//! Domain types for the Harbor control surface.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Repository configuration
// ---------------------------------------------------------------------------

/// Persisted record naming the daemon's on-disk data directory.
///
/// Invariant: `path` always points at a directory that either currently
/// holds the repository contents or has never been initialized (first run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Absolute path to the repository directory.
    pub path: PathBuf,
}

impl RepositoryConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

// ---------------------------------------------------------------------------
// Service state
// ---------------------------------------------------------------------------

/// Lifecycle state of the background daemon, as pushed to the menu UI.
///
/// Owned by the service controller; the relocation workflow only observes
/// it through the success or failure of `stop()`/`start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    #[default]
    Uninitialized,
    Running,
    Starting,
    Stopping,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Uninitialized => write!(f, "uninitialized"),
            ServiceState::Running => write!(f, "running"),
            ServiceState::Starting => write!(f, "starting"),
            ServiceState::Stopping => write!(f, "stopping"),
        }
    }
}

// ---------------------------------------------------------------------------
// Relocation request
// ---------------------------------------------------------------------------

/// One relocation attempt: where the repository lives now, the parent
/// directory the user picked, and the derived destination.
///
/// The destination keeps the repository's directory name, so sibling
/// relocations never silently rename the repository folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRequest {
    pub current: PathBuf,
    pub parent: PathBuf,
    pub target: PathBuf,
}

impl RelocationRequest {
    /// Derive `target = parent/basename(current)`.
    ///
    /// Returns `None` when `current` has no final component (e.g. `/`),
    /// since there is no repository folder name to preserve.
    pub fn derive(current: impl Into<PathBuf>, parent: impl Into<PathBuf>) -> Option<Self> {
        let current = current.into();
        let parent = parent.into();
        let name = current.file_name()?;
        let target = parent.join(name);
        Some(Self {
            current,
            parent,
            target,
        })
    }

    /// True when the derived destination is the repository's current home.
    pub fn is_noop(&self) -> bool {
        self.target == self.current
    }
}

/// Shared by both launcher scripts: the variable the daemon reads to find
/// its repository when launched outside the UI.
pub const REPO_ENV_VAR: &str = "IPFS_PATH";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
