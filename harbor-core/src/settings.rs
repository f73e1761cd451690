//! Persisted settings store.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   config.json        (whole settings document — mode 0600)
//! ```
//!
//! The document holds the repository record plus whatever other keys the
//! desktop shell stores; unknown keys round-trip untouched through a
//! read/modify/write of the whole document. There are no partial-field
//! updates.
//!
//! # API pattern
//!
//! [`SettingsStore`] is the capability the relocation workflow depends on;
//! [`JsonSettings`] is the file-backed implementation. Constructors come in
//! two forms:
//! - `open_at(root, home)` — explicit roots; used in tests with `TempDir`
//! - `open(root)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call `open`; always use `open_at`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{io_err, SettingsError};
use crate::paths::{config_path, default_repository};
use crate::types::RepositoryConfig;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Read/write access to the persisted repository record.
///
/// Injected into the relocation workflow so it depends on a capability, not
/// a process-wide settings singleton; enables test doubles.
pub trait SettingsStore {
    fn repository(&self) -> Result<RepositoryConfig, SettingsError>;
    fn set_repository(&self, config: &RepositoryConfig) -> Result<(), SettingsError>;
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<RepositoryConfig>,

    /// Keys owned by other parts of the application. Preserved verbatim.
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl SettingsDocument {
    fn empty() -> Self {
        Self {
            repository: None,
            rest: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-file implementation
// ---------------------------------------------------------------------------

/// File-backed [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
    defaults: RepositoryConfig,
}

impl JsonSettings {
    /// Store rooted at `root`, default repository derived from `home`.
    pub fn open_at(root: &Path, home: &Path) -> Self {
        Self {
            path: config_path(root),
            defaults: RepositoryConfig::new(default_repository(home)),
        }
    }

    /// `open_at` convenience wrapper (uses `dirs::home_dir()`).
    pub fn open(root: &Path) -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::HomeNotFound)?;
        Ok(Self::open_at(root, &home))
    }

    /// The settings file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SettingsDocument, SettingsError> {
        if !self.path.exists() {
            return Ok(SettingsDocument::empty());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| io_err(&self.path, e))?;
        serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Atomic save: serialize → `.json.tmp` sibling → `chmod 0600` → `rename`.
    /// The `.tmp` lives in the same directory as the target (same filesystem,
    /// so the rename cannot cross devices).
    fn save(&self, document: &SettingsDocument) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut json = serde_json::to_string_pretty(document)?;
        json.push('\n');
        fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    /// Missing file or missing record means first run: the defaults apply.
    fn repository(&self) -> Result<RepositoryConfig, SettingsError> {
        let document = self.load()?;
        Ok(document.repository.unwrap_or_else(|| self.defaults.clone()))
    }

    fn set_repository(&self, config: &RepositoryConfig) -> Result<(), SettingsError> {
        let mut document = self.load()?;
        document.repository = Some(config.clone());
        self.save(&document)
    }
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), SettingsError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), SettingsError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
