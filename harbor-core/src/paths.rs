use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "config.json";

/// `<root>/config.json` — the persisted settings document.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// `<home>/.ipfs` — repository location used before the user ever moved it.
pub fn default_repository(home: &Path) -> PathBuf {
    home.join(".ipfs")
}
