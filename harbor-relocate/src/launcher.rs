//! Launcher script patcher.
//!
//! Each supported OS family ships one launcher script that exports the
//! repository path for manual daemon starts outside the UI:
//!
//! ```text
//! <app_root>/ipfs-on-path/scripts/ipfs.sh              (posix)
//! <app_root>/ipfs-on-path/scripts/bin-win/ipfs.cmd     (windows)
//! ```
//!
//! Patching substitutes the single `IPFS_PATH` assignment line and preserves
//! every other byte, including CRLF endings in the `.cmd` variant. Zero or
//! multiple matching lines are rejected as ambiguous rather than risking a
//! corrupted script.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use harbor_core::types::REPO_ENV_VAR;

use crate::error::{patch_io, PatchError};

/// OS family selecting which launcher script gets patched. Only the variant
/// matching the host platform is ever touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    PosixLike,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::PosixLike
        }
    }
}

/// Location of the launcher script for `platform`, relative to the
/// installed application root. Pure, no I/O.
pub fn script_path(app_root: &Path, platform: Platform) -> PathBuf {
    let scripts = app_root.join("ipfs-on-path").join("scripts");
    match platform {
        Platform::Windows => scripts.join("bin-win").join("ipfs.cmd"),
        Platform::PosixLike => scripts.join("ipfs.sh"),
    }
}

/// Rewrite the one assignment line in the launcher script so it names
/// `new_path`. Windows form is unquoted; posix wraps the value in double
/// quotes to tolerate spaces.
pub fn patch_launcher_script(
    app_root: &Path,
    platform: Platform,
    new_path: &Path,
) -> Result<(), PatchError> {
    let script = script_path(app_root, platform);
    if !script.exists() {
        return Err(PatchError::ScriptMissing { path: script });
    }

    let contents = fs::read_to_string(&script).map_err(|e| patch_io(&script, e))?;

    // [^\r\n]* instead of .* so the \r of a CRLF ending survives the splice.
    let pattern = match platform {
        Platform::Windows => format!(r"(?m)^set {REPO_ENV_VAR}=[^\r\n]*"),
        Platform::PosixLike => format!(r"(?m)^export {REPO_ENV_VAR}=[^\r\n]*"),
    };
    let regex = Regex::new(&pattern).expect("hard-coded pattern compiles");

    let matches: Vec<_> = regex.find_iter(&contents).collect();
    if matches.len() != 1 {
        return Err(PatchError::AmbiguousAssignment {
            path: script,
            found: matches.len(),
        });
    }
    let found = matches[0];

    let replacement = match platform {
        Platform::Windows => format!("set {REPO_ENV_VAR}={}", new_path.display()),
        Platform::PosixLike => format!("export {REPO_ENV_VAR}=\"{}\"", new_path.display()),
    };

    // Byte-range splice, not a line rebuild: everything outside the matched
    // assignment stays byte-for-byte identical.
    let mut patched = String::with_capacity(contents.len() + replacement.len());
    patched.push_str(&contents[..found.start()]);
    patched.push_str(&replacement);
    patched.push_str(&contents[found.end()..]);

    fs::write(&script, patched).map_err(|e| patch_io(&script, e))?;
    tracing::debug!(
        script = %script.display(),
        path = %new_path.display(),
        "launcher script patched",
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
