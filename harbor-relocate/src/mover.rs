//! Durable directory move — the atomic unit of the relocation workflow.
//!
//! Fast path is a single `rename`. When the destination sits on another
//! device the rename fails with EXDEV and we fall back to copy-then-delete,
//! with the guarantee that a failure partway through never leaves a partial
//! destination *and* a partial source: the partial destination is removed
//! and the source stays untouched.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{move_io, MoveError};

/// Move the entire tree rooted at `source` to `destination`.
///
/// Preconditions: `source` is a directory, `destination` is absent, the
/// destination's parent exists, and the destination is not inside the source.
pub fn move_dir(source: &Path, destination: &Path) -> Result<(), MoveError> {
    if !source.is_dir() {
        return Err(MoveError::SourceNotADirectory {
            path: source.to_path_buf(),
        });
    }
    if destination.exists() {
        return Err(MoveError::DestinationExists {
            path: destination.to_path_buf(),
        });
    }
    if destination.starts_with(source) {
        return Err(MoveError::DestinationInsideSource {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    match destination.parent() {
        Some(parent) if parent.is_dir() => {}
        Some(parent) => {
            return Err(MoveError::ParentMissing {
                path: parent.to_path_buf(),
            })
        }
        None => {
            return Err(MoveError::ParentMissing {
                path: destination.to_path_buf(),
            })
        }
    }

    match fs::rename(source, destination) {
        Ok(()) => {
            tracing::debug!(
                from = %source.display(),
                to = %destination.display(),
                "renamed directory in place",
            );
            Ok(())
        }
        Err(err) if is_cross_device(&err) => {
            tracing::debug!(
                from = %source.display(),
                to = %destination.display(),
                "rename crossed devices, falling back to copy",
            );
            copy_then_delete(source, destination)
        }
        Err(err) => Err(move_io(source, err)),
    }
}

/// EXDEV on unix, ERROR_NOT_SAME_DEVICE on windows.
fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    const CROSS_DEVICE: i32 = 18;
    #[cfg(windows)]
    const CROSS_DEVICE: i32 = 17;
    #[cfg(not(any(unix, windows)))]
    const CROSS_DEVICE: i32 = 18;

    err.raw_os_error() == Some(CROSS_DEVICE)
}

/// Copy the whole tree, then remove the source. A copy failure removes the
/// partial destination and leaves the source untouched; a source-removal
/// failure is its own error kind because the destination is already complete.
fn copy_then_delete(source: &Path, destination: &Path) -> Result<(), MoveError> {
    if let Err(err) = copy_tree(source, destination) {
        let _ = fs::remove_dir_all(destination);
        return Err(err);
    }
    fs::remove_dir_all(source).map_err(|err| MoveError::SourceCleanup {
        path: source.to_path_buf(),
        source: err,
    })
}

fn copy_tree(source: &Path, destination: &Path) -> Result<(), MoveError> {
    fs::create_dir(destination).map_err(|e| move_io(destination, e))?;
    for entry in fs::read_dir(source).map_err(|e| move_io(source, e))? {
        let entry = entry.map_err(|e| move_io(source, e))?;
        let ty = entry.file_type().map_err(|e| move_io(entry.path(), e))?;
        let target = destination.join(entry.file_name());
        if ty.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            // fs::copy preserves permissions; symlinks are copied by content.
            fs::copy(entry.path(), &target).map_err(|e| move_io(entry.path(), e))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
