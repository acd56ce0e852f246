//! Path resolution and raw file I/O.
//!
//! Everything here deals in bytes, strings and paths; encoding lives in
//! [`codec`](crate::codec). Every `std::io::Error` is wrapped in
//! [`ConflowError::IoError`] together with the path it happened on.
//!
//! Reads distinguish "missing" from "broken": [`read_optional`] returns
//! `Ok(None)` only for `NotFound`, so a permission error on an existing file is
//! never mistaken for an absent one (which would cause a default to be written
//! over it).

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::ConflowError;
use crate::types::{Location, WriteMode};

/// Resolve a [`Location`] to a concrete directory.
///
/// `app_name` is used by `Location::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the location cannot be resolved (e.g. no home directory found).
pub fn resolve_location(location: &Location, app_name: &str) -> Option<PathBuf> {
    match location {
        Location::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        Location::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        Location::Cwd => std::env::current_dir().ok(),
        Location::Path(p) => Some(p.clone()),
    }
}

/// Resolve `{location}/{file_name}`, or fail with [`ConflowError::UnresolvedLocation`].
pub fn resolve_file_path(
    location: &Location,
    app_name: &str,
    file_name: &str,
) -> Result<PathBuf, ConflowError> {
    resolve_location(location, app_name)
        .map(|dir| dir.join(file_name))
        .ok_or_else(|| ConflowError::UnresolvedLocation(format!("{location:?} for {app_name}")))
}

/// Read a file's raw bytes. A missing file yields `Ok(None)`.
///
/// Bytes are returned undecoded so that content which is not valid UTF-8 is
/// reported as a decode failure by the caller, not as an I/O error.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, ConflowError> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConflowError::io(path, e)),
    }
}

/// Create a file that does not exist yet, creating parent directories as needed.
///
/// Fails if the file appeared in the meantime rather than overwriting it. A
/// file that could not be fully written is removed again.
pub fn create_new(path: &Path, content: &str) -> Result<(), ConflowError> {
    ensure_parent(path)?;

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| ConflowError::io(path, e))?;
    fill_new(file, path, content)
}

fn fill_new<W: Write>(mut writer: W, path: &Path, content: &str) -> Result<(), ConflowError> {
    if let Err(e) = writer.write_all(content.as_bytes()).and_then(|()| writer.flush()) {
        drop(writer);
        // Best effort: the write error is the one worth reporting.
        let _ = std::fs::remove_file(path);
        return Err(ConflowError::io(path, e));
    }
    Ok(())
}

/// Replace the contents of `path` according to `mode`.
pub fn write(path: &Path, content: &str, mode: WriteMode) -> Result<(), ConflowError> {
    match mode {
        WriteMode::Truncate => write_truncate(path, content),
        WriteMode::Atomic => write_atomic(path, content),
    }
}

fn write_truncate(path: &Path, content: &str) -> Result<(), ConflowError> {
    std::fs::write(path, content).map_err(|e| ConflowError::io(path, e))
}

/// Write through a sibling temp file and rename it into place.
///
/// A symlinked target is resolved first so the link itself survives, and the
/// target's permissions are copied onto the temp file before the rename.
fn write_atomic(path: &Path, content: &str) -> Result<(), ConflowError> {
    let (target, existing) = match std::fs::canonicalize(path) {
        Ok(resolved) => {
            let meta = std::fs::metadata(&resolved).map_err(|e| ConflowError::io(&resolved, e))?;
            (resolved, Some(meta.permissions()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (path.to_path_buf(), None),
        Err(e) => return Err(ConflowError::io(path, e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConflowError::io(dir, e))?;
    write_synced(tmp.as_file_mut(), content).map_err(|e| ConflowError::io(tmp.path(), e))?;

    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(|e| ConflowError::io(tmp.path(), e))?;
    }

    tmp.persist(&target).map_err(|e| ConflowError::io(&target, e.error))?;
    Ok(())
}

fn write_synced(file: &mut std::fs::File, content: &str) -> std::io::Result<()> {
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

fn ensure_parent(path: &Path) -> Result<(), ConflowError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConflowError::io(parent, e))?;
    }
    Ok(())
}
