//! Filesystem operations used by the refresh steps

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Replace `path` with `content` in one step.
///
/// The bytes go to a hidden sibling file first, under an exclusive `fs2`
/// lock, and are synced before the sibling is renamed over `path`. A reader
/// sees either the old file or the complete new one. Missing parent
/// directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let staging = staging_path(&target);
    let lock_failed = |_| Error::LockFailed {
        path: target.clone(),
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&staging)
        .map_err(|e| Error::io(&staging, e))?;
    file.lock_exclusive().map_err(lock_failed)?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(&staging, e))?;
    FileExt::unlock(&file).map_err(lock_failed)?;
    drop(file);

    fs::rename(&staging, &target).map_err(|e| Error::io(&target, e))?;
    tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    Ok(())
}

// Sibling of `target` so the final rename never crosses filesystems
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.refresh-tmp", std::process::id()))
}

pub fn read_text(path: &NormalizedPath) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path.to_native(), e))
}

pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Delete a single file.
///
/// Fails if the path is missing or is a directory; callers check existence
/// first.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::debug!(path = %path, "removed file");
    Ok(())
}

/// Recursively delete a directory tree.
///
/// The first entry that cannot be removed aborts the deletion and is
/// reported; the remainder of the tree is left in place.
pub fn remove_dir_tree(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::debug!(path = %path, "removed directory tree");
    Ok(())
}

/// Remove whatever occupies `path`: a directory tree or a single file.
pub fn remove_entry(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    let metadata = fs::symlink_metadata(&native_path).map_err(|e| Error::io(&native_path, e))?;
    if metadata.is_dir() {
        remove_dir_tree(path)
    } else {
        remove_file(path)
    }
}

/// List the files directly inside `dir` whose extension is `extension`.
///
/// The match is exact and case-sensitive, the listing is not recursive and
/// directories are never returned even if their name matches. Results are
/// sorted by file name.
pub fn list_files_with_extension(
    dir: &NormalizedPath,
    extension: &str,
) -> Result<Vec<NormalizedPath>> {
    let native_dir = dir.to_native();
    let entries = fs::read_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .map(|ext| ext == extension)
            .unwrap_or(false);
        if matches {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names.iter().map(|name| dir.join(name)).collect())
}

/// Resolve `path` to an absolute directory.
///
/// Uses `dunce` so Windows results do not carry the `\\?\` verbatim prefix.
pub fn canonicalize_dir(path: &Path) -> Result<PathBuf> {
    let canonical = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
    if !canonical.is_dir() {
        return Err(Error::io(
            &canonical,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }
    Ok(canonical)
}
