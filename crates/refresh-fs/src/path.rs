//! Forward-slash paths and manifest folder fragments

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// An absolute or root-relative path stored with `/` separators.
///
/// Folder fragments in a refresh manifest are written with forward slashes
/// regardless of platform. Joining them onto the project root through
/// `NormalizedPath` keeps log output identical everywhere; conversion to a
/// platform-native path only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native form for filesystem calls.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment`, which may itself contain several components.
    ///
    /// Leading separators on `segment` are ignored, so the result always
    /// stays below `self`. An empty segment returns `self` unchanged.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        if segment.is_empty() {
            return self.clone();
        }

        let mut inner = self.inner.clone();
        if !inner.ends_with('/') {
            inner.push('/');
        }
        inner.push_str(segment);
        Self { inner }
    }

    /// Last component, ignoring a trailing separator.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        let name = trimmed.rsplit_once('/').map_or(trimmed, |(_, name)| name);
        (!name.is_empty()).then_some(name)
    }

    /// Text after the last `.` of the file name. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let (stem, extension) = self.file_name()?.rsplit_once('.')?;
        (!stem.is_empty()).then_some(extension)
    }

    pub fn exists(&self) -> bool {
        Path::new(&self.inner).exists()
    }

    pub fn is_dir(&self) -> bool {
        Path::new(&self.inner).is_dir()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Validate a folder fragment from a manifest and return its canonical form.
///
/// Fragments are relative to the project root. Backslashes become forward
/// slashes, empty and `.` segments are dropped. Absolute paths, drive-letter
/// prefixes and `..` segments are rejected so a manifest can never point a
/// deletion outside the project root.
pub fn validate_folder_fragment(fragment: &str) -> Result<String> {
    let normalized = fragment.trim().replace('\\', "/");

    if normalized.starts_with('/') {
        return Err(Error::invalid_fragment(fragment, "must be relative to the project root"));
    }
    if has_drive_prefix(&normalized) {
        return Err(Error::invalid_fragment(fragment, "must not carry a drive prefix"));
    }

    let mut segments = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(Error::invalid_fragment(fragment, "must not contain '..'")),
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(Error::invalid_fragment(
            fragment,
            "must name a folder below the project root",
        ));
    }

    Ok(segments.join("/"))
}

// `C:` or `C:/...`; a colon is an ordinary character in `a:b/pkg`
fn has_drive_prefix(s: &str) -> bool {
    match s.as_bytes() {
        [drive, b':'] => drive.is_ascii_alphabetic(),
        [drive, b':', b'/', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}
