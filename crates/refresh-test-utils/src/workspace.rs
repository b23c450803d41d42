//! [`TestWorkspace`] builder for refresh test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary multi-package project with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use refresh_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.shared_folder("shared", &["shared-1.0.0.tgz"]);
/// ws.target_folder("user/functions/user-core", true, true);
/// ws.write_manifest("shared = [\"shared\"]\ntargets = [\"user/functions/user-core\"]\n");
/// ws.assert_exists("user/functions/user-core/node_modules");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary project root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestWorkspace::new: failed to create temp dir"),
        }
    }

    /// Root path of the temporary project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` below the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Create a shared library folder with a `package.json` and the given
    /// archive files.
    pub fn shared_folder(&self, folder: &str, archives: &[&str]) -> PathBuf {
        let dir = self.path(folder);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("shared_folder: failed to create {}: {e}", dir.display()));
        fs::write(dir.join("package.json"), "{\"name\": \"shared\", \"version\": \"1.0.0\"}")
            .unwrap_or_else(|e| panic!("shared_folder: failed to write package.json: {e}"));
        for archive in archives {
            fs::write(dir.join(archive), "old archive")
                .unwrap_or_else(|e| panic!("shared_folder: failed to write {archive}: {e}"));
        }
        dir
    }

    /// Create an installable target folder, optionally with a populated
    /// `node_modules` and a `package-lock.json`.
    pub fn target_folder(&self, folder: &str, with_cache: bool, with_lock: bool) -> PathBuf {
        let dir = self.path(folder);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("target_folder: failed to create {}: {e}", dir.display()));
        fs::write(dir.join("package.json"), "{\"name\": \"target\"}")
            .unwrap_or_else(|e| panic!("target_folder: failed to write package.json: {e}"));
        if with_cache {
            let dep = dir.join("node_modules").join("stale-dep");
            fs::create_dir_all(&dep)
                .unwrap_or_else(|e| panic!("target_folder: failed to create cache: {e}"));
            fs::write(dep.join("index.js"), "module.exports = 1;")
                .unwrap_or_else(|e| panic!("target_folder: failed to write cache file: {e}"));
        }
        if with_lock {
            fs::write(dir.join("package-lock.json"), "{\"lockfileVersion\": 3}")
                .unwrap_or_else(|e| panic!("target_folder: failed to write lock file: {e}"));
        }
        dir
    }

    /// Put a non-empty directory where `folder`'s `package-lock.json`
    /// belongs. Deleting it as a file fails, even for root.
    pub fn undeletable_lock_file(&self, folder: &str) -> PathBuf {
        let lock = self.path(folder).join("package-lock.json");
        fs::create_dir_all(lock.join("nested")).unwrap_or_else(|e| {
            panic!("undeletable_lock_file: failed to create {}: {e}", lock.display())
        });
        fs::write(lock.join("nested").join("keep"), "")
            .unwrap_or_else(|e| panic!("undeletable_lock_file: failed to write marker: {e}"));
        lock
    }

    /// Write `refresh.toml` at the root.
    pub fn write_manifest(&self, content: &str) -> PathBuf {
        let path = self.path("refresh.toml");
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_manifest: failed to write refresh.toml: {e}"));
        path
    }

    /// File names in `folder` ending in `.{extension}`, sorted.
    pub fn files_with_extension(&self, folder: &str, extension: &str) -> Vec<String> {
        let suffix = format!(".{extension}");
        let mut names: Vec<String> = fs::read_dir(self.path(folder))
            .unwrap_or_else(|e| panic!("files_with_extension: cannot read {folder}: {e}"))
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(&suffix))
            .collect();
        names.sort();
        names
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }
}
