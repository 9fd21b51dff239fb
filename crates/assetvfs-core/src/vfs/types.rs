//! Core VFS types.
//!
//! These types describe what backends hand back to the registry. They are
//! serializable so tooling can dump listings as JSON or RON.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl FileType {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }
}

/// Directory entry / file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Entry name (last path component).
    pub name: String,
    /// Path as the backend knows it (relative to the backend root).
    pub full_name: String,
    /// Whether the entry exists.
    pub exists: bool,
    /// Entry type.
    pub kind: FileType,
    /// Whether the underlying origin would accept writes. The VFS itself
    /// never writes.
    pub is_writable: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time, if the origin tracks one.
    pub mtime: Option<SystemTime>,
}

impl FileInfo {
    /// Create metadata for a file.
    pub fn file(full_name: impl Into<String>, size: u64) -> Self {
        let full_name = full_name.into();
        Self {
            name: base_name(&full_name).to_string(),
            full_name,
            exists: true,
            kind: FileType::File,
            is_writable: false,
            size,
            mtime: None,
        }
    }

    /// Create metadata for a directory.
    pub fn directory(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            name: base_name(&full_name).to_string(),
            full_name,
            exists: true,
            kind: FileType::Directory,
            is_writable: false,
            size: 0,
            mtime: None,
        }
    }

    /// Set the writable flag.
    pub fn with_writable(mut self, is_writable: bool) -> Self {
        self.is_writable = is_writable;
        self
    }

    /// Set the modification time.
    pub fn with_mtime(mut self, mtime: Option<SystemTime>) -> Self {
        self.mtime = mtime;
        self
    }

    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Last `/`-separated component of a path, ignoring a trailing slash.
pub(crate) fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Join a directory path and an entry name with a single `/`.
///
/// A bare `/` stays absolute: `join_path("/", "etc")` is `/etc`.
pub(crate) fn join_path(dir: &str, name: &str) -> String {
    match dir.trim_end_matches('/') {
        "" if dir.starts_with('/') => format!("/{}", name),
        "" => name.to_string(),
        dir => format!("{}/{}", dir, name),
    }
}

/// Extension filter shared by the bundled backends.
///
/// The filter string is a `:`-separated list of extensions without the
/// leading dot, e.g. `"png:jpg:"`. Matching ignores ASCII case. Directories
/// always pass so callers can keep descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Parse a filter. `None` and `""` both mean "accept everything".
    pub fn parse(filter: Option<&str>) -> Self {
        let extensions = filter
            .unwrap_or("")
            .split(':')
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_lowercase())
            .collect();
        Self { extensions }
    }

    /// Returns true if no extensions were given.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Check whether an entry passes the filter.
    pub fn accepts(&self, info: &FileInfo) -> bool {
        if self.is_empty() || info.is_dir() {
            return true;
        }
        match info.name.rsplit_once('.') {
            Some((_, ext)) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
