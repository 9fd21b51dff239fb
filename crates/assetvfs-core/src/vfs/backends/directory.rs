//! Directory asset backend.
//!
//! Serves files from a real directory, with path security to prevent
//! escaping the root directory.

use std::fs;
use std::path::PathBuf;

use crate::vfs::backend::AssetBackend;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::types::{join_path, ExtensionFilter, FileInfo};

/// Directory asset backend.
///
/// All lookups are relative to `root`. For example, if `root` is
/// `/usr/share/game/assets`, then `read_asset("shaders/a.glsl")` reads
/// `/usr/share/game/assets/shaders/a.glsl`.
///
/// Path security is enforced: attempts to escape via `..` or symlinks are
/// blocked.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    /// Create a backend rooted at the given path.
    ///
    /// A relative root is anchored to the current directory now. The root
    /// may not exist yet: lookups miss until it appears, then start working.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let root = dunce::canonicalize(&root)
            .or_else(|_| std::path::absolute(&root))
            .unwrap_or(root);
        Self { root }
    }

    /// Create a backend, failing unless `root` is an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> VfsResult<Self> {
        let root: PathBuf = root.into();
        let canonical = dunce::canonicalize(&root).map_err(VfsError::from)?;
        if !canonical.is_dir() {
            return Err(VfsError::not_a_directory(root.display().to_string()));
        }
        Ok(Self { root: canonical })
    }

    /// Resolve a relative path to a real path within the root, plus the
    /// normalized name it is reported under.
    ///
    /// The root is canonicalized on every call so symlinked roots (e.g.
    /// macOS `/tmp` → `/private/tmp`) and roots created after construction
    /// both compare correctly. Returns an error if the path escapes the root.
    fn resolve(&self, path: &str) -> VfsResult<(PathBuf, String)> {
        // A missing root is a plain miss
        let root = dunce::canonicalize(&self.root).map_err(VfsError::from)?;

        let path = path.trim_start_matches('/');
        let canonical = if path.is_empty() {
            root.clone()
        } else {
            // Resolves symlinks and ..; a missing file surfaces here as an
            // io NotFound.
            dunce::canonicalize(root.join(path)).map_err(VfsError::from)?
        };

        let Ok(relative) = canonical.strip_prefix(&root) else {
            return Err(VfsError::path_escapes_root(format!(
                "{} is not under {}",
                canonical.display(),
                root.display()
            )));
        };

        let name = if root.parent().is_none() {
            // Filesystem root: report the real absolute path
            canonical.to_string_lossy().into_owned()
        } else {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        };
        Ok((canonical, name))
    }

    /// Convert std::fs::Metadata to FileInfo.
    fn metadata_to_info(full_name: String, meta: &fs::Metadata) -> FileInfo {
        let info = if meta.is_dir() {
            FileInfo::directory(full_name)
        } else {
            FileInfo::file(full_name, meta.len())
        };
        info.with_writable(!meta.permissions().readonly())
            .with_mtime(meta.modified().ok())
    }
}

impl AssetBackend for DirectoryBackend {
    fn read_asset(&self, path: &str) -> VfsResult<Vec<u8>> {
        let (full_path, _) = self.resolve(path)?;
        if full_path.is_dir() {
            return Err(VfsError::is_a_directory(path));
        }
        fs::read(&full_path).map_err(VfsError::from)
    }

    fn file_listing(&self, path: &str, filter: Option<&str>) -> VfsResult<Vec<FileInfo>> {
        let (full_path, dir_name) = self.resolve(path)?;
        if !full_path.is_dir() {
            return Err(VfsError::not_a_directory(path));
        }

        let filter = ExtensionFilter::parse(filter);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&full_path).map_err(VfsError::from)? {
            let entry = entry.map_err(VfsError::from)?;
            // Follow symlinks so a linked directory lists as a directory
            let meta = match fs::metadata(entry.path()) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let info = Self::metadata_to_info(join_path(&dir_name, &name), &meta);
            if filter.accepts(&info) {
                entries.push(info);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn file_info(&self, path: &str) -> VfsResult<FileInfo> {
        let (full_path, name) = self.resolve(path)?;
        let meta = fs::metadata(&full_path).map_err(VfsError::from)?;
        Ok(Self::metadata_to_info(name, &meta))
    }

    fn describe(&self) -> String {
        format!("directory: {}", self.root.display())
    }
}
