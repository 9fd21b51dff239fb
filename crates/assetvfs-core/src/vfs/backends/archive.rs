//! Tar archive asset backend.
//!
//! The archive is read and indexed once at construction; lookups never touch
//! the file again.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::vfs::backend::AssetBackend;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::types::FileInfo;

use super::MemoryBackend;

/// Serves the regular files of a tar archive.
///
/// An optional inner prefix selects a subtree: with `"assets/"`, looking up
/// `shaders/a.glsl` reads the archive member `assets/shaders/a.glsl`. This
/// is how a packaged build exposes only its asset folder.
///
/// Directory members are not stored; directories are implied by the files
/// beneath them, so empty directories in the archive are invisible.
#[derive(Debug, Clone)]
pub struct ArchiveBackend {
    source: String,
    inner_prefix: String,
    files: MemoryBackend,
}

impl ArchiveBackend {
    /// Read and index the tar archive at `path`.
    pub fn open(path: impl AsRef<Path>) -> VfsResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(VfsError::from)?;
        Self::index(path.display().to_string(), bytes.as_slice())
    }

    /// Index a tar archive already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> VfsResult<Self> {
        Self::index(name.into(), bytes)
    }

    /// Only expose members under `prefix`.
    pub fn with_inner_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.inner_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}/", trimmed)
        };
        self
    }

    /// Number of regular files in the archive.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the archive held no regular files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn index(source: String, reader: impl Read) -> VfsResult<Self> {
        let mut archive = tar::Archive::new(reader);
        let mut files = MemoryBackend::new();

        let entries = archive
            .entries()
            .map_err(|e| VfsError::archive(format!("{}: failed to read entries: {}", source, e)))?;

        for entry in entries {
            let mut entry = entry
                .map_err(|e| VfsError::archive(format!("{}: bad entry: {}", source, e)))?;

            if !entry.header().entry_type().is_file() {
                continue;
            }

            let member = entry
                .path()
                .map_err(|e| VfsError::archive(format!("{}: bad entry path: {}", source, e)))?
                .to_string_lossy()
                .into_owned();
            let member = member.trim_start_matches("./").to_string();

            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).map_err(VfsError::from)?;
            files.insert(member, contents);
        }

        tracing::debug!(source = %source, files = files.len(), "indexed archive");
        Ok(Self {
            source,
            inner_prefix: String::new(),
            files,
        })
    }

    /// Map a backend-relative path to an archive member path.
    fn member(&self, path: &str) -> String {
        format!("{}{}", self.inner_prefix, path.trim_start_matches('/'))
    }

    /// Strip the inner prefix back off a member path.
    fn relative(&self, mut info: FileInfo) -> FileInfo {
        if let Some(rest) = info.full_name.strip_prefix(&self.inner_prefix) {
            info.full_name = rest.to_string();
        }
        info
    }
}

impl AssetBackend for ArchiveBackend {
    fn read_asset(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.files.read_asset(&self.member(path))
    }

    fn file_listing(&self, path: &str, filter: Option<&str>) -> VfsResult<Vec<FileInfo>> {
        let entries = self.files.file_listing(&self.member(path), filter)?;
        Ok(entries.into_iter().map(|info| self.relative(info)).collect())
    }

    fn file_info(&self, path: &str) -> VfsResult<FileInfo> {
        let info = self.files.file_info(&self.member(path))?;
        Ok(self.relative(info))
    }

    fn describe(&self) -> String {
        if self.inner_prefix.is_empty() {
            format!("archive: {}", self.source)
        } else {
            format!("archive: {} ({})", self.source, self.inner_prefix)
        }
    }
}
