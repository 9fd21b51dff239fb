//! In-memory asset backend.
//!
//! Used for assets baked into the binary and for testing.

use std::collections::BTreeMap;

use crate::vfs::backend::AssetBackend;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::types::{join_path, ExtensionFilter, FileInfo};

/// In-memory asset backend.
///
/// Files are keyed by their relative path. Directories are implied by the
/// files beneath them and cannot exist empty. Contents are fixed once the
/// backend is registered.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl AsRef<str>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl AsRef<str>, data: impl Into<Vec<u8>>) {
        let key = Self::normalize(path.as_ref()).to_string();
        self.files.insert(key, data.into());
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files are held.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Strip leading and trailing slashes.
    fn normalize(path: &str) -> &str {
        path.trim_matches('/')
    }

    /// Returns true if any file lives under `dir`.
    fn is_directory(&self, dir: &str) -> bool {
        if dir.is_empty() {
            return true;
        }
        let prefix = format!("{}/", dir);
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(&prefix))
    }
}

impl AssetBackend for MemoryBackend {
    fn read_asset(&self, path: &str) -> VfsResult<Vec<u8>> {
        let normalized = Self::normalize(path);
        match self.files.get(normalized) {
            Some(data) => Ok(data.clone()),
            None if self.is_directory(normalized) => Err(VfsError::is_a_directory(normalized)),
            None => Err(VfsError::not_found(normalized)),
        }
    }

    fn file_listing(&self, path: &str, filter: Option<&str>) -> VfsResult<Vec<FileInfo>> {
        let normalized = Self::normalize(path);
        if self.files.contains_key(normalized) {
            return Err(VfsError::not_a_directory(normalized));
        }
        if !self.is_directory(normalized) {
            return Err(VfsError::not_found(normalized));
        }

        let prefix = if normalized.is_empty() {
            String::new()
        } else {
            format!("{}/", normalized)
        };

        // Direct children only; deeper files contribute their first component
        // as a directory.
        let mut children: BTreeMap<&str, FileInfo> = BTreeMap::new();
        for (key, data) in self.files.range(prefix.clone()..) {
            let Some(rest) = key.strip_prefix(&prefix) else {
                break;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children
                        .entry(dir)
                        .or_insert_with(|| FileInfo::directory(join_path(normalized, dir)));
                }
                None => {
                    children.insert(rest, FileInfo::file(key.as_str(), data.len() as u64));
                }
            }
        }

        let filter = ExtensionFilter::parse(filter);
        Ok(children
            .into_values()
            .filter(|info| filter.accepts(info))
            .collect())
    }

    fn file_info(&self, path: &str) -> VfsResult<FileInfo> {
        let normalized = Self::normalize(path);
        if let Some(data) = self.files.get(normalized) {
            return Ok(FileInfo::file(normalized, data.len() as u64));
        }
        if self.is_directory(normalized) {
            return Ok(FileInfo::directory(normalized));
        }
        Err(VfsError::not_found(normalized))
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryBackend {
        MemoryBackend::new()
            .with_file("shaders/a.glsl", "void main(){}")
            .with_file("shaders/b.frag", "frag")
            .with_file("ui/icons/logo.png", vec![0x89, b'P', b'N', b'G'])
            .with_file("readme.txt", "hi")
    }

    #[test]
    fn test_read() {
        let fs = sample();
        assert_eq!(fs.read_asset("shaders/a.glsl").unwrap(), b"void main(){}");
        assert_eq!(fs.read_asset("/readme.txt").unwrap(), b"hi");
    }

    #[test]
    fn test_read_missing() {
        let fs = sample();
        assert!(matches!(fs.read_asset("missing.txt"), Err(VfsError::NotFound(_))));
        assert!(matches!(fs.read_asset("shaders"), Err(VfsError::IsADirectory(_))));
    }

    #[test]
    fn test_listing_root() {
        let fs = sample();
        let entries = fs.file_listing("", None).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["readme.txt", "shaders", "ui"]);
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].full_name, "shaders");
    }

    #[test]
    fn test_listing_subdir() {
        let fs = sample();
        let entries = fs.file_listing("shaders", None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.glsl");
        assert_eq!(entries[0].full_name, "shaders/a.glsl");
        assert_eq!(entries[0].size, 13);

        let nested = fs.file_listing("ui/", None).unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name, "icons");
        assert!(nested[0].is_dir());
    }

    #[test]
    fn test_listing_filter() {
        let fs = sample();
        let entries = fs.file_listing("shaders", Some("glsl")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.glsl");

        // Directories survive any filter
        let root = fs.file_listing("", Some("png")).unwrap();
        let names: Vec<_> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["shaders", "ui"]);
    }

    #[test]
    fn test_listing_errors() {
        let fs = sample();
        assert!(matches!(fs.file_listing("readme.txt", None), Err(VfsError::NotADirectory(_))));
        assert!(matches!(fs.file_listing("sounds", None), Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_listing_ignores_sibling_prefix() {
        let fs = MemoryBackend::new()
            .with_file("ui/a.png", "a")
            .with_file("ui-old/b.png", "b");
        let entries = fs.file_listing("ui", None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.png");
    }

    #[test]
    fn test_file_info() {
        let fs = sample();
        let info = fs.file_info("shaders/a.glsl").unwrap();
        assert!(info.is_file());
        assert_eq!(info.size, 13);
        assert!(!info.is_writable);

        assert!(fs.file_info("ui/icons").unwrap().is_dir());
        assert!(fs.file_info("").unwrap().is_dir());
        assert!(fs.file_info("nope").is_err());
        assert!(fs.file_info("readme.txt").unwrap().is_file());
    }

    #[test]
    fn test_insert_replaces() {
        let mut fs = MemoryBackend::new();
        fs.insert("a.txt", "one");
        fs.insert("a.txt", "two");
        assert_eq!(fs.len(), 1);
        assert_eq!(fs.read_asset("a.txt").unwrap(), b"two");
        assert_eq!(fs.describe(), "memory (1 files)");
    }
}
