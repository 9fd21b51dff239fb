//! Asset backend trait.
//!
//! A backend is one read-only origin of assets: a directory, an archive, a
//! blob baked into the binary. The registry only ever talks to backends
//! through this trait.

use super::types::FileInfo;
use super::VfsResult;

/// Read-only asset source.
///
/// Paths are always relative to the backend's root: the registry strips the
/// matched prefix before calling in. Backends decide for themselves whether
/// a leading `/` or a `..` component means anything.
///
/// Implementations must be `Send + Sync` so a registry that is no longer
/// being mutated can serve queries from several threads. Any locking needed
/// for that is the backend's business.
pub trait AssetBackend: Send + Sync {
    /// Read a whole file.
    fn read_asset(&self, path: &str) -> VfsResult<Vec<u8>>;

    /// List the entries of a directory.
    ///
    /// `filter` is backend-defined; `None` means no filtering. The bundled
    /// backends treat it as an [`ExtensionFilter`](super::ExtensionFilter).
    fn file_listing(&self, path: &str, filter: Option<&str>) -> VfsResult<Vec<FileInfo>>;

    /// Get metadata for a single file or directory.
    fn file_info(&self, path: &str) -> VfsResult<FileInfo>;

    /// Human-readable description of the origin, for logs and `mounts`.
    fn describe(&self) -> String;
}
