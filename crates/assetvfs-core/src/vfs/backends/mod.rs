//! Asset backends.
//!
//! Backends implement [`AssetBackend`](super::AssetBackend) for different
//! storage types.

mod archive;
mod directory;
mod memory;

pub use archive::ArchiveBackend;
pub use directory::DirectoryBackend;
pub use memory::MemoryBackend;
