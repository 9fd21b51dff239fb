//! Read-only virtual filesystem overlay.
//!
//! Key components:
//!
//! - [`AssetBackend`] - Trait implemented by every asset source
//! - [`AssetRegistry`] - Routes lookups to backends by literal path prefix
//! - [`MemoryBackend`] - Assets held in memory (embedded data, testing)
//! - [`DirectoryBackend`] - A directory on disk (with path security)
//! - [`ArchiveBackend`] - A tar archive indexed in memory
//!
//! ## Design Decisions
//!
//! - **Literal prefixes, first match wins**: the registry never normalizes
//!   paths and never picks the "most specific" prefix. Registration order is
//!   lookup order.
//! - **Fallback chaining**: if a matching backend can't serve a path, the
//!   next matching binding gets a try.
//! - **No merged listings**: the first backend able to list a directory
//!   supplies the whole listing.
//! - **Read-only**: there is no write path at all.

mod backend;
pub mod backends;
mod buffer;
mod error;
mod registry;
mod types;

pub use backend::AssetBackend;
pub use backends::{ArchiveBackend, DirectoryBackend, MemoryBackend};
pub use buffer::AssetBuffer;
pub use error::{VfsError, VfsResult};
pub use registry::{AssetRegistry, BindingInfo};
pub use types::{ExtensionFilter, FileInfo, FileType};
