//! # assetvfs-core
//!
//! Read-only virtual filesystem overlay for application assets.
//!
//! Application code asks for `assets/shaders/a.glsl` and doesn't care whether
//! the bytes come from a loose directory during development, a tar archive in
//! a packaged build, or data compiled into the binary. An [`AssetRegistry`]
//! maps literal path prefixes to [`AssetBackend`]s and tries them in
//! registration order.
//!
//! ```no_run
//! use assetvfs_core::{AssetRegistry, DirectoryBackend, MemoryBackend};
//!
//! let mut registry = AssetRegistry::new();
//! registry.register("assets/", DirectoryBackend::new("./assets"));
//! registry.register("assets/", MemoryBackend::new().with_file("shaders/default.glsl", "void main(){}"));
//!
//! if let Some(shader) = registry.read_file("assets/shaders/default.glsl") {
//!     // Zero-terminated, ready for a C API
//!     let _source = shader.as_c_str();
//! }
//! ```
//!
//! One registry per process is the convention: build it at start-up, hand
//! out `&AssetRegistry`, clear it at shutdown.

pub mod config;
pub mod vfs;

pub use config::{ConfigError, MountConfig, MountSource, VfsConfig};
pub use vfs::{
    backends::{ArchiveBackend, DirectoryBackend, MemoryBackend},
    AssetBackend, AssetBuffer, AssetRegistry, BindingInfo, ExtensionFilter, FileInfo, FileType,
    VfsError, VfsResult,
};
