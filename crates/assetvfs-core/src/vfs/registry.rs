//! Asset registry with first-match prefix routing.
//!
//! Routes read/list/info calls to registered backends by literal path prefix.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use super::backend::AssetBackend;
use super::backends::DirectoryBackend;
use super::buffer::AssetBuffer;
use super::error::VfsResult;
use super::types::FileInfo;

/// Information about a registered binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    /// The prefix exactly as registered (e.g., "assets/").
    pub prefix: String,
    /// The backend's own description.
    pub description: String,
}

/// A prefix and the backend it owns.
struct Binding {
    prefix: String,
    backend: Box<dyn AssetBackend>,
}

/// Routes asset lookups to registered backends.
///
/// Bindings are tried in registration order. A binding matches when its
/// prefix is a literal prefix of the requested path; nothing is normalized
/// or case-folded. If a matching backend fails, the next matching binding is
/// tried, so registering `"assets/"` twice lets the second backend fill in
/// files the first one lacks.
///
/// Listings are never merged: the first matching backend that can list the
/// directory supplies the whole result.
///
/// The registry owns every backend it is given. They are dropped together on
/// [`clear`](Self::clear) or when the registry itself is dropped.
///
/// Mutation takes `&mut self`; queries take `&self` and may run from several
/// threads at once once registration is done.
#[derive(Default)]
pub struct AssetRegistry {
    bindings: Vec<Binding>,
    /// Serves absolute local paths directly from disk when set.
    local: Option<DirectoryBackend>,
}

impl fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("bindings", &self.bindings())
            .field("local_passthrough", &self.local.is_some())
            .finish()
    }
}

impl AssetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that also serves absolute local paths from disk.
    ///
    /// A path such as `/home/user/shader.glsl` then bypasses the bindings
    /// entirely. Relative virtual paths are routed as usual.
    pub fn with_local_passthrough() -> Self {
        Self {
            bindings: Vec::new(),
            local: Some(DirectoryBackend::new("/")),
        }
    }

    /// Returns true if absolute local paths bypass the bindings.
    pub fn local_passthrough(&self) -> bool {
        self.local.is_some()
    }

    /// Register a backend under `prefix`.
    ///
    /// Appends to the end of the lookup order. Duplicate and overlapping
    /// prefixes are allowed.
    pub fn register(&mut self, prefix: impl Into<String>, backend: impl AssetBackend + 'static) {
        self.register_boxed(prefix, Box::new(backend));
    }

    /// Register an already boxed backend under `prefix`.
    pub fn register_boxed(&mut self, prefix: impl Into<String>, backend: Box<dyn AssetBackend>) {
        let prefix = prefix.into();
        debug!(prefix = %prefix, backend = %backend.describe(), "registering asset backend");
        self.bindings.push(Binding { prefix, backend });
    }

    /// Drop every backend and forget all bindings.
    ///
    /// Also turns off local passthrough. Calling this on an empty registry
    /// does nothing.
    pub fn clear(&mut self) {
        if self.bindings.is_empty() && self.local.is_none() {
            return;
        }
        debug!(count = self.bindings.len(), "clearing asset registry");
        self.bindings.clear();
        self.local = None;
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// List all bindings in lookup order.
    pub fn bindings(&self) -> Vec<BindingInfo> {
        self.bindings
            .iter()
            .map(|binding| BindingInfo {
                prefix: binding.prefix.clone(),
                description: binding.backend.describe(),
            })
            .collect()
    }

    /// Read a whole file.
    ///
    /// On success the buffer holds the file content followed by one zero
    /// byte. Returns `None` if no prefix matches or every matching backend
    /// fails.
    pub fn read_file(&self, path: &str) -> Option<AssetBuffer> {
        self.dispatch(path, "read", |backend, relative| backend.read_asset(relative))
            .map(AssetBuffer::from_content)
    }

    /// List a directory.
    ///
    /// The first matching backend that succeeds supplies the listing;
    /// listings from other matching backends are not merged in.
    pub fn file_listing(&self, path: &str, filter: Option<&str>) -> Option<Vec<FileInfo>> {
        self.dispatch(path, "list", |backend, relative| {
            backend.file_listing(relative, filter)
        })
    }

    /// Get metadata for a file or directory.
    pub fn file_info(&self, path: &str) -> Option<FileInfo> {
        self.dispatch(path, "info", |backend, relative| backend.file_info(relative))
    }

    /// Try every binding whose prefix matches `path`, in order, until one
    /// succeeds.
    fn dispatch<T>(
        &self,
        path: &str,
        op: &'static str,
        call: impl Fn(&dyn AssetBackend, &str) -> VfsResult<T>,
    ) -> Option<T> {
        if let Some(local) = &self.local {
            if Path::new(path).is_absolute() {
                return match call(local as &dyn AssetBackend, path) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        debug!(path, op, error = %e, "local path lookup failed");
                        None
                    }
                };
            }
        }

        let mut matched = false;
        for binding in &self.bindings {
            let Some(relative) = path.strip_prefix(binding.prefix.as_str()) else {
                continue;
            };
            matched = true;

            match call(binding.backend.as_ref(), relative) {
                Ok(value) => {
                    debug!(path, op, prefix = %binding.prefix, "served");
                    return Some(value);
                }
                Err(e) if e.is_not_found() => {
                    debug!(path, op, prefix = %binding.prefix, "not in backend, trying next");
                }
                Err(e) => {
                    warn!(
                        path,
                        op,
                        prefix = %binding.prefix,
                        backend = %binding.backend.describe(),
                        error = %e,
                        "asset backend failed, trying next"
                    );
                }
            }
        }

        if !matched {
            warn!(path, op, "no asset backend registered for path");
        }
        None
    }
}
