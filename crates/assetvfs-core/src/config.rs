//! RON mount configuration.
//!
//! Describes which backends to register, under which prefixes, in which
//! order:
//!
//! ```ron
//! (
//!     local_passthrough: false,
//!     mounts: [
//!         // Loose files override the packaged archive
//!         (prefix: "assets/", source: Directory(path: "~/game/assets")),
//!         (prefix: "assets/", source: Archive(path: "base.tar", inner_prefix: Some("assets/"))),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vfs::{ArchiveBackend, AssetBackend, AssetRegistry, DirectoryBackend, VfsError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("cannot expand {path:?}: {message}")]
    Expand { path: String, message: String },
    #[error("cannot mount {source_path} at {prefix:?}: {error}")]
    Mount {
        prefix: String,
        source_path: String,
        #[source]
        error: VfsError,
    },
}

/// Where a mount's assets come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MountSource {
    /// A directory on disk.
    Directory { path: String },
    /// A tar archive, optionally restricted to a subtree.
    Archive {
        path: String,
        #[serde(default)]
        inner_prefix: Option<String>,
    },
}

impl MountSource {
    /// Guess the source kind from a path: `.tar` files are archives,
    /// everything else is a directory.
    pub fn infer(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.to_ascii_lowercase().ends_with(".tar") {
            MountSource::Archive {
                path,
                inner_prefix: None,
            }
        } else {
            MountSource::Directory { path }
        }
    }

    fn path(&self) -> &str {
        match self {
            MountSource::Directory { path } | MountSource::Archive { path, .. } => path,
        }
    }
}

/// One prefix binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    /// Literal prefix, exactly as lookups will spell it.
    pub prefix: String,
    pub source: MountSource,
}

/// Full overlay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfsConfig {
    /// Serve absolute local paths straight from disk.
    #[serde(default)]
    pub local_passthrough: bool,
    /// Mounts in lookup order.
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
    /// Directory relative source paths resolve against. Set by [`load`](Self::load).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl VfsConfig {
    /// Default config location: `~/.config/assetvfs/mounts.ron`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("assetvfs").join("mounts.ron"))
    }

    /// Parse a config from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a config file. Relative source paths resolve against the
    /// directory containing the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_ron_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Append a mount after the ones already configured.
    pub fn push_mount(&mut self, prefix: impl Into<String>, source: MountSource) {
        self.mounts.push(MountConfig {
            prefix: prefix.into(),
            source,
        });
    }

    /// Expand `~` and `$VARS`, then resolve relative paths against `base_dir`.
    fn resolve_path(&self, raw: &str) -> Result<PathBuf, ConfigError> {
        let expanded = shellexpand::full(raw).map_err(|e| ConfigError::Expand {
            path: raw.to_string(),
            message: e.to_string(),
        })?;
        let path = PathBuf::from(expanded.as_ref());
        match &self.base_dir {
            Some(base) if path.is_relative() => Ok(base.join(path)),
            _ => Ok(path),
        }
    }

    fn build_backend(&self, mount: &MountConfig) -> Result<Box<dyn AssetBackend>, ConfigError> {
        let mount_error = |error| ConfigError::Mount {
            prefix: mount.prefix.clone(),
            source_path: mount.source.path().to_string(),
            error,
        };

        let path = self.resolve_path(mount.source.path())?;
        let backend: Box<dyn AssetBackend> = match &mount.source {
            MountSource::Directory { .. } => {
                Box::new(DirectoryBackend::open(path).map_err(mount_error)?)
            }
            MountSource::Archive { inner_prefix, .. } => {
                let archive = ArchiveBackend::open(path).map_err(mount_error)?;
                match inner_prefix {
                    Some(prefix) => Box::new(archive.with_inner_prefix(prefix.as_str())),
                    None => Box::new(archive),
                }
            }
        };
        Ok(backend)
    }

    /// Build a registry with every mount registered in order.
    ///
    /// Fails on the first source that can't be opened; nothing is registered
    /// in that case.
    pub fn build_registry(&self) -> Result<AssetRegistry, ConfigError> {
        let mut registry = if self.local_passthrough {
            AssetRegistry::with_local_passthrough()
        } else {
            AssetRegistry::new()
        };

        for mount in &self.mounts {
            let backend = self.build_backend(mount)?;
            registry.register_boxed(mount.prefix.clone(), backend);
        }

        tracing::info!(
            mounts = registry.len(),
            local_passthrough = registry.local_passthrough(),
            "asset registry ready"
        );
        Ok(registry)
    }
}
