//! Application object owning the asset registry.
//!
//! There is exactly one [`AssetRegistry`] per process and it lives here.
//! Everything else borrows it through [`App::registry`].

use std::io::Write;

use anyhow::{Context, Result, bail};
use assetvfs_core::{AssetRegistry, FileInfo, MountSource, VfsConfig};
use tracing::{debug, info};

/// Top-level application state.
#[derive(Debug)]
pub struct App {
    registry: AssetRegistry,
}

impl App {
    /// Build the registry from `config` plus any command-line mounts.
    ///
    /// Command-line mounts are `PREFIX=SOURCE` and are registered after the
    /// configured ones, so configured mounts take precedence.
    pub fn start(mut config: VfsConfig, extra_mounts: &[String]) -> Result<Self> {
        for arg in extra_mounts {
            let (prefix, source) = parse_mount(arg)?;
            config.push_mount(prefix, source);
        }

        let registry = config
            .build_registry()
            .context("failed to build asset registry")?;
        Ok(Self { registry })
    }

    /// Wrap an already populated registry.
    pub fn with_registry(registry: AssetRegistry) -> Self {
        Self { registry }
    }

    /// The process-wide registry.
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Release every backend. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if !self.registry.is_empty() {
            info!(mounts = self.registry.len(), "releasing asset backends");
        }
        self.registry.clear();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Split a `PREFIX=SOURCE` command-line mount.
///
/// The prefix is kept verbatim (it may be empty); the source kind is inferred
/// from the path.
pub fn parse_mount(arg: &str) -> Result<(String, MountSource)> {
    let Some((prefix, source)) = arg.split_once('=') else {
        bail!("mount must be PREFIX=SOURCE, got {arg:?}");
    };
    if source.is_empty() {
        bail!("mount {arg:?} has an empty source");
    }
    Ok((prefix.to_string(), MountSource::infer(source)))
}

// ============================================================================
// Commands
// ============================================================================

/// `cat`: write a file's bytes to `out`.
pub fn cat(registry: &AssetRegistry, path: &str, out: &mut impl Write) -> Result<()> {
    let Some(buffer) = registry.read_file(path) else {
        bail!("{path}: not found");
    };
    debug!(path, len = buffer.len(), "read asset");
    out.write_all(buffer.as_bytes())?;
    Ok(())
}

/// `ls`: one line per entry.
pub fn ls(
    registry: &AssetRegistry,
    path: &str,
    filter: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(entries) = registry.file_listing(path, filter) else {
        bail!("{path}: cannot list");
    };
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

/// `stat`: metadata for one path.
pub fn stat(registry: &AssetRegistry, path: &str, out: &mut impl Write) -> Result<()> {
    let Some(info) = registry.file_info(path) else {
        bail!("{path}: not found");
    };
    writeln!(out, "name:     {}", info.name)?;
    writeln!(out, "kind:     {}", if info.is_dir() { "directory" } else { "file" })?;
    writeln!(out, "size:     {}", info.size)?;
    writeln!(out, "writable: {}", info.is_writable)?;
    Ok(())
}

/// `mounts`: bindings in lookup order.
pub fn mounts(registry: &AssetRegistry, out: &mut impl Write) -> Result<()> {
    if registry.local_passthrough() {
        writeln!(out, "(absolute paths)\tlocal filesystem")?;
    }
    for binding in registry.bindings() {
        writeln!(out, "{:?}\t{}", binding.prefix, binding.description)?;
    }
    Ok(())
}

fn format_entry(entry: &FileInfo) -> String {
    let flag = if entry.is_dir() { 'd' } else { '-' };
    format!("{} {:>10} {}", flag, entry.size, entry.name)
}
