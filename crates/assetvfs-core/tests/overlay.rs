//! Integration tests for the asset overlay.
//!
//! Exercises the registry end to end with every bundled backend: prefix
//! stripping, fallback between overlapping bindings, unmerged listings,
//! the zero sentinel on reads, and teardown.

use std::fs;

use assetvfs_core::{
    ArchiveBackend, AssetRegistry, DirectoryBackend, MemoryBackend, MountSource, VfsConfig,
};
use tempfile::TempDir;

// ============================================================================
// Shared test setup
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("assetvfs_core=debug")
        .with_test_writer()
        .try_init();
}

fn tar_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, data.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap()
}

/// A directory with loose overrides and an archive with the base assets.
fn layered_fixture() -> (AssetRegistry, TempDir) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("ui")).unwrap();
    fs::write(dir.path().join("ui/loose.png"), "loose").unwrap();
    fs::write(dir.path().join("config.ini"), "[loose]").unwrap();

    let archive = ArchiveBackend::from_bytes(
        "base.tar",
        &tar_bytes(&[
            ("assets/ui/packed.png", "packed"),
            ("assets/config.ini", "[packed]"),
            ("assets/lang/en.ini", "hello=Hello"),
        ]),
    )
    .unwrap()
    .with_inner_prefix("assets/");

    let mut registry = AssetRegistry::new();
    registry.register("assets/", DirectoryBackend::new(dir.path()));
    registry.register("assets/", archive);
    (registry, dir)
}

// ============================================================================
// Shader lookup
// ============================================================================

#[test]
fn shader_read_info_and_miss() {
    init_tracing();
    let mut registry = AssetRegistry::new();
    registry.register(
        "assets/",
        MemoryBackend::new().with_file("shaders/a.glsl", "void main(){}"),
    );

    let buffer = registry.read_file("assets/shaders/a.glsl").unwrap();
    assert_eq!(buffer.as_bytes(), b"void main(){}");
    assert_eq!(buffer.as_bytes_with_nul().len(), buffer.len() + 1);
    assert_eq!(buffer.as_bytes_with_nul()[buffer.len()], 0);
    assert_eq!(buffer.as_c_str().to_str().unwrap(), "void main(){}");

    assert!(registry.read_file("assets/missing.txt").is_none());

    let info = registry.file_info("assets/shaders/a.glsl").unwrap();
    assert!(info.is_file());
    assert_eq!(info.size, buffer.len() as u64);
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn prefix_stripped_for_every_backend_kind() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::write(dir.path().join("top.txt"), "dir-top").unwrap();
    fs::write(dir.path().join("a/b/deep.txt"), "dir-deep").unwrap();

    let archive = ArchiveBackend::from_bytes(
        "pack.tar",
        &tar_bytes(&[("top.txt", "tar-top"), ("a/b/deep.txt", "tar-deep")]),
    )
    .unwrap();

    let memory = MemoryBackend::new()
        .with_file("top.txt", "mem-top")
        .with_file("a/b/deep.txt", "mem-deep");

    let mut registry = AssetRegistry::new();
    registry.register("disk:", DirectoryBackend::new(dir.path()));
    registry.register("tar:", archive);
    registry.register("mem:", memory);

    for (prefix, tag) in [("disk:", "dir"), ("tar:", "tar"), ("mem:", "mem")] {
        let top = registry.read_file(&format!("{prefix}top.txt")).unwrap();
        assert_eq!(top.as_str().unwrap(), format!("{tag}-top"));

        let deep = registry.read_file(&format!("{prefix}a/b/deep.txt")).unwrap();
        assert_eq!(deep.as_str().unwrap(), format!("{tag}-deep"));
    }
}

#[test]
fn loose_files_override_archive() {
    init_tracing();
    let (registry, _dir) = layered_fixture();

    assert_eq!(
        registry.read_file("assets/config.ini").unwrap().as_str().unwrap(),
        "[loose]"
    );
    // Only in the archive: served by the second binding
    assert_eq!(
        registry.read_file("assets/lang/en.ini").unwrap().as_str().unwrap(),
        "hello=Hello"
    );
    assert_eq!(registry.file_info("assets/lang/en.ini").unwrap().size, 11);
}

#[test]
fn listing_comes_from_first_backend_only() {
    init_tracing();
    let (registry, _dir) = layered_fixture();

    let ui = registry.file_listing("assets/ui", None).unwrap();
    let names: Vec<_> = ui.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["loose.png"]);

    // The directory backend has no lang/, so the archive lists it
    let lang = registry.file_listing("assets/lang", Some("ini")).unwrap();
    assert_eq!(lang.len(), 1);
    assert_eq!(lang[0].full_name, "lang/en.ini");
}

#[test]
fn teardown_is_idempotent() {
    init_tracing();
    let (mut registry, _dir) = layered_fixture();
    assert_eq!(registry.len(), 2);

    registry.clear();
    registry.clear();

    for path in ["assets/config.ini", "assets/lang/en.ini", "", "anything"] {
        assert!(registry.read_file(path).is_none());
        assert!(registry.file_info(path).is_none());
        assert!(registry.file_listing(path, None).is_none());
    }
}

#[test]
fn registry_from_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets/readme.txt"), "from disk").unwrap();
    fs::write(
        dir.path().join("base.tar"),
        tar_bytes(&[("data/readme.txt", "from tar"), ("data/extra.txt", "extra")]),
    )
    .unwrap();

    let mut config = VfsConfig::from_ron_str(
        r#"(mounts: [
            (prefix: "", source: Directory(path: "assets")),
            (prefix: "", source: Archive(path: "base.tar", inner_prefix: Some("data"))),
        ])"#,
    )
    .unwrap();
    config.base_dir = Some(dir.path().to_path_buf());
    config.push_mount("raw/", MountSource::infer("base.tar"));

    let registry = config.build_registry().unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.read_file("readme.txt").unwrap().as_bytes(), b"from disk");
    assert_eq!(registry.read_file("extra.txt").unwrap().as_bytes(), b"extra");
    assert_eq!(
        registry.read_file("raw/data/readme.txt").unwrap().as_bytes(),
        b"from tar"
    );
}
