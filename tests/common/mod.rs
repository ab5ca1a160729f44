#![allow(dead_code)]

pub use raptor_dev_test_utils::init_tracing;

use std::fs;
use std::path::Path;

/// Create `rel` (and its parents) under `root` with some content.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Minimal Raptor project layout in `root`.
pub fn scaffold_project(root: &Path, marker_contents: &str) {
    write_file(root, ".raptor.toml", marker_contents);
    write_file(root, "main.go", "package main\n");
    write_file(root, "app/controllers/home.go", "package controllers\n");
    write_file(root, "bin/old.log", "");
    write_file(root, ".git/HEAD", "ref: refs/heads/main\n");
}
