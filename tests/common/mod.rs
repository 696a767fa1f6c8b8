// Shared helpers for netlinx-rpc integration tests
#![allow(dead_code)]

use netlinx_rpc::config::RpcConfig;
use netlinx_rpc::rpc::{GeneratedModule, GenerationSession, NetLinxBackend};
use netlinx_rpc::workspace::{SourceSelector, SourceSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fixtures/sample_workspace")
}

/// Copy the sample workspace into a fresh temporary directory so tests can
/// write generated files next to it.
pub fn copy_fixture() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    copy_dir(&fixture_dir(), dir.path());
    dir
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("failed to create directory");
    for entry in fs::read_dir(from).expect("failed to read fixture directory") {
        let entry = entry.expect("failed to read fixture entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("failed to copy fixture file");
        }
    }
}

pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent directory");
    }
    fs::write(&path, contents).expect("failed to write file");
    path
}

/// Select `files` (relative to `root`) in order, with default settings.
pub fn source_set(root: &Path, files: &[&str]) -> SourceSet {
    let config = RpcConfig::default();
    let selector = SourceSelector::new(root, &config.scan).expect("default config is valid");
    let selected = selector.select(root, files);
    selector.source_set(selected).expect("failed to list sources")
}

pub fn generate(set: &SourceSet) -> GeneratedModule {
    let session = GenerationSession::scan_all(&set.files).expect("failed to scan sources");
    session.render(&set.audit, &NetLinxBackend::default())
}

/// Write each `(path, contents)` pair under a new temp dir and generate from
/// them in the given order.
pub fn generate_sources(sources: &[(&str, &str)]) -> GeneratedModule {
    let dir = TempDir::new().expect("failed to create temp dir");
    for (path, contents) in sources {
        write_file(dir.path(), path, contents);
    }
    let names: Vec<&str> = sources.iter().map(|(path, _)| *path).collect();
    generate(&source_set(dir.path(), &names))
}
