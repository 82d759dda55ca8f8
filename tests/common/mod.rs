//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A schema exercising every completion category
pub const BACKUP_SCHEMA: &str = r#"
program: backupctl
description: Back up and restore repositories
regenerate: backupctl --fish-completion

options:
  - flags: ["-c", "--config"]
    dest: config_paths
    nargs: "*"
    help: Paths to configuration files
  - flags: ["-v", "--verbosity"]
    type: int
    default: 0
    choices: [-1, 0, 1, 2]
    help: Display verbose progress
  - flags: ["--no-color"]
    nargs: 0
    help: Disable colored output
  - flags: ["--legacy-mode"]
    deprecated: true
    help: Deprecated, does nothing

commands:
  - name: create
    description: Create an archive
    options:
      - flags: ["--progress"]
        nargs: 0
        help: Display progress for each file
      - flags: ["--compression"]
        choices: [lz4, zstd, none]
        help: Compression algorithm
  - name: list
    description: List archives
    options:
      - flags: ["-a", "--match-archives"]
        metavar: PATTERN
        help: Only list archives matching this pattern
      - flags: ["--last"]
        metavar: N
        type: int
        help: List only the last N archives
  - name: extract
    description: Extract files from an archive
    options:
      - flags: ["--archive"]
        required: true
        help: Name of the archive
      - flags: ["--destination"]
        metavar: PATH
        type: str
        help: Directory to extract into
  - name: debug
    hidden: true
"#;

/// Create a temporary directory with an optcomp.yml file
pub fn create_test_schema(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("optcomp.yml");
    fs::write(&schema_path, content).unwrap();
    (temp_dir, schema_path)
}

/// Create a test schema with a subdirectory to run from
pub fn create_test_schema_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("optcomp.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&schema_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, schema_path, sub_dir)
}
