//! CONTEXT: procfsd CLI tests
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: 5 CLI tests
//!
//! TEST_SCOPE:
//!   - Configuration loading from TOML
//!   - cat/stat/info output format
//!   - Error propagation for unknown paths and invalid config
//!
//! TEST_SCENARIOS:
//!   - cat_prints_progmem_document(): both lines, fixed-width columns
//!   - cat_in_small_chunks_matches(): tiny reads produce the same output
//!   - stat_prints_read_only_mode(): mode 100444, size 0
//!   - info_prints_counters(): raw counters of the configured bank
//!   - invalid_config_is_reported(): out-of-range programmed page
//!
//! DEPENDENCIES:
//!   - procfsd::{Cli, execute}
//!   - tempfile: configuration fixtures
//!
//! ADR: docs/adr/0017-service-architecture.md
use std::fs;
use std::path::Path;

use clap::Parser;
use procfsd::{execute, Cli, ServiceError};

const SCENARIO: &str = "[progmem]\npage_size = 256\npage_count = 4\nprogrammed = [1]\n";

fn run(config: &Path, args: &[&str]) -> Result<String, ServiceError> {
    let mut argv = vec!["procfsd", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("valid arguments");
    let mut out = Vec::new();
    execute(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn scenario_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("procfsd.toml");
    fs::write(&path, SCENARIO).unwrap();
    path
}

#[test]
fn cat_prints_progmem_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scenario_config(dir.path());
    let out = run(&config, &["cat"]).unwrap();
    assert_eq!(
        out,
        "             total       used       free    largest\n\
         Prog:         1024        256        768        256\n"
    );
}

#[test]
fn cat_in_small_chunks_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scenario_config(dir.path());
    let whole = run(&config, &["cat"]).unwrap();
    let chunked = run(&config, &["cat", "--chunk", "3", "/proc/progmem"]).unwrap();
    assert_eq!(whole, chunked);
}

#[test]
fn stat_prints_read_only_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scenario_config(dir.path());
    let out = run(&config, &["stat", "/proc/progmem"]).unwrap();
    assert_eq!(out, "/proc/progmem: mode 100444 size 0\n");

    let err = run(&config, &["stat", "/proc/meminfo"]).unwrap_err();
    assert!(matches!(err, ServiceError::Procfs(nexus_procfs::Error::NotFound)));
}

#[test]
fn info_prints_counters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scenario_config(dir.path());
    let out = run(&config, &["info"]).unwrap();
    assert_eq!(out, "arena 1024\nused 256\nfree 768\nlargest 256\n");
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("procfsd.toml");
    fs::write(&path, "[progmem]\npage_count = 2\nprogrammed = [5]\n").unwrap();
    let err = run(&path, &["info"]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}
