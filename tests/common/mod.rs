//! Shared fixtures for the CLI integration tests.

use sha1::{Digest, Sha1};
use std::fs;
use std::path::Path;

/// Stemcell every fixture lock targets.
pub const STEMCELL_OS: &str = "ubuntu-xenial";
pub const STEMCELL_VERSION: &str = "190.0.0";

/// Path to the compiled rdepot binary under test.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_rdepot")
}

/// Lowercase hex SHA-1 of a byte slice.
pub fn sha1_hex(data: &[u8]) -> String {
    format!("{:x}", Sha1::digest(data))
}

/// Compiled-release filename matching the default key pattern.
pub fn release_file(name: &str, version: &str) -> String {
    format!("{name}-{version}-{STEMCELL_OS}-{STEMCELL_VERSION}.tgz")
}

/// Write an assets lock requiring `releases` (name, version, digest).
pub fn write_lock(path: &Path, releases: &[(&str, &str, String)]) {
    let mut text = String::from("releases:\n");
    for (name, version, sha1) in releases {
        text.push_str(&format!(
            "- name: {name}\n  version: \"{version}\"\n  sha1: {sha1}\n"
        ));
    }
    text.push_str(&format!(
        "stemcell_criteria:\n  os: {STEMCELL_OS}\n  version: \"{STEMCELL_VERSION}\"\n"
    ));
    fs::write(path, text).expect("write assets lock");
}
