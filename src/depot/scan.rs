//! Directory scanning into a release inventory.
//!
//! Filenames are the source of identity here: entries that decode under the
//! configured pattern enter the inventory, everything else is treated as
//! scratch and skipped. Skipping is a designed filter, distinct from the
//! decoder's own all-or-nothing contract.
use crate::pattern::KeyPattern;
use crate::release::Inventory;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Scan a releases directory into an identity → absolute path inventory.
///
/// Lists immediate entries only; subdirectories and undecodable names are
/// skipped. A missing or unlistable directory is an error naming the path;
/// an existing empty directory is an empty inventory. Two entries decoding
/// to the same identity is a collision error, never a silent overwrite.
pub fn scan_releases(dir: &Path, pattern: &KeyPattern) -> Result<Inventory> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("open releases directory {}", dir.display()))?;
    let entries =
        fs::read_dir(&dir).with_context(|| format!("read releases directory {}", dir.display()))?;
    let mut inventory = Inventory::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read releases directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let identity = match pattern.decode(name) {
            Ok(identity) => identity,
            Err(_) => {
                tracing::debug!(entry = name, "skipping non-release entry");
                continue;
            }
        };
        if let Some(previous) = inventory.insert(identity.clone(), path.clone()) {
            bail!(
                "releases {} and {} both decode to {}",
                previous.display(),
                path.display(),
                identity
            );
        }
    }
    Ok(inventory)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
