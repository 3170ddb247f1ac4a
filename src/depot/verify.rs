//! Checksum verification against the assets lock.
//!
//! Artifacts that fail verification are deleted the moment the mismatch is
//! seen; a later step must never be able to load an artifact that failed
//! here. The failure report aggregates every offender before surfacing.
use crate::lock::AssetsLock;
use crate::release::Inventory;
use anyhow::{bail, Context, Result};
use sha1::{Digest, Sha1};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Verify every downloaded artifact against the lock's declared digest.
///
/// Lookup is by name + version; the lock's single stemcell is assumed to
/// apply to every pair in one call. Pairs absent from the lock are skipped.
/// Mismatched files are deleted immediately (best-effort) and reported
/// together after the full pass; matching files are left untouched.
pub fn verify_checksums(dir: &Path, downloaded: &Inventory, lock: &AssetsLock) -> Result<()> {
    tracing::info!(
        dir = %dir.display(),
        releases = downloaded.len(),
        "verifying release checksums"
    );
    let mut mismatched = Vec::new();
    for (identity, path) in downloaded {
        let Some(declared) = lock.declared_sha1(&identity.name, &identity.version) else {
            tracing::debug!(release = %identity, "release not declared in lock, skipping");
            continue;
        };
        let computed = file_sha1(path)?;
        if computed == declared {
            continue;
        }
        tracing::info!(
            release = %identity,
            expected = declared,
            computed = %computed,
            "checksum mismatch, removing artifact"
        );
        if let Err(err) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not remove mismatched artifact"
            );
        }
        mismatched.push(identity.name.clone());
    }
    if !mismatched.is_empty() {
        bail!(
            "These downloaded releases do not match the checksum: {}",
            mismatched.join(", ")
        );
    }
    Ok(())
}

fn file_sha1(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("open release {}", path.display()))?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 8 * 1024];
    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("read release {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
