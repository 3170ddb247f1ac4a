//! Extra-release pruning.
//!
//! The caller decides what is extra; this module only deletes. Failures are
//! fail-fast so a partially pruned directory stays inspectable, and nothing
//! here ever touches a required identity.
use crate::confirm::ConfirmationGate;
use crate::release::Inventory;
use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Delete every artifact in `extra`, optionally behind the confirmation gate.
///
/// An empty set asks nothing and deletes nothing. A denied confirmation
/// skips all deletions and succeeds. A failed deletion (including a path
/// that is already gone) aborts with the offending release named; rerunning
/// against a stale inventory therefore fails, so callers rescan between
/// prunes.
pub fn delete_extra_releases(
    dir: &Path,
    extra: &Inventory,
    no_confirm: bool,
    gate: &mut dyn ConfirmationGate,
) -> Result<()> {
    if extra.is_empty() {
        tracing::debug!(dir = %dir.display(), "no extra releases to delete");
        return Ok(());
    }
    if !no_confirm {
        let mut prompt = String::from("Deleting these extra releases:\n");
        for (identity, path) in extra {
            prompt.push_str(&format!("  {} ({})\n", identity, path.display()));
        }
        prompt.push_str("Are you sure you want to delete these files?");
        if !gate.confirm(&prompt)? {
            tracing::info!("extra release deletion declined, leaving files in place");
            return Ok(());
        }
    }
    for (identity, path) in extra {
        if fs::remove_file(path).is_err() {
            bail!("failed to delete release {}", identity.name);
        }
        tracing::info!(release = %identity, path = %path.display(), "deleted extra release");
    }
    Ok(())
}

#[cfg(test)]
#[path = "prune_tests.rs"]
mod tests;
