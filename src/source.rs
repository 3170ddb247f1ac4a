//! Sources that serve release artifacts by key.
//!
//! A source enumerates the keys it offers and hands over one artifact per
//! key. The shipped implementation is a plain directory tree acting as a
//! local mirror; keys are slash-separated paths relative to its root.
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Anything release artifacts can be fetched from.
pub trait ReleaseSource {
    /// Every key the source offers, sorted for deterministic iteration.
    fn list_keys(&self) -> Result<Vec<String>>;

    /// Fetch the artifact behind `key` into `dest_dir`.
    ///
    /// The artifact lands under the key's final path segment. Returns the
    /// path written.
    fn fetch(&self, key: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Release source backed by a directory tree on the local filesystem.
#[derive(Debug)]
pub struct MirrorSource {
    root: PathBuf,
}

impl MirrorSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ReleaseSource for MirrorSource {
    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        walk_keys(&self.root, &self.root, &mut keys)?;
        keys.sort();
        Ok(keys)
    }

    fn fetch(&self, key: &str, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = key.rsplit('/').next().unwrap_or(key);
        if file_name.is_empty() {
            bail!("mirror key {key:?} has no file name");
        }
        let source = self.root.join(key);
        let dest = dest_dir.join(file_name);
        // Stage next to the destination so the final rename cannot cross
        // filesystems and a half-written artifact is never left under its
        // real name.
        let tmp_path = dest_dir.join(format!(".{file_name}.tmp"));
        fs::copy(&source, &tmp_path)
            .with_context(|| format!("fetch {key:?} from mirror {}", self.root.display()))?;
        fs::rename(&tmp_path, &dest).with_context(|| format!("place {}", dest.display()))?;
        tracing::debug!(key, dest = %dest.display(), "fetched release from mirror");
        Ok(dest)
    }
}

fn walk_keys(root: &Path, dir: &Path, keys: &mut Vec<String>) -> Result<()> {
    for entry in
        fs::read_dir(dir).with_context(|| format!("read mirror directory {}", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("read mirror directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            walk_keys(root, &path, keys)?;
            continue;
        }
        let rel = path.strip_prefix(root).context("strip mirror root")?;
        let Some(key) = slash_key(rel) else {
            tracing::debug!(entry = %path.display(), "skipping non-UTF-8 mirror entry");
            continue;
        };
        keys.push(key);
    }
    Ok(())
}

fn slash_key(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}
