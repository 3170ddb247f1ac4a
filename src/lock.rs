//! Assets lock loading and lookups.
//!
//! The lock is the authoritative declaration of which releases a deployment
//! needs: an ordered release list plus the single stemcell every release is
//! compiled against. It is loaded once per run and passed around read-only.
use crate::release::ReleaseIdentity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One required release as declared in the lock.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LockedRelease {
    pub name: String,
    pub version: String,
    pub sha1: String,
}

/// The stemcell all releases in one lock are compiled against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stemcell {
    pub os: String,
    pub version: String,
}

/// Parsed assets lock: required releases plus the target stemcell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetsLock {
    pub releases: Vec<LockedRelease>,
    #[serde(rename = "stemcell_criteria")]
    pub stemcell: Stemcell,
}

impl AssetsLock {
    /// Every required identity: each release targeted at the lock's stemcell.
    pub fn required_identities(&self) -> Vec<ReleaseIdentity> {
        self.releases
            .iter()
            .map(|release| {
                ReleaseIdentity::new(
                    release.name.clone(),
                    release.version.clone(),
                    self.stemcell.os.clone(),
                    self.stemcell.version.clone(),
                )
            })
            .collect()
    }

    /// Declared digest for a release, looked up by name and version.
    ///
    /// The lock's single stemcell is assumed to apply to every entry, so
    /// name + version is the whole key. First entry wins on duplicates.
    pub fn declared_sha1(&self, name: &str, version: &str) -> Option<&str> {
        self.releases
            .iter()
            .find(|release| release.name == name && release.version == version)
            .map(|release| release.sha1.as_str())
    }
}

/// Load the assets lock from a YAML file.
pub fn load_lock(path: &Path) -> Result<AssetsLock> {
    let bytes = fs::read(path).with_context(|| format!("read assets lock {}", path.display()))?;
    let lock: AssetsLock = serde_yaml::from_slice(&bytes)
        .with_context(|| format!("parse assets lock {}", path.display()))?;
    Ok(lock)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK_YAML: &str = "\
releases:
- name: uaa
  version: \"1.2.3\"
  sha1: a9993e364706816aba3e25717850c26c9cd0d89d
- name: diego
  version: \"0.4.0\"
  sha1: 84983e441c3bd26ebaae4aa1f95129e5e54670f1
stemcell_criteria:
  os: ubuntu-xenial
  version: \"190.0.0\"
";

    #[test]
    fn parses_releases_and_stemcell_criteria() {
        let lock: AssetsLock = serde_yaml::from_str(LOCK_YAML).expect("parse lock");
        assert_eq!(lock.releases.len(), 2);
        assert_eq!(lock.releases[0].name, "uaa");
        assert_eq!(lock.stemcell.os, "ubuntu-xenial");
        assert_eq!(lock.stemcell.version, "190.0.0");
    }

    #[test]
    fn required_identities_apply_the_single_stemcell_to_every_release() {
        let lock: AssetsLock = serde_yaml::from_str(LOCK_YAML).expect("parse lock");
        let required = lock.required_identities();
        assert_eq!(
            required,
            vec![
                ReleaseIdentity::new("uaa", "1.2.3", "ubuntu-xenial", "190.0.0"),
                ReleaseIdentity::new("diego", "0.4.0", "ubuntu-xenial", "190.0.0"),
            ]
        );
    }

    #[test]
    fn declared_sha1_matches_name_and_version_exactly() {
        let lock: AssetsLock = serde_yaml::from_str(LOCK_YAML).expect("parse lock");
        assert_eq!(
            lock.declared_sha1("uaa", "1.2.3"),
            Some("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(lock.declared_sha1("uaa", "9.9.9"), None);
        assert_eq!(lock.declared_sha1("router", "1.2.3"), None);
    }

    #[test]
    fn duplicate_entries_resolve_to_the_first_declaration() {
        let mut lock: AssetsLock = serde_yaml::from_str(LOCK_YAML).expect("parse lock");
        lock.releases.push(LockedRelease {
            name: "uaa".to_string(),
            version: "1.2.3".to_string(),
            sha1: "0000000000000000000000000000000000000000".to_string(),
        });
        assert_eq!(
            lock.declared_sha1("uaa", "1.2.3"),
            Some("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn load_lock_names_the_path_on_failure() {
        let missing = std::path::Path::new("/nonexistent/assets.lock");
        let err = load_lock(missing).expect_err("missing lock must fail");
        assert!(format!("{err:#}").contains("/nonexistent/assets.lock"), "{err}");
    }
}
