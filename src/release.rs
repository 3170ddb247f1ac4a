//! Release identity and inventory types.
//!
//! A compiled release artifact is identified by four strings; two artifacts
//! are the same release iff all four match. Inventories key on that identity
//! so reconciliation is pure map arithmetic.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Identity of one compiled release artifact.
///
/// Structural equality over all four fields; ordered and hashable so it can
/// key an [`Inventory`]. Fields are never empty after a successful decode.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct ReleaseIdentity {
    pub name: String,
    pub version: String,
    pub stemcell_os: String,
    pub stemcell_version: String,
}

impl ReleaseIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        stemcell_os: impl Into<String>,
        stemcell_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            stemcell_os: stemcell_os.into(),
            stemcell_version: stemcell_version.into(),
        }
    }
}

impl fmt::Display for ReleaseIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} {})",
            self.name, self.version, self.stemcell_os, self.stemcell_version
        )
    }
}

/// Mapping from release identity to the absolute path holding that artifact.
///
/// Built fresh on every scan, never persisted. The ordered map keeps error
/// aggregation and JSON output deterministic.
pub type Inventory = BTreeMap<ReleaseIdentity, PathBuf>;
