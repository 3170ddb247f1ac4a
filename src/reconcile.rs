//! Partitioning a scanned inventory against the assets lock.
//!
//! Reconciliation is pure map arithmetic over identities; nothing here touches
//! the filesystem. Callers act on the resulting plan.
use crate::lock::AssetsLock;
use crate::release::{Inventory, ReleaseIdentity};
use serde::Serialize;

/// Outcome of comparing what is on disk against what the lock requires.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    /// Required by the lock and present on disk.
    pub satisfied: Inventory,
    /// Present on disk but not required by the lock.
    pub extra: Inventory,
    /// Required by the lock but absent from disk, in lock declaration order.
    pub missing: Vec<ReleaseIdentity>,
}

impl ReconcilePlan {
    /// True when the depot already matches the lock exactly.
    pub fn is_converged(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Split an inventory into satisfied, extra, and missing releases.
pub fn partition(inventory: &Inventory, lock: &AssetsLock) -> ReconcilePlan {
    let required = lock.required_identities();
    let mut plan = ReconcilePlan::default();
    for (identity, path) in inventory {
        if required.contains(identity) {
            plan.satisfied.insert(identity.clone(), path.clone());
        } else {
            plan.extra.insert(identity.clone(), path.clone());
        }
    }
    for identity in required {
        if !inventory.contains_key(&identity) && !plan.missing.contains(&identity) {
            plan.missing.push(identity);
        }
    }
    plan
}

/// One inventory entry as it appears in JSON output.
#[derive(Debug, Serialize)]
pub struct SummaryEntry {
    pub release: ReleaseIdentity,
    pub path: String,
}

/// Serializable report of a reconcile run.
#[derive(Debug, Serialize)]
pub struct ReconcileSummary {
    pub satisfied_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    pub satisfied: Vec<SummaryEntry>,
    pub missing: Vec<ReleaseIdentity>,
    pub extra: Vec<SummaryEntry>,
}

impl ReconcileSummary {
    pub fn from_plan(plan: &ReconcilePlan) -> Self {
        let entries = |inventory: &Inventory| {
            inventory
                .iter()
                .map(|(identity, path)| SummaryEntry {
                    release: identity.clone(),
                    path: path.display().to_string(),
                })
                .collect()
        };
        Self {
            satisfied_count: plan.satisfied.len(),
            missing_count: plan.missing.len(),
            extra_count: plan.extra.len(),
            satisfied: entries(&plan.satisfied),
            missing: plan.missing.clone(),
            extra: entries(&plan.extra),
        }
    }
}
