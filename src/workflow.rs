use crate::cli::{PruneArgs, StatusArgs, SyncArgs, VerifyArgs};
use crate::confirm::StdinGate;
use crate::depot::{delete_extra_releases, scan_releases, verify_checksums};
use crate::lock::load_lock;
use crate::pattern::KeyPattern;
use crate::reconcile::{partition, ReconcilePlan, ReconcileSummary};
use crate::release::{Inventory, ReleaseIdentity};
use crate::source::{MirrorSource, ReleaseSource};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run_sync(args: SyncArgs) -> Result<()> {
    let pattern = KeyPattern::compile(&args.pattern)?;
    let lock = load_lock(&args.lock_file)?;
    let mut plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);

    if let Some(mirror_root) = args.mirror.as_deref() {
        if !plan.missing.is_empty() {
            let source = MirrorSource::new(mirror_root);
            let fetched = fetch_missing(&source, &pattern, &plan.missing, &args.releases_dir)?;
            if !fetched.is_empty() {
                plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);
            }
        }
    }

    verify_checksums(&args.releases_dir, &plan.satisfied, &lock)?;

    if !plan.extra.is_empty() {
        let mut gate = StdinGate::default();
        delete_extra_releases(&args.releases_dir, &plan.extra, args.no_confirm, &mut gate)?;
    }

    // Report the directory as actually left on disk, not the plan we started
    // from: fetches add entries and a denied prune keeps extras around.
    let plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);
    for identity in &plan.missing {
        tracing::warn!(release = %identity, "required release still missing after sync");
    }
    emit_plan(&plan, args.json)
}

pub fn run_status(args: StatusArgs) -> Result<()> {
    let pattern = KeyPattern::compile(&args.pattern)?;
    let lock = load_lock(&args.lock_file)?;
    let plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);
    emit_plan(&plan, args.json)
}

pub fn run_verify(args: VerifyArgs) -> Result<()> {
    let pattern = KeyPattern::compile(&args.pattern)?;
    let lock = load_lock(&args.lock_file)?;
    let plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);
    verify_checksums(&args.releases_dir, &plan.satisfied, &lock)?;
    println!("verified {} releases", plan.satisfied.len());
    Ok(())
}

pub fn run_prune(args: PruneArgs) -> Result<()> {
    let pattern = KeyPattern::compile(&args.pattern)?;
    let lock = load_lock(&args.lock_file)?;
    let plan = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock);
    if plan.extra.is_empty() {
        println!("no extra releases");
        return Ok(());
    }
    let mut gate = StdinGate::default();
    delete_extra_releases(&args.releases_dir, &plan.extra, args.no_confirm, &mut gate)?;
    let remaining = partition(&scan_releases(&args.releases_dir, &pattern)?, &lock).extra;
    if remaining.is_empty() {
        println!("deleted {} extra releases", plan.extra.len());
    } else {
        println!("kept {} extra releases", remaining.len());
    }
    Ok(())
}

/// Fetch every missing release a source key decodes to, first key wins.
fn fetch_missing(
    source: &dyn ReleaseSource,
    pattern: &KeyPattern,
    missing: &[ReleaseIdentity],
    dest_dir: &Path,
) -> Result<Inventory> {
    let mut fetched = Inventory::new();
    for key in source.list_keys()? {
        let Ok(identity) = pattern.decode(&key) else {
            tracing::debug!(key = %key, "skipping mirror key that does not decode");
            continue;
        };
        if !missing.contains(&identity) || fetched.contains_key(&identity) {
            continue;
        }
        let path = source.fetch(&key, dest_dir)?;
        tracing::info!(release = %identity, key = %key, "fetched missing release");
        fetched.insert(identity, path);
    }
    Ok(fetched)
}

fn emit_plan(plan: &ReconcilePlan, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(&ReconcileSummary::from_plan(plan))
            .context("serialize reconcile summary")?;
        println!("{text}");
    } else {
        print_plan(plan);
    }
    Ok(())
}

fn print_plan(plan: &ReconcilePlan) {
    if plan.is_converged() {
        println!("depot matches the lock ({} releases)", plan.satisfied.len());
        return;
    }
    println!(
        "{} satisfied, {} missing, {} extra",
        plan.satisfied.len(),
        plan.missing.len(),
        plan.extra.len()
    );
    for (identity, path) in &plan.satisfied {
        println!("  ok      {identity}  {}", path.display());
    }
    for identity in &plan.missing {
        println!("  missing {identity}");
    }
    for (identity, path) in &plan.extra {
        println!("  extra   {identity}  {}", path.display());
    }
}
