//! CLI argument parsing for the depot reconcile workflow.
//!
//! The CLI is intentionally thin: every command takes its lock, directory,
//! and pattern as explicit inputs, so the same core logic is reusable and
//! nothing depends on ambient configuration.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default key pattern decoding bare compiled-release filenames.
pub const DEFAULT_RELEASE_PATTERN: &str = r"^(?P<release_name>[a-z-_]+)-(?P<release_version>[0-9\.]+)-(?P<stemcell_os>[a-z-_]+)-(?P<stemcell_version>[\d\.]+)\.tgz$";

/// Root CLI entrypoint for the reconcile workflow.
///
/// A single `RootArgs` type keeps command routing obvious; each subcommand
/// carries its own argument struct so defaults stay visible in `--help`.
#[derive(Parser, Debug)]
#[command(
    name = "rdepot",
    version,
    about = "Reconcile a local release depot against an assets lock",
    after_help = "Commands:\n  sync --lock-file <file> --releases-dir <dir>    Fetch, verify, and prune to match the lock\n  status --lock-file <file> --releases-dir <dir>  Report satisfied, missing, and extra releases\n  verify --lock-file <file> --releases-dir <dir>  Check artifacts against declared digests\n  prune --lock-file <file> --releases-dir <dir>   Delete releases the lock no longer requires\n\nExamples:\n  rdepot status --lock-file assets.lock --releases-dir releases --json\n  rdepot sync --lock-file assets.lock --releases-dir releases --mirror /srv/release-mirror\n  rdepot verify --lock-file assets.lock --releases-dir releases\n  rdepot prune --lock-file assets.lock --releases-dir releases --no-confirm",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Sync(SyncArgs),
    Status(StatusArgs),
    Verify(VerifyArgs),
    Prune(PruneArgs),
}

/// Sync command inputs for a full reconcile pass.
#[derive(Parser, Debug)]
#[command(about = "Fetch missing releases, verify digests, and prune extras")]
pub struct SyncArgs {
    /// Assets lock declaring required releases and digests
    #[arg(long, value_name = "FILE")]
    pub lock_file: PathBuf,

    /// Directory holding downloaded release artifacts
    #[arg(long, value_name = "DIR")]
    pub releases_dir: PathBuf,

    /// Release key pattern with the four identity capture groups
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_RELEASE_PATTERN)]
    pub pattern: String,

    /// Local mirror directory to fetch missing releases from
    #[arg(long, value_name = "DIR")]
    pub mirror: Option<PathBuf>,

    /// Skip the confirmation prompt before deleting extra releases
    #[arg(long)]
    pub no_confirm: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Status command inputs for a read-only report.
#[derive(Parser, Debug)]
#[command(about = "Report how the releases directory compares to the lock")]
pub struct StatusArgs {
    /// Assets lock declaring required releases and digests
    #[arg(long, value_name = "FILE")]
    pub lock_file: PathBuf,

    /// Directory holding downloaded release artifacts
    #[arg(long, value_name = "DIR")]
    pub releases_dir: PathBuf,

    /// Release key pattern with the four identity capture groups
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_RELEASE_PATTERN)]
    pub pattern: String,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Verify command inputs for checking artifacts against the lock.
#[derive(Parser, Debug)]
#[command(about = "Verify downloaded artifacts against declared digests")]
pub struct VerifyArgs {
    /// Assets lock declaring required releases and digests
    #[arg(long, value_name = "FILE")]
    pub lock_file: PathBuf,

    /// Directory holding downloaded release artifacts
    #[arg(long, value_name = "DIR")]
    pub releases_dir: PathBuf,

    /// Release key pattern with the four identity capture groups
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_RELEASE_PATTERN)]
    pub pattern: String,
}

/// Prune command inputs for deleting no-longer-required releases.
#[derive(Parser, Debug)]
#[command(about = "Delete releases the lock no longer requires")]
pub struct PruneArgs {
    /// Assets lock declaring required releases and digests
    #[arg(long, value_name = "FILE")]
    pub lock_file: PathBuf,

    /// Directory holding downloaded release artifacts
    #[arg(long, value_name = "DIR")]
    pub releases_dir: PathBuf,

    /// Release key pattern with the four identity capture groups
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_RELEASE_PATTERN)]
    pub pattern: String,

    /// Skip the confirmation prompt before deleting extra releases
    #[arg(long)]
    pub no_confirm: bool,
}
