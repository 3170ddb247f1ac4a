//! Local release depot operations.
//!
//! The depot is one flat directory of compiled release artifacts. Scanning
//! builds an inventory from filenames, verification holds artifacts to the
//! lock's declared digests, and pruning removes what the lock no longer
//! requires.
mod prune;
mod scan;
mod verify;

pub use prune::delete_extra_releases;
pub use scan::scan_releases;
pub use verify::verify_checksums;
