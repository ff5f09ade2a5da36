//! Mod-level operations - content hashes and descriptor validation
//!
//! - Recompute the MD5 of every file a manifest imports
//! - Validate manifests, projects and solutions, reporting every problem

pub mod hashes;
pub mod types;
pub mod validation;

pub use hashes::{
    HashFailure, HashFailureReason, HashUpdateResult, update_hashes, update_hashes_with_progress,
    update_manifest_hashes, update_manifest_hashes_with_progress,
};
pub use types::{ModPhase, ModProgress, ModProgressCallback};
pub use validation::{ValidationReport, validate_file, validate_project, validate_solution};
