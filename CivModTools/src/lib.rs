//! # `CivModTools`
//!
//! A pure-Rust library for working with Civilization V mod descriptors.
//!
//! ## Supported Formats
//!
//! - **`.modinfo`** - The versioned manifest the game loads
//! - **`.civ5proj`** - ModBuddy project files
//! - **`.civ5sln`** - ModBuddy solutions grouping projects
//!
//! ## Quick Start
//!
//! ### Converting a Manifest into a Project
//!
//! ```no_run
//! use civmodtools::converter::{ConvertOptions, modinfo_to_proj};
//!
//! // Writes "Community Patch.civ5proj" and "Community Patch.civ5sln"
//! let written = modinfo_to_proj("(1) Community Patch (v 139).modinfo", &ConvertOptions::new())?;
//! println!("Wrote {} file(s)", written.len());
//! # Ok::<(), civmodtools::Error>(())
//! ```
//!
//! ### Validating a Descriptor
//!
//! ```no_run
//! use civmodtools::mods::validate_file;
//!
//! let report = validate_file("Community Patch.civ5proj".as_ref())?;
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! # Ok::<(), civmodtools::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `civmodtools` command-line binary

pub mod converter;
pub mod error;
pub mod formats;
pub mod model;
pub mod mods;
pub mod naming;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        ModFormat, read_civ5proj, read_civ5sln, read_modinfo, write_civ5proj, write_civ5sln,
        write_modinfo,
    };
    pub use crate::model::{
        ActionKind, Association, AssociationType, EntryPoint, IssueKind, ModAction, ModFile,
        ModProject, ProjectReference, SolutionModel, ValidationIssue,
    };

    // Conversion
    pub use crate::converter::{ConvertOptions, modinfo_to_proj, proj_to_modinfo};

    // Mods module exports
    pub use crate::mods::{
        HashUpdateResult, ValidationReport, update_hashes, update_manifest_hashes, validate_file,
    };

    pub use crate::naming::{ModinfoName, build_modinfo_name, parse_modinfo_name};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
