//! Descriptor conversion
//!
//! - `.modinfo` → `.civ5proj`, creating or merging the `.civ5sln` beside it
//! - `.civ5proj` → `.modinfo`, carrying forward and refreshing content hashes
//!
//! Output file names come from the [`crate::naming`] codec. Every output is
//! serialized before the first file is written.

mod modinfo_to_proj;
mod options;
mod proj_to_modinfo;

pub use modinfo_to_proj::{modinfo_to_proj, modinfo_to_proj_with_progress};
pub use options::ConvertOptions;
pub use proj_to_modinfo::{proj_to_modinfo, proj_to_modinfo_with_progress};
