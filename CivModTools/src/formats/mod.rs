//! Readers and writers for the Civilization V mod descriptor formats
//!
//! - `.modinfo`: the versioned manifest the game loads
//! - `.civ5proj`: the ModBuddy project file
//! - `.civ5sln`: the ModBuddy solution grouping projects

pub mod civ5proj;
pub mod civ5sln;
pub mod fields;
pub mod modinfo;
pub mod xml;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::naming::{MODINFO_EXTENSION, PROJECT_EXTENSION, SOLUTION_EXTENSION};

pub use fields::FieldPaths;
pub use civ5proj::{parse_civ5proj, parse_civ5proj_report, read_civ5proj, serialize_civ5proj, write_civ5proj};
pub use civ5sln::{parse_civ5sln, parse_civ5sln_report, read_civ5sln, serialize_civ5sln, write_civ5sln};
pub use modinfo::{parse_modinfo, parse_modinfo_report, read_modinfo, serialize_modinfo, write_modinfo};

/// Descriptor format, classified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModFormat {
    Modinfo,
    Civ5Proj,
    Civ5Sln,
}

impl ModFormat {
    /// Determine the format from an extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            MODINFO_EXTENSION => Some(Self::Modinfo),
            PROJECT_EXTENSION => Some(Self::Civ5Proj),
            SOLUTION_EXTENSION => Some(Self::Civ5Sln),
            _ => None,
        }
    }

    /// Determine the format of a file path.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Modinfo => MODINFO_EXTENSION,
            Self::Civ5Proj => PROJECT_EXTENSION,
            Self::Civ5Sln => SOLUTION_EXTENSION,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Modinfo => "mod manifest",
            Self::Civ5Proj => "ModBuddy project",
            Self::Civ5Sln => "ModBuddy solution",
        }
    }
}

impl fmt::Display for ModFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ModFormat::from_path(Path::new("mods/(1) CP (v 1).modinfo")).unwrap(),
            ModFormat::Modinfo
        );
        assert_eq!(
            ModFormat::from_path(Path::new("CP.Civ5Proj")).unwrap(),
            ModFormat::Civ5Proj
        );
        assert_eq!(
            ModFormat::from_path(Path::new("CP.civ5sln")).unwrap(),
            ModFormat::Civ5Sln
        );
        assert!(matches!(
            ModFormat::from_path(Path::new("CP.xml")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}
