//! Field paths used in validation issues
//!
//! Readers and the validator name the same field the same way, so issues
//! from both can be merged by field.

use super::ModFormat;
use crate::model::AssociationType;

/// Field path builder for one descriptor format.
#[derive(Debug, Clone, Copy)]
pub struct FieldPaths {
    format: ModFormat,
}

impl FieldPaths {
    #[must_use]
    pub const fn new(format: ModFormat) -> Self {
        Self { format }
    }

    fn is_manifest(self) -> bool {
        self.format == ModFormat::Modinfo
    }

    /// A descriptive property such as `Teaser`.
    #[must_use]
    pub fn property(self, name: &str) -> String {
        if self.is_manifest() {
            format!("Properties/{name}")
        } else {
            format!("PropertyGroup/{name}")
        }
    }

    #[must_use]
    pub fn mod_guid(self) -> String {
        if self.is_manifest() {
            "Mod@id".to_string()
        } else {
            self.property("Guid")
        }
    }

    #[must_use]
    pub fn mod_version(self) -> String {
        if self.is_manifest() {
            "Mod@version".to_string()
        } else {
            self.property("ModVersion")
        }
    }

    /// `index` is 1-based.
    #[must_use]
    pub fn dependency(self, kind: AssociationType, index: usize) -> String {
        if self.is_manifest() {
            format!("Dependencies/{kind}[{index}]")
        } else {
            format!("ModDependencies/Association[{index}]")
        }
    }

    /// Where the required `Game` dependency belongs.
    #[must_use]
    pub fn game_dependency(self) -> String {
        if self.is_manifest() {
            "Dependencies/Game".to_string()
        } else {
            "ModDependencies".to_string()
        }
    }

    /// `index` is 1-based.
    #[must_use]
    pub fn blocker(self, index: usize) -> String {
        if self.is_manifest() {
            format!("Blocks/Mod[{index}]")
        } else {
            format!("ModBlockers/Association[{index}]")
        }
    }

    /// The target id of a dependency or blocker at `base`.
    #[must_use]
    pub fn association_id(self, base: &str) -> String {
        if self.is_manifest() {
            format!("{base}@id")
        } else {
            format!("{base}/Id")
        }
    }

    /// `index` is 1-based.
    #[must_use]
    pub fn file(self, index: usize) -> String {
        if self.is_manifest() {
            format!("Files/File[{index}]")
        } else {
            format!("ItemGroup/Content[{index}]")
        }
    }

    #[must_use]
    pub fn file_path(self, base: &str) -> String {
        if self.is_manifest() {
            base.to_string()
        } else {
            format!("{base}@Include")
        }
    }

    #[must_use]
    pub fn file_import(self, base: &str) -> String {
        if self.is_manifest() {
            format!("{base}@import")
        } else {
            format!("{base}/ImportIntoVFS")
        }
    }

    #[must_use]
    pub fn file_md5(self, base: &str) -> String {
        format!("{base}@md5")
    }

    /// An action. For manifests `index` counts within `set`; for projects it
    /// counts across every action. Both are 1-based.
    #[must_use]
    pub fn action(self, set: &str, index: usize) -> String {
        if self.is_manifest() {
            format!("Actions/{set}[{index}]")
        } else {
            format!("ModActions/Action[{index}]")
        }
    }

    #[must_use]
    pub fn action_path(self, base: &str) -> String {
        if self.is_manifest() {
            base.to_string()
        } else {
            format!("{base}/FileName")
        }
    }

    /// `index` is 1-based.
    #[must_use]
    pub fn entry_point(self, index: usize) -> String {
        if self.is_manifest() {
            format!("EntryPoints/EntryPoint[{index}]")
        } else {
            format!("ModContent/Content[{index}]")
        }
    }

    #[must_use]
    pub fn entry_point_type(self, base: &str) -> String {
        if self.is_manifest() {
            format!("{base}@type")
        } else {
            format!("{base}/Type")
        }
    }

    #[must_use]
    pub fn entry_point_file(self, base: &str) -> String {
        if self.is_manifest() {
            format!("{base}@file")
        } else {
            format!("{base}/FileName")
        }
    }
}
