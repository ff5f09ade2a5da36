//! Conversion options
//!
//! Both conversion directions share one set of options; each direction reads
//! only the fields that apply to it.

use std::path::{Path, PathBuf};

/// Options for manifest/project conversion.
///
/// # Example
///
/// ```no_run
/// use civmodtools::converter::{ConvertOptions, proj_to_modinfo};
///
/// let options = ConvertOptions::new()
///     .with_output_version("12")
///     .with_refresh_hashes(false);
/// let manifest = proj_to_modinfo("My Mod/My Mod.civ5proj", &options)?;
/// println!("wrote {}", manifest.display());
/// # Ok::<(), civmodtools::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Write or merge a `.civ5sln` next to the project (manifest → project).
    /// Default: true
    pub create_solution: bool,

    /// Directory for the output files. Defaults to the source's directory.
    pub output_dir: Option<PathBuf>,

    /// Version of the written manifest. Defaults to the project's `ModVersion`.
    pub output_version: Option<String>,

    /// Manifest whose content hashes are carried forward (project → manifest).
    /// If None, one is looked up next to the output.
    pub existing_manifest: Option<PathBuf>,

    /// Recompute content hashes from disk (project → manifest).
    /// Default: true
    pub refresh_hashes: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// Create options with the defaults described on each field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            create_solution: true,
            output_dir: None,
            output_version: None,
            existing_manifest: None,
            refresh_hashes: true,
        }
    }

    /// Set whether to write the solution file.
    #[must_use]
    pub fn with_create_solution(mut self, create: bool) -> Self {
        self.create_solution = create;
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the version of the written manifest.
    #[must_use]
    pub fn with_output_version(mut self, version: impl Into<String>) -> Self {
        self.output_version = Some(version.into());
        self
    }

    /// Set the manifest to carry hashes forward from.
    #[must_use]
    pub fn with_existing_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing_manifest = Some(path.into());
        self
    }

    /// Set whether to recompute content hashes.
    #[must_use]
    pub fn with_refresh_hashes(mut self, refresh: bool) -> Self {
        self.refresh_hashes = refresh;
        self
    }

    /// Directory the output for `source` goes to.
    pub(crate) fn output_dir_for(&self, source: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert!(options.create_solution);
        assert!(options.refresh_hashes);
        assert_eq!(options.output_dir, None);
        assert_eq!(
            options.output_dir_for(Path::new("mods/My Mod.civ5proj")),
            PathBuf::from("mods")
        );
        assert_eq!(
            options.output_dir_for(Path::new("My Mod.civ5proj")),
            PathBuf::new()
        );
    }

    #[test]
    fn test_output_dir_overrides_source_dir() {
        let options = ConvertOptions::new()
            .with_output_dir("out")
            .with_create_solution(false);
        assert!(!options.create_solution);
        assert_eq!(
            options.output_dir_for(Path::new("mods/My Mod.civ5proj")),
            PathBuf::from("out")
        );
    }
}
