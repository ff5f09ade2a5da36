//! CLI commands for descriptor conversion

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{OperationProgress, print_done};
use crate::converter::{ConvertOptions, modinfo_to_proj_with_progress, proj_to_modinfo_with_progress};

/// Convert a manifest into a project (and solution)
pub fn modinfo_to_proj(
    source: &Path,
    no_solution: bool,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut options = ConvertOptions::new().with_create_solution(!no_solution);
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }

    let display = OperationProgress::new(2, quiet);
    let written = modinfo_to_proj_with_progress(source, &options, &|p| display.update(p))
        .with_context(|| format!("Failed to convert {}", source.display()))?;

    if !quiet {
        for path in &written {
            println!("  {}", path.display());
        }
        print_done(start.elapsed());
    }
    Ok(())
}

/// Convert a project into a manifest
pub fn proj_to_modinfo(
    source: &Path,
    mod_version: Option<&str>,
    manifest: Option<&Path>,
    no_hash: bool,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut options = ConvertOptions::new().with_refresh_hashes(!no_hash);
    if let Some(version) = mod_version {
        options = options.with_output_version(version);
    }
    if let Some(path) = manifest {
        options = options.with_existing_manifest(path);
    }
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }

    let steps = if no_hash { 2 } else { 3 };
    let display = OperationProgress::new(steps, quiet);
    let written = proj_to_modinfo_with_progress(source, &options, &|p| display.update(p))
        .with_context(|| format!("Failed to convert {}", source.display()))?;

    if !quiet {
        println!("  {}", written.display());
        print_done(start.elapsed());
    }
    Ok(())
}
