//! `.civ5proj` → `.modinfo` conversion

use std::fs;
use std::path::{Path, PathBuf};

use super::ConvertOptions;
use crate::error::{Error, Result};
use crate::formats::xml::read_text_file;
use crate::formats::{parse_modinfo_report, read_civ5proj, write_modinfo};
use crate::model::{ModProject, RELOAD_AUDIO_SYSTEM_DEFAULT};
use crate::mods::{ModPhase, ModProgress, ModProgressCallback, update_hashes_with_progress};
use crate::naming::{
    ModinfoName, build_modinfo_name, is_positive_integer, parse_modinfo_name, parse_project_name,
};
use crate::utils::paths_equal;

/// Convert a ModBuddy project into a versioned manifest.
///
/// Content hashes are carried forward from an existing manifest, then
/// recomputed from the files next to the project unless disabled.
///
/// # Errors
/// Returns an error if the project or an explicitly named manifest cannot be
/// read, [`Error::NameFormat`] if the output version is not a positive
/// integer, and [`Error::ContentFilesNotFound`] listing every imported file
/// left without a hash. Nothing is written in any of these cases.
pub fn proj_to_modinfo<P: AsRef<Path>>(source: P, options: &ConvertOptions) -> Result<PathBuf> {
    proj_to_modinfo_with_progress(source, options, &|_| {})
}

/// Convert a project into a manifest with a progress callback.
///
/// # Errors
/// See [`proj_to_modinfo`].
pub fn proj_to_modinfo_with_progress<P: AsRef<Path>>(
    source: P,
    options: &ConvertOptions,
    progress: ModProgressCallback,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
    let base_name = parse_project_name(file_name)?;

    progress(&ModProgress::with_file(
        ModPhase::ReadingSource,
        1,
        1,
        file_name,
    ));
    let mut project = read_civ5proj(source)?;
    project.guid = None;
    project.reload_audio_system = RELOAD_AUDIO_SYSTEM_DEFAULT;
    if let Some(version) = &options.output_version {
        project.version.clone_from(version);
    }
    if !is_positive_integer(&project.version) {
        return Err(Error::name_format(
            build_modinfo_name(&base_name, &project.version, None),
            format!("version '{}' is not a positive integer", project.version),
        ));
    }

    let output_dir = options.output_dir_for(source);
    if let Some(path) = &options.existing_manifest {
        let previous = read_previous_manifest(path)?;
        carry_forward(&mut project, path, &previous);
    } else if let Some(path) = find_sibling_manifest(&output_dir, &base_name, &project.version) {
        match read_previous_manifest(&path) {
            Ok(previous) => carry_forward(&mut project, &path, &previous),
            Err(e) => tracing::warn!("Ignoring unreadable manifest {:?}: {}", path, e),
        }
    }

    if options.refresh_hashes {
        let mod_root = source.parent().unwrap_or_else(|| Path::new("."));
        update_hashes_with_progress(&mut project, mod_root, progress);
    }

    let missing: Vec<String> = project
        .imported_files()
        .filter(|file| file.md5.is_none())
        .map(|file| file.path.clone())
        .collect();
    if !missing.is_empty() {
        return Err(Error::ContentFilesNotFound { paths: missing });
    }

    let output_path = output_dir.join(build_modinfo_name(
        &base_name,
        &project.version,
        project.prefix.as_deref(),
    ));
    progress(&ModProgress::with_file(
        ModPhase::WritingOutput,
        1,
        1,
        output_path.display().to_string(),
    ));
    fs::create_dir_all(&output_dir)?;
    write_modinfo(&project, &output_path)?;
    tracing::info!("Wrote {:?}", output_path);

    progress(&ModProgress::new(ModPhase::Complete, 1, 1));
    Ok(output_path)
}

/// Manifest to take hashes from when none is named: the exact output name, or
/// the highest-versioned manifest in the output directory with the same base
/// name.
fn find_sibling_manifest(output_dir: &Path, base_name: &str, version: &str) -> Option<PathBuf> {
    let exact = output_dir.join(build_modinfo_name(base_name, version, None));
    if exact.is_file() {
        return Some(exact);
    }

    let dir = if output_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        output_dir
    };
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = parse_modinfo_file_name(&path)?;
            (name.base_name == base_name).then(|| (name.version.parse::<u64>().unwrap_or(0), path))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
        .map(|(_, path)| path)
}

fn parse_modinfo_file_name(path: &Path) -> Option<ModinfoName> {
    let file_name = path.file_name()?.to_str()?;
    parse_modinfo_name(file_name).ok()
}

/// Read an earlier manifest leniently; only malformed XML or a wrong root fails.
fn read_previous_manifest(path: &Path) -> Result<ModProject> {
    let content = read_text_file(path)?;
    Ok(parse_modinfo_report(&content)?.value)
}

/// Take the prefix and hashes of an earlier manifest.
fn carry_forward(project: &mut ModProject, path: &Path, previous: &ModProject) {
    project.prefix = parse_modinfo_file_name(path).and_then(|name| name.prefix);
    let copied = copy_hashes(project, previous);
    tracing::info!("Carried {} hash(es) forward from {:?}", copied, path);
}

/// Copy each imported file's hash from `previous` by path. Returns the number
/// of hashes copied.
fn copy_hashes(project: &mut ModProject, previous: &ModProject) -> usize {
    let mut copied = 0;
    for file in project.files.iter_mut().filter(|file| file.import) {
        let hash = previous
            .imported_files()
            .find(|old| paths_equal(&old.path, &file.path))
            .and_then(|old| old.md5.clone());
        if let Some(hash) = hash {
            file.md5 = Some(hash);
            copied += 1;
        }
    }
    copied
}
