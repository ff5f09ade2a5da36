//! `.modinfo` → `.civ5proj` (+ `.civ5sln`) conversion

use std::fs;
use std::path::{Path, PathBuf};

use super::ConvertOptions;
use crate::error::{Error, Result};
use crate::formats::xml::read_text_file;
use crate::formats::{
    parse_civ5proj_report, read_civ5sln, read_modinfo, serialize_civ5proj, serialize_civ5sln,
};
use crate::model::{ProjectReference, SolutionModel, UpsertOutcome};
use crate::mods::{ModPhase, ModProgress, ModProgressCallback};
use crate::naming::{build_project_name, build_solution_name, parse_modinfo_name};
use crate::utils::new_guid;

/// Convert a manifest into a ModBuddy project, and optionally a solution.
///
/// Returns the written paths, project first.
///
/// # Errors
/// Returns an error if the file name does not follow the manifest naming
/// pattern, the manifest or an existing solution cannot be read, or writing
/// fails. Nothing is written unless every output serialized.
pub fn modinfo_to_proj<P: AsRef<Path>>(source: P, options: &ConvertOptions) -> Result<Vec<PathBuf>> {
    modinfo_to_proj_with_progress(source, options, &|_| {})
}

/// Convert a manifest into a project with a progress callback.
///
/// # Errors
/// See [`modinfo_to_proj`].
pub fn modinfo_to_proj_with_progress<P: AsRef<Path>>(
    source: P,
    options: &ConvertOptions,
    progress: ModProgressCallback,
) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
    let name = parse_modinfo_name(file_name)?;

    progress(&ModProgress::with_file(
        ModPhase::ReadingSource,
        1,
        1,
        file_name,
    ));
    let mut project = read_modinfo(source)?;

    let output_dir = options.output_dir_for(source);
    let project_name = build_project_name(&name.base_name);
    let project_path = output_dir.join(&project_name);

    project.guid = Some(existing_project_guid(&project_path).unwrap_or_else(new_guid));
    let mut outputs = vec![(project_path, serialize_civ5proj(&project)?)];

    if options.create_solution {
        let solution_path = output_dir.join(build_solution_name(&name.base_name));
        let reference = ProjectReference::new(&project_name, name.base_name.as_str());

        let solution = if solution_path.is_file() {
            let mut solution = read_civ5sln(&solution_path)?;
            match solution.upsert_project(reference) {
                UpsertOutcome::Updated => {
                    tracing::debug!("Updated {} in {:?}", project_name, solution_path);
                }
                UpsertOutcome::Added => {
                    tracing::info!("Added {} to {:?}", project_name, solution_path);
                }
            }
            solution
        } else {
            SolutionModel::for_project(name.base_name.as_str(), reference)
        };
        outputs.push((solution_path, serialize_civ5sln(&solution)?));
    }

    fs::create_dir_all(&output_dir)?;

    let total = outputs.len();
    let mut written = Vec::with_capacity(total);
    for (index, (path, xml)) in outputs.into_iter().enumerate() {
        progress(&ModProgress::with_file(
            ModPhase::WritingOutput,
            index + 1,
            total,
            path.display().to_string(),
        ));
        fs::write(&path, xml)?;
        tracing::info!("Wrote {:?}", path);
        written.push(path);
    }

    progress(&ModProgress::new(ModPhase::Complete, total, total));
    Ok(written)
}

/// `ProjectGuid` of a project already at `path`, so regenerating a project
/// keeps its identity.
fn existing_project_guid(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let report = read_text_file(path).and_then(|content| parse_civ5proj_report(&content));
    match report {
        Ok(report) => report.value.guid,
        Err(e) => {
            tracing::warn!("Ignoring unreadable project {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{read_civ5proj, write_civ5sln};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Mod id="d1b6328c-ff44-4b0d-aad7-c657f83610cd" version="3">
  <Properties>
    <Name>Better Borders</Name>
    <Teaser>Borders</Teaser>
    <Description>Better borders.</Description>
    <Authors>Someone</Authors>
    <AffectsSavedGames>0</AffectsSavedGames>
    <MinCompatibleSaveVersion>0</MinCompatibleSaveVersion>
    <SupportsSinglePlayer>1</SupportsSinglePlayer>
    <SupportsMultiplayer>0</SupportsMultiplayer>
    <SupportsHotSeat>0</SupportsHotSeat>
    <SupportsMac>1</SupportsMac>
    <ReloadAudioSystem>0</ReloadAudioSystem>
    <ReloadLandmarkSystem>0</ReloadLandmarkSystem>
    <ReloadStrategicViewSystem>0</ReloadStrategicViewSystem>
    <ReloadUnitSystem>0</ReloadUnitSystem>
  </Properties>
  <Dependencies>
    <Game minversion="1.0.0.0" maxversion="999.0.0.0" />
  </Dependencies>
  <References />
  <Blocks />
  <Files />
</Mod>
"#;

    fn write_manifest(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, MANIFEST).unwrap();
        path
    }

    #[test]
    fn test_regenerating_keeps_project_guid() {
        let temp = TempDir::new().unwrap();
        let source = write_manifest(temp.path(), "Better Borders (v 3).modinfo");
        let options = ConvertOptions::new().with_create_solution(false);

        let first = modinfo_to_proj(&source, &options).unwrap();
        assert_eq!(first, [temp.path().join("Better Borders.civ5proj")]);
        let guid = read_civ5proj(&first[0]).unwrap().guid;
        assert!(guid.is_some());

        modinfo_to_proj(&source, &options).unwrap();
        assert_eq!(read_civ5proj(&first[0]).unwrap().guid, guid);
        assert!(!temp.path().join("Better Borders.civ5sln").exists());
    }

    #[test]
    fn test_bad_name_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = write_manifest(temp.path(), "Better Borders.modinfo");

        let result = modinfo_to_proj(&source, &ConvertOptions::new());
        assert!(matches!(result, Err(Error::NameFormat { .. })));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unreadable_solution_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = write_manifest(temp.path(), "Better Borders (v 3).modinfo");
        fs::write(temp.path().join("Better Borders.civ5sln"), "<Solution />").unwrap();

        assert!(modinfo_to_proj(&source, &ConvertOptions::new()).is_err());
        assert!(!temp.path().join("Better Borders.civ5proj").exists());
    }

    #[test]
    fn test_merges_into_existing_solution() {
        let temp = TempDir::new().unwrap();
        let source = write_manifest(temp.path(), "Better Borders (v 3).modinfo");

        let mut existing = SolutionModel::new("Better Borders", new_guid());
        existing.upsert_project(ProjectReference::new("Other\\Other.civ5proj", "Other"));
        write_civ5sln(&existing, temp.path().join("Better Borders.civ5sln")).unwrap();

        let written = modinfo_to_proj(&source, &ConvertOptions::new()).unwrap();
        assert_eq!(written.len(), 2);

        let solution = read_civ5sln(&written[1]).unwrap();
        assert_eq!(solution.project_guid, existing.project_guid);
        let names: Vec<&str> = solution.projects().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Other", "Better Borders"]);
    }
}
