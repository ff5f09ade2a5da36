//! Project (`.civ5proj`) writing

use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;

use crate::error::{Error, Result};
use crate::formats::xml::{XmlOutput, bool_word};
use crate::model::{Association, ModProject};
use crate::utils::render_guid;

/// MSBuild namespace shared by project and solution files.
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

const CONFIGURATION: &str = "Default";
const CONFIGURATION_UNSET: &[u8] = b" '$(Configuration)' == '' ";
const CONFIGURATION_DEFAULT: &[u8] = b" '$(Configuration)' == 'Default' ";
const TARGETS: &[u8] = b"$(MSBuildLocalExtensionPath)Civ5Mod.targets";

/// `<Project>` root shared by project and solution files.
pub(crate) fn project_root() -> BytesStart<'static> {
    let mut root = BytesStart::new("Project");
    root.push_attribute(("DefaultTargets", "Deploy"));
    root.push_attribute(("ToolsVersion", "4.0"));
    root.push_attribute(("xmlns", MSBUILD_NAMESPACE));
    root
}

/// Write a project file to disk
///
/// # Errors
/// Returns an error if the project has no GUID, or if serialization or file
/// writing fails.
pub fn write_civ5proj<P: AsRef<Path>>(project: &ModProject, path: P) -> Result<()> {
    let xml = serialize_civ5proj(project)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a project file
///
/// # Errors
/// Returns [`Error::Schema`] if the project has no GUID, or an XML error.
pub fn serialize_civ5proj(project: &ModProject) -> Result<String> {
    let project_guid = project
        .guid
        .as_deref()
        .ok_or_else(|| Error::schema("PropertyGroup/ProjectGuid", "project has no GUID"))?;

    let mut out = XmlOutput::new()?;
    out.start(project_root())?;

    write_properties(&mut out, project, project_guid)?;

    let mut config = BytesStart::new("PropertyGroup");
    config.push_attribute((b"Condition".as_slice(), CONFIGURATION_DEFAULT));
    out.start(config)?;
    out.field("OutputPath", ".")?;
    out.end("PropertyGroup")?;

    write_associations(&mut out, "ModDependencies", &project.dependencies)?;
    write_associations(&mut out, "ModBlockers", &project.blockers)?;

    if !project.actions.is_empty() {
        out.open("ModActions")?;
        for (set, action) in project.iter_actions() {
            out.open("Action")?;
            out.field("Set", set)?;
            out.field("Type", action.kind.as_str())?;
            out.field("FileName", &action.path)?;
            out.end("Action")?;
        }
        out.end("ModActions")?;
    }

    if !project.files.is_empty() {
        out.open("ItemGroup")?;
        for file in &project.files {
            let mut content = BytesStart::new("Content");
            content.push_attribute(("Include", file.path.as_str()));
            out.start(content)?;
            out.optional_field("SubType", file.sub_type.as_deref())?;
            out.field("ImportIntoVFS", bool_word(file.import))?;
            out.end("Content")?;
        }
        out.end("ItemGroup")?;
    }

    if !project.entry_points.is_empty() {
        out.open("ModContent")?;
        for entry in &project.entry_points {
            out.open("Content")?;
            out.field("Type", &entry.kind)?;
            out.optional_field("Name", entry.name.as_deref())?;
            out.optional_field("Description", entry.description.as_deref())?;
            out.field("FileName", &entry.file)?;
            out.end("Content")?;
        }
        out.end("ModContent")?;
    }

    let mut import = BytesStart::new("Import");
    import.push_attribute((b"Project".as_slice(), TARGETS));
    out.empty(import)?;

    out.end("Project")?;
    out.finish()
}

fn write_properties(out: &mut XmlOutput, project: &ModProject, project_guid: &str) -> Result<()> {
    out.open("PropertyGroup")?;

    let mut configuration = BytesStart::new("Configuration");
    configuration.push_attribute((b"Condition".as_slice(), CONFIGURATION_UNSET));
    out.text_element(configuration, CONFIGURATION)?;

    out.field("ProjectGuid", &render_guid(project_guid))?;
    out.field("Name", &project.name)?;
    out.field("Guid", &render_guid(&project.mod_guid))?;
    out.field("ModVersion", &project.version)?;
    out.optional_field("Stability", project.stability.as_deref())?;
    out.field("Teaser", &project.teaser)?;
    out.field("Description", &project.description)?;
    out.field("Authors", &project.authors)?;
    out.optional_field("SpecialThanks", project.special_thanks.as_deref())?;
    out.optional_field("Homepage", project.homepage.as_deref())?;
    out.field("AffectsSavedGames", bool_word(project.affects_saved_games))?;
    out.field("MinCompatibleSaveVersion", &project.min_compatible_save_version)?;
    out.field("SupportsSinglePlayer", bool_word(project.supports_single_player))?;
    out.field("SupportsMultiplayer", bool_word(project.supports_multiplayer))?;
    out.field("SupportsHotSeat", bool_word(project.supports_hot_seat))?;
    out.field("SupportsMac", bool_word(project.supports_mac))?;
    out.optional_field("HideSetupGame", project.hide_setup_game.map(bool_word))?;
    out.field("ReloadUnitSystem", bool_word(project.reload_unit_system))?;
    out.field("ReloadLandmarkSystem", bool_word(project.reload_landmark_system))?;
    out.field(
        "ReloadStrategicViewSystem",
        bool_word(project.reload_strategic_view_system),
    )?;
    out.end("PropertyGroup")
}

fn write_associations(out: &mut XmlOutput, group: &str, associations: &[Association]) -> Result<()> {
    if associations.is_empty() {
        return Ok(());
    }
    out.open(group)?;
    for association in associations {
        out.open("Association")?;
        out.field("Type", association.kind.as_str())?;
        out.field("Name", &association.name)?;
        out.optional_field("Id", association.id.as_deref().map(render_guid).as_deref())?;
        out.optional_field("MinVersion", association.min_version.as_deref())?;
        out.optional_field("MaxVersion", association.max_version.as_deref())?;
        out.end("Association")?;
    }
    out.end(group)
}
