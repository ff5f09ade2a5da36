//! Manifest (`.modinfo`) writing

use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;

use crate::error::{Error, Result};
use crate::formats::xml::{XmlOutput, bool_digit};
use crate::model::{Association, AssociationType, ModProject};
use crate::utils::render_guid;

/// Write a manifest to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_modinfo<P: AsRef<Path>>(project: &ModProject, path: P) -> Result<()> {
    let xml = serialize_modinfo(project)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a project as a manifest
///
/// # Errors
/// Returns [`Error::ContentFilesNotFound`] if an imported file has no hash,
/// or an error if XML serialization fails.
pub fn serialize_modinfo(project: &ModProject) -> Result<String> {
    let unhashed: Vec<String> = project
        .imported_files()
        .filter(|file| file.md5.is_none())
        .map(|file| file.path.clone())
        .collect();
    if !unhashed.is_empty() {
        return Err(Error::ContentFilesNotFound { paths: unhashed });
    }

    let mut out = XmlOutput::new()?;

    let mut root = BytesStart::new("Mod");
    root.push_attribute(("id", &*render_guid(&project.mod_guid)));
    root.push_attribute(("version", project.version.as_str()));
    out.start(root)?;

    write_properties(&mut out, project)?;

    // <Dependencies>
    if project.dependencies.is_empty() {
        out.empty(BytesStart::new("Dependencies"))?;
    } else {
        out.open("Dependencies")?;
        for dep in &project.dependencies {
            out.empty(association_element(dep.kind.as_str(), dep))?;
        }
        out.end("Dependencies")?;
    }

    out.empty(BytesStart::new("References"))?;

    // <Blocks>
    if project.blockers.is_empty() {
        out.empty(BytesStart::new("Blocks"))?;
    } else {
        out.open("Blocks")?;
        for block in &project.blockers {
            out.empty(association_element("Mod", block))?;
        }
        out.end("Blocks")?;
    }

    // <Files>
    if project.files.is_empty() {
        out.empty(BytesStart::new("Files"))?;
    } else {
        out.open("Files")?;
        for file in &project.files {
            let mut element = BytesStart::new("File");
            if let (true, Some(md5)) = (file.import, &file.md5) {
                element.push_attribute(("md5", md5.to_ascii_uppercase().as_str()));
            }
            element.push_attribute(("import", bool_digit(file.import)));
            out.text_element(element, &file.path)?;
        }
        out.end("Files")?;
    }

    // <Actions>
    if !project.actions.is_empty() {
        out.open("Actions")?;
        for (set, actions) in &project.actions {
            if actions.is_empty() {
                out.empty(BytesStart::new(set.as_str()))?;
                continue;
            }
            out.open(set)?;
            for action in actions {
                out.field(action.kind.as_str(), &action.path)?;
            }
            out.end(set)?;
        }
        out.end("Actions")?;
    }

    // <EntryPoints>
    if !project.entry_points.is_empty() {
        out.open("EntryPoints")?;
        for entry in &project.entry_points {
            let mut element = BytesStart::new("EntryPoint");
            element.push_attribute(("type", entry.kind.as_str()));
            element.push_attribute(("file", entry.file.as_str()));

            if entry.name.is_none() && entry.description.is_none() {
                out.empty(element)?;
                continue;
            }
            out.start(element)?;
            out.optional_field("Name", entry.name.as_deref())?;
            out.optional_field("Description", entry.description.as_deref())?;
            out.end("EntryPoint")?;
        }
        out.end("EntryPoints")?;
    }

    out.end("Mod")?;
    out.finish()
}

fn write_properties(out: &mut XmlOutput, project: &ModProject) -> Result<()> {
    out.open("Properties")?;
    out.field("Name", &project.name)?;
    out.optional_field("Stability", project.stability.as_deref())?;
    out.field("Teaser", &project.teaser)?;
    out.field("Description", &project.description)?;
    out.field("Authors", &project.authors)?;
    out.optional_field("SpecialThanks", project.special_thanks.as_deref())?;
    out.optional_field("Homepage", project.homepage.as_deref())?;
    out.optional_field("HideSetupGame", project.hide_setup_game.map(bool_digit))?;
    out.field("AffectsSavedGames", bool_digit(project.affects_saved_games))?;
    out.field("MinCompatibleSaveVersion", &project.min_compatible_save_version)?;
    out.field("SupportsSinglePlayer", bool_digit(project.supports_single_player))?;
    out.field("SupportsMultiplayer", bool_digit(project.supports_multiplayer))?;
    out.field("SupportsHotSeat", bool_digit(project.supports_hot_seat))?;
    out.field("SupportsMac", bool_digit(project.supports_mac))?;
    out.field("ReloadAudioSystem", bool_digit(project.reload_audio_system))?;
    out.field("ReloadLandmarkSystem", bool_digit(project.reload_landmark_system))?;
    out.field(
        "ReloadStrategicViewSystem",
        bool_digit(project.reload_strategic_view_system),
    )?;
    out.field("ReloadUnitSystem", bool_digit(project.reload_unit_system))?;
    out.end("Properties")
}

fn association_element<'a>(name: &'a str, association: &'a Association) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    match (association.kind, &association.id) {
        (AssociationType::Game, _) | (_, None) => {}
        (_, Some(id)) => element.push_attribute(("id", &*render_guid(id))),
    }
    if let Some(ref min) = association.min_version {
        element.push_attribute(("minversion", min.as_str()));
    }
    if let Some(ref max) = association.max_version {
        element.push_attribute(("maxversion", max.as_str()));
    }
    if association.kind == AssociationType::Mod {
        element.push_attribute(("title", association.name.as_str()));
    }
    element
}
