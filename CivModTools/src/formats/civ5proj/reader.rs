//! Project (`.civ5proj`) reading

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::ModFormat;
use crate::formats::fields::FieldPaths;
use crate::formats::xml::{
    FieldReader, XmlElement, non_blank, non_empty, parse_document, read_text_file,
};
use crate::model::{
    ActionKind, Association, AssociationType, EntryPoint, IssueKind, ModAction, ModFile,
    ModProject, RELOAD_AUDIO_SYSTEM_DEFAULT, ReadReport, ValidationIssue,
};
use crate::utils::normalize_game_path;

const PATHS: FieldPaths = FieldPaths::new(ModFormat::Civ5Proj);

/// Read a project file from disk
///
/// # Errors
/// Returns an error if the file cannot be read, is not well-formed XML, or a
/// required field is missing or malformed.
pub fn read_civ5proj<P: AsRef<Path>>(path: P) -> Result<ModProject> {
    let content = read_text_file(path.as_ref())?;
    parse_civ5proj(&content)
}

/// Parse a project file, failing on the first required field that is
/// missing or malformed.
///
/// # Errors
/// Returns [`Error::Schema`] naming the offending field, or an XML error.
pub fn parse_civ5proj(content: &str) -> Result<ModProject> {
    parse_civ5proj_report(content)?.into_strict()
}

/// Parse a project file leniently, collecting every field problem.
///
/// The project format has no `ReloadAudioSystem`; the model gets
/// [`RELOAD_AUDIO_SYSTEM_DEFAULT`].
///
/// # Errors
/// Returns an error only if the XML is malformed or the root is not `<Project>`.
pub fn parse_civ5proj_report(content: &str) -> Result<ReadReport<ModProject>> {
    let root = parse_document(content)?;
    if root.name != "Project" {
        return Err(Error::schema(
            "Project",
            format!("expected root element <Project>, found <{}>", root.name),
        ));
    }

    let mut fields = FieldReader::new();
    let mut project = ModProject {
        reload_audio_system: RELOAD_AUDIO_SYSTEM_DEFAULT,
        ..ModProject::default()
    };

    // ModBuddy splits properties over several groups; the mod's own are in
    // the one holding <Name>.
    let empty = XmlElement::default();
    let props = root
        .children_named("PropertyGroup")
        .find(|group| group.child("Name").is_some())
        .or_else(|| root.child("PropertyGroup"))
        .unwrap_or(&empty);
    read_properties(props, &mut fields, &mut project);

    for group in root.children_named("ModDependencies") {
        for element in group.children_named("Association") {
            let base = PATHS.dependency(AssociationType::Game, project.dependencies.len() + 1);
            if let Some(association) = read_association(element, &base, &mut fields) {
                project.dependencies.push(association);
            }
        }
    }

    for group in root.children_named("ModBlockers") {
        for element in group.children_named("Association") {
            let base = PATHS.blocker(project.blockers.len() + 1);
            if let Some(mut association) = read_association(element, &base, &mut fields) {
                association.kind = AssociationType::Mod;
                project.blockers.push(association);
            }
        }
    }

    let mut action_index = 0;
    for group in root.children_named("ModActions") {
        for element in group.children_named("Action") {
            action_index += 1;
            let base = PATHS.action("", action_index);
            let set = fields.text(element.child_text("Set"), &format!("{base}/Set"));
            let kind = fields.text(element.child_text("Type"), &format!("{base}/Type"));
            let path = fields.text(element.child_text("FileName"), &PATHS.action_path(&base));
            project.push_action(
                set,
                ModAction::new(ActionKind::parse(&kind), normalize_game_path(&path)),
            );
        }
    }

    for group in root.children_named("ItemGroup") {
        for element in group.children_named("Content") {
            let base = PATHS.file(project.files.len() + 1);
            let path = fields.text(element.attr("Include"), &PATHS.file_path(&base));
            let import = fields
                .optional_boolean(element.child_text("ImportIntoVFS"), &PATHS.file_import(&base))
                .unwrap_or(false);

            project.files.push(ModFile {
                path: normalize_game_path(&path),
                import,
                md5: None,
                sub_type: non_empty(element.child_text("SubType")),
            });
        }
    }

    for group in root.children_named("ModContent") {
        for element in group.children_named("Content") {
            let base = PATHS.entry_point(project.entry_points.len() + 1);
            let kind = fields.text(element.child_text("Type"), &PATHS.entry_point_type(&base));
            let file = fields.text(element.child_text("FileName"), &PATHS.entry_point_file(&base));

            project.entry_points.push(EntryPoint {
                kind,
                file: normalize_game_path(&file),
                name: non_empty(element.child_text("Name")),
                description: non_blank(element.child_verbatim("Description")),
            });
        }
    }

    Ok(fields.finish(project))
}

fn read_properties(props: &XmlElement, fields: &mut FieldReader, project: &mut ModProject) {
    let text = |fields: &mut FieldReader, name: &str| {
        fields.text(props.child_text(name), &PATHS.property(name))
    };
    let free_text = |fields: &mut FieldReader, name: &str| {
        fields.verbatim_text(props.child_verbatim(name), &PATHS.property(name))
    };
    let flag = |fields: &mut FieldReader, name: &str| {
        fields.boolean(props.child_text(name), &PATHS.property(name))
    };

    let guid_field = PATHS.property("ProjectGuid");
    project.guid = fields.optional_guid(props.child_text("ProjectGuid"), &guid_field);
    if project.guid.is_none() {
        fields.push(ValidationIssue::missing(guid_field));
    }

    project.name = text(fields, "Name");
    project.mod_guid = fields.guid(props.child_text("Guid"), &PATHS.mod_guid());
    project.version = fields.text(props.child_text("ModVersion"), &PATHS.mod_version());
    project.stability = non_empty(props.child_text("Stability"));
    project.teaser = free_text(fields, "Teaser");
    project.description = free_text(fields, "Description");
    project.authors = text(fields, "Authors");
    project.special_thanks = non_blank(props.child_verbatim("SpecialThanks"));
    project.homepage = non_empty(props.child_text("Homepage"));
    project.affects_saved_games = flag(fields, "AffectsSavedGames");
    project.min_compatible_save_version = text(fields, "MinCompatibleSaveVersion");
    project.supports_single_player = flag(fields, "SupportsSinglePlayer");
    project.supports_multiplayer = flag(fields, "SupportsMultiplayer");
    project.supports_hot_seat = flag(fields, "SupportsHotSeat");
    project.supports_mac = flag(fields, "SupportsMac");
    project.hide_setup_game = fields.optional_boolean(
        props.child_text("HideSetupGame"),
        &PATHS.property("HideSetupGame"),
    );
    project.reload_unit_system = flag(fields, "ReloadUnitSystem");
    project.reload_landmark_system = flag(fields, "ReloadLandmarkSystem");
    project.reload_strategic_view_system = flag(fields, "ReloadStrategicViewSystem");
}

fn read_association(
    element: &XmlElement,
    base: &str,
    fields: &mut FieldReader,
) -> Option<Association> {
    let type_field = format!("{base}/Type");
    let raw_type = fields.text(element.child_text("Type"), &type_field);
    if raw_type.is_empty() {
        return None;
    }
    let Some(kind) = AssociationType::parse(&raw_type) else {
        fields.push(ValidationIssue::new(
            IssueKind::InvalidValue,
            type_field,
            format!("unknown association type '{raw_type}'"),
        ));
        return None;
    };

    let mut association = Association::new(kind);
    association.name = element.child_text("Name").unwrap_or_default().to_string();
    association.min_version = non_empty(element.child_text("MinVersion"));
    association.max_version = non_empty(element.child_text("MaxVersion"));

    if kind != AssociationType::Game {
        let id_field = PATHS.association_id(base);
        association.id = fields.optional_guid(element.child_text("Id"), &id_field);
        if association.id.is_none() {
            fields.push(ValidationIssue::missing(id_field));
        }
    }
    Some(association)
}
