//! Manifest (`.modinfo`) reading

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::ModFormat;
use crate::formats::fields::FieldPaths;
use crate::formats::xml::{
    FieldReader, XmlElement, non_blank, non_empty, parse_document, read_text_file,
};
use crate::model::{
    ActionKind, Association, AssociationType, EntryPoint, IssueKind, ModAction, ModFile,
    ModProject, ReadReport, ValidationIssue,
};
use crate::naming::parse_modinfo_name;
use crate::utils::{is_md5_hash, normalize_game_path};

const PATHS: FieldPaths = FieldPaths::new(ModFormat::Modinfo);

/// Read a manifest from disk.
///
/// The load-order prefix is taken from the file name when it follows the
/// `(N) Name (v X).modinfo` pattern.
///
/// # Errors
/// Returns an error if the file cannot be read, is not well-formed XML, or a
/// required field is missing or malformed.
pub fn read_modinfo<P: AsRef<Path>>(path: P) -> Result<ModProject> {
    let path = path.as_ref();
    let content = read_text_file(path)?;
    let mut project = parse_modinfo(&content)?;

    let file_name = path.file_name().and_then(|n| n.to_str());
    if let Some(name) = file_name.and_then(|n| parse_modinfo_name(n).ok()) {
        project.prefix = name.prefix;
    }
    Ok(project)
}

/// Parse a manifest, failing on the first required field that is missing or
/// malformed.
///
/// # Errors
/// Returns [`Error::Schema`] naming the offending field, or an XML error.
pub fn parse_modinfo(content: &str) -> Result<ModProject> {
    parse_modinfo_report(content)?.into_strict()
}

/// Parse a manifest leniently, collecting every field problem as an issue.
///
/// # Errors
/// Returns an error only if the XML is malformed or the root is not `<Mod>`.
pub fn parse_modinfo_report(content: &str) -> Result<ReadReport<ModProject>> {
    let root = parse_document(content)?;
    if root.name != "Mod" {
        return Err(Error::schema(
            "Mod",
            format!("expected root element <Mod>, found <{}>", root.name),
        ));
    }

    let mut fields = FieldReader::new();
    let mut project = ModProject {
        mod_guid: fields.guid(root.attr("id"), &PATHS.mod_guid()),
        version: fields.text(root.attr("version"), &PATHS.mod_version()),
        ..ModProject::default()
    };

    match root.child("Properties") {
        Some(props) => read_properties(props, &mut fields, &mut project),
        None => fields.push(ValidationIssue::missing("Properties")),
    }
    if let Some(deps) = root.child("Dependencies") {
        read_dependencies(deps, &mut fields, &mut project);
    }
    if let Some(blocks) = root.child("Blocks") {
        read_blockers(blocks, &mut fields, &mut project);
    }
    if let Some(files) = root.child("Files") {
        read_files(files, &mut fields, &mut project);
    }
    if let Some(actions) = root.child("Actions") {
        read_actions(actions, &mut fields, &mut project);
    }
    if let Some(entry_points) = root.child("EntryPoints") {
        read_entry_points(entry_points, &mut fields, &mut project);
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

    project.name = text(fields, "Name");
    project.stability = non_empty(props.child_text("Stability"));
    project.teaser = free_text(fields, "Teaser");
    project.description = free_text(fields, "Description");
    project.authors = text(fields, "Authors");
    project.special_thanks = non_blank(props.child_verbatim("SpecialThanks"));
    project.homepage = non_empty(props.child_text("Homepage"));
    project.hide_setup_game = fields.optional_boolean(
        props.child_text("HideSetupGame"),
        &PATHS.property("HideSetupGame"),
    );
    project.affects_saved_games = flag(fields, "AffectsSavedGames");
    project.min_compatible_save_version = text(fields, "MinCompatibleSaveVersion");
    project.supports_single_player = flag(fields, "SupportsSinglePlayer");
    project.supports_multiplayer = flag(fields, "SupportsMultiplayer");
    project.supports_hot_seat = flag(fields, "SupportsHotSeat");
    project.supports_mac = flag(fields, "SupportsMac");
    project.reload_audio_system = flag(fields, "ReloadAudioSystem");
    project.reload_landmark_system = flag(fields, "ReloadLandmarkSystem");
    project.reload_strategic_view_system = flag(fields, "ReloadStrategicViewSystem");
    project.reload_unit_system = flag(fields, "ReloadUnitSystem");
}

fn read_dependencies(deps: &XmlElement, fields: &mut FieldReader, project: &mut ModProject) {
    for dep in &deps.children {
        let Some(kind) = AssociationType::parse(&dep.name) else {
            fields.push(ValidationIssue::new(
                IssueKind::Unsupported,
                format!("Dependencies/{}", dep.name),
                "unknown dependency type, skipped",
            ));
            continue;
        };

        let base = PATHS.dependency(kind, project.dependencies.len() + 1);
        let association = read_association(dep, kind, &base, fields);
        project.dependencies.push(association);
    }
}

fn read_blockers(blocks: &XmlElement, fields: &mut FieldReader, project: &mut ModProject) {
    for block in blocks.children_named("Mod") {
        let base = PATHS.blocker(project.blockers.len() + 1);
        let association = read_association(block, AssociationType::Mod, &base, fields);
        project.blockers.push(association);
    }
}

fn read_association(
    element: &XmlElement,
    kind: AssociationType,
    base: &str,
    fields: &mut FieldReader,
) -> Association {
    let mut association = Association::new(kind);
    association.min_version = non_empty(element.attr("minversion"));
    association.max_version = non_empty(element.attr("maxversion"));
    association.name = element.attr("title").unwrap_or_default().trim().to_string();

    if kind != AssociationType::Game {
        let id_field = PATHS.association_id(base);
        association.id = fields.optional_guid(element.attr("id"), &id_field);
        if association.id.is_none() {
            fields.push(ValidationIssue::missing(id_field));
        }
    }
    association
}

fn read_files(files: &XmlElement, fields: &mut FieldReader, project: &mut ModProject) {
    for file in files.children_named("File") {
        let base = PATHS.file(project.files.len() + 1);
        let path = fields.text(Some(file.trimmed_text()), &PATHS.file_path(&base));
        let path = normalize_game_path(&path);
        let import = fields.boolean(file.attr("import"), &PATHS.file_import(&base));
        let md5 = read_md5(file.attr("md5"), import, &path, &PATHS.file_md5(&base), fields);

        project.files.push(ModFile {
            path,
            import,
            md5,
            sub_type: None,
        });
    }
}

fn read_md5(
    raw: Option<&str>,
    import: bool,
    path: &str,
    field: &str,
    fields: &mut FieldReader,
) -> Option<String> {
    match (import, non_empty(raw)) {
        (true, Some(hash)) if is_md5_hash(&hash) => Some(hash.to_ascii_uppercase()),
        (true, Some(hash)) => {
            fields.push(ValidationIssue::new(
                IssueKind::InvalidHash,
                field,
                format!("'{hash}' is not an MD5 hash"),
            ));
            None
        }
        (true, None) => {
            fields.push(ValidationIssue::new(
                IssueKind::InvalidHash,
                field,
                "imported file has no md5",
            ));
            None
        }
        (false, Some(_)) => {
            tracing::debug!("Dropping md5 of non-imported file {}", path);
            None
        }
        (false, None) => None,
    }
}

fn read_actions(actions: &XmlElement, fields: &mut FieldReader, project: &mut ModProject) {
    for set in &actions.children {
        let mut entries = Vec::with_capacity(set.children.len());
        for (i, action) in set.children.iter().enumerate() {
            let base = PATHS.action(&set.name, i + 1);
            let path = fields.text(Some(action.trimmed_text()), &PATHS.action_path(&base));
            entries.push(ModAction::new(
                ActionKind::parse(&action.name),
                normalize_game_path(&path),
            ));
        }
        project
            .actions
            .entry(set.name.clone())
            .or_default()
            .extend(entries);
    }
}

fn read_entry_points(
    entry_points: &XmlElement,
    fields: &mut FieldReader,
    project: &mut ModProject,
) {
    for element in entry_points.children_named("EntryPoint") {
        let base = PATHS.entry_point(project.entry_points.len() + 1);
        let kind = fields.text(element.attr("type"), &PATHS.entry_point_type(&base));
        let file = fields.text(element.attr("file"), &PATHS.entry_point_file(&base));

        project.entry_points.push(EntryPoint {
            kind,
            file: normalize_game_path(&file),
            name: non_empty(element.child_text("Name")),
            description: non_blank(element.child_verbatim("Description")),
        });
    }
}
