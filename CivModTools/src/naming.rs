//! File name codec
//!
//! Manifests are named `[(N) ]Base Name (v X).modinfo`, where `N` is an
//! optional load-order numeral and `X` the mod version. Project and solution
//! files carry the base name alone. Only the leading `(N) ` and trailing
//! ` (v X)` tokens are recognized; any other parenthetical belongs to the base
//! name.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

pub const MODINFO_EXTENSION: &str = "modinfo";
pub const PROJECT_EXTENSION: &str = "civ5proj";
pub const SOLUTION_EXTENSION: &str = "civ5sln";

static MODINFO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\((\d+)\) )?(.*\S) \(v ([^()\s]*)\)(?i:\.modinfo)$")
        .expect("invalid modinfo name regex")
});

static PREFIX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d+\) ").expect("invalid prefix regex"));

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(v [^()\s]*\)$").expect("invalid version regex"));

/// The parts encoded in a manifest file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModinfoName {
    pub prefix: Option<String>,
    pub base_name: String,
    pub version: String,
}

/// Split a manifest file name into prefix, base name and version.
///
/// # Errors
/// Returns [`Error::NameFormat`] when the extension is not `.modinfo`, the
/// trailing `(v X)` token is missing, or `X` is not a positive integer.
pub fn parse_modinfo_name(file_name: &str) -> Result<ModinfoName> {
    if !has_extension(file_name, MODINFO_EXTENSION) {
        return Err(Error::name_format(file_name, "expected a .modinfo file"));
    }

    let caps = MODINFO_NAME
        .captures(file_name)
        .ok_or_else(|| Error::name_format(file_name, "missing '(v X)' version token"))?;

    let version = &caps[3];
    if !is_positive_integer(version) {
        return Err(Error::name_format(
            file_name,
            format!("version '{version}' is not a positive integer"),
        ));
    }

    Ok(ModinfoName {
        prefix: caps.get(1).map(|m| m.as_str().to_string()),
        base_name: caps[2].to_string(),
        version: version.to_string(),
    })
}

/// Build `[({prefix}) ]{base_name} (v {version}).modinfo`.
#[must_use]
pub fn build_modinfo_name(base_name: &str, version: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("({prefix}) {base_name} (v {version}).{MODINFO_EXTENSION}"),
        None => format!("{base_name} (v {version}).{MODINFO_EXTENSION}"),
    }
}

/// `Base.civ5proj` for a mod name, with any prefix or version token removed.
#[must_use]
pub fn build_project_name(name: &str) -> String {
    format!("{}.{PROJECT_EXTENSION}", strip_name_tokens(name))
}

/// `Base.civ5sln` for a mod name, with any prefix or version token removed.
#[must_use]
pub fn build_solution_name(name: &str) -> String {
    format!("{}.{SOLUTION_EXTENSION}", strip_name_tokens(name))
}

/// Base name of a `Base.civ5proj` file.
///
/// # Errors
/// Returns [`Error::NameFormat`] for other extensions or an empty base name.
pub fn parse_project_name(file_name: &str) -> Result<String> {
    if !has_extension(file_name, PROJECT_EXTENSION) {
        return Err(Error::name_format(file_name, "expected a .civ5proj file"));
    }
    let base = &file_name[..file_name.len() - PROJECT_EXTENSION.len() - 1];
    if base.trim().is_empty() {
        return Err(Error::name_format(file_name, "empty project name"));
    }
    Ok(base.to_string())
}

/// Remove a leading `(N) ` and a trailing ` (v X)` token.
#[must_use]
pub fn strip_name_tokens(name: &str) -> String {
    let name = name.trim();
    let name = PREFIX_TOKEN.replace(name, "");
    VERSION_TOKEN.replace(&name, "").into_owned()
}

fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
}

pub(crate) fn is_positive_integer(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.bytes().any(|b| b != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_with_prefix() {
        let name = parse_modinfo_name("(1) Community Patch (v 139).modinfo").unwrap();
        assert_eq!(
            name,
            ModinfoName {
                prefix: Some("1".to_string()),
                base_name: "Community Patch".to_string(),
                version: "139".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_without_prefix() {
        let name = parse_modinfo_name("Community Patch (v 2).MODINFO").unwrap();
        assert_eq!(name.prefix, None);
        assert_eq!(name.base_name, "Community Patch");
        assert_eq!(name.version, "2");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for bad in [
            "Community Patch.modinfo",
            "Community Patch (v 0).modinfo",
            "Community Patch (v 1.5).modinfo",
            "Community Patch (v ).modinfo",
            "Community Patch (v 3).civ5proj",
            " (v 3).modinfo",
        ] {
            assert!(
                matches!(parse_modinfo_name(bad), Err(Error::NameFormat { .. })),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_name_codec_inverse() {
        let cases = [
            ("Community Patch", "139", Some("1")),
            ("Community Patch", "1", None),
            ("More Units (BNW)", "12", Some("3")),
            ("(BNW) Promotions (v 2) Extended", "4", None),
            ("Tech (Tree) (Redux)", "7", Some("42")),
        ];
        for (base, version, prefix) in cases {
            let file_name = build_modinfo_name(base, version, prefix);
            let parsed = parse_modinfo_name(&file_name).unwrap();
            assert_eq!(parsed.base_name, base, "{file_name}");
            assert_eq!(parsed.version, version, "{file_name}");
            assert_eq!(parsed.prefix.as_deref(), prefix, "{file_name}");
        }
    }

    #[test]
    fn test_build_project_and_solution_names() {
        assert_eq!(build_project_name("Community Patch"), "Community Patch.civ5proj");
        assert_eq!(
            build_project_name("(1) Community Patch (v 139)"),
            "Community Patch.civ5proj"
        );
        assert_eq!(
            build_solution_name("(2) Units (BNW) (v 3)"),
            "Units (BNW).civ5sln"
        );
    }

    #[test]
    fn test_parse_project_name() {
        assert_eq!(
            parse_project_name("Community Patch.civ5proj").unwrap(),
            "Community Patch"
        );
        assert!(parse_project_name("Community Patch.civ5sln").is_err());
        assert!(parse_project_name(".civ5proj").is_err());
    }
}
