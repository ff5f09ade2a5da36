//! Path utilities
//!
//! Descriptor files always store game paths with Windows separators, whatever
//! platform the tools run on. These helpers convert between that form and
//! system paths, and compare game paths the way the game does.

use std::path::{Path, PathBuf};

const GAME_SEPARATOR: char = '\\';

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
}

fn is_rooted(path: &str) -> bool {
    path.starts_with(['/', '\\'])
}

/// Normalize a path to the backslash form used inside descriptor files.
///
/// `.` segments and repeated separators are dropped and `dir\..` pairs are
/// collapsed. Leading `..` segments of a relative path are kept. An empty path
/// stays empty.
#[must_use]
pub fn normalize_game_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }

    let rooted = is_rooted(path);
    let mut parts: Vec<&str> = Vec::new();
    for segment in segments(path) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("\\");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("{GAME_SEPARATOR}{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Case-insensitive comparison key for a game path.
#[must_use]
pub fn path_key(path: &str) -> String {
    normalize_game_path(path).to_lowercase()
}

/// Compare two game paths ignoring separator style and case.
///
/// `.` segments are ignored. `..` segments are resolved, but a path that uses
/// `..` never equals one that does not, even when both point at the same file.
#[must_use]
pub fn paths_equal(a: &str, b: &str) -> bool {
    fn components(path: &str) -> Vec<String> {
        let mut parts: Vec<String> = Vec::new();
        for segment in segments(path) {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                other => parts.push(other.to_lowercase()),
            }
        }
        parts
    }

    fn has_parent_refs(path: &str) -> bool {
        segments(path).any(|s| s == "..")
    }

    has_parent_refs(a) == has_parent_refs(b) && components(a) == components(b)
}

/// Join a game path onto a system directory.
#[must_use]
pub fn game_to_system_path(root: &Path, game_path: &str) -> PathBuf {
    segments(game_path)
        .filter(|s| !s.is_empty() && *s != ".")
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Resolve a game path under `root`, refusing paths that leave it.
///
/// Returns `None` for rooted paths, drive-qualified paths and paths whose
/// `..` segments climb above `root`.
#[must_use]
pub fn resolve_under(root: &Path, game_path: &str) -> Option<PathBuf> {
    if is_rooted(game_path) || game_path.contains(':') {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for segment in segments(game_path) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().fold(root.to_path_buf(), |acc, s| acc.join(s)))
}
