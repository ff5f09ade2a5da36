//! Content hash updates
//!
//! Every file a manifest imports into the game's virtual file system carries
//! the MD5 of its content. These helpers recompute those hashes from disk.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use super::types::{ModPhase, ModProgress, ModProgressCallback};
use crate::error::{Error, Result};
use crate::formats::modinfo::{parse_modinfo_report, write_modinfo};
use crate::formats::xml::read_text_file;
use crate::model::{IssueKind, ModProject};
use crate::utils::{md5_file, resolve_under};

/// Why a file could not be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashFailureReason {
    /// The path leaves the mod directory.
    OutsideRoot,
    /// Nothing (or no regular file) exists at the path.
    NotFound,
    /// The file exists but could not be read.
    Unreadable(String),
}

impl fmt::Display for HashFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideRoot => f.write_str("path is outside the mod directory"),
            Self::NotFound => f.write_str("file not found"),
            Self::Unreadable(e) => write!(f, "unreadable: {e}"),
        }
    }
}

/// A file that could not be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFailure {
    /// Game path as listed in the descriptor.
    pub path: String,
    pub reason: HashFailureReason,
}

impl HashFailure {
    fn new(path: &str, reason: HashFailureReason) -> Self {
        Self {
            path: path.to_string(),
            reason,
        }
    }
}

/// Outcome of a hash update
#[derive(Debug, Clone, Default)]
pub struct HashUpdateResult {
    /// Imported files whose hash was computed.
    pub updated: usize,
    /// Of those, files whose hash differs from the previous one.
    pub changed: usize,
    /// Imported files that could not be hashed, in file order.
    pub failures: Vec<HashFailure>,
}

impl HashUpdateResult {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail with [`Error::ContentFilesNotFound`] listing every failed file.
    ///
    /// # Errors
    /// Returns an error if any file could not be hashed.
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::ContentFilesNotFound {
                paths: self.failures.into_iter().map(|f| f.path).collect(),
            })
        }
    }
}

/// Recompute the MD5 of every imported file under `mod_root`.
///
/// Files that cannot be hashed are reported; every other file is still
/// updated.
pub fn update_hashes(project: &mut ModProject, mod_root: &Path) -> HashUpdateResult {
    update_hashes_with_progress(project, mod_root, &|_| {})
}

/// Recompute hashes with a progress callback.
///
/// Hashing runs in parallel; results are applied in file order.
pub fn update_hashes_with_progress(
    project: &mut ModProject,
    mod_root: &Path,
    progress: ModProgressCallback,
) -> HashUpdateResult {
    let targets: Vec<(usize, &str)> = project
        .files
        .iter()
        .enumerate()
        .filter(|(_, file)| file.import)
        .map(|(index, file)| (index, file.path.as_str()))
        .collect();
    let total = targets.len();
    let processed = AtomicUsize::new(0);

    tracing::info!("Hashing {} imported file(s) under {:?}", total, mod_root);

    let outcomes: Vec<(usize, std::result::Result<String, HashFailure>)> = targets
        .par_iter()
        .map(|&(index, path)| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&ModProgress::with_file(
                ModPhase::CalculatingHashes,
                current,
                total,
                path,
            ));
            (index, hash_game_file(mod_root, path))
        })
        .collect();

    let mut result = HashUpdateResult::default();
    for (index, outcome) in outcomes {
        match outcome {
            Ok(hash) => {
                let file = &mut project.files[index];
                if file.md5.as_deref() != Some(hash.as_str()) {
                    tracing::debug!("{}: {}", file.path, hash);
                    result.changed += 1;
                }
                file.md5 = Some(hash);
                result.updated += 1;
            }
            Err(failure) => {
                tracing::warn!("Cannot hash {}: {}", failure.path, failure.reason);
                result.failures.push(failure);
            }
        }
    }

    progress(&ModProgress::new(ModPhase::Complete, total, total));
    result
}

fn hash_game_file(mod_root: &Path, game_path: &str) -> std::result::Result<String, HashFailure> {
    let Some(system_path) = resolve_under(mod_root, game_path) else {
        return Err(HashFailure::new(game_path, HashFailureReason::OutsideRoot));
    };
    if !system_path.is_file() {
        return Err(HashFailure::new(game_path, HashFailureReason::NotFound));
    }
    md5_file(&system_path)
        .map_err(|e| HashFailure::new(game_path, HashFailureReason::Unreadable(e.to_string())))
}

/// Refresh the hashes of a manifest file.
///
/// Content paths resolve against the manifest's directory. Missing or
/// malformed hashes in the input are tolerated. The manifest is written to
/// `output` (or back in place) when every imported file ends up with a hash.
///
/// # Errors
/// Returns an error if the manifest cannot be read or written, and
/// [`Error::ContentFilesNotFound`] if any imported file could not be hashed.
pub fn update_manifest_hashes(path: &Path, output: Option<&Path>) -> Result<HashUpdateResult> {
    update_manifest_hashes_with_progress(path, output, &|_| {})
}

/// Refresh the hashes of a manifest file with a progress callback.
///
/// # Errors
/// See [`update_manifest_hashes`].
pub fn update_manifest_hashes_with_progress(
    path: &Path,
    output: Option<&Path>,
    progress: ModProgressCallback,
) -> Result<HashUpdateResult> {
    progress(&ModProgress::with_file(
        ModPhase::ReadingSource,
        0,
        1,
        path.display().to_string(),
    ));
    let content = read_text_file(path)?;
    let mut project = parse_modinfo_report(&content)?
        .into_strict_except(|issue| issue.kind == IssueKind::InvalidHash)?;

    let mod_root = path.parent().unwrap_or_else(|| Path::new("."));
    let result = update_hashes_with_progress(&mut project, mod_root, progress);

    let output = output.unwrap_or(path);
    if project.imported_files().all(|file| file.md5.is_some()) {
        progress(&ModProgress::with_file(
            ModPhase::WritingOutput,
            1,
            1,
            output.display().to_string(),
        ));
        write_modinfo(&project, output)?;
        tracing::info!(
            "Wrote {:?} ({} hash(es) changed)",
            output,
            result.changed
        );
    } else {
        tracing::warn!("Not writing {:?}: some imported files have no hash", output);
    }

    result.into_result()
}
