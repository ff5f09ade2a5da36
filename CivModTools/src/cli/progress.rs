//! CLI progress display utilities
//!
//! Step lines with emojis for each phase of an operation, and a progress bar
//! while content files are hashed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::mods::{ModPhase, ModProgress};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Gear - for hashing
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

// =============================================================================
// Step Lines
// =============================================================================

/// Print a step indicator: `[1/3] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji<'_, '_>, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style for hashing
///
/// Format: `Lua\Helpers.lua [########--------] 50/100`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
        .progress_chars("##-")
}

// =============================================================================
// Operation Progress
// =============================================================================

/// Renders [`ModProgress`] updates of one operation.
///
/// Reading is step 1, hashing step 2 and writing the last step. Each step
/// line is printed once.
pub struct OperationProgress {
    steps: usize,
    quiet: bool,
    bar: ProgressBar,
    hashing_started: AtomicBool,
    writing_started: AtomicBool,
}

impl OperationProgress {
    /// Create a display for an operation of `steps` steps. A quiet display
    /// prints nothing.
    #[must_use]
    pub fn new(steps: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(bar_style());
            bar
        };
        Self {
            steps,
            quiet,
            bar,
            hashing_started: AtomicBool::new(false),
            writing_started: AtomicBool::new(false),
        }
    }

    /// Handle one progress update. Safe to call from worker threads.
    pub fn update(&self, progress: &ModProgress) {
        if self.quiet {
            return;
        }
        let file = progress.current_file.as_deref().unwrap_or_default();
        match progress.phase {
            ModPhase::ReadingSource => {
                print_step(1, self.steps, LOOKING_GLASS, &format!("Reading {file}..."));
            }
            ModPhase::CalculatingHashes => {
                if !self.hashing_started.swap(true, Ordering::SeqCst) {
                    self.bar.suspend(|| {
                        print_step(
                            2,
                            self.steps,
                            GEAR,
                            &format!("Hashing {} file(s)...", progress.total),
                        );
                    });
                    self.bar.set_length(progress.total as u64);
                }
                self.bar.inc(1);
                self.bar.set_message(file.to_string());
            }
            ModPhase::WritingOutput => {
                if !self.writing_started.swap(true, Ordering::SeqCst) {
                    self.bar.finish_and_clear();
                    print_step(self.steps, self.steps, DISK, &writing_message(progress));
                }
            }
            ModPhase::Complete => self.bar.finish_and_clear(),
        }
    }
}

/// Step line for the writing phase: the file name, or a count when an
/// operation writes several files.
fn writing_message(progress: &ModProgress) -> String {
    match progress.current_file.as_deref() {
        Some(file) if progress.total <= 1 => format!("Writing {file}..."),
        _ => format!("Writing {} file(s)...", progress.total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writing_message() {
        let single = ModProgress::with_file(ModPhase::WritingOutput, 1, 1, "Mod (v 1).modinfo");
        assert_eq!(writing_message(&single), "Writing Mod (v 1).modinfo...");

        let first_of_two = ModProgress::with_file(ModPhase::WritingOutput, 1, 2, "Mod.civ5proj");
        assert_eq!(writing_message(&first_of_two), "Writing 2 file(s)...");
    }
}
