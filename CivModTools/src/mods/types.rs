//! Types for progress tracking across mod operations

/// Progress callback type for mod operations
pub type ModProgressCallback<'a> = &'a (dyn Fn(&ModProgress) + Sync + Send);

/// Progress information during mod operations
#[derive(Debug, Clone)]
pub struct ModProgress {
    /// Current operation phase
    pub phase: ModPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl ModProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: ModPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file/item name
    #[must_use]
    pub fn with_file(phase: ModPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a mod operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModPhase {
    /// Reading the source descriptor
    ReadingSource,
    /// Hashing imported content files
    CalculatingHashes,
    /// Writing output descriptors
    WritingOutput,
    /// Operation complete
    Complete,
}

impl ModPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingSource => "Reading source",
            Self::CalculatingHashes => "Calculating MD5 hashes",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert!((ModProgress::new(ModPhase::CalculatingHashes, 1, 4).percentage() - 0.25).abs() < f32::EPSILON);
        assert!((ModProgress::new(ModPhase::Complete, 0, 0).percentage() - 1.0).abs() < f32::EPSILON);
    }
}
