use super::vulnerability::MAX_SCORE;
use crate::shared::error::SbomError;
use crate::shared::Result;

/// Severity at or above which a vulnerability counts as transitive exposure
/// when the caller does not say otherwise.
pub const DEFAULT_MIN_TRANSITIVE_SEVERITY: f64 = 8.0;

/// Per-call knobs of the clean-graph projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposeOptions {
    pub min_transitive_severity: f64,
    /// Drop every subtree without a qualifying vulnerability (root is always kept)
    pub only_vulnerable: bool,
    /// Deepest level kept in the output; 0 means unlimited
    pub max_depth: usize,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            min_transitive_severity: DEFAULT_MIN_TRANSITIVE_SEVERITY,
            only_vulnerable: false,
            max_depth: 0,
        }
    }
}

impl DecomposeOptions {
    pub fn new(min_transitive_severity: f64, only_vulnerable: bool, max_depth: usize) -> Result<Self> {
        let options = Self {
            min_transitive_severity,
            only_vulnerable,
            max_depth,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_SCORE).contains(&self.min_transitive_severity) {
            return Err(SbomError::Validation {
                message: format!(
                    "minimum transitive severity must be between 0.0 and {:.1}, got {}",
                    MAX_SCORE, self.min_transitive_severity
                ),
            }
            .into());
        }
        Ok(())
    }

    /// True when `level` is the deepest level that may appear in the output.
    pub fn is_depth_limit(&self, level: usize) -> bool {
        self.max_depth > 0 && level >= self.max_depth
    }
}
