//! Fixture warnings and the export acknowledgment gate.

use serde::Serialize;

use super::FixtureError;

/// Severity of a fixture-feasibility finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningLevel {
    /// Worth reviewing; does not block export.
    Warning,
    /// Blocks export until acknowledged with a justification.
    Critical,
}

/// A single feasibility finding.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureWarning {
    /// Severity of the finding.
    pub level: WarningLevel,
    /// Human-readable description.
    pub message: String,
}

impl FixtureWarning {
    pub(crate) fn warning(message: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Warning,
            message: message.into(),
        }
    }

    pub(crate) fn critical(message: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Critical,
            message: message.into(),
        }
    }

    /// Whether this finding is critical.
    pub fn is_critical(&self) -> bool {
        self.level == WarningLevel::Critical
    }
}

/// Minimum length of an acknowledgment justification, in non-whitespace
/// characters.
pub const MIN_JUSTIFICATION_LEN: usize = 5;

/// Gate between Critical fixture warnings and export actions.
///
/// Export stays blocked while un-acknowledged Critical warnings exist;
/// acknowledging requires a free-text justification of at least
/// [`MIN_JUSTIFICATION_LEN`] non-whitespace characters. This is the one
/// place the engine deliberately obstructs user action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CriticalAckGate {
    critical_count: usize,
    justification: Option<String>,
}

impl CriticalAckGate {
    /// Build the gate from an evaluation's warning list.
    pub fn for_warnings(warnings: &[FixtureWarning]) -> Self {
        Self {
            critical_count: warnings.iter().filter(|w| w.is_critical()).count(),
            justification: None,
        }
    }

    /// Acknowledge the Critical warnings with a documented reason.
    pub fn acknowledge(&mut self, justification: &str) -> Result<(), FixtureError> {
        let trimmed: String = justification.split_whitespace().collect::<Vec<_>>().join(" ");
        if trimmed.chars().filter(|c| !c.is_whitespace()).count() < MIN_JUSTIFICATION_LEN {
            return Err(FixtureError::JustificationTooShort);
        }
        self.justification = Some(trimmed);
        Ok(())
    }

    /// Whether export may proceed: no Critical warnings, or all of them
    /// acknowledged.
    pub fn is_clear(&self) -> bool {
        self.critical_count == 0 || self.justification.is_some()
    }

    /// Number of Critical warnings behind the gate.
    pub fn critical_count(&self) -> usize {
        self.critical_count
    }

    /// The recorded justification, if any.
    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }
}
