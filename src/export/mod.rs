//! # Export Assembler
//!
//! Serializes computed state into the deliverable artifacts: CSV tables
//! for the per-state PSD playlist and the equivalent-test profile, a JSON
//! snapshot of the full computation, and a printable HTML fixture report.
//!
//! Every artifact writer takes the [`CriticalAckGate`] and refuses to run
//! while un-acknowledged Critical fixture warnings exist — the export
//! contract of the advisor. Readers of the data are otherwise untouched;
//! exporters consume everything read-only.
//!
//! [`CriticalAckGate`]: crate::fixture::CriticalAckGate

mod csv;
mod html;
mod json;


pub use csv::{psd_playlist_csv, test_profile_csv};
pub use html::fixture_report_html;
pub use json::{snapshot_json, Snapshot};

use crate::fixture::CriticalAckGate;
use crate::psd::PsdError;

/// Errors that can occur while assembling export artifacts
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Critical fixture warnings have not been acknowledged
    #[error("Export blocked: {0} Critical fixture warning(s) not acknowledged")]
    UnacknowledgedCritical(usize),

    /// CSV writing error
    #[error("CSV writing error: {0}")]
    CsvError(#[from] ::csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A PSD definition in the profile failed to resolve
    #[error("PSD resolution failed: {0}")]
    PsdError(#[from] PsdError),

    /// Artifact buffer was not valid UTF-8 (should not occur)
    #[error("Artifact encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// Refuse to export while the gate is closed.
pub(crate) fn check_gate(gate: &CriticalAckGate) -> Result<(), ExportError> {
    if gate.is_clear() {
        Ok(())
    } else {
        Err(ExportError::UnacknowledgedCritical(gate.critical_count()))
    }
}
