//! JSON snapshot of the full computed state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::equivalency::{EquivalencyConfig, EquivalencyResult};
use crate::fixture::{CriticalAckGate, FixtureEvaluation};
use crate::profile::MissionProfile;
use crate::reliability::{ReliabilityDemo, SampleSize};

use super::{check_gate, ExportError};

/// Serializable snapshot of everything the engine computed.
///
/// Field names are the stable wire contract; downstream tooling keys off
/// them directly.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// The mission profile as entered.
    pub profile: &'a MissionProfile,
    /// Acceleration-model configuration.
    pub accel: &'a EquivalencyConfig,
    /// Reliability-demonstration requirement.
    pub reliability: &'a ReliabilityDemo,
    /// Solved sample size (recomputed, never stored).
    #[serde(rename = "sampleSize")]
    pub sample_size: SampleSize,
    /// Equivalency outputs.
    pub equivalency: &'a EquivalencyResult,
    /// Fixture advisor outputs.
    pub fixture: &'a FixtureEvaluation,
    /// Snapshot creation time.
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

impl<'a> Snapshot<'a> {
    /// Assemble a snapshot, recomputing the sample size from the
    /// reliability requirement.
    pub fn new(
        profile: &'a MissionProfile,
        accel: &'a EquivalencyConfig,
        reliability: &'a ReliabilityDemo,
        equivalency: &'a EquivalencyResult,
        fixture: &'a FixtureEvaluation,
    ) -> Self {
        Self {
            profile,
            accel,
            reliability,
            sample_size: reliability.sample_size(),
            equivalency,
            fixture,
            generated_at: Utc::now(),
        }
    }
}

/// Serialize the snapshot to pretty-printed JSON, honoring the ack gate.
pub fn snapshot_json(snapshot: &Snapshot<'_>, gate: &CriticalAckGate) -> Result<String, ExportError> {
    check_gate(gate)?;
    Ok(serde_json::to_string_pretty(snapshot)?)
}
