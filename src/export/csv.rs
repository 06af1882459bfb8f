//! CSV artifact writers.

use crate::equivalency::EquivalencyResult;
use crate::fixture::CriticalAckGate;
use crate::profile::MissionProfile;
use crate::psd::{self, TemplateLibrary};

use super::{check_gate, ExportError};

/// `psd_playlist.csv`: one row per resolved PSD point per mission state,
/// columns `state,f_hz,g2_per_hz`.
pub fn psd_playlist_csv(
    profile: &MissionProfile,
    library: &TemplateLibrary,
    gate: &CriticalAckGate,
) -> Result<String, ExportError> {
    check_gate(gate)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["state", "f_hz", "g2_per_hz"])?;
    for state in &profile.states {
        let points = psd::resolve(&state.psd, library)?;
        for p in points {
            writer.write_record([
                state.name.as_str(),
                &format_num(p.f_hz),
                &format_num(p.g2_per_hz),
            ])?;
        }
    }
    finish(writer)
}

/// `psd_test_profile.csv`: the equivalent test PSD, columns `f_hz,g2_per_hz`.
pub fn test_profile_csv(
    result: &EquivalencyResult,
    gate: &CriticalAckGate,
) -> Result<String, ExportError> {
    check_gate(gate)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["f_hz", "g2_per_hz"])?;
    for p in &result.test_psd {
        writer.write_record([&format_num(p.f_hz), &format_num(p.g2_per_hz)])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::CsvError(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Plain decimal formatting; spectral densities span many decades, so keep
/// full precision rather than a fixed digit count.
fn format_num(v: f64) -> String {
    format!("{}", v)
}
