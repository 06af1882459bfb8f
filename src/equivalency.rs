//! # Test-Equivalency Calculator
//!
//! Collapses a multi-state mission profile into a single accelerated-test
//! PSD and duration that reproduce the cumulative field fatigue damage.
//!
//! The damage model is the standard inverse-power law: damage rate scales
//! as gRMS^b, i.e. as W^(b/2) in spectral density, with `b` the fatigue
//! exponent (MIL-STD-810 random-vibration practice uses b = 7.5). Per
//! frequency band, field damage accumulates as `D(f) = Σ tᵢ·Wᵢ(f)^(b/2)`
//! and the equivalent test level is `W(f) = (D(f)/t_test)^(2/b)` —
//! compressing duration raises the level by `(t_field/t_test)^(2/b)`.
//!
//! States are combined on a shared 1/N-octave grid spanning the union of
//! their frequency ranges, so the math is order-independent and purely
//! duration-weighted.

use log::debug;
use serde::Serialize;

use crate::octave::{grms, integrate_psd_over_band, octave_band_edges, octave_centers};
use crate::profile::MissionProfile;
use crate::psd::{self, PsdError, PsdPoint, TemplateLibrary};

/// Errors raised by the equivalency computation.
#[derive(Debug, thiserror::Error)]
pub enum EquivalencyError {
    /// Mission has zero total duration, no usable PSD content, or a
    /// non-positive test duration
    #[error("Insufficient profile data for equivalency")]
    InsufficientProfile,

    /// A state's PSD definition failed to resolve
    #[error("PSD resolution failed: {0}")]
    Psd(#[from] PsdError),
}

/// Bands whose damage share exceeds this multiple of the mean share are
/// reported as damage bands.
pub const DAMAGE_BAND_FACTOR: f64 = 1.5;

/// Configuration of the acceleration model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EquivalencyConfig {
    /// Fatigue-damage exponent `b` (damage rate ∝ gRMS^b). An engineering
    /// parameter, deliberately configurable; 7.5 is the MIL-STD-810
    /// random-vibration value, Steinberg-style analyses often use 6.4.
    pub fatigue_exponent: f64,
    /// Bands per octave (N of the 1/N-octave grid) used to combine states.
    pub bands_per_octave: u32,
    /// Anchor frequency for the octave grid, Hz.
    pub ref_hz: f64,
}

impl Default for EquivalencyConfig {
    fn default() -> Self {
        Self {
            fatigue_exponent: 7.5,
            bands_per_octave: 3,
            ref_hz: 1.0,
        }
    }
}

/// Per-state intermediate figures, reported for display and export.
#[derive(Debug, Clone, Serialize)]
pub struct StateFactor {
    /// Mission state name.
    pub state: String,
    /// Field duration, hours.
    pub duration_h: f64,
    /// Field-level gRMS of the state's resolved PSD.
    pub grms: f64,
    /// Damage-rate ratio of the test level to this state's field level,
    /// `(gRMS_test / gRMS_state)^b`.
    pub acceleration_factor: f64,
}

/// A frequency band contributing disproportionate fatigue damage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DamageBand {
    /// Lower band edge, Hz.
    pub f_start: f64,
    /// Upper band edge, Hz.
    pub f_end: f64,
    /// The band's share of total field damage, in [0, 1].
    pub score: f64,
}

/// Output of the equivalency computation.
#[derive(Debug, Clone, Serialize)]
pub struct EquivalencyResult {
    /// Equivalent accelerated-test PSD on the shared octave grid.
    pub test_psd: Vec<PsdPoint>,
    /// Test duration the level was compressed to, hours.
    pub t_test_h: f64,
    /// Per-state intermediates.
    pub state_factors: Vec<StateFactor>,
    /// Damage-equivalent field gRMS over the whole mission,
    /// `(Σ tᵢ·gᵢ^b / t_total)^(1/b)`.
    pub field_grms: f64,
    /// gRMS of the equivalent test PSD.
    pub test_grms: f64,
    /// Bands carrying a disproportionate damage share, highest first.
    pub damage_bands: Vec<DamageBand>,
}

/// Compute the equivalent test PSD and intermediates for a mission.
///
/// States with zero duration or a degenerate PSD (fewer than two points,
/// or zero energy) are skipped; if nothing usable remains, or the test
/// duration is not positive, the result is
/// [`EquivalencyError::InsufficientProfile`] — never a division by zero.
pub fn compute(
    profile: &MissionProfile,
    library: &TemplateLibrary,
    t_test_h: f64,
    config: &EquivalencyConfig,
) -> Result<EquivalencyResult, EquivalencyError> {
    if t_test_h <= 0.0 || profile.total_hours() <= 0.0 || config.fatigue_exponent <= 0.0 {
        return Err(EquivalencyError::InsufficientProfile);
    }

    // Resolve every active state up front; skip degenerate curves.
    let mut resolved: Vec<(&str, f64, Vec<PsdPoint>, f64)> = Vec::new();
    for state in profile.states.iter().filter(|s| s.duration_h > 0.0) {
        let points = psd::resolve(&state.psd, library)?;
        let g = grms(&points);
        if points.len() < 2 || g <= 0.0 {
            debug!("skipping state '{}' with degenerate PSD", state.name);
            continue;
        }
        resolved.push((state.name.as_str(), state.duration_h, points, g));
    }
    if resolved.is_empty() {
        return Err(EquivalencyError::InsufficientProfile);
    }

    let b = config.fatigue_exponent;
    let half_b = b / 2.0;

    // Shared octave grid across the union of state ranges. Resolution has
    // already rejected empty curves, so first/last exist here.
    let min_f = resolved
        .iter()
        .map(|(_, _, p, _)| p[0].f_hz)
        .fold(f64::INFINITY, f64::min);
    let max_f = resolved
        .iter()
        .map(|(_, _, p, _)| p[p.len() - 1].f_hz)
        .fold(0.0_f64, f64::max);
    let centers = octave_centers(min_f, max_f, config.bands_per_octave, config.ref_hz);
    if centers.is_empty() {
        return Err(EquivalencyError::InsufficientProfile);
    }

    // Accumulate band damage and convert back to a test-level density.
    let mut test_psd = Vec::with_capacity(centers.len());
    let mut band_damage = Vec::with_capacity(centers.len());
    for &fc in &centers {
        let (f1, f2) = octave_band_edges(fc, config.bands_per_octave);
        let bw = f2 - f1;
        let mut damage = 0.0;
        for (_, hours, points, _) in &resolved {
            let w = integrate_psd_over_band(points, f1, f2) / bw;
            if w > 0.0 {
                damage += hours * w.powf(half_b);
            }
        }
        band_damage.push((f1, f2, damage * bw));
        let w_test = if damage > 0.0 {
            (damage / t_test_h).powf(1.0 / half_b)
        } else {
            0.0
        };
        test_psd.push(PsdPoint::new(fc, w_test));
    }

    let test_grms = grms(&test_psd);
    if test_grms <= 0.0 {
        return Err(EquivalencyError::InsufficientProfile);
    }

    let total_h: f64 = resolved.iter().map(|(_, h, _, _)| *h).sum();
    let field_grms = (resolved
        .iter()
        .map(|(_, h, _, g)| h * g.powf(b))
        .sum::<f64>()
        / total_h)
        .powf(1.0 / b);

    let state_factors = resolved
        .iter()
        .map(|(name, hours, _, g)| StateFactor {
            state: name.to_string(),
            duration_h: *hours,
            grms: *g,
            acceleration_factor: (test_grms / g).powf(b),
        })
        .collect();

    let damage_bands = pick_damage_bands(&band_damage);

    debug!(
        "equivalency: {} states, field gRMS {:.2}, test gRMS {:.2} over {} h",
        resolved.len(),
        field_grms,
        test_grms,
        t_test_h
    );

    Ok(EquivalencyResult {
        test_psd,
        t_test_h,
        state_factors,
        field_grms,
        test_grms,
        damage_bands,
    })
}

/// Flag bands whose damage share exceeds [`DAMAGE_BAND_FACTOR`] times the
/// mean share, highest share first.
fn pick_damage_bands(band_damage: &[(f64, f64, f64)]) -> Vec<DamageBand> {
    let total: f64 = band_damage.iter().map(|(_, _, d)| d).sum();
    if total <= 0.0 || band_damage.is_empty() {
        return Vec::new();
    }
    let threshold = DAMAGE_BAND_FACTOR / band_damage.len() as f64;
    let mut bands: Vec<DamageBand> = band_damage
        .iter()
        .filter_map(|&(f_start, f_end, d)| {
            let score = d / total;
            (score > threshold).then_some(DamageBand { f_start, f_end, score })
        })
        .collect();
    bands.sort_by(|a, b| b.score.total_cmp(&a.score));
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MissionState, ThermalCondition};
    use crate::psd::PsdDefinition;

    fn state(name: &str, hours: f64, template: &str, scale: f64) -> MissionState {
        MissionState {
            id: name.to_string(),
            name: name.to_string(),
            duration_h: hours,
            psd: PsdDefinition::Template {
                template_id: template.to_string(),
                scale,
            },
            thermal: ThermalCondition::Steady { temp_c: 25.0 },
        }
    }

    #[test]
    fn test_single_state_duration_compression() {
        // One state compressed 10:1 must raise the PSD by 10^(2/b).
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![state("a", 480.0, "navmat-p9492", 1.0)]);
        let config = EquivalencyConfig::default();
        let out = compute(&profile, &lib, 48.0, &config).unwrap();

        let expected_grms_ratio = 10.0_f64.powf(1.0 / config.fatigue_exponent);
        let field = out.state_factors[0].grms;
        assert!(
            (out.test_grms / field - expected_grms_ratio).abs() < 0.05 * expected_grms_ratio,
            "ratio {} vs expected {}",
            out.test_grms / field,
            expected_grms_ratio
        );
    }

    #[test]
    fn test_two_state_mission_accelerates_both() {
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![
            state("transport", 1000.0, "random-transport", 1.0),
            state("shock", 200.0, "shock-event", 1.5),
        ]);
        let out = compute(&profile, &lib, 48.0, &EquivalencyConfig::default()).unwrap();

        assert!(!out.test_psd.is_empty());
        for factor in &out.state_factors {
            assert!(out.test_grms > factor.grms, "state {} not accelerated", factor.state);
            assert!(factor.acceleration_factor > 1.0);
        }
        assert!(out.test_grms > out.field_grms);
    }

    #[test]
    fn test_equivalency_is_order_independent() {
        let lib = TemplateLibrary::builtin();
        let a = state("transport", 1000.0, "random-transport", 1.0);
        let b = state("shock", 200.0, "shock-event", 1.5);
        let fwd = compute(
            &MissionProfile::new(vec![a.clone(), b.clone()]),
            &lib,
            48.0,
            &EquivalencyConfig::default(),
        )
        .unwrap();
        let rev = compute(
            &MissionProfile::new(vec![b, a]),
            &lib,
            48.0,
            &EquivalencyConfig::default(),
        )
        .unwrap();
        assert!((fwd.test_grms - rev.test_grms).abs() < 1e-9);
        assert_eq!(fwd.test_psd.len(), rev.test_psd.len());
    }

    #[test]
    fn test_zero_duration_mission_is_insufficient() {
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![state("a", 0.0, "random-transport", 1.0)]);
        assert!(matches!(
            compute(&profile, &lib, 48.0, &EquivalencyConfig::default()),
            Err(EquivalencyError::InsufficientProfile)
        ));
    }

    #[test]
    fn test_degenerate_psds_are_insufficient() {
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![MissionState {
            id: "flat".to_string(),
            name: "flat".to_string(),
            duration_h: 100.0,
            psd: PsdDefinition::Csv {
                name: "silent".to_string(),
                points: vec![PsdPoint::new(10.0, 0.0), PsdPoint::new(100.0, 0.0)],
            },
            thermal: ThermalCondition::Steady { temp_c: 25.0 },
        }]);
        assert!(matches!(
            compute(&profile, &lib, 48.0, &EquivalencyConfig::default()),
            Err(EquivalencyError::InsufficientProfile)
        ));
    }

    #[test]
    fn test_unknown_template_propagates() {
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![state("a", 10.0, "missing", 1.0)]);
        assert!(matches!(
            compute(&profile, &lib, 48.0, &EquivalencyConfig::default()),
            Err(EquivalencyError::Psd(PsdError::UnknownTemplate(_)))
        ));
    }

    #[test]
    fn test_damage_band_scores_are_shares() {
        let lib = TemplateLibrary::builtin();
        let profile = MissionProfile::new(vec![state("a", 480.0, "navmat-p9492", 1.0)]);
        let out = compute(&profile, &lib, 48.0, &EquivalencyConfig::default()).unwrap();
        for band in &out.damage_bands {
            assert!(band.f_end > band.f_start);
            assert!(band.score > 0.0 && band.score <= 1.0);
        }
        for pair in out.damage_bands.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
