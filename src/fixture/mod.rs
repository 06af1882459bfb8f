//! # Fixture Feasibility Advisor
//!
//! Translates DUT (device-under-test) physical inputs into fixture design
//! requirements: minimum fixture natural frequency, mass-loading targets,
//! required stiffness, a first-pass plate-thickness estimate, and a
//! qualitative checklist with leveled warnings. Independent of the mission
//! profile — it keys off the DUT inputs alone.

mod material;
mod report;

#[cfg(test)]
mod tests;

pub use material::{FixtureMaterial, MountingType};
pub use report::{CriticalAckGate, FixtureWarning, WarningLevel, MIN_JUSTIFICATION_LEN};

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Notch-limit percentage above which the advisor flags a Warning.
const NOTCH_WARNING_PCT: f64 = 25.0;
/// Notch-limit percentage above which the advisor flags a Critical.
const NOTCH_CRITICAL_PCT: f64 = 50.0;

/// Errors raised by fixture input validation and the acknowledgment gate.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// An input is outside its physical domain
    #[error("Invalid fixture input: {0}")]
    InvalidInput(String),

    /// Acknowledgment justification shorter than the required minimum
    #[error("Critical-warning justification must be at least {MIN_JUSTIFICATION_LEN} characters")]
    JustificationTooShort,
}

/// Advisor inputs describing the DUT and the intended fixture approach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutInputs {
    /// DUT mass in kg.
    pub dut_mass_kg: f64,
    /// Lowest DUT natural frequency of interest, Hz.
    pub f_min_hz: f64,
    /// Highest DUT natural frequency of interest, Hz.
    pub f_max_hz: f64,
    /// Mounting approach.
    pub mounting: MountingType,
    /// Fixture stock material.
    pub material: FixtureMaterial,
    /// Margin between the test band and the fixture's own resonance
    /// (minimum fixture frequency = `f_max_hz * safety_factor`).
    pub safety_factor: f64,
    /// Target fixture-to-DUT mass ratio.
    pub mass_ratio_target: f64,
    /// Allowed notching depth as a percentage of the reference spectrum.
    pub notch_limit_pct: f64,
    /// Measured fixture mass, kg, when a candidate fixture exists.
    pub fixture_mass_kg: Option<f64>,
    /// Unsupported fixture span, m, when the geometry is known.
    pub span_m: Option<f64>,
}

impl DutInputs {
    /// Validates all inputs against their physical domains.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if !(self.dut_mass_kg.is_finite() && self.dut_mass_kg > 0.0) {
            return Err(FixtureError::InvalidInput(format!(
                "dut_mass_kg must be greater than 0.0, got {}",
                self.dut_mass_kg
            )));
        }
        if !(self.f_min_hz.is_finite() && self.f_min_hz > 0.0) {
            return Err(FixtureError::InvalidInput(format!(
                "f_min_hz must be greater than 0.0, got {}",
                self.f_min_hz
            )));
        }
        if !(self.f_max_hz.is_finite() && self.f_max_hz >= self.f_min_hz) {
            return Err(FixtureError::InvalidInput(format!(
                "f_max_hz must be at least f_min_hz, got {}",
                self.f_max_hz
            )));
        }
        if !(self.safety_factor.is_finite() && self.safety_factor > 0.0) {
            return Err(FixtureError::InvalidInput(format!(
                "safety_factor must be greater than 0.0, got {}",
                self.safety_factor
            )));
        }
        if !(self.mass_ratio_target.is_finite() && self.mass_ratio_target > 0.0) {
            return Err(FixtureError::InvalidInput(format!(
                "mass_ratio_target must be greater than 0.0, got {}",
                self.mass_ratio_target
            )));
        }
        if !(self.notch_limit_pct.is_finite() && (0.0..=100.0).contains(&self.notch_limit_pct)) {
            return Err(FixtureError::InvalidInput(format!(
                "notch_limit_pct must be within 0..=100, got {}",
                self.notch_limit_pct
            )));
        }
        if let Some(m) = self.fixture_mass_kg {
            if !(m.is_finite() && m > 0.0) {
                return Err(FixtureError::InvalidInput(format!(
                    "fixture_mass_kg must be greater than 0.0, got {}",
                    m
                )));
            }
        }
        if let Some(span) = self.span_m {
            if !(span.is_finite() && span > 0.0) {
                return Err(FixtureError::InvalidInput(format!(
                    "span_m must be greater than 0.0, got {}",
                    span
                )));
            }
        }
        Ok(())
    }
}

/// Derived fixture design targets.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureEvaluation {
    /// Minimum acceptable fixture natural frequency, Hz.
    pub min_fixture_freq_hz: f64,
    /// Achieved fixture/DUT mass ratio, when a fixture mass was supplied.
    pub mass_ratio_achieved: Option<f64>,
    /// Fixture mass needed to hit the ratio target, kg.
    pub target_fixture_mass_kg: f64,
    /// Stiffness keeping the loaded fixture above the minimum frequency,
    /// N/m; present when geometry allows the estimate.
    pub required_stiffness_n_per_m: Option<f64>,
    /// First-pass plate thickness for the supplied span, m.
    pub plate_thickness_m: Option<f64>,
    /// Qualitative design actions, mounting guidance included.
    pub checklist: Vec<String>,
    /// Leveled findings; Critical entries gate export.
    pub warnings: Vec<FixtureWarning>,
}

impl FixtureEvaluation {
    /// Whether any finding is Critical.
    pub fn has_critical(&self) -> bool {
        self.warnings.iter().any(|w| w.is_critical())
    }

    /// Build the export acknowledgment gate for this evaluation.
    pub fn ack_gate(&self) -> CriticalAckGate {
        CriticalAckGate::for_warnings(&self.warnings)
    }
}

/// Evaluate fixture feasibility for the given DUT.
///
/// Monotone by construction: raising `safety_factor` never lowers the
/// minimum fixture frequency, and raising the DUT mass at a fixed ratio
/// target never lowers the target fixture mass.
pub fn evaluate(inputs: &DutInputs) -> Result<FixtureEvaluation, FixtureError> {
    inputs.validate()?;

    let min_fixture_freq_hz = inputs.f_max_hz * inputs.safety_factor;
    let target_fixture_mass_kg = inputs.mass_ratio_target * inputs.dut_mass_kg;
    let mass_ratio_achieved = inputs.fixture_mass_kg.map(|m| m / inputs.dut_mass_kg);

    let mut warnings = Vec::new();

    if inputs.safety_factor <= 1.0 {
        warnings.push(FixtureWarning::critical(format!(
            "Fixture margin {} places the fixture resonance inside the test band (needs > 1.0)",
            inputs.safety_factor
        )));
    } else if inputs.safety_factor < 1.5 {
        warnings.push(FixtureWarning::warning(format!(
            "Fixture margin {} is thin; 1.5x over the highest DUT frequency is customary",
            inputs.safety_factor
        )));
    }

    if let Some(ratio) = mass_ratio_achieved {
        if ratio < 0.5 * inputs.mass_ratio_target {
            warnings.push(FixtureWarning::critical(format!(
                "Fixture mass ratio {:.2} is below half the {:.2} target; expect uncontrollable resonances",
                ratio, inputs.mass_ratio_target
            )));
        } else if ratio < inputs.mass_ratio_target {
            warnings.push(FixtureWarning::warning(format!(
                "Fixture mass ratio {:.2} misses the {:.2} target",
                ratio, inputs.mass_ratio_target
            )));
        }
    }

    if inputs.notch_limit_pct > NOTCH_CRITICAL_PCT {
        warnings.push(FixtureWarning::critical(format!(
            "Notch limit {}% gives away more than half the reference spectrum",
            inputs.notch_limit_pct
        )));
    } else if inputs.notch_limit_pct > NOTCH_WARNING_PCT {
        warnings.push(FixtureWarning::warning(format!(
            "Notch limit {}% is aggressive; justify against the damage bands",
            inputs.notch_limit_pct
        )));
    }

    // Stiffness to keep the loaded fixture at or above the minimum
    // frequency, treating fixture plus DUT as a lumped mass. Reported only
    // alongside the thickness estimate, once a geometry is supplied.
    let loaded_mass = inputs.fixture_mass_kg.unwrap_or(target_fixture_mass_kg) + inputs.dut_mass_kg;
    let omega = 2.0 * PI * min_fixture_freq_hz;
    let required_stiffness_n_per_m = inputs.span_m.map(|_| omega * omega * loaded_mass);

    // First-pass thickness of a simply supported square plate whose
    // fundamental sits at the minimum fixture frequency.
    let plate_thickness_m = inputs.span_m.map(|span| {
        let e = inputs.material.youngs_modulus_pa();
        let rho = inputs.material.density_kg_m3();
        let nu = inputs.material.poissons_ratio();
        let wave_speed = (e / (12.0 * rho * (1.0 - nu * nu))).sqrt();
        2.0 * min_fixture_freq_hz * span * span / (PI * wave_speed)
    });

    let mut checklist: Vec<String> = inputs
        .mounting
        .checklist()
        .iter()
        .map(|s| s.to_string())
        .collect();
    checklist.push(format!(
        "Survey the bare fixture and confirm its first resonance is above {:.0} Hz",
        min_fixture_freq_hz
    ));
    checklist.push(format!(
        "Machine from {} stock; verify material certs before cutting",
        inputs.material.name()
    ));
    if inputs.fixture_mass_kg.is_none() {
        checklist.push(format!(
            "No fixture mass supplied; design toward {:.1} kg for a {:.1}:1 mass ratio",
            target_fixture_mass_kg, inputs.mass_ratio_target
        ));
    }

    Ok(FixtureEvaluation {
        min_fixture_freq_hz,
        mass_ratio_achieved,
        target_fixture_mass_kg,
        required_stiffness_n_per_m,
        plate_thickness_m,
        checklist,
        warnings,
    })
}
