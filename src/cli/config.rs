//! TOML job-file support.
//!
//! A job file describes the whole planning run in one place:
//!
//! ```toml
//! # mission.toml
//! [test]
//! duration_h = 48.0
//!
//! [reliability]
//! r_target = 0.90
//! confidence = 0.95
//! allowed_failures = 0
//!
//! [[state]]
//! name = "Truck transport"
//! duration_h = 1000.0
//! template = "random-transport"
//! scale = 1.0
//! steady_c = 35.0
//!
//! [[state]]
//! name = "Handling shock"
//! duration_h = 200.0
//! template = "shock-event"
//! scale = 1.5
//! cycle = { t_min_c = 20.0, t_max_c = 70.0, ramp_c_per_min = 2.0, soak_min = 15.0, cycles_per_hour = 1.0 }
//!
//! [dut]
//! mass_kg = 4.0
//! f_min_hz = 50.0
//! f_max_hz = 500.0
//! mounting = "base_plate"
//! material = "aluminum6061"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use vibeq::equivalency::EquivalencyConfig;
use vibeq::fixture::{DutInputs, FixtureMaterial, MountingType};
use vibeq::profile::{MissionProfile, MissionState, ThermalCondition};
use vibeq::psd::{parse_psd_csv_file, PsdDefinition};
use vibeq::reliability::ReliabilityDemo;
use vibeq::thermal::SynthesisOptions;

/// Root structure of a job file.
#[derive(Debug, Deserialize)]
pub struct JobFile {
    /// Test-plan settings.
    pub test: TestSection,
    /// Reliability-demonstration requirement.
    pub reliability: ReliabilitySection,
    /// Mission states in order.
    #[serde(rename = "state")]
    pub states: Vec<StateSection>,
    /// Fixture advisor inputs.
    pub dut: DutSection,
}

/// `[test]` section.
#[derive(Debug, Deserialize)]
pub struct TestSection {
    /// Accelerated-test duration in hours.
    pub duration_h: f64,
    /// Minimum thermal-cycle repeats within the test.
    pub min_cycles: Option<u32>,
    /// Minimum thermal segment dwell, minutes.
    pub min_segment_min: Option<f64>,
    /// Fatigue-damage exponent override.
    pub fatigue_exponent: Option<f64>,
    /// Octave-grid resolution override (bands per octave).
    pub bands_per_octave: Option<u32>,
}

impl TestSection {
    /// Acceleration-model configuration with overrides applied.
    pub fn equivalency_config(&self) -> EquivalencyConfig {
        let defaults = EquivalencyConfig::default();
        EquivalencyConfig {
            fatigue_exponent: self.fatigue_exponent.unwrap_or(defaults.fatigue_exponent),
            bands_per_octave: self.bands_per_octave.unwrap_or(defaults.bands_per_octave),
            ref_hz: defaults.ref_hz,
        }
    }

    /// Thermal synthesis options with overrides applied.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        let defaults = SynthesisOptions::default();
        SynthesisOptions {
            min_cycles: self.min_cycles.unwrap_or(defaults.min_cycles),
            min_segment_min: self.min_segment_min.unwrap_or(defaults.min_segment_min),
        }
    }
}

/// `[reliability]` section.
#[derive(Debug, Deserialize)]
pub struct ReliabilitySection {
    /// Target reliability in (0, 1).
    pub r_target: f64,
    /// Confidence level in (0, 1).
    pub confidence: f64,
    /// Allowed failures in the demonstration.
    pub allowed_failures: u64,
}

impl ReliabilitySection {
    /// Convert into the domain requirement.
    pub fn demo(&self) -> ReliabilityDemo {
        ReliabilityDemo {
            r_target: self.r_target,
            confidence: self.confidence,
            allowed_failures: self.allowed_failures,
        }
    }
}

/// One `[[state]]` entry.
#[derive(Debug, Deserialize)]
pub struct StateSection {
    /// Display name.
    pub name: String,
    /// Field duration in hours.
    pub duration_h: f64,
    /// Library template id (mutually exclusive with `csv`).
    pub template: Option<String>,
    /// Amplitude scale for the template.
    pub scale: Option<f64>,
    /// Path to an uploaded PSD table (mutually exclusive with `template`).
    pub csv: Option<String>,
    /// Steady temperature, °C.
    pub steady_c: Option<f64>,
    /// Thermal cycling parameters.
    pub cycle: Option<CycleSection>,
}

/// Thermal cycling parameters of a state.
#[derive(Debug, Deserialize)]
pub struct CycleSection {
    /// Cold extreme, °C.
    pub t_min_c: f64,
    /// Hot extreme, °C.
    pub t_max_c: f64,
    /// Ramp rate, °C/min.
    pub ramp_c_per_min: f64,
    /// Soak at each extreme, minutes.
    pub soak_min: f64,
    /// Field cycling rate, cycles/hour.
    pub cycles_per_hour: f64,
}

/// `[dut]` section.
#[derive(Debug, Deserialize)]
pub struct DutSection {
    /// DUT mass, kg.
    pub mass_kg: f64,
    /// Lowest frequency of interest, Hz.
    pub f_min_hz: f64,
    /// Highest frequency of interest, Hz.
    pub f_max_hz: f64,
    /// Mounting approach.
    pub mounting: MountingType,
    /// Fixture material.
    pub material: FixtureMaterial,
    /// Fixture frequency margin (default 2.0).
    pub safety_factor: Option<f64>,
    /// Fixture/DUT mass ratio target (default 3.0).
    pub mass_ratio_target: Option<f64>,
    /// Allowed notching depth, percent (default 10).
    pub notch_limit_pct: Option<f64>,
    /// Measured fixture mass, kg.
    pub fixture_mass_kg: Option<f64>,
    /// Unsupported span, m.
    pub span_m: Option<f64>,
}

impl DutSection {
    /// Convert into advisor inputs.
    pub fn dut_inputs(&self) -> DutInputs {
        DutInputs {
            dut_mass_kg: self.mass_kg,
            f_min_hz: self.f_min_hz,
            f_max_hz: self.f_max_hz,
            mounting: self.mounting,
            material: self.material,
            safety_factor: self.safety_factor.unwrap_or(2.0),
            mass_ratio_target: self.mass_ratio_target.unwrap_or(3.0),
            notch_limit_pct: self.notch_limit_pct.unwrap_or(10.0),
            fixture_mass_kg: self.fixture_mass_kg,
            span_m: self.span_m,
        }
    }
}

impl JobFile {
    /// Load a job file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse a job file from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML job file")
    }

    /// Build the mission profile, reading any referenced CSV uploads.
    pub fn mission_profile(&self) -> Result<MissionProfile> {
        let mut states = Vec::with_capacity(self.states.len());
        for (i, section) in self.states.iter().enumerate() {
            let psd = match (&section.template, &section.csv) {
                (Some(template_id), None) => PsdDefinition::Template {
                    template_id: template_id.clone(),
                    scale: section.scale.unwrap_or(1.0),
                },
                (None, Some(path)) => {
                    let points = parse_psd_csv_file(path)
                        .with_context(|| format!("state '{}': bad PSD CSV", section.name))?;
                    PsdDefinition::Csv {
                        name: path.clone(),
                        points,
                    }
                }
                _ => bail!(
                    "state '{}' must give exactly one of `template` or `csv`",
                    section.name
                ),
            };

            let thermal = match (&section.steady_c, &section.cycle) {
                (Some(temp_c), None) => ThermalCondition::Steady { temp_c: *temp_c },
                (None, Some(cycle)) => ThermalCondition::Cycle {
                    t_min_c: cycle.t_min_c,
                    t_max_c: cycle.t_max_c,
                    ramp_c_per_min: cycle.ramp_c_per_min,
                    soak_min: cycle.soak_min,
                    cycles_per_hour: cycle.cycles_per_hour,
                },
                _ => bail!(
                    "state '{}' must give exactly one of `steady_c` or `cycle`",
                    section.name
                ),
            };

            states.push(MissionState {
                id: format!("state-{}", i + 1),
                name: section.name.clone(),
                duration_h: section.duration_h,
                psd,
                thermal,
            });
        }

        let profile = MissionProfile::new(states);
        profile.validate().context("Invalid mission profile")?;
        Ok(profile)
    }
}
