//! # Mission Profile Model
//!
//! A mission profile describes field life as an ordered sequence of
//! states, each pairing a vibration environment (a PSD definition) with a
//! thermal condition and a duration. Ordering matters only for display and
//! thermal-cycle synthesis; the equivalency math is duration-weighted and
//! order-independent.

use serde::{Deserialize, Serialize};

use crate::psd::PsdDefinition;

/// Errors raised by mission-profile validation.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A state field is out of its physical domain
    #[error("Invalid mission state '{state}': {reason}")]
    InvalidState {
        /// Name of the offending state.
        state: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Thermal environment of one mission state.
///
/// Closed sum type matched exhaustively by every consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThermalCondition {
    /// Constant temperature for the whole state.
    Steady {
        /// Temperature in °C.
        temp_c: f64,
    },
    /// Repeated thermal cycling between two extremes.
    Cycle {
        /// Cold extreme in °C.
        t_min_c: f64,
        /// Hot extreme in °C (must be >= `t_min_c`).
        t_max_c: f64,
        /// Ramp rate in °C per minute (> 0).
        ramp_c_per_min: f64,
        /// Soak dwell at each extreme, in minutes.
        soak_min: f64,
        /// Target field cycling rate, cycles per hour.
        cycles_per_hour: f64,
    },
}

impl ThermalCondition {
    /// Representative temperature for segment summaries: the steady
    /// temperature, or the midpoint of a cycle's extremes.
    pub fn representative_temp_c(&self) -> f64 {
        match self {
            ThermalCondition::Steady { temp_c } => *temp_c,
            ThermalCondition::Cycle { t_min_c, t_max_c, .. } => 0.5 * (t_min_c + t_max_c),
        }
    }

    fn validate(&self, state: &str) -> Result<(), ProfileError> {
        match self {
            ThermalCondition::Steady { temp_c } => {
                if !temp_c.is_finite() {
                    return Err(ProfileError::InvalidState {
                        state: state.to_string(),
                        reason: format!("steady temperature must be finite, got {}", temp_c),
                    });
                }
            }
            ThermalCondition::Cycle {
                t_min_c,
                t_max_c,
                ramp_c_per_min,
                soak_min,
                cycles_per_hour,
            } => {
                if t_max_c < t_min_c {
                    return Err(ProfileError::InvalidState {
                        state: state.to_string(),
                        reason: format!("t_max_c {} below t_min_c {}", t_max_c, t_min_c),
                    });
                }
                if *ramp_c_per_min <= 0.0 && t_max_c > t_min_c {
                    return Err(ProfileError::InvalidState {
                        state: state.to_string(),
                        reason: format!(
                            "ramp_c_per_min must be greater than 0.0, got {}",
                            ramp_c_per_min
                        ),
                    });
                }
                if *soak_min < 0.0 {
                    return Err(ProfileError::InvalidState {
                        state: state.to_string(),
                        reason: format!("soak_min must not be negative, got {}", soak_min),
                    });
                }
                if *cycles_per_hour <= 0.0 {
                    return Err(ProfileError::InvalidState {
                        state: state.to_string(),
                        reason: format!(
                            "cycles_per_hour must be greater than 0.0, got {}",
                            cycles_per_hour
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// One phase of field life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionState {
    /// Stable identifier within the profile.
    pub id: String,
    /// Display name (e.g. "truck transport", "engine-on idle").
    pub name: String,
    /// Field duration of this state, in hours (>= 0).
    pub duration_h: f64,
    /// Vibration environment.
    pub psd: PsdDefinition,
    /// Thermal environment.
    pub thermal: ThermalCondition,
}

impl MissionState {
    /// Validates the state's fields against their physical domains.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.duration_h.is_finite() || self.duration_h < 0.0 {
            return Err(ProfileError::InvalidState {
                state: self.name.clone(),
                reason: format!("duration_h must be >= 0, got {}", self.duration_h),
            });
        }
        if let PsdDefinition::Template { scale, .. } = &self.psd {
            if !scale.is_finite() || *scale <= 0.0 {
                return Err(ProfileError::InvalidState {
                    state: self.name.clone(),
                    reason: format!("PSD scale must be greater than 0.0, got {}", scale),
                });
            }
        }
        self.thermal.validate(&self.name)
    }
}

/// An ordered sequence of mission states covering the full field life.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionProfile {
    /// Mission states in display/thermal order.
    pub states: Vec<MissionState>,
}

impl MissionProfile {
    /// Create a profile from a state list.
    pub fn new(states: Vec<MissionState>) -> Self {
        Self { states }
    }

    /// Total field life in hours (sum of state durations).
    pub fn total_hours(&self) -> f64 {
        self.states.iter().map(|s| s.duration_h).sum()
    }

    /// Fraction of field life spent in `state`, or 0 when the profile has
    /// no accumulated time.
    pub fn field_percent(&self, state: &MissionState) -> f64 {
        let total = self.total_hours();
        if total > 0.0 {
            state.duration_h / total
        } else {
            0.0
        }
    }

    /// Validate every state in the profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for state in &self.states {
            state.validate()?;
        }
        Ok(())
    }
}
