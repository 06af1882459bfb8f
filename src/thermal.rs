//! # Thermal-Cycle Synthesizer
//!
//! Reduces the thermal conditions of a multi-state mission into one
//! representative compressed cycle that is repeated to fill a test
//! duration. Each mission state claims a share of the synthesized cycle
//! proportional to its share of field life, so a state that dominates the
//! field dominates the chamber schedule too.

use log::debug;
use serde::Serialize;

use crate::profile::{MissionProfile, ThermalCondition};

/// Errors raised by thermal-cycle synthesis.
#[derive(Debug, thiserror::Error)]
pub enum ThermalError {
    /// The mission has no states with positive duration, or the test
    /// duration is not positive
    #[error("Mission profile has no usable thermal content")]
    EmptyMission,
}

/// Tuning knobs for cycle synthesis.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisOptions {
    /// The synthesized cycle must repeat at least this many times within
    /// the test duration.
    pub min_cycles: u32,
    /// Lower bound on any single segment's dwell, in minutes.
    pub min_segment_min: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            min_cycles: 1,
            min_segment_min: 1.0,
        }
    }
}

/// One charting point of the synthesized cycle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThermalPoint {
    /// Time offset within the cycle, minutes.
    pub t_min: f64,
    /// Chamber temperature, °C.
    pub temp_c: f64,
}

/// Per-state summary of one synthesized cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ThermalSegment {
    /// Name of the contributing mission state.
    pub state: String,
    /// The state's share of field life (sums to 1.0 across states).
    pub field_percent: f64,
    /// Dwell allotted to the state within one cycle, minutes.
    pub minutes: f64,
    /// Representative temperature for the segment, °C.
    pub representative_temp_c: f64,
}

/// Result of reducing a mission's thermal conditions to one test cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ThermalSynthesis {
    /// Piecewise ramp/step point sequence for one cycle, chart-ready.
    pub points: Vec<ThermalPoint>,
    /// Per-state dwell summaries.
    pub segments: Vec<ThermalSegment>,
    /// Length of one synthesized cycle, minutes.
    pub cycle_minutes: f64,
    /// Whole repeats of the cycle that fit in the test duration.
    pub repeats: u32,
}

/// Compressed leg times for one thermal cycle of a `Cycle` condition.
///
/// Legs are ramp-up, hot soak, ramp-down, cold soak. When the state's
/// target `cycles_per_hour` implies a period shorter than the nominal leg
/// sum, all legs are scaled down proportionally; they are never scaled up.
fn compressed_legs(
    t_min_c: f64,
    t_max_c: f64,
    ramp_c_per_min: f64,
    soak_min: f64,
    cycles_per_hour: f64,
) -> [f64; 4] {
    let ramp = if ramp_c_per_min > 0.0 {
        (t_max_c - t_min_c) / ramp_c_per_min
    } else {
        0.0
    };
    let nominal = [ramp, soak_min, ramp, soak_min];
    let nominal_sum: f64 = nominal.iter().sum();
    let period_target = 60.0 / cycles_per_hour;
    if nominal_sum > 0.0 && period_target < nominal_sum {
        let k = period_target / nominal_sum;
        [ramp * k, soak_min * k, ramp * k, soak_min * k]
    } else {
        nominal
    }
}

/// Build the mission-representative thermal cycle.
///
/// The cycle length is chosen so that every segment meets
/// `min_segment_min`, every cycling state fits at least one full
/// compressed cycle inside its share, and at least `min_cycles` repeats
/// fit within `t_test_h` — the repeat requirement wins when the bounds
/// conflict. `repeats = floor(t_test_h * 60 / cycle_minutes)`, at least 1.
///
/// A mission with a single steady state degenerates to a flat line with
/// `cycle_minutes = t_test_h * 60` and one repeat.
pub fn synthesize(
    profile: &MissionProfile,
    t_test_h: f64,
    options: SynthesisOptions,
) -> Result<ThermalSynthesis, ThermalError> {
    let total_h = profile.total_hours();
    if total_h <= 0.0 || t_test_h <= 0.0 {
        return Err(ThermalError::EmptyMission);
    }

    let active: Vec<_> = profile
        .states
        .iter()
        .filter(|s| s.duration_h > 0.0)
        .collect();
    if active.is_empty() {
        return Err(ThermalError::EmptyMission);
    }

    let test_min = t_test_h * 60.0;

    // Degenerate mission: one steady state fills the whole test.
    if active.len() == 1 {
        if let ThermalCondition::Steady { temp_c } = active[0].thermal {
            return Ok(ThermalSynthesis {
                points: vec![
                    ThermalPoint { t_min: 0.0, temp_c },
                    ThermalPoint { t_min: test_min, temp_c },
                ],
                segments: vec![ThermalSegment {
                    state: active[0].name.clone(),
                    field_percent: 1.0,
                    minutes: test_min,
                    representative_temp_c: temp_c,
                }],
                cycle_minutes: test_min,
                repeats: 1,
            });
        }
    }

    // Pick the cycle length from three bounds:
    //   floor: min_segment_min per segment in every state's share,
    //   fit:   each cycling state holds one full compressed cycle,
    //   cap:   min_cycles repeats must fit in the test window.
    let mut cycle_floor = 0.0_f64;
    let mut cycle_fit = 0.0_f64;
    for state in &active {
        let share = state.duration_h / total_h;
        match &state.thermal {
            ThermalCondition::Steady { .. } => {
                cycle_floor = cycle_floor.max(options.min_segment_min / share);
            }
            ThermalCondition::Cycle {
                t_min_c,
                t_max_c,
                ramp_c_per_min,
                soak_min,
                cycles_per_hour,
            } => {
                cycle_floor = cycle_floor.max(4.0 * options.min_segment_min / share);
                let legs = compressed_legs(*t_min_c, *t_max_c, *ramp_c_per_min, *soak_min, *cycles_per_hour);
                let leg_sum: f64 = legs.iter().sum();
                cycle_fit = cycle_fit.max(leg_sum / share);
            }
        }
    }
    let cycle_cap = test_min / options.min_cycles.max(1) as f64;
    let cycle_minutes = cycle_floor.max(cycle_fit).min(cycle_cap).max(f64::MIN_POSITIVE);

    debug!(
        "thermal cycle bounds: floor {:.1} min, fit {:.1} min, cap {:.1} min -> {:.1} min",
        cycle_floor, cycle_fit, cycle_cap, cycle_minutes
    );

    // Lay segments into the cycle in mission order.
    let mut points: Vec<ThermalPoint> = Vec::new();
    let mut segments: Vec<ThermalSegment> = Vec::new();
    let mut cursor = 0.0_f64;

    for state in &active {
        let share = state.duration_h / total_h;
        let slot = share * cycle_minutes;
        let slot_start = cursor;
        match &state.thermal {
            ThermalCondition::Steady { temp_c } => {
                points.push(ThermalPoint { t_min: cursor, temp_c: *temp_c });
                points.push(ThermalPoint { t_min: cursor + slot, temp_c: *temp_c });
            }
            ThermalCondition::Cycle {
                t_min_c,
                t_max_c,
                ramp_c_per_min,
                soak_min,
                cycles_per_hour,
            } => {
                let mut legs =
                    compressed_legs(*t_min_c, *t_max_c, *ramp_c_per_min, *soak_min, *cycles_per_hour);
                let mut leg_sum: f64 = legs.iter().sum();
                // When the repeat cap forced the cycle below the fit bound,
                // compress the legs further so one cycle still lands in the slot.
                if leg_sum > slot && leg_sum > 0.0 {
                    let k = slot / leg_sum;
                    for leg in &mut legs {
                        *leg *= k;
                    }
                    leg_sum = slot;
                }
                let slot_end = cursor + slot;
                if leg_sum > 0.0 {
                    // Repeat the compressed cycle as many whole times as
                    // fit; any residual dwells at the cold extreme.
                    let reps = ((slot / leg_sum).floor() as u64).max(1);
                    for _ in 0..reps {
                        if cursor + leg_sum > slot_end + 1e-9 {
                            break;
                        }
                        points.push(ThermalPoint { t_min: cursor, temp_c: *t_min_c });
                        cursor += legs[0];
                        points.push(ThermalPoint { t_min: cursor, temp_c: *t_max_c });
                        cursor += legs[1];
                        points.push(ThermalPoint { t_min: cursor, temp_c: *t_max_c });
                        cursor += legs[2];
                        points.push(ThermalPoint { t_min: cursor, temp_c: *t_min_c });
                        cursor += legs[3];
                        points.push(ThermalPoint { t_min: cursor, temp_c: *t_min_c });
                    }
                    if cursor < slot_end - 1e-9 {
                        points.push(ThermalPoint { t_min: slot_end, temp_c: *t_min_c });
                    }
                } else {
                    // Zero-span cycle (t_min == t_max, no soak) is a flat hold.
                    points.push(ThermalPoint { t_min: cursor, temp_c: *t_min_c });
                    points.push(ThermalPoint { t_min: slot_end, temp_c: *t_min_c });
                }
            }
        }
        segments.push(ThermalSegment {
            state: state.name.clone(),
            field_percent: share,
            minutes: slot,
            representative_temp_c: state.thermal.representative_temp_c(),
        });
        cursor = slot_start + slot;
    }

    let repeats = ((test_min / cycle_minutes).floor() as u32).max(1);

    Ok(ThermalSynthesis {
        points,
        segments,
        cycle_minutes,
        repeats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MissionState, ThermalCondition};
    use crate::psd::PsdDefinition;

    fn psd() -> PsdDefinition {
        PsdDefinition::Template {
            template_id: "random-transport".to_string(),
            scale: 1.0,
        }
    }

    fn steady(name: &str, hours: f64, temp_c: f64) -> MissionState {
        MissionState {
            id: name.to_string(),
            name: name.to_string(),
            duration_h: hours,
            psd: psd(),
            thermal: ThermalCondition::Steady { temp_c },
        }
    }

    fn cycled(name: &str, hours: f64) -> MissionState {
        MissionState {
            id: name.to_string(),
            name: name.to_string(),
            duration_h: hours,
            psd: psd(),
            thermal: ThermalCondition::Cycle {
                t_min_c: 20.0,
                t_max_c: 70.0,
                ramp_c_per_min: 2.0,
                soak_min: 15.0,
                cycles_per_hour: 1.0,
            },
        }
    }

    #[test]
    fn test_single_steady_state_is_flat() {
        let profile = MissionProfile::new(vec![steady("bench", 500.0, 35.0)]);
        let out = synthesize(&profile, 48.0, SynthesisOptions::default()).unwrap();
        assert_eq!(out.repeats, 1);
        assert_eq!(out.cycle_minutes, 48.0 * 60.0);
        assert_eq!(out.points.len(), 2);
        assert!(out.points.iter().all(|p| p.temp_c == 35.0));
    }

    #[test]
    fn test_field_percent_sums_to_one() {
        let profile = MissionProfile::new(vec![
            steady("a", 1000.0, 35.0),
            cycled("b", 200.0),
            steady("c", 300.0, -10.0),
        ]);
        let out = synthesize(&profile, 48.0, SynthesisOptions::default()).unwrap();
        let sum: f64 = out.segments.iter().map(|s| s.field_percent).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_state_scenario_shares() {
        let profile = MissionProfile::new(vec![steady("a", 1000.0, 35.0), cycled("b", 200.0)]);
        let out = synthesize(&profile, 48.0, SynthesisOptions::default()).unwrap();
        assert_eq!(out.segments.len(), 2);
        assert!((out.segments[0].field_percent - 1000.0 / 1200.0).abs() < 1e-12);
        assert!((out.segments[1].field_percent - 200.0 / 1200.0).abs() < 1e-12);
        // Segment dwell splits the cycle in the same proportions.
        assert!(
            (out.segments[0].minutes / out.cycle_minutes - 1000.0 / 1200.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_cycle_state_legs_scaled_down_to_period() {
        // 50 °C swing at 2 °C/min is 25 min per ramp; 15 min soaks give an
        // 80 min nominal cycle, but 2 cycles/hour targets a 30 min period.
        let legs = compressed_legs(20.0, 70.0, 2.0, 15.0, 2.0);
        let sum: f64 = legs.iter().sum();
        assert!((sum - 30.0).abs() < 1e-9);
        // Proportional compression keeps the ramp/soak ratio.
        assert!((legs[0] / legs[1] - 25.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_state_legs_never_scaled_up() {
        // Nominal sum 80 min, target period 120 min: keep nominal.
        let legs = compressed_legs(20.0, 70.0, 2.0, 15.0, 0.5);
        let sum: f64 = legs.iter().sum();
        assert!((sum - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_cycles_cap_wins() {
        let profile = MissionProfile::new(vec![steady("a", 100.0, 35.0), cycled("b", 100.0)]);
        let options = SynthesisOptions {
            min_cycles: 6,
            min_segment_min: 1.0,
        };
        let out = synthesize(&profile, 24.0, options).unwrap();
        assert!(out.repeats >= 6);
        assert!(out.cycle_minutes <= 24.0 * 60.0 / 6.0 + 1e-9);
    }

    #[test]
    fn test_points_are_time_ordered() {
        let profile = MissionProfile::new(vec![steady("a", 400.0, 35.0), cycled("b", 800.0)]);
        let out = synthesize(&profile, 96.0, SynthesisOptions::default()).unwrap();
        for pair in out.points.windows(2) {
            assert!(pair[1].t_min >= pair[0].t_min - 1e-9);
        }
        let last = out.points.last().unwrap();
        assert!(last.t_min <= out.cycle_minutes + 1e-6);
    }

    #[test]
    fn test_empty_mission_is_error() {
        let profile = MissionProfile::new(vec![]);
        assert!(matches!(
            synthesize(&profile, 48.0, SynthesisOptions::default()),
            Err(ThermalError::EmptyMission)
        ));

        let zero = MissionProfile::new(vec![steady("a", 0.0, 25.0)]);
        assert!(matches!(
            synthesize(&zero, 48.0, SynthesisOptions::default()),
            Err(ThermalError::EmptyMission)
        ));
    }

    #[test]
    fn test_zero_test_duration_is_error() {
        let profile = MissionProfile::new(vec![steady("a", 10.0, 25.0)]);
        assert!(matches!(
            synthesize(&profile, 0.0, SynthesisOptions::default()),
            Err(ThermalError::EmptyMission)
        ));
    }
}
