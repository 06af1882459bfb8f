//! # vibeq - Vibration & Thermal-Cycling Test Equivalency
//!
//! `vibeq` converts a multi-state field mission profile — random-vibration
//! spectra plus thermal cycling, each with a duration — into an
//! accelerated-test plan:
//!
//! - an equivalent test PSD and duration that reproduce the cumulative
//!   field fatigue damage,
//! - a compressed representative thermal cycle,
//! - a reliability-demonstration sample size,
//! - a fixture-design feasibility check,
//! - and exportable CSV/JSON/HTML artifacts.
//!
//! All computation is synchronous, single-threaded, and pure: every
//! derived value is a deterministic function of its inputs, with no global
//! state and no I/O inside the numerical routines. Malformed inputs
//! degrade to typed sentinels or empty results — nothing in this core
//! panics on user data.
//!
//! ## Quick Start
//!
//! ```rust
//! use vibeq::equivalency::{self, EquivalencyConfig};
//! use vibeq::profile::{MissionProfile, MissionState, ThermalCondition};
//! use vibeq::psd::{PsdDefinition, TemplateLibrary};
//!
//! let library = TemplateLibrary::builtin();
//! let profile = MissionProfile::new(vec![MissionState {
//!     id: "transport".into(),
//!     name: "Truck transport".into(),
//!     duration_h: 1000.0,
//!     psd: PsdDefinition::Template {
//!         template_id: "random-transport".into(),
//!         scale: 1.0,
//!     },
//!     thermal: ThermalCondition::Steady { temp_c: 35.0 },
//! }]);
//!
//! let result = equivalency::compute(&profile, &library, 48.0, &EquivalencyConfig::default())?;
//! assert!(result.test_grms > result.field_grms);
//! # Ok::<(), vibeq::equivalency::EquivalencyError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`psd`]: PSD points, the template library, definition resolution, and
//!   CSV upload ingest
//! - [`octave`]: band integration and 1/N-octave resampling
//! - [`profile`]: the mission-profile data model
//! - [`thermal`]: representative thermal-cycle synthesis
//! - [`reliability`]: binomial sample-size solving and its inverses
//! - [`equivalency`]: mission-to-test damage equivalence
//! - [`fixture`]: fixture feasibility advisor and the export gate
//! - [`export`]: CSV/JSON/HTML artifact assembly
//! - [`derating`]: wire model for the external derating-rules feed
//!
//! ## Conventions
//!
//! | Quantity | Unit |
//! |----------|------|
//! | frequency | Hz |
//! | spectral density | g²/Hz |
//! | overall level | gRMS |
//! | duration | hours (field/test), minutes (thermal segments) |
//! | temperature | °C |
//!
//! Template scale factors multiply *amplitude*: a scale of 2 doubles a
//! curve's gRMS (densities scale by the square). The fatigue-damage
//! exponent is configuration, not a constant — see
//! [`equivalency::EquivalencyConfig`].

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod derating;
pub mod equivalency;
pub mod export;
pub mod fixture;
pub mod octave;
pub mod profile;
pub mod psd;
pub mod reliability;
pub mod thermal;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::equivalency::{
        DamageBand, EquivalencyConfig, EquivalencyError, EquivalencyResult, StateFactor,
    };
    pub use crate::export::{
        fixture_report_html, psd_playlist_csv, snapshot_json, test_profile_csv, ExportError,
        Snapshot,
    };
    pub use crate::fixture::{
        CriticalAckGate, DutInputs, FixtureError, FixtureEvaluation, FixtureMaterial,
        FixtureWarning, MountingType, WarningLevel,
    };
    pub use crate::octave::{
        grms, integrate_psd_over_band, octave_band_edges, octave_centers,
        resample_to_octave_bands, OctaveResample,
    };
    pub use crate::profile::{MissionProfile, MissionState, ProfileError, ThermalCondition};
    pub use crate::psd::{
        parse_psd_csv, resolve, PsdDefinition, PsdError, PsdPoint, PsdTemplate, TemplateLibrary,
    };
    pub use crate::reliability::{
        binomial_cdf, demonstrated_confidence, solve_confidence, solve_reliability,
        solve_sample_size, ReliabilityDemo, SampleSize,
    };
    pub use crate::thermal::{
        synthesize, SynthesisOptions, ThermalError, ThermalPoint, ThermalSegment,
        ThermalSynthesis,
    };
}
