//! # PSD Model and Resolver
//!
//! Power spectral density (PSD) curves, the named template library, and
//! resolution of a [`PsdDefinition`] into a concrete ordered point sequence.
//!
//! A PSD is an ordered-by-frequency sequence of [`PsdPoint`]s: frequencies
//! are strictly increasing and positive, densities are non-negative, and no
//! two points share a frequency. All routines here are pure; the template
//! library is an injected, read-only dependency constructed once at startup,
//! never a module-level singleton.

mod csv;
mod error;


pub use csv::{parse_psd_csv, parse_psd_csv_file};
pub use error::PsdError;

use serde::{Deserialize, Serialize};

/// One point of a power spectral density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsdPoint {
    /// Frequency in Hz (strictly positive).
    pub f_hz: f64,
    /// Spectral density in g²/Hz (non-negative).
    pub g2_per_hz: f64,
}

impl PsdPoint {
    /// Create a new PSD point.
    pub fn new(f_hz: f64, g2_per_hz: f64) -> Self {
        Self { f_hz, g2_per_hz }
    }
}

/// A named library PSD curve. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsdTemplate {
    /// Stable identifier used by [`PsdDefinition::Template`] references.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Ordered curve points.
    pub points: Vec<PsdPoint>,
}

/// Read-only collection of named PSD templates.
///
/// Loaded once at process start and passed explicitly to
/// [`resolve`] so that resolution stays pure and testable in isolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<PsdTemplate>,
}

impl TemplateLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in curve set shipped with the engine.
    ///
    /// Levels follow common transportation / screening envelopes
    /// (MIL-STD-810 composite wheeled-vehicle transport, NAVMAT P-9492
    /// screening, and a short-event envelope for shock-adjacent content).
    pub fn builtin() -> Self {
        let mut lib = Self::new();
        lib.push(PsdTemplate {
            id: "random-transport".to_string(),
            name: "Composite wheeled-vehicle transport".to_string(),
            points: vec![
                PsdPoint::new(10.0, 0.015),
                PsdPoint::new(40.0, 0.015),
                PsdPoint::new(500.0, 0.00015),
            ],
        });
        lib.push(PsdTemplate {
            id: "navmat-p9492".to_string(),
            name: "NAVMAT P-9492 screening spectrum".to_string(),
            points: vec![
                PsdPoint::new(20.0, 0.01),
                PsdPoint::new(80.0, 0.04),
                PsdPoint::new(350.0, 0.04),
                PsdPoint::new(2000.0, 0.007),
            ],
        });
        lib.push(PsdTemplate {
            id: "shock-event".to_string(),
            name: "Short-event handling/shock envelope".to_string(),
            points: vec![
                PsdPoint::new(10.0, 0.04),
                PsdPoint::new(100.0, 0.08),
                PsdPoint::new(300.0, 0.08),
                PsdPoint::new(1000.0, 0.01),
            ],
        });
        lib
    }

    /// Add a template, replacing any existing template with the same id.
    pub fn push(&mut self, template: PsdTemplate) {
        self.templates.retain(|t| t.id != template.id);
        self.templates.push(template);
    }

    /// Builder-style extension used when loading user template sets.
    pub fn with_template(mut self, template: PsdTemplate) -> Self {
        self.push(template);
        self
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&PsdTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Iterate over all templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PsdTemplate> {
        self.templates.iter()
    }

    /// Number of templates in the library.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Source of a mission state's PSD curve.
///
/// Closed sum type: every consumer matches exhaustively, so adding a new
/// PSD source is a compile-time-checked change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PsdDefinition {
    /// A library template scaled by an amplitude factor.
    ///
    /// `scale` multiplies *amplitude*: resolved densities are the template
    /// densities times `scale²`, so the curve's gRMS scales linearly with
    /// `scale` (scale 2 doubles the g level).
    Template {
        /// Id of the referenced [`PsdTemplate`].
        template_id: String,
        /// Amplitude multiplier (> 0; 1.0 is identity).
        scale: f64,
    },
    /// A user-uploaded table, already parsed into points.
    Csv {
        /// Display name (typically the uploaded file name).
        name: String,
        /// Resolved curve points.
        points: Vec<PsdPoint>,
    },
}

impl PsdDefinition {
    /// Display label for exports and segment summaries.
    pub fn label(&self) -> &str {
        match self {
            PsdDefinition::Template { template_id, .. } => template_id,
            PsdDefinition::Csv { name, .. } => name,
        }
    }
}

/// Resolve a PSD definition into a concrete ordered point sequence.
///
/// `Template` definitions are looked up in `library` and returned as a new
/// scaled sequence; the template itself is never mutated. `Csv` definitions
/// return their points verbatim.
///
/// # Errors
///
/// [`PsdError::UnknownTemplate`] when the referenced id is absent, and
/// [`PsdError::InvalidScale`] for a non-finite or non-positive scale.
pub fn resolve(
    definition: &PsdDefinition,
    library: &TemplateLibrary,
) -> Result<Vec<PsdPoint>, PsdError> {
    match definition {
        PsdDefinition::Template { template_id, scale } => {
            if !scale.is_finite() || *scale <= 0.0 {
                return Err(PsdError::InvalidScale(*scale));
            }
            let template = library
                .get(template_id)
                .ok_or_else(|| PsdError::UnknownTemplate(template_id.clone()))?;
            // Amplitude convention: density scales with the square of the
            // amplitude factor.
            let energy = scale * scale;
            Ok(template
                .points
                .iter()
                .map(|p| PsdPoint::new(p.f_hz, p.g2_per_hz * energy))
                .collect())
        }
        PsdDefinition::Csv { points, .. } => Ok(points.clone()),
    }
}

/// Whether a point sequence is a valid PSD curve: at least two points,
/// strictly increasing positive frequencies, non-negative densities.
pub fn is_valid_curve(points: &[PsdPoint]) -> bool {
    if points.len() < 2 {
        return false;
    }
    let mut prev = 0.0_f64;
    for p in points {
        if !p.f_hz.is_finite() || !p.g2_per_hz.is_finite() {
            return false;
        }
        if p.f_hz <= prev || p.g2_per_hz < 0.0 {
            return false;
        }
        prev = p.f_hz;
    }
    true
}
