//! Fixture stock materials and their mechanical properties.

use serde::{Deserialize, Serialize};

/// Fixture plate material, with handbook properties baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureMaterial {
    /// 6061-T6 aluminum, the default vibration-fixture stock.
    Aluminum6061,
    /// 4130 alloy steel, for high-stiffness or welded fixtures.
    Steel4130,
    /// AZ31 magnesium, for weight-critical head-expander work.
    MagnesiumAz31,
}

impl FixtureMaterial {
    /// Young's modulus in Pa.
    pub fn youngs_modulus_pa(&self) -> f64 {
        match self {
            FixtureMaterial::Aluminum6061 => 68.9e9,
            FixtureMaterial::Steel4130 => 205.0e9,
            FixtureMaterial::MagnesiumAz31 => 45.0e9,
        }
    }

    /// Density in kg/m³.
    pub fn density_kg_m3(&self) -> f64 {
        match self {
            FixtureMaterial::Aluminum6061 => 2700.0,
            FixtureMaterial::Steel4130 => 7850.0,
            FixtureMaterial::MagnesiumAz31 => 1770.0,
        }
    }

    /// Poisson's ratio.
    pub fn poissons_ratio(&self) -> f64 {
        match self {
            FixtureMaterial::Aluminum6061 => 0.33,
            FixtureMaterial::Steel4130 => 0.29,
            FixtureMaterial::MagnesiumAz31 => 0.35,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            FixtureMaterial::Aluminum6061 => "Aluminum 6061-T6",
            FixtureMaterial::Steel4130 => "Steel 4130",
            FixtureMaterial::MagnesiumAz31 => "Magnesium AZ31",
        }
    }
}

/// How the DUT attaches to the shaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountingType {
    /// Flat plate bolted directly to the armature or slip table.
    BasePlate,
    /// Right-angle bracket for transverse-axis excitation.
    LBracket,
    /// Machined cube exciting three axes without re-fixturing.
    CubeFixture,
    /// Head expander spreading a large DUT across the armature.
    HeadExpander,
}

impl MountingType {
    /// Mounting-specific design guidance for the advisor checklist.
    pub fn checklist(&self) -> &'static [&'static str] {
        match self {
            MountingType::BasePlate => &[
                "Bolt pattern should engage every DUT mounting point; no cantilevered corners",
                "Torque fixture bolts to spec and verify with a bare-fixture resonance survey",
            ],
            MountingType::LBracket => &[
                "Gusset the bracket knee; an open L-bracket folds well below its plate frequency",
                "Run a cross-axis response check: L-brackets are the worst cross-talk offenders",
            ],
            MountingType::CubeFixture => &[
                "Verify all three faces share the same first resonance before multi-axis reuse",
                "Keep wall thickness uniform so the cube's modes stay symmetric",
            ],
            MountingType::HeadExpander => &[
                "Map the expander surface with a control accelerometer grid before the run",
                "Place control accelerometers at the DUT interface, not at the armature center",
            ],
        }
    }
}
