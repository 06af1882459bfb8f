//! # Derating Rules Feed
//!
//! Serde model for the externally generated component-derating rule set:
//! a JSON array of records produced offline from the derating spreadsheet
//! and consumed by the derating calculators. The equivalency core does not
//! depend on this module; it lives here so the wire contract is versioned
//! alongside the rest of the engine.

use log::debug;
use serde::{Deserialize, Serialize};

/// One derating rule record, camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeratingRule {
    /// Stable rule identifier.
    pub id: String,
    /// Component family the rule applies to (e.g. "ceramic capacitor").
    pub component_type: String,
    /// The parameter being derated (e.g. "voltage", "power").
    pub parameter_derated: String,
    /// Application category the rule targets.
    pub application_category: String,
    /// Quality class the rule targets.
    pub quality_class: String,
    /// Multiplicative derating factor in [0, 1]; `None` when the rule is
    /// expressed only as an operating-limit expression.
    pub derating_factor: Option<f64>,
    /// Free-form maximum-operating-limit expression.
    pub max_operating_limit_expr: String,
    /// Failure mode the derating guards against.
    pub typical_failure_mode: String,
    /// Source standard or handbook.
    pub source: String,
}

/// Parse a rules feed, dropping records that fail to deserialize.
///
/// The feed is machine-generated, but individual rows have historically
/// carried spreadsheet artifacts; a bad row is skipped, not fatal. Only a
/// payload that is not a JSON array at all is an error.
pub fn load_rules(json: &str) -> Result<Vec<DeratingRule>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut rules = Vec::with_capacity(raw.len());
    let mut dropped = 0_usize;
    for value in raw {
        match serde_json::from_value::<DeratingRule>(value) {
            Ok(rule) => rules.push(rule),
            Err(_) => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!("derating feed: dropped {} malformed rule(s)", dropped);
    }
    Ok(rules)
}

/// Rules applying to a component type and quality class.
pub fn applicable<'a>(
    rules: &'a [DeratingRule],
    component_type: &str,
    quality_class: &str,
) -> impl Iterator<Item = &'a DeratingRule> {
    let component = component_type.to_lowercase();
    let quality = quality_class.to_lowercase();
    rules.iter().filter(move |r| {
        r.component_type.to_lowercase() == component && r.quality_class.to_lowercase() == quality
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {
            "id": "CAP-001",
            "componentType": "ceramic capacitor",
            "parameterDerated": "voltage",
            "applicationCategory": "general",
            "qualityClass": "industrial",
            "deratingFactor": 0.6,
            "maxOperatingLimitExpr": "0.6 * Vrated",
            "typicalFailureMode": "dielectric breakdown",
            "source": "NAVSEA SD-18"
        },
        {
            "id": "RES-014",
            "componentType": "film resistor",
            "parameterDerated": "power",
            "applicationCategory": "general",
            "qualityClass": "industrial",
            "deratingFactor": null,
            "maxOperatingLimitExpr": "0.5 * Prated @ 70C",
            "typicalFailureMode": "resistance drift",
            "source": "MIL-STD-975"
        },
        { "id": "BROKEN" }
    ]"#;

    #[test]
    fn test_load_rules_drops_malformed() {
        let rules = load_rules(FEED).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "CAP-001");
        assert_eq!(rules[0].derating_factor, Some(0.6));
        assert_eq!(rules[1].derating_factor, None);
    }

    #[test]
    fn test_not_an_array_is_error() {
        assert!(load_rules("{\"id\": \"CAP-001\"}").is_err());
    }

    #[test]
    fn test_applicable_filter() {
        let rules = load_rules(FEED).unwrap();
        let hits: Vec<_> = applicable(&rules, "Ceramic Capacitor", "INDUSTRIAL").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "CAP-001");
        assert_eq!(applicable(&rules, "relay", "industrial").count(), 0);
    }

    #[test]
    fn test_round_trip() {
        let rules = load_rules(FEED).unwrap();
        let json = serde_json::to_string(&rules[0]).unwrap();
        assert!(json.contains("componentType"));
        let restored: DeratingRule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, "CAP-001");
    }
}
