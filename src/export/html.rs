//! Printable HTML fixture report.
//!
//! A static, self-contained document meant for "Print → Save as PDF".

use std::fmt::Write as _;

use chrono::Utc;

use crate::fixture::{CriticalAckGate, DutInputs, FixtureEvaluation, WarningLevel};

use super::{check_gate, ExportError};

/// Render the fixture targets, warnings, and checklist as printable HTML.
pub fn fixture_report_html(
    inputs: &DutInputs,
    evaluation: &FixtureEvaluation,
    gate: &CriticalAckGate,
) -> Result<String, ExportError> {
    check_gate(gate)?;

    let mut html = String::new();
    // write! to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Fixture Feasibility Report</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         td, th {{ border: 1px solid #999; padding: 0.3em 0.8em; text-align: left; }}\n\
         .critical {{ color: #a00; font-weight: bold; }}\n\
         .warning {{ color: #850; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>Fixture Feasibility Report</h1>\n\
         <p>Generated {}</p>\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    let _ = write!(
        html,
        "<h2>Design targets</h2>\n<table>\n\
         <tr><th>Quantity</th><th>Value</th></tr>\n\
         <tr><td>DUT mass</td><td>{:.2} kg</td></tr>\n\
         <tr><td>Frequency range of interest</td><td>{:.0}&ndash;{:.0} Hz</td></tr>\n\
         <tr><td>Minimum fixture natural frequency</td><td>{:.0} Hz</td></tr>\n\
         <tr><td>Target fixture mass</td><td>{:.1} kg</td></tr>\n",
        inputs.dut_mass_kg,
        inputs.f_min_hz,
        inputs.f_max_hz,
        evaluation.min_fixture_freq_hz,
        evaluation.target_fixture_mass_kg,
    );
    if let Some(ratio) = evaluation.mass_ratio_achieved {
        let _ = write!(
            html,
            "<tr><td>Achieved mass ratio</td><td>{:.2}</td></tr>\n",
            ratio
        );
    }
    if let Some(k) = evaluation.required_stiffness_n_per_m {
        let _ = write!(
            html,
            "<tr><td>Required stiffness</td><td>{:.3e} N/m</td></tr>\n",
            k
        );
    }
    if let Some(t) = evaluation.plate_thickness_m {
        let _ = write!(
            html,
            "<tr><td>Plate thickness estimate</td><td>{:.1} mm</td></tr>\n",
            t * 1000.0
        );
    }
    html.push_str("</table>\n");

    if !evaluation.warnings.is_empty() {
        html.push_str("<h2>Warnings</h2>\n<ul>\n");
        for warning in &evaluation.warnings {
            let class = match warning.level {
                WarningLevel::Critical => "critical",
                WarningLevel::Warning => "warning",
            };
            let _ = write!(
                html,
                "<li class=\"{}\">{}</li>\n",
                class,
                escape(&warning.message)
            );
        }
        html.push_str("</ul>\n");
        if let Some(justification) = gate.justification() {
            let _ = write!(
                html,
                "<p>Critical warnings acknowledged: {}</p>\n",
                escape(justification)
            );
        }
    }

    html.push_str("<h2>Checklist</h2>\n<ol>\n");
    for item in &evaluation.checklist {
        let _ = write!(html, "<li>{}</li>\n", escape(item));
    }
    html.push_str("</ol>\n</body>\n</html>\n");

    Ok(html)
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
