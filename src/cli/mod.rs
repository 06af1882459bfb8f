//! Command-line front end: job-file loading and subcommand runners.

mod config;

pub use config::JobFile;

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use vibeq::equivalency;
use vibeq::export::{
    fixture_report_html, psd_playlist_csv, snapshot_json, test_profile_csv, Snapshot,
};
use vibeq::fixture;
use vibeq::octave::grms;
use vibeq::psd::TemplateLibrary;
use vibeq::reliability::{solve_sample_size, SampleSize};
use vibeq::thermal;

/// Run the full planning pipeline on a TOML job file and write the
/// artifacts into `out_dir`.
pub fn run_plan(job_path: PathBuf, out_dir: PathBuf, ack: Option<String>) -> Result<()> {
    let job = JobFile::from_file(&job_path)?;
    let library = TemplateLibrary::builtin();

    let profile = job.mission_profile()?;
    let accel = job.test.equivalency_config();
    let t_test_h = job.test.duration_h;

    info!("Mission: {} state(s), {} field hours", profile.states.len(), profile.total_hours());
    info!("Test duration: {} h", t_test_h);

    let result = equivalency::compute(&profile, &library, t_test_h, &accel)
        .context("Equivalency computation failed")?;
    info!(
        "Field {:.2} gRMS -> test {:.2} gRMS over {} h",
        result.field_grms, result.test_grms, result.t_test_h
    );
    for factor in &result.state_factors {
        info!(
            "  {}: {:.2} gRMS over {} h, acceleration factor {:.1}",
            factor.state, factor.grms, factor.duration_h, factor.acceleration_factor
        );
    }
    for band in &result.damage_bands {
        warn!(
            "Damage concentration {:.0}-{:.0} Hz ({:.0}% of total)",
            band.f_start,
            band.f_end,
            band.score * 100.0
        );
    }

    let synthesis = thermal::synthesize(&profile, t_test_h, job.test.synthesis_options())
        .context("Thermal-cycle synthesis failed")?;
    info!(
        "Thermal cycle: {:.1} min x {} repeat(s)",
        synthesis.cycle_minutes, synthesis.repeats
    );

    let demo = job.reliability.demo();
    match demo.sample_size() {
        SampleSize::Solved(n) => info!(
            "Sample size: {} unit(s) for R={} at CL={} with {} allowed failure(s)",
            n, demo.r_target, demo.confidence, demo.allowed_failures
        ),
        SampleSize::CapReached => warn!("Sample size exceeds the solver cap; relax the requirement"),
        SampleSize::NotSolvable => warn!("Reliability requirement is outside (0, 1); not solvable"),
    }

    let inputs = job.dut.dut_inputs();
    let evaluation = fixture::evaluate(&inputs).context("Fixture evaluation failed")?;
    for warning in &evaluation.warnings {
        warn!("[{:?}] {}", warning.level, warning.message);
    }

    let mut gate = evaluation.ack_gate();
    if let Some(justification) = ack {
        gate.acknowledge(&justification)
            .context("Critical-warning acknowledgment rejected")?;
    }
    if !gate.is_clear() {
        anyhow::bail!(
            "{} Critical fixture warning(s) must be acknowledged before export; \
             re-run with --ack \"<justification>\"",
            gate.critical_count()
        );
    }

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output dir: {}", out_dir.display()))?;

    let playlist = psd_playlist_csv(&profile, &library, &gate)?;
    write_artifact(&out_dir.join("psd_playlist.csv"), &playlist)?;

    let test_profile = test_profile_csv(&result, &gate)?;
    write_artifact(&out_dir.join("psd_test_profile.csv"), &test_profile)?;

    let snapshot = Snapshot::new(&profile, &accel, &demo, &result, &evaluation);
    let json = snapshot_json(&snapshot, &gate)?;
    write_artifact(&out_dir.join("snapshot.json"), &json)?;

    let html = fixture_report_html(&inputs, &evaluation, &gate)?;
    write_artifact(&out_dir.join("fixture_report.html"), &html)?;

    Ok(())
}

/// One-shot reliability sample-size solve.
pub fn run_sample_size(r_target: f64, confidence: f64, allowed_failures: u64) -> Result<()> {
    match solve_sample_size(r_target, confidence, allowed_failures) {
        SampleSize::Solved(n) => {
            println!(
                "{} unit(s) demonstrate R={} at CL={} with {} allowed failure(s)",
                n, r_target, confidence, allowed_failures
            );
        }
        SampleSize::CapReached => {
            println!("Required sample size exceeds the solver cap; relax the requirement");
        }
        SampleSize::NotSolvable => {
            println!("Not solvable: reliability and confidence must lie in (0, 1)");
        }
    }
    Ok(())
}

/// List the built-in PSD template library.
pub fn run_templates() -> Result<()> {
    let library = TemplateLibrary::builtin();
    println!("{} built-in PSD template(s):", library.len());
    for template in library.iter() {
        println!(
            "  {:<18} {:>6.2} gRMS  {:>2} points  {}",
            template.id,
            grms(&template.points),
            template.points.len(),
            template.name
        );
    }
    Ok(())
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
