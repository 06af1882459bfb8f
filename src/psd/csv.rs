//! CSV ingest for user-uploaded PSD tables.
//!
//! Accepts two columns `f_hz,g2_per_hz`. A header row is skipped when its
//! first cell does not parse as a number. Blank lines are ignored. Rows
//! whose frequency is not a finite positive number, or whose density is
//! not finite and non-negative, are dropped silently; only an import that
//! yields no usable rows at all is an error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::{PsdError, PsdPoint};

/// Parse a PSD table from a CSV file on disk.
pub fn parse_psd_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<PsdPoint>, PsdError> {
    let name = path.as_ref().display().to_string();
    let file = File::open(path)?;
    parse_psd_csv(BufReader::new(file), &name)
}

/// Parse a PSD table from any reader. `source` names the upload in errors.
pub fn parse_psd_csv<R: Read>(reader: R, source: &str) -> Result<Vec<PsdPoint>, PsdError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points: Vec<PsdPoint> = Vec::new();
    let mut dropped = 0_usize;

    for (row, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            // Record-level reader errors (bad UTF-8, mangled quoting) cost
            // that row only, same as a value that fails to parse.
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        let first = match record.get(0) {
            Some(cell) if !cell.is_empty() => cell,
            // Blank line or empty leading cell.
            _ => continue,
        };

        let f_hz: f64 = match first.parse() {
            Ok(v) => v,
            Err(_) if row == 0 => {
                // Non-numeric first cell on the first row is a header.
                continue;
            }
            Err(_) => {
                dropped += 1;
                continue;
            }
        };

        let g2_per_hz: Option<f64> = record.get(1).and_then(|cell| cell.parse().ok());

        match g2_per_hz {
            Some(d) if f_hz.is_finite() && f_hz > 0.0 && d.is_finite() && d >= 0.0 => {
                points.push(PsdPoint::new(f_hz, d));
            }
            _ => {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        debug!("{}: dropped {} invalid PSD rows", source, dropped);
    }

    if points.is_empty() {
        return Err(PsdError::EmptyCsv(source.to_string()));
    }

    // Enforce the curve invariant: ascending frequency, first occurrence
    // wins on duplicates.
    points.sort_by(|a, b| a.f_hz.total_cmp(&b.f_hz));
    points.dedup_by(|b, a| b.f_hz == a.f_hz);

    Ok(points)
}
