//! # Octave-Band Integration
//!
//! Numerical integration of PSD curves and 1/N-octave-band resampling.
//!
//! Integration interpolates log-log (power-law) between adjacent PSD
//! points, the standard treatment for random-vibration spectra where
//! straight segments on a log-log plot are the curve definition itself.
//! Segments with a zero-density endpoint fall back to a linear trapezoid,
//! since the power-law form is undefined at zero.
//!
//! gRMS over a band is `sqrt(area)`; band resampling reports the mean
//! spectral density per band (`area / bandwidth`) and checks how much RMS
//! energy the approximation loses against the raw curve.
//!
//! # Reference
//! Steinberg (2000), *Vibration Analysis for Electronic Equipment*, 3rd ed.

use serde::Serialize;

use crate::psd::PsdPoint;

/// Relative RMS deviation above which a band resample is flagged as
/// misrepresenting the raw curve's energy.
pub const ENERGY_DEVIATION_LIMIT: f64 = 0.05;

/// Area under the PSD curve between `f1` and `f2`, in g².
///
/// Log-log interpolation between adjacent points; zero contribution
/// outside the point range. Zero-length or inverted bands (`f2 <= f1`),
/// and point sets with fewer than two points, return `0.0` — never an
/// error.
pub fn integrate_psd_over_band(points: &[PsdPoint], f1: f64, f2: f64) -> f64 {
    if points.len() < 2 || !f1.is_finite() || !f2.is_finite() || f2 <= f1 {
        return 0.0;
    }

    let mut area = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        // Clip the segment to the requested band.
        let lo = a.f_hz.max(f1);
        let hi = b.f_hz.min(f2);
        if hi <= lo {
            continue;
        }
        area += segment_area(a, b, lo, hi);
    }
    area
}

/// Area of one log-log segment `[a, b]` clipped to `[lo, hi]`.
fn segment_area(a: PsdPoint, b: PsdPoint, lo: f64, hi: f64) -> f64 {
    if a.g2_per_hz <= 0.0 || b.g2_per_hz <= 0.0 {
        // Power-law interpolation is undefined at zero density; a linear
        // trapezoid over the clipped range is the conservative fallback.
        let span = b.f_hz - a.f_hz;
        if span <= 0.0 {
            return 0.0;
        }
        let d_lo = a.g2_per_hz + (b.g2_per_hz - a.g2_per_hz) * (lo - a.f_hz) / span;
        let d_hi = a.g2_per_hz + (b.g2_per_hz - a.g2_per_hz) * (hi - a.f_hz) / span;
        return 0.5 * (d_lo + d_hi) * (hi - lo);
    }

    // PSD(f) = Pa * (f / fa)^m with m the log-log slope.
    let m = (b.g2_per_hz / a.g2_per_hz).ln() / (b.f_hz / a.f_hz).ln();
    if (m + 1.0).abs() < 1e-9 {
        // m == -1: the antiderivative is logarithmic.
        a.g2_per_hz * a.f_hz * (hi / lo).ln()
    } else {
        a.g2_per_hz * a.f_hz / (m + 1.0)
            * ((hi / a.f_hz).powf(m + 1.0) - (lo / a.f_hz).powf(m + 1.0))
    }
}

/// Overall gRMS of a PSD curve (square root of the full-range area).
pub fn grms(points: &[PsdPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            integrate_psd_over_band(points, first.f_hz, last.f_hz).sqrt()
        }
        _ => 0.0,
    }
}

/// 1/N-octave center frequencies spanning `[min_f, max_f]` inclusive.
///
/// Centers are `ref_hz * 2^(k/N)` for integer `k`, so `ref_hz` lands
/// exactly on a center whenever it falls in range. Ascending, no
/// duplicates; empty when the range is degenerate or `n == 0`.
pub fn octave_centers(min_f: f64, max_f: f64, n: u32, ref_hz: f64) -> Vec<f64> {
    if n == 0 || min_f <= 0.0 || max_f < min_f || ref_hz <= 0.0 {
        return Vec::new();
    }
    let step = (2.0_f64).ln() / n as f64;
    // Nudge the bounds so centers that land exactly on min_f/max_f are kept
    // despite floating-point rounding.
    let k_min = ((min_f / ref_hz).ln() / step - 1e-9).ceil() as i64;
    let k_max = ((max_f / ref_hz).ln() / step + 1e-9).floor() as i64;
    (k_min..=k_max)
        .map(|k| ref_hz * (step * k as f64).exp())
        .collect()
}

/// Lower and upper edge of the 1/N-octave band centered at `fc`.
pub fn octave_band_edges(fc: f64, n: u32) -> (f64, f64) {
    let half = (2.0_f64).powf(1.0 / (2.0 * n as f64));
    (fc / half, fc * half)
}

/// Result of resampling a PSD onto 1/N-octave bands.
#[derive(Debug, Clone, Serialize)]
pub struct OctaveResample {
    /// Band-mean PSD values at each octave center.
    pub points: Vec<PsdPoint>,
    /// gRMS of the raw input curve.
    pub raw_grms: f64,
    /// gRMS reconstructed from the band areas.
    pub band_grms: f64,
    /// Relative RMS deviation of the resample, `|band - raw| / raw`.
    pub energy_deviation: f64,
    /// Set exactly when `energy_deviation` exceeds
    /// [`ENERGY_DEVIATION_LIMIT`]; callers surface this as a warning.
    pub deviates: bool,
}

/// Resample a PSD onto 1/N-octave centers, preserving band energy.
///
/// The value at each center is the band's mean spectral density,
/// `band_area / (f2 - f1)`. This is an approximation of the raw curve;
/// the returned deviation figure quantifies how much RMS energy it gains
/// or loses.
pub fn resample_to_octave_bands(points: &[PsdPoint], n: u32, ref_hz: f64) -> OctaveResample {
    let raw = grms(points);
    let (min_f, max_f) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.f_hz, last.f_hz),
        _ => {
            return OctaveResample {
                points: Vec::new(),
                raw_grms: 0.0,
                band_grms: 0.0,
                energy_deviation: 0.0,
                deviates: false,
            }
        }
    };

    let mut resampled = Vec::new();
    let mut band_area_sum = 0.0;
    for fc in octave_centers(min_f, max_f, n, ref_hz) {
        let (f1, f2) = octave_band_edges(fc, n);
        let area = integrate_psd_over_band(points, f1, f2);
        band_area_sum += area;
        resampled.push(PsdPoint::new(fc, area / (f2 - f1)));
    }

    let band_grms = band_area_sum.sqrt();
    let energy_deviation = if raw > 0.0 {
        (band_grms - raw).abs() / raw
    } else {
        0.0
    };

    OctaveResample {
        points: resampled,
        raw_grms: raw,
        band_grms,
        energy_deviation,
        deviates: energy_deviation > ENERGY_DEVIATION_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn navmat() -> Vec<PsdPoint> {
        vec![
            PsdPoint::new(20.0, 0.01),
            PsdPoint::new(80.0, 0.04),
            PsdPoint::new(350.0, 0.04),
            PsdPoint::new(2000.0, 0.007),
        ]
    }

    #[test]
    fn test_flat_psd_area_is_exact() {
        let points = vec![PsdPoint::new(10.0, 0.02), PsdPoint::new(110.0, 0.02)];
        let area = integrate_psd_over_band(&points, 10.0, 110.0);
        assert!((area - 0.02 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_navmat_grms_reference_value() {
        // NAVMAT P-9492 full-level spectrum is the canonical 6.06 gRMS
        // screening profile.
        let g = grms(&navmat());
        assert!((g - 6.06).abs() < 0.1, "got {}", g);
    }

    #[test]
    fn test_inverted_and_degenerate_bands_are_zero() {
        let points = navmat();
        assert_eq!(integrate_psd_over_band(&points, 100.0, 100.0), 0.0);
        assert_eq!(integrate_psd_over_band(&points, 200.0, 100.0), 0.0);
        assert_eq!(integrate_psd_over_band(&[], 10.0, 100.0), 0.0);
        assert_eq!(
            integrate_psd_over_band(&[PsdPoint::new(10.0, 1.0)], 10.0, 100.0),
            0.0
        );
    }

    #[test]
    fn test_no_contribution_outside_point_range() {
        let points = vec![PsdPoint::new(50.0, 0.1), PsdPoint::new(100.0, 0.1)];
        assert_eq!(integrate_psd_over_band(&points, 1.0, 49.0), 0.0);
        assert_eq!(integrate_psd_over_band(&points, 101.0, 500.0), 0.0);
        let full = integrate_psd_over_band(&points, 1.0, 500.0);
        assert!((full - 0.1 * 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_density_endpoint_falls_back_to_trapezoid() {
        let points = vec![PsdPoint::new(10.0, 0.0), PsdPoint::new(20.0, 0.1)];
        let area = integrate_psd_over_band(&points, 10.0, 20.0);
        assert!((area - 0.5 * 0.1 * 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_additivity() {
        let points = navmat();
        let full = integrate_psd_over_band(&points, 20.0, 2000.0);
        let split = integrate_psd_over_band(&points, 20.0, 97.0)
            + integrate_psd_over_band(&points, 97.0, 411.0)
            + integrate_psd_over_band(&points, 411.0, 2000.0);
        assert!((full - split).abs() < 1e-9 * full);
    }

    #[test]
    fn test_octave_centers_ratio() {
        let centers = octave_centers(10.0, 2000.0, 3, 1.0);
        assert!(centers.len() > 10);
        for pair in centers.windows(2) {
            let ratio = pair[1] / pair[0];
            assert!((ratio - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-9, "ratio {}", ratio);
        }
        // 1/3-octave ratio is the familiar 1.2599.
        assert!((centers[1] / centers[0] - 1.2599).abs() < 1e-3);
    }

    #[test]
    fn test_octave_centers_anchored_at_reference() {
        let centers = octave_centers(0.5, 16.0, 1, 1.0);
        assert!(centers.iter().any(|c| (c - 1.0).abs() < 1e-9));
        assert!(centers.iter().any(|c| (c - 8.0).abs() < 1e-9));
    }

    #[test]
    fn test_octave_centers_degenerate_inputs() {
        assert!(octave_centers(100.0, 10.0, 3, 1.0).is_empty());
        assert!(octave_centers(10.0, 100.0, 0, 1.0).is_empty());
        assert!(octave_centers(-5.0, 100.0, 3, 1.0).is_empty());
    }

    #[test]
    fn test_band_edges() {
        let (f1, f2) = octave_band_edges(100.0, 3);
        assert!((f2 / f1 - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-9);
        assert!(((f1 * f2).sqrt() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_resample_preserves_energy_for_smooth_curve() {
        let out = resample_to_octave_bands(&navmat(), 6, 1.0);
        assert!(!out.points.is_empty());
        assert!(out.energy_deviation < ENERGY_DEVIATION_LIMIT, "deviation {}", out.energy_deviation);
        assert!(!out.deviates);
    }

    #[test]
    fn test_resample_empty_curve() {
        let out = resample_to_octave_bands(&[], 3, 1.0);
        assert!(out.points.is_empty());
        assert_eq!(out.raw_grms, 0.0);
        assert!(!out.deviates);
    }

    #[test]
    fn test_coarse_resample_deviates_and_flags() {
        // Full-octave bands are too coarse for the NAVMAT slopes; the RMS
        // error lands around 6% and must raise the flag.
        let out = resample_to_octave_bands(&navmat(), 1, 1.0);
        assert!(
            out.energy_deviation > ENERGY_DEVIATION_LIMIT,
            "expected > {}, got {}",
            ENERGY_DEVIATION_LIMIT,
            out.energy_deviation
        );
        assert!(out.deviates);
    }

    proptest! {
        #[test]
        fn prop_additivity_over_partition(
            split in 0.05_f64..0.95,
            lo in 10.0_f64..50.0,
            hi in 200.0_f64..2000.0,
        ) {
            let points = navmat();
            let mid = lo + split * (hi - lo);
            let full = integrate_psd_over_band(&points, lo, hi);
            let parts = integrate_psd_over_band(&points, lo, mid)
                + integrate_psd_over_band(&points, mid, hi);
            prop_assert!((full - parts).abs() <= 1e-9 * full.max(1.0));
        }

        #[test]
        fn prop_area_nonnegative_and_monotone(
            lo in 20.0_f64..500.0,
            width in 1.0_f64..1500.0,
        ) {
            let points = navmat();
            let narrow = integrate_psd_over_band(&points, lo, lo + width / 2.0);
            let wide = integrate_psd_over_band(&points, lo, lo + width);
            prop_assert!(narrow >= 0.0);
            prop_assert!(wide + 1e-12 >= narrow);
        }

        #[test]
        fn prop_octave_centers_strictly_increasing(n in 1u32..12) {
            let centers = octave_centers(5.0, 3000.0, n, 1.0);
            for pair in centers.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }
    }
}
