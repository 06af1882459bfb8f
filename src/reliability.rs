//! # Reliability-Demonstration Sample-Size Solver
//!
//! Binomial (success-run) reliability demonstration: passing a test of `n`
//! units with at most `c` failures demonstrates reliability `R` at
//! confidence `CL = 1 - Σ_{i=0..c} C(n,i)·(1-R)ⁱ·Rⁿ⁻ⁱ`. The solver finds
//! the smallest such `n`; the inverse directions recover achieved
//! confidence or demonstrated reliability from a completed test.
//!
//! The binomial CDF is evaluated with a term-to-term multiplicative
//! recurrence instead of factorials, so it stays finite for sample sizes
//! in the thousands.
//!
//! # Reference
//! O'Connor & Kleyner (2012), *Practical Reliability Engineering*, 5th ed.

use serde::{Deserialize, Serialize};

/// Hard cap on the upward sample-size scan. Reaching it yields
/// [`SampleSize::CapReached`] rather than looping forever.
pub const MAX_SAMPLE_SIZE: u64 = 100_000;

/// A reliability-demonstration requirement. The sample size is always
/// recomputed from these three fields, never stored alongside them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReliabilityDemo {
    /// Target reliability to demonstrate, in (0, 1).
    pub r_target: f64,
    /// Demonstration confidence level, in (0, 1).
    pub confidence: f64,
    /// Number of failures the plan tolerates.
    pub allowed_failures: u64,
}

impl ReliabilityDemo {
    /// Minimum sample size demonstrating this requirement.
    pub fn sample_size(&self) -> SampleSize {
        solve_sample_size(self.r_target, self.confidence, self.allowed_failures)
    }
}

/// Outcome of the sample-size solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "n", rename_all = "snake_case")]
pub enum SampleSize {
    /// Smallest demonstrating sample size.
    Solved(u64),
    /// The scan hit [`MAX_SAMPLE_SIZE`] without meeting the confidence
    /// threshold; callers must render this distinctly from a number.
    CapReached,
    /// Reliability or confidence outside (0, 1) — not solvable.
    NotSolvable,
}

impl SampleSize {
    /// The solved size, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            SampleSize::Solved(n) => Some(*n),
            SampleSize::CapReached | SampleSize::NotSolvable => None,
        }
    }
}

/// Cumulative binomial probability `P(X <= c)` for `n` trials with
/// per-trial failure probability `q`.
///
/// Terms are built from the previous one by the ratio
/// `(n - i) / (i + 1) · q / (1 - q)`; summation stops early once a term
/// falls below floating-point significance or goes non-finite. The result
/// is clamped to [0, 1].
pub fn binomial_cdf(n: u64, c: u64, q: f64) -> f64 {
    if !q.is_finite() {
        return 0.0;
    }
    if q <= 0.0 {
        return 1.0;
    }
    if q >= 1.0 {
        return if c >= n { 1.0 } else { 0.0 };
    }
    let c = c.min(n);

    // term_0 = (1-q)^n
    let mut term = (1.0 - q).powi(n as i32);
    let mut sum = term;
    let ratio = q / (1.0 - q);
    for i in 0..c {
        term *= (n - i) as f64 / (i + 1) as f64 * ratio;
        if !term.is_finite() || term < f64::MIN_POSITIVE {
            break;
        }
        sum += term;
    }
    sum.clamp(0.0, 1.0)
}

/// Confidence demonstrated by passing `n` trials with at most `c`
/// failures at true reliability `r`: `1 - P(X <= c | q = 1 - r)`.
pub fn demonstrated_confidence(n: u64, c: u64, r: f64) -> f64 {
    (1.0 - binomial_cdf(n, c, 1.0 - r)).clamp(0.0, 1.0)
}

/// Smallest `n` such that `demonstrated_confidence(n, c_allowed, r_target)`
/// meets `confidence`.
///
/// Uses the closed form `ceil(ln(1-CL) / ln(R))` for the zero-failure
/// plan and an upward scan from `max(1, c_allowed)` otherwise. Degenerate
/// inputs (reliability or confidence outside (0, 1)) yield
/// [`SampleSize::NotSolvable`]; a scan that reaches [`MAX_SAMPLE_SIZE`]
/// yields [`SampleSize::CapReached`].
pub fn solve_sample_size(r_target: f64, confidence: f64, c_allowed: u64) -> SampleSize {
    if !(0.0..1.0).contains(&r_target)
        || r_target <= 0.0
        || !(0.0..1.0).contains(&confidence)
        || confidence <= 0.0
    {
        return SampleSize::NotSolvable;
    }

    if c_allowed == 0 {
        let n = ((1.0 - confidence).ln() / r_target.ln()).ceil();
        if !n.is_finite() || n > MAX_SAMPLE_SIZE as f64 {
            return SampleSize::CapReached;
        }
        return SampleSize::Solved((n as u64).max(1));
    }

    let mut n = c_allowed.max(1);
    while n <= MAX_SAMPLE_SIZE {
        if demonstrated_confidence(n, c_allowed, r_target) >= confidence {
            return SampleSize::Solved(n);
        }
        n += 1;
    }
    SampleSize::CapReached
}

/// Achieved confidence for a completed test of `n` units with `c`
/// observed failures at reliability `r`. `None` for out-of-domain `r`.
pub fn solve_confidence(n: u64, c: u64, r: f64) -> Option<f64> {
    if n == 0 || r <= 0.0 || r >= 1.0 {
        return None;
    }
    Some(demonstrated_confidence(n, c, r))
}

/// Reliability demonstrated at `confidence` by a completed test of `n`
/// units with `c` failures.
///
/// Bisection over the same binomial CDF (confidence is monotone
/// decreasing in reliability). `None` when no root is bracketed, e.g.
/// when `c >= n` or the requested confidence is unreachable.
pub fn solve_reliability(n: u64, c: u64, confidence: f64) -> Option<f64> {
    if n == 0 || c >= n || confidence <= 0.0 || confidence >= 1.0 {
        return None;
    }

    let mut lo = 1e-12;
    let mut hi = 1.0 - 1e-12;
    let f = |r: f64| demonstrated_confidence(n, c, r) - confidence;
    if f(lo) < 0.0 || f(hi) > 0.0 {
        return None;
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if f(mid) >= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-12 {
            break;
        }
    }
    Some(0.5 * (lo + hi))
}
