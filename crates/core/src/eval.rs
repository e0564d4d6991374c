//! Conversion between win probability and centipawn evaluation
//!
//! Both directions use the same logistic model, so
//! `centipawns_to_win_probability(win_probability_to_centipawns(w)) == w`
//! up to rounding for every `w` in (0, 1).

use std::fmt;

use crate::error::{Error, Result};

/// Logistic slope relating centipawn advantage to win probability
pub const K: f64 = 0.00368208;

/// Centipawn score equivalent to win probability `w`.
///
/// `w` must lie strictly inside (0, 1); the endpoints have no finite score.
pub fn win_probability_to_centipawns(w: f64) -> Result<f64> {
    // Also rejects NaN.
    if !(w > 0.0 && w < 1.0) {
        return Err(Error::WinProbabilityOutOfRange(w));
    }
    Ok((w / (1.0 - w)).ln() / K)
}

/// Win probability for the side with centipawn score `cp`, in (0, 1).
///
/// Finite scores never map onto 0 or 1, so the result is always accepted by
/// [`win_probability_to_centipawns`].
pub fn centipawns_to_win_probability(cp: f64) -> f64 {
    let w = 1.0 / (1.0 + (-K * cp).exp());
    w.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON / 2.0)
}

/// A position's favorability in either representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationValue {
    /// Probability that the side to move wins, in (0, 1)
    WinProbability(f64),
    /// Engine score (positive = side to move is better)
    Centipawns(f64),
}

impl EvaluationValue {
    pub fn to_centipawns(self) -> Result<f64> {
        match self {
            EvaluationValue::WinProbability(w) => win_probability_to_centipawns(w),
            EvaluationValue::Centipawns(cp) => Ok(cp),
        }
    }

    pub fn to_win_probability(self) -> f64 {
        match self {
            EvaluationValue::WinProbability(w) => w,
            EvaluationValue::Centipawns(cp) => centipawns_to_win_probability(cp),
        }
    }
}

impl fmt::Display for EvaluationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationValue::WinProbability(w) => write!(f, "{:.1}%", w * 100.0),
            EvaluationValue::Centipawns(cp) => {
                let score = cp / 100.0;
                if score >= 0.0 {
                    write!(f, "+{:.2}", score)
                } else {
                    write!(f, "{:.2}", score)
                }
            }
        }
    }
}
