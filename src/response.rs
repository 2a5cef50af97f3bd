//! Approximate magnitude response curves for the computed alignments.
//!
//! These are preview curves for plotting layers: the closed-box curve is
//! the exact 2nd-order high-pass magnitude for the computed Qtc and Fc, the
//! vented curve a 4th-order Butterworth-style approximation at the tuning
//! frequency. No rendering happens here; callers get data.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::sealed::SealedAlignment;

/// A frequency/SPL curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    /// Frequency points in Hz
    pub freq: Array1<f64>,
    /// Level relative to passband in dB
    pub spl: Array1<f64>,
}

/// Logarithmically spaced frequency grid from `start` to `stop` Hz.
pub fn log_spaced_freqs(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n < 2 {
        return Array1::from(vec![start]);
    }
    let log_start = start.ln();
    let step = (stop.ln() - log_start) / (n as f64 - 1.0);
    Array1::from_iter((0..n).map(|i| (log_start + step * i as f64).exp()))
}

/// Closed-box response relative to passband.
///
/// # Formula
/// `|H(x)|² = x⁴ / (x⁴ + x²·(1/Qtc² − 2) + 1)` with `x = f/Fc`
pub fn sealed_response(alignment: &SealedAlignment, freqs: &Array1<f64>) -> Curve {
    let q2 = alignment.qtc * alignment.qtc;
    let spl = freqs.mapv(|f| {
        let x2 = (f / alignment.fc).powi(2);
        let mag2 = x2 * x2 / (x2 * x2 + x2 * (1.0 / q2 - 2.0) + 1.0);
        10.0 * mag2.log10()
    });
    Curve {
        freq: freqs.clone(),
        spl,
    }
}

/// Vented-box response relative to passband, as a maximally flat 4th-order
/// high-pass at the tuning frequency.
///
/// # Formula
/// `|H(x)|² = x⁸ / (x⁸ + 1)` with `x = f/Fb`
pub fn ported_response(fb: f64, freqs: &Array1<f64>) -> Curve {
    let spl = freqs.mapv(|f| {
        let x = f / fb;
        let x8 = x.powi(8);
        10.0 * (x8 / (x8 + 1.0)).log10()
    });
    Curve {
        freq: freqs.clone(),
        spl,
    }
}
