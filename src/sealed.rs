//! Sealed (acoustic suspension) box alignment.

use crate::error::{BoxtuneError, Result};
use crate::model::SubwooferSpecs;

/// Alignment of a driver in a sealed volume of air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SealedAlignment {
    /// Compliance ratio of box air volume to driver Vas
    pub alpha: f64,
    /// Total system Q once mounted; always ≥ the driver's Qts
    pub qtc: f64,
    /// In-box resonance frequency (Hz)
    pub fc: f64,
    /// −3 dB frequency (Hz); undefined when `qtc² < 0.5`
    pub f3: Option<f64>,
}

/// Compute the sealed alignment for a net air space in liters.
///
/// # Formula
/// * `alpha = Vb / Vas`
/// * `Qtc = Qts·√(1 + alpha)`
/// * `Fc = Fs·√(1 + alpha)`
/// * `F3 = Fc·√(Qtc² − 0.5)`, defined only when `Qtc² ≥ 0.5`
///
/// The F3 expression is undefined for low-Q alignments; the result carries
/// a `None` there rather than letting a negative square root produce NaN.
///
/// # Errors
/// Returns `InvalidInput` when the air space is not positive. A driver
/// whose displacement eats the whole box must be caught by the caller
/// before this point, but the guard keeps the formula total.
pub fn sealed_alignment(air_space_l: f64, specs: &SubwooferSpecs) -> Result<SealedAlignment> {
    if !air_space_l.is_finite() || air_space_l <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "air space",
            reason: format!("sealed alignment needs a positive air volume, got {air_space_l} L"),
        });
    }

    let alpha = air_space_l / specs.vas;
    let stiffening = (1.0 + alpha).sqrt();
    let qtc = specs.qts * stiffening;
    let fc = specs.fs * stiffening;

    let f3 = if qtc * qtc >= 0.5 {
        Some(fc * (qtc * qtc - 0.5).sqrt())
    } else {
        None
    };

    Ok(SealedAlignment { alpha, qtc, fc, f3 })
}
