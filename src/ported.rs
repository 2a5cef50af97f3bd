//! Ported (bass reflex) box alignment.
//!
//! The tuning formula is the Helmholtz resonator equation in centimeter
//! units: port area in cm², air volume in liters (×1000 → cm³), effective
//! length in cm, speed of sound in cm/s.

use crate::error::{BoxtuneError, Result};
use crate::model::{PortDimensions, SubwooferSpecs};
use crate::units::{
    PORT_END_CORRECTION, SPEED_OF_SOUND, inches_to_cm, square_inches_to_square_cm,
};
use std::f64::consts::PI;

/// Alignment of a ported chamber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortedAlignment {
    /// Helmholtz tuning frequency (Hz)
    pub fb: f64,
    /// Port cross-section area (cm²)
    pub port_area_cm2: f64,
    /// Physical port length plus end correction (cm)
    pub effective_length_cm: f64,
    /// Peak air velocity in the port at full excursion (m/s)
    pub port_velocity: f64,
}

/// Helmholtz tuning of a volume `vb` (liters) through a port of area
/// `area_cm2` with effective length `effective_length_cm`.
///
/// # Formula
/// `Fb = (c / 2π)·√(Av / (Vb·1000·Leff))` with c in cm/s
pub(crate) fn helmholtz_frequency(vb_l: f64, area_cm2: f64, effective_length_cm: f64) -> f64 {
    let c_cm = SPEED_OF_SOUND * 100.0;
    (c_cm / (2.0 * PI)) * (area_cm2 / (vb_l * 1000.0 * effective_length_cm)).sqrt()
}

/// Effective acoustic length of a port: physical length plus the end
/// correction for one flanged and one free end.
pub(crate) fn effective_length_cm(length_cm: f64, area_cm2: f64, correction: f64) -> f64 {
    length_cm + correction * area_cm2.sqrt()
}

/// Compute the ported alignment for a net air space in liters.
///
/// # Arguments
/// * `air_space_l` - Net chamber air volume (L)
/// * `port` - Slot port dimensions (in)
/// * `specs` - Driver parameters (Sd in cm², Xmax in mm)
///
/// # Formula
/// * `Leff = L + 0.613·√Av`
/// * `Fb` from the Helmholtz equation above
/// * `port_velocity = (Sd·10⁻⁴)·(Xmax·10⁻³)·Fb / (Av·10⁻⁴)`: the peak
///   volume displacement per cycle pushed through the port area, in m/s
///
/// # Errors
/// Returns `InvalidInput` when the air space is not positive.
pub fn ported_alignment(
    air_space_l: f64,
    port: &PortDimensions,
    specs: &SubwooferSpecs,
) -> Result<PortedAlignment> {
    if !air_space_l.is_finite() || air_space_l <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "air space",
            reason: format!("ported alignment needs a positive air volume, got {air_space_l} L"),
        });
    }

    let area_cm2 = square_inches_to_square_cm(port.area_square_inches());
    let eff_len = effective_length_cm(inches_to_cm(port.length), area_cm2, PORT_END_CORRECTION);
    let fb = helmholtz_frequency(air_space_l, area_cm2, eff_len);
    let port_velocity = port_air_velocity(fb, area_cm2, specs);

    Ok(PortedAlignment {
        fb,
        port_area_cm2: area_cm2,
        effective_length_cm: eff_len,
        port_velocity,
    })
}

/// Peak port air velocity in m/s for a given tuning and port area.
pub(crate) fn port_air_velocity(fb: f64, area_cm2: f64, specs: &SubwooferSpecs) -> f64 {
    let sd_m2 = specs.sd * 1e-4;
    let xmax_m = specs.xmax * 1e-3;
    let area_m2 = area_cm2 * 1e-4;
    sd_m2 * xmax_m * fb / area_m2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> SubwooferSpecs {
        SubwooferSpecs {
            fs: 32.0,
            qts: 0.45,
            vas: 60.0,
            sd: 800.0,
            xmax: 15.0,
            displacement: 0.2,
        }
    }

    #[test]
    fn test_tuning_in_sensible_range() {
        // 4 x 12 in slot, 18 in long, 70 L: a typical daily-driver build
        let port = PortDimensions::new(4.0, 12.0, 18.0).unwrap();
        let a = ported_alignment(70.0, &port, &specs()).unwrap();
        assert!(a.fb > 15.0 && a.fb < 80.0, "fb = {}", a.fb);
        assert!(a.effective_length_cm > inches_to_cm(18.0));
    }

    #[test]
    fn test_smaller_volume_tunes_higher() {
        let port = PortDimensions::new(4.0, 12.0, 18.0).unwrap();
        let big = ported_alignment(90.0, &port, &specs()).unwrap();
        let small = ported_alignment(45.0, &port, &specs()).unwrap();
        assert!(small.fb > big.fb);
    }

    #[test]
    fn test_longer_port_tunes_lower() {
        let short = PortDimensions::new(4.0, 12.0, 10.0).unwrap();
        let long = PortDimensions::new(4.0, 12.0, 30.0).unwrap();
        let a_short = ported_alignment(70.0, &short, &specs()).unwrap();
        let a_long = ported_alignment(70.0, &long, &specs()).unwrap();
        assert!(a_long.fb < a_short.fb);
    }

    #[test]
    fn test_velocity_units() {
        // Sd 800 cm², Xmax 15 mm, Fb 40 Hz through 100 cm² is 4.8 m/s:
        // (0.08 m² · 0.015 m · 40 Hz) / 0.01 m²
        let v = port_air_velocity(40.0, 100.0, &specs());
        assert!((v - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_helmholtz_scaling() {
        // Quadrupling the area doubles the tuning at fixed Leff
        let f1 = helmholtz_frequency(50.0, 100.0, 30.0);
        let f2 = helmholtz_frequency(50.0, 400.0, 30.0);
        assert!((f2 / f1 - 2.0).abs() < 1e-9);
    }
}
