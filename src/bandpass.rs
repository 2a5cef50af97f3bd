//! Bandpass enclosure alignments (4th, 6th and 8th order).
//!
//! Each order couples two or three chambers and reuses the sealed and
//! ported single-chamber math. The given port dimensions apply to every
//! ported chamber of the order.

use crate::error::{BoxtuneError, Result};
use crate::model::{BandpassChambers, BoxType, PortDimensions, SubwooferSpecs};
use crate::ported::{effective_length_cm, helmholtz_frequency, port_air_velocity};
use crate::sealed::{SealedAlignment, sealed_alignment};
use crate::units::{
    PORT_END_CORRECTION, PORT_END_CORRECTION_FLANGED, inches_to_cm, square_inches_to_square_cm,
};

/// Alignment of a multi-chamber bandpass enclosure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassAlignment {
    /// Tuning of the rear ported chamber (Hz); 6th and 8th order only
    pub rear_fb: Option<f64>,
    /// Tuning of the front ported chamber (Hz)
    pub front_fb: f64,
    /// Alignment of the sealed chamber (rear for 4th order, middle for 8th)
    pub sealed: Option<SealedAlignment>,
    /// Overall system tuning / center frequency (Hz)
    pub system_tuning: f64,
    /// Approximate passband −3 dB point (Hz); only the 4th order reports one
    pub f3: Option<f64>,
    /// Peak air velocity in the front port (m/s)
    pub port_velocity: f64,
    /// Number of ported chambers, for port displacement accounting
    pub ported_chambers: u32,
}

/// Helmholtz tuning of one chamber through the shared port dimensions.
fn chamber_tuning(volume_l: f64, port: &PortDimensions, end_correction: f64) -> f64 {
    let area_cm2 = square_inches_to_square_cm(port.area_square_inches());
    let eff_len = effective_length_cm(inches_to_cm(port.length), area_cm2, end_correction);
    helmholtz_frequency(volume_l, area_cm2, eff_len)
}

/// Compute the alignment for a bandpass order.
///
/// # Errors
/// Returns `InvalidInput` when `order` is not a bandpass type; chamber
/// volume validation happens in [`BandpassChambers::from_input`].
pub fn bandpass_alignment(
    order: BoxType,
    chambers: &BandpassChambers,
    port: &PortDimensions,
    specs: &SubwooferSpecs,
) -> Result<BandpassAlignment> {
    match order {
        BoxType::Bandpass4 => fourth_order(chambers, port, specs),
        BoxType::Bandpass6 => sixth_order(chambers, port, specs),
        BoxType::Bandpass8 => eighth_order(chambers, port, specs),
        other => Err(BoxtuneError::InvalidInput {
            field: "box type",
            reason: format!("'{other}' is not a bandpass order"),
        }),
    }
}

/// 4th order: sealed rear chamber loading the cone, ported front chamber.
///
/// The reported −3 dB point is the mean of the rear chamber's sealed rolloff
/// and the front tuning, the two approximate passband edges; it is absent
/// whenever the sealed edge itself is not computable.
fn fourth_order(
    chambers: &BandpassChambers,
    port: &PortDimensions,
    specs: &SubwooferSpecs,
) -> Result<BandpassAlignment> {
    let rear = sealed_alignment(chambers.sealed_volume, specs)?;
    let front_fb = chamber_tuning(chambers.ported_volume, port, PORT_END_CORRECTION);
    let area_cm2 = square_inches_to_square_cm(port.area_square_inches());

    Ok(BandpassAlignment {
        rear_fb: None,
        front_fb,
        sealed: Some(rear),
        system_tuning: front_fb,
        f3: rear.f3.map(|f3| (f3 + front_fb) / 2.0),
        port_velocity: port_air_velocity(front_fb, area_cm2, specs),
        ported_chambers: 1,
    })
}

/// 6th order: both chambers ported. The rear duct fires into the front
/// chamber and is flanged on both ends, so it carries the longer end
/// correction. System tuning is the geometric mean of the two resonances.
fn sixth_order(
    chambers: &BandpassChambers,
    port: &PortDimensions,
    specs: &SubwooferSpecs,
) -> Result<BandpassAlignment> {
    let front_volume = required_front_volume(chambers)?;
    let rear_fb = chamber_tuning(chambers.ported_volume, port, PORT_END_CORRECTION_FLANGED);
    let front_fb = chamber_tuning(front_volume, port, PORT_END_CORRECTION);
    let area_cm2 = square_inches_to_square_cm(port.area_square_inches());

    Ok(BandpassAlignment {
        rear_fb: Some(rear_fb),
        front_fb,
        sealed: None,
        system_tuning: (rear_fb * front_fb).sqrt(),
        f3: None,
        port_velocity: port_air_velocity(front_fb, area_cm2, specs),
        ported_chambers: 2,
    })
}

/// 8th order: ported rear, sealed middle, ported front.
///
/// The center frequency is the cube root of the product of the rear tuning,
/// the middle chamber's stiffened resonance and the front tuning. This is a
/// builder's heuristic combining quantities of different derivation, not a
/// textbook result; treat the number as a starting point for measurement.
fn eighth_order(
    chambers: &BandpassChambers,
    port: &PortDimensions,
    specs: &SubwooferSpecs,
) -> Result<BandpassAlignment> {
    let front_volume = required_front_volume(chambers)?;
    let rear_fb = chamber_tuning(chambers.ported_volume, port, PORT_END_CORRECTION);
    let middle = sealed_alignment(chambers.sealed_volume, specs)?;
    let front_fb = chamber_tuning(front_volume, port, PORT_END_CORRECTION);
    let area_cm2 = square_inches_to_square_cm(port.area_square_inches());

    Ok(BandpassAlignment {
        rear_fb: Some(rear_fb),
        front_fb,
        sealed: Some(middle),
        system_tuning: (rear_fb * middle.fc * front_fb).cbrt(),
        f3: None,
        port_velocity: port_air_velocity(front_fb, area_cm2, specs),
        ported_chambers: 2,
    })
}

fn required_front_volume(chambers: &BandpassChambers) -> Result<f64> {
    chambers
        .front_ported_volume
        .ok_or_else(|| BoxtuneError::InvalidInput {
            field: "front ported volume",
            reason: "this bandpass order has two ported chambers".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> SubwooferSpecs {
        SubwooferSpecs {
            fs: 30.0,
            qts: 0.42,
            vas: 50.0,
            sd: 750.0,
            xmax: 14.0,
            displacement: 0.15,
        }
    }

    fn port() -> PortDimensions {
        PortDimensions::new(3.0, 12.0, 14.0).unwrap()
    }

    fn chambers() -> BandpassChambers {
        BandpassChambers {
            sealed_volume: 25.0,
            ported_volume: 40.0,
            front_ported_volume: Some(20.0),
        }
    }

    #[test]
    fn test_fourth_order_tunes_at_front_chamber() {
        let a = bandpass_alignment(BoxType::Bandpass4, &chambers(), &port(), &specs()).unwrap();
        assert!(a.rear_fb.is_none());
        assert_eq!(a.ported_chambers, 1);
        assert!((a.system_tuning - a.front_fb).abs() < 1e-12);
        let sealed = a.sealed.unwrap();
        assert!(sealed.qtc > specs().qts);
    }

    #[test]
    fn test_sixth_order_geometric_mean() {
        let a = bandpass_alignment(BoxType::Bandpass6, &chambers(), &port(), &specs()).unwrap();
        let rear = a.rear_fb.unwrap();
        assert!((a.system_tuning - (rear * a.front_fb).sqrt()).abs() < 1e-9);
        assert_eq!(a.ported_chambers, 2);
        assert!(a.f3.is_none());
    }

    #[test]
    fn test_sixth_order_rear_correction_is_longer() {
        // With identical chamber volumes the rear chamber must tune lower,
        // purely from its longer effective port length
        let equal = BandpassChambers {
            sealed_volume: 25.0,
            ported_volume: 30.0,
            front_ported_volume: Some(30.0),
        };
        let a = bandpass_alignment(BoxType::Bandpass6, &equal, &port(), &specs()).unwrap();
        assert!(a.rear_fb.unwrap() < a.front_fb);
    }

    #[test]
    fn test_eighth_order_center_between_extremes() {
        let a = bandpass_alignment(BoxType::Bandpass8, &chambers(), &port(), &specs()).unwrap();
        let rear = a.rear_fb.unwrap();
        let mid_fc = a.sealed.unwrap().fc;
        let lo = rear.min(mid_fc).min(a.front_fb);
        let hi = rear.max(mid_fc).max(a.front_fb);
        assert!(a.system_tuning >= lo && a.system_tuning <= hi);
    }

    #[test]
    fn test_non_bandpass_order_rejected() {
        assert!(bandpass_alignment(BoxType::Sealed, &chambers(), &port(), &specs()).is_err());
    }
}
