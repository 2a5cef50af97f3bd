//! Design warning rules.
//!
//! Every function here is pure: it reads an alignment and returns a fresh,
//! ordered list of human-readable warnings. A warning never blocks a
//! calculation; the numbers are always returned alongside it.

use crate::bandpass::BandpassAlignment;
use crate::model::{BandpassChambers, BoxDimensions, PortDimensions, SubwooferSpecs};
use crate::ported::PortedAlignment;
use crate::sealed::SealedAlignment;

/// Qtc above which a sealed alignment rings audibly.
pub const QTC_BOOMY: f64 = 0.9;
/// Qtc below which a sealed alignment sounds overdamped.
pub const QTC_WEAK: f64 = 0.5;
/// Highest acceptable −3 dB point for a subwoofer (Hz).
pub const F3_LIMIT: f64 = 60.0;
/// Acceptable tuning band around the driver's Fs, as a fraction.
pub const FB_TOLERANCE: f64 = 0.2;
/// Port air velocity above which chuffing becomes audible (m/s).
pub const MAX_PORT_VELOCITY: f64 = 17.0;
/// Shortest useful physical port (in).
pub const MIN_PORT_LENGTH: f64 = 1.0;
/// Largest port length as a fraction of the smallest internal dimension.
pub const PORT_FIT_RATIO: f64 = 0.8;
/// Minimum spacing between bandpass chamber tunings (Hz).
pub const MIN_CHAMBER_SEPARATION: f64 = 10.0;
/// Middle-chamber Qtc above which an 8th order passband peaks.
pub const BANDPASS_QTC_LIMIT: f64 = 0.8;
/// Smallest plausible net air space (L).
pub const MIN_AIR_SPACE: f64 = 0.5;
/// Largest air space that still fits a vehicle (L).
pub const MAX_AIR_SPACE: f64 = 200.0;

/// Warnings for a sealed alignment.
pub fn sealed_warnings(alignment: &SealedAlignment) -> Vec<String> {
    let mut warnings = Vec::new();
    if alignment.qtc > QTC_BOOMY {
        warnings.push(format!(
            "Qtc {:.2} is above {QTC_BOOMY}: the response will sound boomy, reduce the enclosure volume",
            alignment.qtc
        ));
    }
    if alignment.qtc < QTC_WEAK {
        warnings.push(format!(
            "Qtc {:.2} is below {QTC_WEAK}: the response lacks impact, increase the enclosure volume",
            alignment.qtc
        ));
    }
    if let Some(f3) = alignment.f3 {
        if f3 > F3_LIMIT {
            warnings.push(format!(
                "F3 {f3:.1} Hz is above {F3_LIMIT} Hz: limited low-frequency extension"
            ));
        }
    }
    warnings
}

/// Warnings for a ported alignment.
pub fn ported_warnings(
    alignment: &PortedAlignment,
    port: &PortDimensions,
    internal: &BoxDimensions,
    specs: &SubwooferSpecs,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let high = specs.fs * (1.0 + FB_TOLERANCE);
    let low = specs.fs * (1.0 - FB_TOLERANCE);
    if alignment.fb > high {
        warnings.push(format!(
            "tuning {:.1} Hz is more than {:.0}% above the driver's Fs of {:.1} Hz",
            alignment.fb,
            FB_TOLERANCE * 100.0,
            specs.fs
        ));
    } else if alignment.fb < low {
        warnings.push(format!(
            "tuning {:.1} Hz is more than {:.0}% below the driver's Fs of {:.1} Hz",
            alignment.fb,
            FB_TOLERANCE * 100.0,
            specs.fs
        ));
    }
    warnings.extend(port_velocity_warning(alignment.port_velocity));
    warnings.extend(port_fit_warnings(port, internal));
    warnings
}

/// Warning when the port air velocity crosses the chuffing threshold.
pub fn port_velocity_warning(velocity_m_s: f64) -> Option<String> {
    (velocity_m_s > MAX_PORT_VELOCITY).then(|| {
        format!(
            "port air velocity {velocity_m_s:.1} m/s exceeds {MAX_PORT_VELOCITY} m/s: audible port noise is likely"
        )
    })
}

/// Physical port checks against the enclosure interior.
///
/// The fit rule compares against the smallest *internal* dimension; a port
/// that exceeds it is flagged, not rejected.
pub fn port_fit_warnings(port: &PortDimensions, internal: &BoxDimensions) -> Vec<String> {
    let mut warnings = Vec::new();
    if port.length < MIN_PORT_LENGTH {
        warnings.push(format!(
            "port length {:.1} in is below {MIN_PORT_LENGTH} in: tuning is dominated by the end correction",
            port.length
        ));
    }
    let max_fit = PORT_FIT_RATIO * internal.min_dimension();
    if port.length > max_fit {
        warnings.push(format!(
            "port length {:.1} in exceeds 80% of the smallest internal dimension ({:.1} in): it will not fit",
            port.length,
            internal.min_dimension()
        ));
    }
    warnings
}

/// Warnings for a bandpass alignment.
pub fn bandpass_warnings(
    alignment: &BandpassAlignment,
    chambers: &BandpassChambers,
    net_volume_l: f64,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(rear_fb) = alignment.rear_fb {
        if rear_fb > alignment.front_fb {
            warnings.push(format!(
                "rear chamber tuning {:.1} Hz is above the front chamber tuning {:.1} Hz: the chambers are mis-ordered",
                rear_fb, alignment.front_fb
            ));
        }
        // Separation only applies to the all-ported 6th order; the 8th
        // order's sealed middle chamber decouples the two tunings
        if alignment.sealed.is_none() && (rear_fb - alignment.front_fb).abs() < MIN_CHAMBER_SEPARATION
        {
            warnings.push(format!(
                "chamber tunings {:.1} Hz and {:.1} Hz are less than {MIN_CHAMBER_SEPARATION} Hz apart: insufficient separation for a bandpass response",
                rear_fb, alignment.front_fb
            ));
        }
        if let Some(sealed) = alignment.sealed {
            if sealed.qtc > BANDPASS_QTC_LIMIT {
                warnings.push(format!(
                    "middle chamber Qtc {:.2} is above {BANDPASS_QTC_LIMIT}: the passband will peak",
                    sealed.qtc
                ));
            }
        }
    }

    let claimed = chambers.total_volume();
    if claimed > net_volume_l {
        warnings.push(format!(
            "chamber volumes total {claimed:.1} L but only {net_volume_l:.1} L of net volume is available"
        ));
    }

    warnings
}

/// Global air-space sanity rules, applied to every topology.
pub fn global_warnings(air_space_l: f64) -> Vec<String> {
    let mut warnings = Vec::new();
    if air_space_l < MIN_AIR_SPACE {
        warnings.push(format!(
            "net air space {air_space_l:.1} L is too small, check the inputs"
        ));
    }
    if air_space_l > MAX_AIR_SPACE {
        warnings.push(format!(
            "net air space {air_space_l:.1} L is impractically large for a vehicle installation"
        ));
    }
    warnings
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
    fn test_boomy_and_weak_qtc() {
        let boomy = SealedAlignment {
            alpha: 4.0,
            qtc: 1.0,
            fc: 70.0,
            f3: Some(55.0),
        };
        let w = sealed_warnings(&boomy);
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("boomy"));

        let weak = SealedAlignment {
            alpha: 0.1,
            qtc: 0.47,
            fc: 36.0,
            f3: None,
        };
        let w = sealed_warnings(&weak);
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("lacks impact"));
    }

    #[test]
    fn test_high_f3_flagged() {
        let a = SealedAlignment {
            alpha: 3.0,
            qtc: 0.8,
            fc: 100.0,
            f3: Some(62.0),
        };
        let w = sealed_warnings(&a);
        assert!(w.iter().any(|m| m.contains("low-frequency extension")));
    }

    #[test]
    fn test_tuning_band_warnings() {
        let internal = BoxDimensions::new(28.0, 12.0, 14.0).unwrap();
        let port = PortDimensions::new(3.0, 9.0, 8.0).unwrap();
        let high = PortedAlignment {
            fb: 32.0 * 1.25,
            port_area_cm2: 174.2,
            effective_length_cm: 28.4,
            port_velocity: 5.0,
        };
        let w = ported_warnings(&high, &port, &internal, &specs());
        assert!(w.iter().any(|m| m.contains("above the driver's Fs")));

        let low = PortedAlignment { fb: 32.0 * 0.7, ..high };
        let w = ported_warnings(&low, &port, &internal, &specs());
        assert!(w.iter().any(|m| m.contains("below the driver's Fs")));
    }

    #[test]
    fn test_port_noise_and_fit() {
        let internal = BoxDimensions::new(28.0, 10.0, 14.0).unwrap();
        let port = PortDimensions::new(2.0, 6.0, 9.0).unwrap();
        let a = PortedAlignment {
            fb: 33.0,
            port_area_cm2: 77.4,
            effective_length_cm: 28.2,
            port_velocity: 20.0,
        };
        let w = ported_warnings(&a, &port, &internal, &specs());
        assert!(w.iter().any(|m| m.contains("port noise")));
        // 9 in > 0.8 × 10 in: flagged as not fitting
        assert!(w.iter().any(|m| m.contains("will not fit")));
    }

    fn bandpass(rear_fb: Option<f64>, front_fb: f64, sealed: Option<SealedAlignment>) -> BandpassAlignment {
        BandpassAlignment {
            rear_fb,
            front_fb,
            sealed,
            system_tuning: front_fb,
            f3: None,
            port_velocity: 5.0,
            ported_chambers: if rear_fb.is_some() { 2 } else { 1 },
        }
    }

    fn chambers() -> BandpassChambers {
        BandpassChambers {
            sealed_volume: 20.0,
            ported_volume: 30.0,
            front_ported_volume: Some(25.0),
        }
    }

    #[test]
    fn test_mis_ordered_chambers_flagged() {
        let a = bandpass(Some(60.0), 40.0, None);
        let w = bandpass_warnings(&a, &chambers(), 120.0);
        assert!(w.iter().any(|m| m.contains("mis-ordered")));
    }

    #[test]
    fn test_close_tunings_flagged_for_all_ported_orders_only() {
        let a = bandpass(Some(38.0), 42.0, None);
        let w = bandpass_warnings(&a, &chambers(), 120.0);
        assert!(w.iter().any(|m| m.contains("insufficient separation")));

        // A sealed middle chamber decouples the tunings
        let mid = SealedAlignment {
            alpha: 2.0,
            qtc: 0.7,
            fc: 52.0,
            f3: Some(45.0),
        };
        let a = bandpass(Some(38.0), 42.0, Some(mid));
        let w = bandpass_warnings(&a, &chambers(), 120.0);
        assert!(!w.iter().any(|m| m.contains("insufficient separation")));
    }

    #[test]
    fn test_peaky_middle_chamber_flagged() {
        let mid = SealedAlignment {
            alpha: 4.0,
            qtc: 0.94,
            fc: 67.0,
            f3: Some(58.0),
        };
        let a = bandpass(Some(30.0), 55.0, Some(mid));
        let w = bandpass_warnings(&a, &chambers(), 120.0);
        assert!(w.iter().any(|m| m.contains("passband will peak")));
    }

    #[test]
    fn test_overcommitted_chamber_volumes_flagged() {
        let a = bandpass(Some(30.0), 55.0, None);
        // chambers claim 75 L against 60 L of net volume
        let w = bandpass_warnings(&a, &chambers(), 60.0);
        assert!(w.iter().any(|m| m.contains("net volume is available")));
        let w = bandpass_warnings(&a, &chambers(), 120.0);
        assert!(!w.iter().any(|m| m.contains("net volume is available")));
    }

    #[test]
    fn test_global_air_space_bounds() {
        assert!(global_warnings(0.2)[0].contains("too small"));
        assert!(global_warnings(250.0)[0].contains("impractically large"));
        assert!(global_warnings(40.0).is_empty());
    }

    #[test]
    fn test_fresh_lists_are_returned() {
        let a = SealedAlignment {
            alpha: 1.0,
            qtc: 0.7,
            fc: 45.0,
            f3: Some(40.0),
        };
        let w1 = sealed_warnings(&a);
        let w2 = sealed_warnings(&a);
        assert!(w1.is_empty() && w2.is_empty());
    }
}
