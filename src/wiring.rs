//! Electrical load: wiring topology reduction and amplifier power match.
//!
//! This pipeline is independent of the acoustic side: it consumes only
//! driver impedances and amplifier specs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BoxtuneError, Result};

/// Impedance below which most car amplifiers are unstable (Ω).
pub const MIN_STABLE_IMPEDANCE: f64 = 1.0;
/// Amplifier-to-driver power ratio band considered a good match.
pub const POWER_MATCH_LOW: f64 = 0.75;
pub const POWER_MATCH_HIGH: f64 = 1.25;

/// How the drivers are wired to the amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum WiringTopology {
    /// All drivers in one series string
    #[value(name = "series")]
    Series,
    /// All drivers directly across the amplifier
    #[value(name = "parallel")]
    Parallel,
    /// Pairs wired in series, the pairs combined in parallel
    #[value(name = "series-parallel")]
    SeriesParallel,
}

impl fmt::Display for WiringTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringTopology::Series => write!(f, "series"),
            WiringTopology::Parallel => write!(f, "parallel"),
            WiringTopology::SeriesParallel => write!(f, "series-parallel"),
        }
    }
}

impl WiringTopology {
    /// Get all available wiring topologies
    pub fn all() -> Vec<Self> {
        vec![
            WiringTopology::Series,
            WiringTopology::Parallel,
            WiringTopology::SeriesParallel,
        ]
    }

    /// Get a description of the topology
    pub fn description(&self) -> &'static str {
        match self {
            WiringTopology::Series => "All drivers in one series string: impedance adds up",
            WiringTopology::Parallel => "All drivers across the amplifier: impedance divides down",
            WiringTopology::SeriesParallel => {
                "Series pairs combined in parallel: keeps impedance near a single driver's"
            }
        }
    }
}

/// Voice coil configuration of a driver.
///
/// The impedance rides along in the variant, so a single driver's load is
/// fully described by this one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VoiceCoil {
    /// Single voice coil of the given impedance (Ω)
    Single { impedance: f64 },
    /// Dual voice coil; each coil has the given impedance (Ω)
    Dual { coil_impedance: f64 },
}

impl VoiceCoil {
    fn nominal_impedance(&self) -> f64 {
        match self {
            VoiceCoil::Single { impedance } => *impedance,
            VoiceCoil::Dual { coil_impedance } => *coil_impedance,
        }
    }

    /// Load presented by one driver once its own coils are wired.
    ///
    /// An SVC driver is its coil. A DVC driver's coils follow the selected
    /// topology: series wiring puts the coils in series (2Z), parallel puts
    /// them in parallel (Z/2); series-parallel strings the coils in series
    /// before the pairs are combined.
    fn driver_load(&self, topology: WiringTopology) -> f64 {
        match self {
            VoiceCoil::Single { impedance } => *impedance,
            VoiceCoil::Dual { coil_impedance } => match topology {
                WiringTopology::Series | WiringTopology::SeriesParallel => coil_impedance * 2.0,
                WiringTopology::Parallel => coil_impedance / 2.0,
            },
        }
    }
}

/// Result of a wiring reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Total system impedance seen by the amplifier (Ω)
    pub ohms: f64,
    /// Stability and configuration warnings, in rule order
    pub warnings: Vec<String>,
}

/// Reduce a driver/wiring configuration to the impedance at the amplifier.
///
/// # Errors
/// * `InvalidInput` for a non-positive coil impedance or zero driver count
/// * `NotComputable` if the reduction somehow produces a non-positive or
///   non-finite impedance; that is a defect surfaced, never clamped
pub fn system_impedance(
    topology: WiringTopology,
    coil: &VoiceCoil,
    count: u32,
) -> Result<LoadSummary> {
    let nominal = coil.nominal_impedance();
    if !nominal.is_finite() || nominal <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "impedance",
            reason: format!("coil impedance must be positive, got {nominal} Ω"),
        });
    }
    if count == 0 {
        return Err(BoxtuneError::InvalidInput {
            field: "count",
            reason: "at least one driver is required".to_string(),
        });
    }

    let mut warnings = Vec::new();
    let unit = coil.driver_load(topology);
    let n = f64::from(count);

    let ohms = match topology {
        WiringTopology::Series => unit * n,
        WiringTopology::Parallel => unit / n,
        WiringTopology::SeriesParallel => {
            if count % 2 == 0 {
                (unit * 2.0) / (n / 2.0)
            } else {
                // Historical fallback for an odd driver count: report the
                // bare per-driver load. There is no wiring that realizes
                // this number; it survives only for continuity and is
                // always flagged.
                warnings.push(format!(
                    "series-parallel wiring needs an even driver count; {count} drivers cannot be \
                     paired, falling back to the per-driver load"
                ));
                unit
            }
        }
    };

    if !ohms.is_finite() || ohms <= 0.0 {
        return Err(BoxtuneError::NotComputable {
            quantity: "system impedance",
            reason: format!("reduction produced {ohms} Ω from a {nominal} Ω coil"),
        });
    }

    if ohms < MIN_STABLE_IMPEDANCE {
        warnings.push(format!(
            "system impedance {ohms:.2} Ω is below {MIN_STABLE_IMPEDANCE} Ω: most amplifiers are \
             unstable into this load"
        ));
    }

    Ok(LoadSummary { ohms, warnings })
}

/// Amplifier bank configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplifierConfig {
    /// RMS power per amplifier (W)
    pub power_per_unit: f64,
    /// Number of amplifiers
    pub unit_count: u32,
    /// Whether the amplifiers run bridged
    pub bridged: bool,
}

/// How the amplifier bank's power compares to the drivers' rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerMatch {
    /// Less than 75% of the drivers' combined RMS rating
    Underpowered,
    /// Within 75–125% of the drivers' combined RMS rating
    Optimal,
    /// More than 125% of the drivers' combined RMS rating
    Overpowered,
}

impl fmt::Display for PowerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerMatch::Underpowered => write!(f, "underpowered"),
            PowerMatch::Optimal => write!(f, "optimal"),
            PowerMatch::Overpowered => write!(f, "overpowered"),
        }
    }
}

/// Result of the amplifier/driver power comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplifierMatch {
    /// Combined deliverable power of the bank (W)
    pub total_power: f64,
    /// Classification against the drivers' combined RMS rating
    pub classification: PowerMatch,
}

/// Compare an amplifier bank against the drivers' combined RMS rating.
///
/// Total power is `power_per_unit × unit_count` whether or not the bank is
/// bridged: bridging changes how the power reaches the load, not how much
/// the bank can produce.
///
/// # Errors
/// Returns `InvalidInput` for non-positive power figures or a zero count.
pub fn amplifier_match(config: &AmplifierConfig, total_driver_rms: f64) -> Result<AmplifierMatch> {
    if !config.power_per_unit.is_finite() || config.power_per_unit <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "power per unit",
            reason: format!("must be positive watts, got {}", config.power_per_unit),
        });
    }
    if config.unit_count == 0 {
        return Err(BoxtuneError::InvalidInput {
            field: "unit count",
            reason: "at least one amplifier is required".to_string(),
        });
    }
    if !total_driver_rms.is_finite() || total_driver_rms <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "driver rms",
            reason: format!("must be positive watts, got {total_driver_rms}"),
        });
    }

    let total_power = config.power_per_unit * f64::from(config.unit_count);
    let ratio = total_power / total_driver_rms;
    let classification = if ratio < POWER_MATCH_LOW {
        PowerMatch::Underpowered
    } else if ratio > POWER_MATCH_HIGH {
        PowerMatch::Overpowered
    } else {
        PowerMatch::Optimal
    };

    Ok(AmplifierMatch {
        total_power,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_and_parallel_of_four() {
        let coil = VoiceCoil::Single { impedance: 4.0 };
        let series = system_impedance(WiringTopology::Series, &coil, 4).unwrap();
        assert!((series.ohms - 16.0).abs() < 1e-12);
        let parallel = system_impedance(WiringTopology::Parallel, &coil, 4).unwrap();
        assert!((parallel.ohms - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dvc_single_driver() {
        let coil = VoiceCoil::Dual { coil_impedance: 4.0 };
        let series = system_impedance(WiringTopology::Series, &coil, 1).unwrap();
        assert!((series.ohms - 8.0).abs() < 1e-12);
        let parallel = system_impedance(WiringTopology::Parallel, &coil, 1).unwrap();
        assert!((parallel.ohms - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_series_parallel_even() {
        let coil = VoiceCoil::Single { impedance: 4.0 };
        let load = system_impedance(WiringTopology::SeriesParallel, &coil, 4).unwrap();
        // two series pairs of 8 Ω in parallel
        assert!((load.ohms - 4.0).abs() < 1e-12);
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn test_sub_ohm_load_is_flagged() {
        let coil = VoiceCoil::Dual { coil_impedance: 2.0 };
        let load = system_impedance(WiringTopology::Parallel, &coil, 2).unwrap();
        assert!((load.ohms - 0.5).abs() < 1e-12);
        assert!(load.warnings.iter().any(|w| w.contains("unstable")));
    }

    #[test]
    fn test_zero_count_and_bad_impedance_rejected() {
        let coil = VoiceCoil::Single { impedance: 4.0 };
        assert!(system_impedance(WiringTopology::Series, &coil, 0).is_err());
        let bad = VoiceCoil::Single { impedance: 0.0 };
        assert!(system_impedance(WiringTopology::Series, &bad, 2).is_err());
    }

    #[test]
    fn test_power_match_bands() {
        let config = AmplifierConfig {
            power_per_unit: 500.0,
            unit_count: 2,
            bridged: false,
        };
        let m = amplifier_match(&config, 1000.0).unwrap();
        assert_eq!(m.classification, PowerMatch::Optimal);
        assert!((m.total_power - 1000.0).abs() < 1e-12);

        let m = amplifier_match(&config, 2000.0).unwrap();
        assert_eq!(m.classification, PowerMatch::Underpowered);

        let m = amplifier_match(&config, 500.0).unwrap();
        assert_eq!(m.classification, PowerMatch::Overpowered);
    }

    #[test]
    fn test_bridging_does_not_change_total() {
        let separate = AmplifierConfig {
            power_per_unit: 400.0,
            unit_count: 2,
            bridged: false,
        };
        let bridged = AmplifierConfig { bridged: true, ..separate };
        let a = amplifier_match(&separate, 800.0).unwrap();
        let b = amplifier_match(&bridged, 800.0).unwrap();
        assert!((a.total_power - b.total_power).abs() < 1e-12);
    }
}
