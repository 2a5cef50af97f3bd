//! Common command-line interface definitions for the boxtune binary.

use clap::{Parser, ValueEnum};
use std::fmt;

use crate::model::{BoxType, MaterialThickness};
use crate::wiring::{VoiceCoil, WiringTopology};

/// Voice coil selector for the command line; the coil impedance arrives
/// through `--impedance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoilConfig {
    /// Single voice coil
    #[value(name = "svc")]
    Svc,
    /// Dual voice coil
    #[value(name = "dvc")]
    Dvc,
}

impl CoilConfig {
    /// Attach the per-coil impedance to build the library's coil type.
    pub fn to_voice_coil(self, impedance: f64) -> VoiceCoil {
        match self {
            CoilConfig::Svc => VoiceCoil::Single { impedance },
            CoilConfig::Dvc => VoiceCoil::Dual {
                coil_impedance: impedance,
            },
        }
    }
}

impl fmt::Display for CoilConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoilConfig::Svc => write!(f, "svc"),
            CoilConfig::Dvc => write!(f, "dvc"),
        }
    }
}

/// CLI arguments for the boxtune binary.
///
/// Numeric design inputs are optional at the parser level on purpose: the
/// library distinguishes "not set" from an explicit zero, and reports a
/// precise error for whichever required field is missing.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enclosure type to design.
    #[arg(long, value_enum, default_value_t = BoxType::Sealed)]
    pub box_type: BoxType,

    /// External box width (in).
    #[arg(long)]
    pub width: Option<f64>,

    /// External box height (in).
    #[arg(long)]
    pub height: Option<f64>,

    /// External box depth (in).
    #[arg(long)]
    pub depth: Option<f64>,

    /// Sheet material thickness.
    #[arg(long, value_enum, default_value_t = MaterialThickness::ThreeQuarters)]
    pub thickness: MaterialThickness,

    /// Number of subwoofers in the box.
    #[arg(long, default_value_t = 1)]
    pub subs: u32,

    /// Driver free-air resonance Fs (Hz).
    #[arg(long)]
    pub fs: Option<f64>,

    /// Driver total Q factor Qts.
    #[arg(long)]
    pub qts: Option<f64>,

    /// Driver compliance volume Vas (L).
    #[arg(long)]
    pub vas: Option<f64>,

    /// Driver cone area Sd (cm²).
    #[arg(long)]
    pub sd: Option<f64>,

    /// Driver linear excursion Xmax (mm).
    #[arg(long)]
    pub xmax: Option<f64>,

    /// Volume displaced by one driver (L).
    #[arg(long)]
    pub displacement: Option<f64>,

    /// Port width (in).
    #[arg(long)]
    pub port_width: Option<f64>,

    /// Port height (in).
    #[arg(long)]
    pub port_height: Option<f64>,

    /// Port length (in).
    #[arg(long)]
    pub port_length: Option<f64>,

    /// Bandpass sealed chamber volume (L).
    #[arg(long)]
    pub sealed_volume: Option<f64>,

    /// Bandpass ported chamber volume (L).
    #[arg(long)]
    pub ported_volume: Option<f64>,

    /// Bandpass front ported chamber volume (L), 6th/8th order.
    #[arg(long)]
    pub front_ported_volume: Option<f64>,

    /// Solve for box dimensions hitting this net volume (L) instead of
    /// analyzing a given box.
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub target_volume: Option<f64>,

    /// Solve for port dimensions hitting this tuning (Hz); needs --air-space.
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub target_fb: Option<f64>,

    /// Net air space the port solver should tune (L).
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub air_space: Option<f64>,

    /// Wiring topology for the impedance calculation.
    #[arg(long, value_enum)]
    pub wiring: Option<WiringTopology>,

    /// Voice coil configuration.
    #[arg(long, value_enum, default_value_t = CoilConfig::Svc)]
    pub coil: CoilConfig,

    /// Per-coil impedance (Ω).
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub impedance: Option<f64>,

    /// RMS power of one amplifier (W).
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub amp_power: Option<f64>,

    /// Number of amplifiers.
    #[arg(long, default_value_t = 1)]
    pub amp_count: u32,

    /// Amplifiers run bridged.
    #[arg(long, default_value_t = false)]
    pub bridged: bool,

    /// Combined RMS rating of all drivers (W), for the power match.
    #[arg(long, value_parser = parse_strictly_positive_f64)]
    pub driver_rms: Option<f64>,

    /// Emit machine-readable JSON instead of the text report.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// List the available enclosure types and exit.
    #[arg(long, default_value_t = false)]
    pub box_type_list: bool,

    /// List the available wiring topologies and exit.
    #[arg(long, default_value_t = false)]
    pub wiring_list: bool,
}

/// Parse a strictly positive float value
pub fn parse_strictly_positive_f64(s: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("value must be strictly positive, got {value}"))
    }
}

/// Print the available enclosure types with descriptions.
pub fn display_box_type_list() {
    println!("Available enclosure types:");
    println!("{}", "-".repeat(78));
    for box_type in BoxType::all() {
        println!("  {:<12} {}", box_type.to_string(), box_type.description());
    }
}

/// Print the available wiring topologies with descriptions.
pub fn display_wiring_list() {
    println!("Available wiring topologies:");
    println!("{}", "-".repeat(78));
    for topology in WiringTopology::all() {
        println!("  {:<16} {}", topology.to_string(), topology.description());
    }
}
