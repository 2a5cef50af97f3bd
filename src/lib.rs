#![doc = include_str!("../README.md")]

/// Error types for boxtune operations.
pub mod error;
pub use error::{BoxtuneError, Result};

/// Physical constants and unit conversions
pub mod units;

/// Input and validated data model
pub mod model;
pub use model::{
    BandpassChambers, BandpassChambersInput, BoxDimensions, BoxDimensionsInput, BoxType,
    CalculationResult, DriverInput, MaterialThickness, PortDimensions, PortDimensionsInput,
    SubwooferSpecs,
};

/// Enclosure geometry and material usage
pub mod dimensions;
pub use dimensions::{EnclosureVolumes, enclosure_volumes};

/// Sealed box alignment
pub mod sealed;
pub use sealed::{SealedAlignment, sealed_alignment};

/// Ported box alignment
pub mod ported;
pub use ported::{PortedAlignment, ported_alignment};

/// Bandpass alignments (4th, 6th, 8th order)
pub mod bandpass;
pub use bandpass::{BandpassAlignment, bandpass_alignment};

/// Design warning rules
pub mod validation;

/// Inverse solvers for dimensions and ports
pub mod synth;
pub use synth::{synthesize_dimensions, synthesize_port};

/// Wiring topology and amplifier power match
pub mod wiring;
pub use wiring::{
    AmplifierConfig, AmplifierMatch, LoadSummary, PowerMatch, VoiceCoil, WiringTopology,
    amplifier_match, system_impedance,
};

/// Alignment response curves for plotting layers
pub mod response;
pub use response::{Curve, log_spaced_freqs, ported_response, sealed_response};

/// Top-level design pipeline
pub mod design;
pub use design::{compute_bandpass, compute_ported, compute_sealed};

/// Common CLI argument definitions for the boxtune binary
pub mod cli;
