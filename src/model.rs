//! Data model for enclosure and driver parameters.
//!
//! The model has two layers. The *input* layer (`*Input` structs) carries
//! every numeric field as `Option<f64>`, so an unset form field is
//! distinguishable from a deliberate zero at the type level. The *validated*
//! layer carries plain `f64` and can only be constructed through fallible
//! conversions that reject missing and out-of-range values; downstream
//! arithmetic never has to re-check positivity or guard a division.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BoxtuneError, Result};

/// Resolve a required input field, rejecting the unset state.
fn require(field: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| BoxtuneError::InvalidInput {
        field,
        reason: "value is required but was not set".to_string(),
    })
}

/// Resolve a required input field that must be strictly positive and finite.
fn require_positive(field: &'static str, value: Option<f64>) -> Result<f64> {
    let v = require(field, value)?;
    if !v.is_finite() || v <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field,
            reason: format!("must be a positive number, got {v}"),
        });
    }
    Ok(v)
}

/// Resolve a required input field that must be finite and non-negative.
fn require_non_negative(field: &'static str, value: Option<f64>) -> Result<f64> {
    let v = require(field, value)?;
    if !v.is_finite() || v < 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field,
            reason: format!("must be zero or positive, got {v}"),
        });
    }
    Ok(v)
}

/// Enclosure type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum BoxType {
    /// Sealed (acoustic suspension) enclosure
    #[value(name = "sealed")]
    Sealed,
    /// Ported (bass reflex) enclosure
    #[value(name = "ported")]
    Ported,
    /// 4th-order bandpass: sealed rear chamber, ported front chamber
    #[value(name = "bandpass4")]
    Bandpass4,
    /// 6th-order bandpass: both chambers ported
    #[value(name = "bandpass6")]
    Bandpass6,
    /// 8th-order bandpass: ported rear, sealed middle, ported front
    #[value(name = "bandpass8")]
    Bandpass8,
}

impl fmt::Display for BoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxType::Sealed => write!(f, "sealed"),
            BoxType::Ported => write!(f, "ported"),
            BoxType::Bandpass4 => write!(f, "bandpass4"),
            BoxType::Bandpass6 => write!(f, "bandpass6"),
            BoxType::Bandpass8 => write!(f, "bandpass8"),
        }
    }
}

impl BoxType {
    /// Get all available enclosure types
    pub fn all() -> Vec<Self> {
        vec![
            BoxType::Sealed,
            BoxType::Ported,
            BoxType::Bandpass4,
            BoxType::Bandpass6,
            BoxType::Bandpass8,
        ]
    }

    /// Get a description of the enclosure type
    pub fn description(&self) -> &'static str {
        match self {
            BoxType::Sealed => "Sealed enclosure: tight response, tolerant of volume errors",
            BoxType::Ported => "Ported enclosure: higher output near tuning, steeper rolloff",
            BoxType::Bandpass4 => "4th-order bandpass: sealed rear chamber, ported front chamber",
            BoxType::Bandpass6 => "6th-order bandpass: both chambers ported",
            BoxType::Bandpass8 => {
                "8th-order bandpass: ported rear, sealed middle, ported front chamber"
            }
        }
    }

    /// Whether this topology uses at least one port
    pub fn is_ported(&self) -> bool {
        !matches!(self, BoxType::Sealed)
    }

    /// Whether this is one of the bandpass orders
    pub fn is_bandpass(&self) -> bool {
        matches!(
            self,
            BoxType::Bandpass4 | BoxType::Bandpass6 | BoxType::Bandpass8
        )
    }
}

/// Stock sheet material thickness.
///
/// Enclosures are built from 1/2", 3/4" or 1" MDF; the closed set keeps the
/// wall-thickness math honest instead of accepting arbitrary magic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
pub enum MaterialThickness {
    /// 1/2" sheet stock
    #[value(name = "0.5")]
    Half,
    /// 3/4" sheet stock (the usual choice)
    #[default]
    #[value(name = "0.75")]
    ThreeQuarters,
    /// 1" sheet stock
    #[value(name = "1.0")]
    One,
}

impl MaterialThickness {
    /// Thickness in inches
    pub fn inches(&self) -> f64 {
        match self {
            MaterialThickness::Half => 0.5,
            MaterialThickness::ThreeQuarters => 0.75,
            MaterialThickness::One => 1.0,
        }
    }

    /// Get all available thicknesses
    pub fn all() -> Vec<Self> {
        vec![
            MaterialThickness::Half,
            MaterialThickness::ThreeQuarters,
            MaterialThickness::One,
        ]
    }
}

impl fmt::Display for MaterialThickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Must render exactly as the CLI value name so clap can round-trip
        // the default through its parser
        match self {
            MaterialThickness::Half => write!(f, "0.5"),
            MaterialThickness::ThreeQuarters => write!(f, "0.75"),
            MaterialThickness::One => write!(f, "1.0"),
        }
    }
}

/// External box dimensions as entered by the user (inches).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxDimensionsInput {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
}

/// Validated external box dimensions in inches, all strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    /// External width (in)
    pub width: f64,
    /// External height (in)
    pub height: f64,
    /// External depth (in)
    pub depth: f64,
}

impl BoxDimensions {
    /// Build validated dimensions from raw values.
    pub fn new(width: f64, height: f64, depth: f64) -> Result<Self> {
        Self::try_from(&BoxDimensionsInput {
            width: Some(width),
            height: Some(height),
            depth: Some(depth),
        })
    }

    /// Smallest of the three dimensions (in)
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height).min(self.depth)
    }

    /// Volume of the cuboid in cubic inches
    pub fn volume_cubic_inches(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

impl TryFrom<&BoxDimensionsInput> for BoxDimensions {
    type Error = BoxtuneError;

    fn try_from(input: &BoxDimensionsInput) -> Result<Self> {
        Ok(Self {
            width: require_positive("width", input.width)?,
            height: require_positive("height", input.height)?,
            depth: require_positive("depth", input.depth)?,
        })
    }
}

/// Port dimensions as entered by the user (inches).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortDimensionsInput {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
}

/// Validated slot-port dimensions in inches, all strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortDimensions {
    /// Port width (in)
    pub width: f64,
    /// Port height (in)
    pub height: f64,
    /// Port length (in)
    pub length: f64,
}

impl PortDimensions {
    /// Build validated port dimensions from raw values.
    pub fn new(width: f64, height: f64, length: f64) -> Result<Self> {
        Self::try_from(&PortDimensionsInput {
            width: Some(width),
            height: Some(height),
            length: Some(length),
        })
    }

    /// Port cross-section area in square inches
    pub fn area_square_inches(&self) -> f64 {
        self.width * self.height
    }

    /// Volume displaced by the port inside the box, in liters
    pub fn volume_liters(&self) -> f64 {
        crate::units::cubic_inches_to_liters(self.area_square_inches() * self.length)
    }
}

impl TryFrom<&PortDimensionsInput> for PortDimensions {
    type Error = BoxtuneError;

    fn try_from(input: &PortDimensionsInput) -> Result<Self> {
        Ok(Self {
            width: require_positive("port width", input.width)?,
            height: require_positive("port height", input.height)?,
            length: require_positive("port length", input.length)?,
        })
    }
}

/// Driver electro-mechanical parameters as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverInput {
    /// Free-air resonance (Hz)
    #[serde(default)]
    pub fs: Option<f64>,
    /// Total quality factor
    #[serde(default)]
    pub qts: Option<f64>,
    /// Equivalent compliance volume (L)
    #[serde(default)]
    pub vas: Option<f64>,
    /// Effective cone area (cm²)
    #[serde(default)]
    pub sd: Option<f64>,
    /// Maximum linear excursion (mm)
    #[serde(default)]
    pub xmax: Option<f64>,
    /// Volume displaced by the driver itself (L)
    #[serde(default)]
    pub displacement: Option<f64>,
}

/// Validated Thiele-Small driver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubwooferSpecs {
    /// Free-air resonance (Hz)
    pub fs: f64,
    /// Total quality factor
    pub qts: f64,
    /// Equivalent compliance volume (L)
    pub vas: f64,
    /// Effective cone area (cm²)
    pub sd: f64,
    /// Maximum linear excursion (mm)
    pub xmax: f64,
    /// Volume displaced by the driver itself (L); zero is a legal value
    pub displacement: f64,
}

impl TryFrom<&DriverInput> for SubwooferSpecs {
    type Error = BoxtuneError;

    fn try_from(input: &DriverInput) -> Result<Self> {
        Ok(Self {
            fs: require_positive("fs", input.fs)?,
            qts: require_positive("qts", input.qts)?,
            vas: require_positive("vas", input.vas)?,
            sd: require_positive("sd", input.sd)?,
            xmax: require_positive("xmax", input.xmax)?,
            displacement: require_non_negative("displacement", input.displacement)?,
        })
    }
}

/// Bandpass chamber volume split as entered by the user (liters).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BandpassChambersInput {
    #[serde(default)]
    pub sealed_volume: Option<f64>,
    #[serde(default)]
    pub ported_volume: Option<f64>,
    #[serde(default)]
    pub front_ported_volume: Option<f64>,
}

/// Validated bandpass chamber volumes in liters.
///
/// `sealed_volume` is the rear chamber for 4th order and the middle chamber
/// for 8th order. `front_ported_volume` is required only by the 6th and 8th
/// orders, which have two ported chambers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandpassChambers {
    /// Sealed chamber volume (L)
    pub sealed_volume: f64,
    /// Ported chamber volume (L)
    pub ported_volume: f64,
    /// Second (front) ported chamber volume (L), when the order uses one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_ported_volume: Option<f64>,
}

impl BandpassChambers {
    /// Resolve chamber volumes for a given bandpass order.
    pub fn from_input(order: BoxType, input: &BandpassChambersInput) -> Result<Self> {
        let front_ported_volume = match order {
            BoxType::Bandpass6 | BoxType::Bandpass8 => Some(require_positive(
                "front ported volume",
                input.front_ported_volume,
            )?),
            _ => match input.front_ported_volume {
                Some(v) => Some(require_positive("front ported volume", Some(v))?),
                None => None,
            },
        };
        Ok(Self {
            sealed_volume: require_positive("sealed volume", input.sealed_volume)?,
            ported_volume: require_positive("ported volume", input.ported_volume)?,
            front_ported_volume,
        })
    }

    /// Total air volume claimed by the chambers (L)
    pub fn total_volume(&self) -> f64 {
        self.sealed_volume + self.ported_volume + self.front_ported_volume.unwrap_or(0.0)
    }
}

/// Complete output of an enclosure calculation.
///
/// Quantities that are undefined for the topology, or not computable from
/// the given inputs, are `None` and serialize as absent fields; callers
/// render them as "—". They are never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// External volume (L)
    pub gross_volume: f64,
    /// Internal volume after wall material (L)
    pub net_volume: f64,
    /// Volume taken up by the walls (L)
    pub material_volume: f64,
    /// Air volume left after driver and port displacement (L)
    pub air_space: f64,
    /// System Q of the sealed alignment (sealed and bandpass orders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qtc: Option<f64>,
    /// −3 dB frequency (Hz), when the alignment defines one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f3: Option<f64>,
    /// Port or system tuning frequency (Hz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fb: Option<f64>,
    /// Port length (in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_length: Option<f64>,
    /// Port cross-section area (in²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_area: Option<f64>,
    /// Peak port air velocity (m/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_velocity: Option<f64>,
    /// Sheet material needed, in board feet
    pub board_feet: f64,
    /// External panel area (ft²)
    pub surface_area: f64,
    /// Human-readable design warnings, in rule order
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_field_is_rejected() {
        let input = BoxDimensionsInput {
            width: Some(30.0),
            height: None,
            depth: Some(14.0),
        };
        let err = BoxDimensions::try_from(&input).unwrap_err();
        assert!(matches!(
            err,
            BoxtuneError::InvalidInput { field: "height", .. }
        ));
    }

    #[test]
    fn test_explicit_zero_is_rejected_as_out_of_range() {
        // Zero is a set value, rejected for its range, not for being unset
        let input = BoxDimensionsInput {
            width: Some(0.0),
            height: Some(12.0),
            depth: Some(14.0),
        };
        let err = BoxDimensions::try_from(&input).unwrap_err();
        match err {
            BoxtuneError::InvalidInput { field, reason } => {
                assert_eq!(field, "width");
                assert!(reason.contains("positive"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_displacement_is_legal() {
        let input = DriverInput {
            fs: Some(32.0),
            qts: Some(0.45),
            vas: Some(45.0),
            sd: Some(500.0),
            xmax: Some(12.0),
            displacement: Some(0.0),
        };
        let specs = SubwooferSpecs::try_from(&input).unwrap();
        assert_eq!(specs.displacement, 0.0);
    }

    #[test]
    fn test_front_chamber_required_for_sixth_order() {
        let input = BandpassChambersInput {
            sealed_volume: Some(20.0),
            ported_volume: Some(30.0),
            front_ported_volume: None,
        };
        assert!(BandpassChambers::from_input(BoxType::Bandpass6, &input).is_err());
        assert!(BandpassChambers::from_input(BoxType::Bandpass4, &input).is_ok());
    }

    #[test]
    fn test_port_volume_liters() {
        let port = PortDimensions::new(3.0, 12.0, 20.0).unwrap();
        // 3*12*20 = 720 in³
        let expected = crate::units::cubic_inches_to_liters(720.0);
        assert!((port.volume_liters() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_result_serializes_without_absent_fields() {
        let result = CalculationResult {
            gross_volume: 80.0,
            net_volume: 70.0,
            material_volume: 10.0,
            air_space: 65.0,
            qtc: Some(0.7),
            f3: None,
            fb: None,
            port_length: None,
            port_area: None,
            port_velocity: None,
            board_feet: 20.0,
            surface_area: 25.0,
            warnings: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"qtc\""));
        assert!(!json.contains("\"f3\""));
        assert!(!json.contains("\"fb\""));
    }
}
