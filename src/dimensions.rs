//! Enclosure geometry: volumes, panel area and material usage.
//!
//! Converts external box dimensions plus wall thickness into gross, net and
//! material volumes, and estimates sheet stock in board feet (1 board foot
//! = 144 in³).

use crate::error::{BoxtuneError, Result};
use crate::model::{BoxDimensions, MaterialThickness};
use crate::units::cubic_inches_to_liters;

/// Volumes and material figures derived from box geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosureVolumes {
    /// External volume (L)
    pub gross_volume: f64,
    /// Internal volume after subtracting the walls (L)
    pub net_volume: f64,
    /// Volume occupied by the wall material (L)
    pub material_volume: f64,
    /// External panel area (ft²)
    pub surface_area: f64,
    /// Sheet stock required (board feet)
    pub board_feet: f64,
    /// Internal dimensions (in), external minus two wall thicknesses
    pub internal: BoxDimensions,
}

/// Compute enclosure volumes from external dimensions and wall thickness.
///
/// # Formula
/// * `gross = W·H·D` converted to liters
/// * internal dims = external − 2t each; `net = Wi·Hi·Di` in liters
/// * `material = gross − net`
/// * `surface_area = 2(WH + WD + HD) / 144` ft²
/// * `board_feet = surface_area · t` (one board foot is a 1 ft² panel at
///   1" thickness)
///
/// # Errors
/// Returns `InvalidInput` when two wall thicknesses meet or exceed any
/// external dimension, which would leave no interior at all.
pub fn enclosure_volumes(
    dims: &BoxDimensions,
    thickness: MaterialThickness,
) -> Result<EnclosureVolumes> {
    let t = thickness.inches();
    let wall = 2.0 * t;

    if dims.min_dimension() <= wall {
        return Err(BoxtuneError::InvalidInput {
            field: "thickness",
            reason: format!(
                "two {t}\" walls leave no interior in a {:.1} x {:.1} x {:.1} in box",
                dims.width, dims.height, dims.depth
            ),
        });
    }

    let internal = BoxDimensions {
        width: dims.width - wall,
        height: dims.height - wall,
        depth: dims.depth - wall,
    };

    let gross_volume = cubic_inches_to_liters(dims.volume_cubic_inches());
    let net_volume = cubic_inches_to_liters(internal.volume_cubic_inches());
    let material_volume = gross_volume - net_volume;

    let surface_area = 2.0
        * (dims.width * dims.height + dims.width * dims.depth + dims.height * dims.depth)
        / 144.0;
    let board_feet = surface_area * t;

    Ok(EnclosureVolumes {
        gross_volume,
        net_volume,
        material_volume,
        surface_area,
        board_feet,
        internal,
    })
}
