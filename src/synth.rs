//! Inverse solvers: target volume → box dimensions, target tuning → port.
//!
//! Both solvers are closed-form inversions of the forward formulas, seeded
//! with the empirical constants in [`crate::units`].

use crate::error::{BoxtuneError, Result};
use crate::model::{BoxDimensions, MaterialThickness, PortDimensions};
use crate::units::{
    BOX_RATIO_DEPTH, BOX_RATIO_HEIGHT, BOX_RATIO_WIDTH, PORT_AREA_PER_CUBIC_FOOT,
    PORT_ASPECT_RATIO, PORT_END_CORRECTION, SPEED_OF_SOUND, cm_to_inches, liters_to_cubic_feet,
    liters_to_cubic_inches, square_inches_to_square_cm,
};
use log::debug;
use std::f64::consts::PI;

/// Round a dimension to the nearest tenth of an inch.
fn round_tenth(inches: f64) -> f64 {
    (inches * 10.0).round() / 10.0
}

/// Synthesize external box dimensions for a target net air space.
///
/// The required internal volume is the target plus the drivers' own
/// displacement. Internal width, height and depth follow the proportion
/// constants in `units` (golden-ratio spread); external dimensions add two
/// wall thicknesses back and are rounded to 0.1 in, so recomputing the air
/// space from the result lands within 1% of the target.
///
/// # Errors
/// * `InvalidInput` for a non-positive target, zero driver count or
///   negative displacement
/// * `NotComputable` if the solved dimensions come out non-finite
pub fn synthesize_dimensions(
    target_net_l: f64,
    thickness: MaterialThickness,
    sub_count: u32,
    displacement_l: f64,
) -> Result<BoxDimensions> {
    if !target_net_l.is_finite() || target_net_l <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "target volume",
            reason: format!("must be a positive number of liters, got {target_net_l}"),
        });
    }
    if sub_count == 0 {
        return Err(BoxtuneError::InvalidInput {
            field: "sub count",
            reason: "at least one driver is required".to_string(),
        });
    }
    if !displacement_l.is_finite() || displacement_l < 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "displacement",
            reason: format!("must be zero or positive, got {displacement_l}"),
        });
    }

    let internal_l = target_net_l + f64::from(sub_count) * displacement_l;
    let internal_in3 = liters_to_cubic_inches(internal_l);
    let base = (internal_in3 / (BOX_RATIO_WIDTH * BOX_RATIO_HEIGHT * BOX_RATIO_DEPTH)).cbrt();

    let wall = 2.0 * thickness.inches();
    let width = round_tenth(BOX_RATIO_WIDTH * base + wall);
    let height = round_tenth(BOX_RATIO_HEIGHT * base + wall);
    let depth = round_tenth(BOX_RATIO_DEPTH * base + wall);

    if !(width.is_finite() && height.is_finite() && depth.is_finite()) {
        return Err(BoxtuneError::NotComputable {
            quantity: "box dimensions",
            reason: format!("no finite box realizes {target_net_l} L"),
        });
    }

    debug!(
        "synthesized {width:.1} x {height:.1} x {depth:.1} in for {target_net_l:.1} L net ({sub_count} driver(s))"
    );

    BoxDimensions::new(width, height, depth)
}

/// Synthesize port dimensions that tune a given air space to a target Fb.
///
/// Port area follows the 17 in² per ft³ rule of thumb, the slot aspect is
/// fixed at 4:1 (height:width) for airflow, and the length comes from
/// inverting the Helmholtz equation and removing the end correction.
///
/// # Errors
/// * `InvalidInput` for a non-positive target frequency or air space
/// * `NotComputable` when the target sits so high that the end correction
///   alone already exceeds the required effective length
pub fn synthesize_port(target_fb_hz: f64, air_space_l: f64) -> Result<PortDimensions> {
    if !target_fb_hz.is_finite() || target_fb_hz <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "target fb",
            reason: format!("must be a positive frequency in Hz, got {target_fb_hz}"),
        });
    }
    if !air_space_l.is_finite() || air_space_l <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "air space",
            reason: format!("must be a positive number of liters, got {air_space_l}"),
        });
    }

    let area_in2 = PORT_AREA_PER_CUBIC_FOOT * liters_to_cubic_feet(air_space_l);
    let area_cm2 = square_inches_to_square_cm(area_in2);

    // Invert Fb = (c/2π)·√(Av/(Vb·1000·Leff)) for Leff, then strip the end
    // correction to get the physical length
    let c_cm = SPEED_OF_SOUND * 100.0;
    let k = c_cm / (2.0 * PI * target_fb_hz);
    let effective_length_cm = k * k * area_cm2 / (air_space_l * 1000.0);
    let length_cm = effective_length_cm - PORT_END_CORRECTION * area_cm2.sqrt();

    if length_cm <= 0.0 || !length_cm.is_finite() {
        return Err(BoxtuneError::NotComputable {
            quantity: "port length",
            reason: format!(
                "{target_fb_hz:.1} Hz needs an effective length of {effective_length_cm:.1} cm, \
                 shorter than the end correction of this port area; lower the target or use a \
                 smaller port"
            ),
        });
    }

    let width = round_tenth((area_in2 / PORT_ASPECT_RATIO).sqrt());
    let height = round_tenth(PORT_ASPECT_RATIO * width);
    let length = round_tenth(cm_to_inches(length_cm));

    debug!(
        "synthesized {width:.1} x {height:.1} in port, {length:.1} in long, for {target_fb_hz:.1} Hz in {air_space_l:.1} L"
    );

    PortDimensions::new(width, height, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::enclosure_volumes;
    use crate::model::SubwooferSpecs;
    use crate::ported;

    #[test]
    fn test_round_trip_within_one_percent() {
        let target = 55.0;
        let displacement = 2.2;
        let dims =
            synthesize_dimensions(target, MaterialThickness::ThreeQuarters, 1, displacement)
                .unwrap();
        let vols = enclosure_volumes(&dims, MaterialThickness::ThreeQuarters).unwrap();
        let air_space = vols.net_volume - displacement;
        assert!(
            (air_space - target).abs() / target < 0.01,
            "round trip drifted: {air_space} vs {target}"
        );
    }

    #[test]
    fn test_proportions_follow_ratio_table() {
        let dims = synthesize_dimensions(60.0, MaterialThickness::Half, 1, 0.0).unwrap();
        let wall = 2.0 * MaterialThickness::Half.inches();
        let wi = dims.width - wall;
        let hi = dims.height - wall;
        let di = dims.depth - wall;
        assert!((wi / hi - BOX_RATIO_WIDTH).abs() < 0.02);
        assert!((di / hi - BOX_RATIO_DEPTH).abs() < 0.02);
    }

    #[test]
    fn test_dimensions_rounded_to_tenth() {
        let dims = synthesize_dimensions(42.0, MaterialThickness::One, 2, 1.5).unwrap();
        for d in [dims.width, dims.height, dims.depth] {
            assert!(((d * 10.0).round() - d * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_port_aspect_is_four_to_one() {
        let port = synthesize_port(33.0, 60.0).unwrap();
        assert!((port.height / port.width - PORT_ASPECT_RATIO).abs() < 0.1);
    }

    #[test]
    fn test_synthesized_port_hits_target_tuning() {
        let target = 35.0;
        let air_space = 55.0;
        let port = synthesize_port(target, air_space).unwrap();
        let specs = SubwooferSpecs {
            fs: 32.0,
            qts: 0.45,
            vas: 60.0,
            sd: 800.0,
            xmax: 15.0,
            displacement: 0.2,
        };
        let alignment = ported::ported_alignment(air_space, &port, &specs).unwrap();
        // 0.1 in rounding on three dimensions costs a little accuracy
        assert!(
            (alignment.fb - target).abs() / target < 0.03,
            "fb {} vs target {target}",
            alignment.fb
        );
    }

    #[test]
    fn test_unreachable_tuning_is_not_computable() {
        let err = synthesize_port(500.0, 60.0).unwrap_err();
        assert!(matches!(err, BoxtuneError::NotComputable { .. }));
    }

    #[test]
    fn test_invalid_targets_rejected() {
        assert!(synthesize_dimensions(0.0, MaterialThickness::Half, 1, 0.0).is_err());
        assert!(synthesize_dimensions(50.0, MaterialThickness::Half, 0, 0.0).is_err());
        assert!(synthesize_port(0.0, 50.0).is_err());
        assert!(synthesize_port(35.0, 0.0).is_err());
    }
}
