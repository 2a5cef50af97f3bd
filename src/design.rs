//! Top-level design pipeline.
//!
//! These functions are the crate's main entry points: they resolve the
//! optional-field input layer, run the geometry and alignment math for the
//! selected topology, collect warnings and assemble a [`CalculationResult`].
//! Every call is pure and independent, so callers may run any number of them
//! concurrently without coordination.

use log::debug;

use crate::bandpass::bandpass_alignment;
use crate::dimensions::{EnclosureVolumes, enclosure_volumes};
use crate::error::{BoxtuneError, Result};
use crate::model::{
    BandpassChambers, BandpassChambersInput, BoxDimensions, BoxDimensionsInput, BoxType,
    CalculationResult, DriverInput, MaterialThickness, PortDimensions, PortDimensionsInput,
    SubwooferSpecs,
};
use crate::ported::ported_alignment;
use crate::sealed::sealed_alignment;
use crate::validation;

/// Resolve inputs shared by every topology.
fn resolve_common(
    dims: &BoxDimensionsInput,
    thickness: MaterialThickness,
    sub_count: u32,
    driver: &DriverInput,
) -> Result<(EnclosureVolumes, SubwooferSpecs)> {
    if sub_count == 0 {
        return Err(BoxtuneError::InvalidInput {
            field: "sub count",
            reason: "at least one driver is required".to_string(),
        });
    }
    let dims = BoxDimensions::try_from(dims)?;
    let specs = SubwooferSpecs::try_from(driver)?;
    let volumes = enclosure_volumes(&dims, thickness)?;
    Ok((volumes, specs))
}

/// Net air space once the drivers and any port displacement are subtracted.
fn air_space(
    volumes: &EnclosureVolumes,
    specs: &SubwooferSpecs,
    sub_count: u32,
    port_volume_l: f64,
) -> Result<f64> {
    let displaced = f64::from(sub_count) * specs.displacement + port_volume_l;
    let air = volumes.net_volume - displaced;
    if air <= 0.0 {
        return Err(BoxtuneError::InvalidInput {
            field: "displacement",
            reason: format!(
                "drivers and port displace {displaced:.1} L but the box only holds {:.1} L",
                volumes.net_volume
            ),
        });
    }
    Ok(air)
}

/// Design a sealed enclosure.
pub fn compute_sealed(
    dims: &BoxDimensionsInput,
    thickness: MaterialThickness,
    sub_count: u32,
    driver: &DriverInput,
) -> Result<CalculationResult> {
    let (volumes, specs) = resolve_common(dims, thickness, sub_count, driver)?;
    let air = air_space(&volumes, &specs, sub_count, 0.0)?;
    let alignment = sealed_alignment(air, &specs)?;

    let mut warnings = validation::sealed_warnings(&alignment);
    warnings.extend(validation::global_warnings(air));

    debug!("sealed design: {air:.1} L air space, qtc {:.3}", alignment.qtc);

    Ok(CalculationResult {
        gross_volume: volumes.gross_volume,
        net_volume: volumes.net_volume,
        material_volume: volumes.material_volume,
        air_space: air,
        qtc: Some(alignment.qtc),
        f3: alignment.f3,
        fb: None,
        port_length: None,
        port_area: None,
        port_velocity: None,
        board_feet: volumes.board_feet,
        surface_area: volumes.surface_area,
        warnings,
    })
}

/// Design a ported enclosure.
pub fn compute_ported(
    dims: &BoxDimensionsInput,
    thickness: MaterialThickness,
    sub_count: u32,
    port: &PortDimensionsInput,
    driver: &DriverInput,
) -> Result<CalculationResult> {
    let (volumes, specs) = resolve_common(dims, thickness, sub_count, driver)?;
    let port = PortDimensions::try_from(port)?;
    let air = air_space(&volumes, &specs, sub_count, port.volume_liters())?;
    let alignment = ported_alignment(air, &port, &specs)?;

    let mut warnings = validation::ported_warnings(&alignment, &port, &volumes.internal, &specs);
    warnings.extend(validation::global_warnings(air));

    debug!("ported design: {air:.1} L air space, fb {:.1} Hz", alignment.fb);

    Ok(CalculationResult {
        gross_volume: volumes.gross_volume,
        net_volume: volumes.net_volume,
        material_volume: volumes.material_volume,
        air_space: air,
        qtc: None,
        f3: None,
        fb: Some(alignment.fb),
        port_length: Some(port.length),
        port_area: Some(port.area_square_inches()),
        port_velocity: Some(alignment.port_velocity),
        board_feet: volumes.board_feet,
        surface_area: volumes.surface_area,
        warnings,
    })
}

/// Design a bandpass enclosure of the given order.
///
/// # Errors
/// Returns `InvalidInput` when `order` is not one of the bandpass types.
pub fn compute_bandpass(
    order: BoxType,
    dims: &BoxDimensionsInput,
    thickness: MaterialThickness,
    sub_count: u32,
    port: &PortDimensionsInput,
    chambers: &BandpassChambersInput,
    driver: &DriverInput,
) -> Result<CalculationResult> {
    if !order.is_bandpass() {
        return Err(BoxtuneError::InvalidInput {
            field: "box type",
            reason: format!("'{order}' is not a bandpass order"),
        });
    }

    let (volumes, specs) = resolve_common(dims, thickness, sub_count, driver)?;
    let port = PortDimensions::try_from(port)?;
    let chambers = BandpassChambers::from_input(order, chambers)?;
    let alignment = bandpass_alignment(order, &chambers, &port, &specs)?;

    let port_volume = f64::from(alignment.ported_chambers) * port.volume_liters();
    let air = air_space(&volumes, &specs, sub_count, port_volume)?;

    let mut warnings = validation::bandpass_warnings(&alignment, &chambers, volumes.net_volume);
    warnings.extend(validation::port_velocity_warning(alignment.port_velocity));
    warnings.extend(validation::port_fit_warnings(&port, &volumes.internal));
    warnings.extend(validation::global_warnings(air));

    debug!(
        "{order} design: {air:.1} L air space, system tuning {:.1} Hz",
        alignment.system_tuning
    );

    Ok(CalculationResult {
        gross_volume: volumes.gross_volume,
        net_volume: volumes.net_volume,
        material_volume: volumes.material_volume,
        air_space: air,
        qtc: alignment.sealed.map(|s| s.qtc),
        f3: alignment.f3,
        fb: Some(alignment.system_tuning),
        port_length: Some(port.length),
        port_area: Some(port.area_square_inches()),
        port_velocity: Some(alignment.port_velocity),
        board_feet: volumes.board_feet,
        surface_area: volumes.surface_area,
        warnings,
    })
}
