//! Physical constants and unit conversions.
//!
//! Every empirical or physical constant used by the engine lives in this
//! table. The enclosure formulas mix the units car-audio installers actually
//! work in (inches for boxes, liters for volumes, cm² for cone and port
//! areas), so the conversion helpers below are used at every module seam.
//!
//! All constants are immutable; the engine holds no other shared state.

/// Liters per cubic inch.
pub const LITERS_PER_CUBIC_INCH: f64 = 0.0163871;

/// Speed of sound in air at 20 °C, m/s.
pub const SPEED_OF_SOUND: f64 = 343.0;

/// Helmholtz end correction for a port with one flanged and one free end,
/// as a multiplier on the square root of the port area (cm).
pub const PORT_END_CORRECTION: f64 = 0.613;

/// End correction for a port flanged on both ends (used for the rear duct
/// of a 6th-order bandpass, which fires into the second chamber).
pub const PORT_END_CORRECTION_FLANGED: f64 = 0.85;

/// Internal width : height : depth proportions used by the dimension
/// synthesizer. 1.618 is the golden ratio, 1.272 its square root; the
/// spread keeps opposing panels from sharing resonant modes. Empirical
/// cabinet-building practice, not derived acoustics.
pub const BOX_RATIO_WIDTH: f64 = 1.618;
pub const BOX_RATIO_HEIGHT: f64 = 1.0;
pub const BOX_RATIO_DEPTH: f64 = 1.272;

/// Empirical port area density: square inches of port per cubic foot of
/// net volume. A rule-of-thumb sizing figure from SPL box builders, not a
/// derived quantity.
pub const PORT_AREA_PER_CUBIC_FOOT: f64 = 17.0;

/// Height : width ratio for synthesized slot ports. Tall narrow slots keep
/// boundary-layer losses down at a given area.
pub const PORT_ASPECT_RATIO: f64 = 4.0;

/// Square centimeters per square inch.
pub const CM2_PER_IN2: f64 = 6.4516;

/// Centimeters per inch.
pub const CM_PER_IN: f64 = 2.54;

/// Cubic feet per liter.
pub const CUBIC_FEET_PER_LITER: f64 = 0.035_314_7;

/// Convert a volume in cubic inches to liters.
pub fn cubic_inches_to_liters(cubic_inches: f64) -> f64 {
    cubic_inches * LITERS_PER_CUBIC_INCH
}

/// Convert a volume in liters to cubic inches.
pub fn liters_to_cubic_inches(liters: f64) -> f64 {
    liters / LITERS_PER_CUBIC_INCH
}

/// Convert an area in square inches to square centimeters.
pub fn square_inches_to_square_cm(square_inches: f64) -> f64 {
    square_inches * CM2_PER_IN2
}

/// Convert a length in inches to centimeters.
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

/// Convert a length in centimeters to inches.
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_IN
}

/// Convert a volume in liters to cubic feet.
pub fn liters_to_cubic_feet(liters: f64) -> f64 {
    liters * CUBIC_FEET_PER_LITER
}
