//! Error types for the boxtune crate.
//!
//! This module provides a unified error type for all enclosure and wiring
//! calculations. Design warnings are not errors: out-of-range but computable
//! results are returned together with their warnings, and nothing here is
//! fatal; every failure is recoverable by the caller adjusting inputs.

use thiserror::Error;

/// Error type for boxtune operations.
#[derive(Debug, Error)]
pub enum BoxtuneError {
    /// An input field is missing or outside its admissible range.
    ///
    /// Raised before any computation runs, so no formula ever sees a zero
    /// divisor or a negative dimension.
    #[error("invalid input '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field (e.g., "width", "vas").
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A quantity has no defined value for the given inputs.
    ///
    /// This is a tagged absence, distinct from zero: callers should render
    /// it as "—", never as NaN or infinity.
    #[error("'{quantity}' is not computable: {reason}")]
    NotComputable {
        /// Name of the quantity that could not be derived.
        quantity: &'static str,
        /// Why the value is undefined here.
        reason: String,
    },
}

/// Result type alias for boxtune operations.
pub type Result<T> = std::result::Result<T, BoxtuneError>;
