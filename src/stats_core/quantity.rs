//! Quantity adapter capability consumed by the rolling statistics engine
//!
//! The engine never manipulates raw floats directly; it goes through this
//! trait so the same window algorithms work for any physical kind
//! (rainfall depth, temperature, wind speed, ...).

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityError {
    /// A quantity was constructed from a NaN or infinite magnitude
    InvalidMagnitude(f64),
}

impl std::fmt::Display for QuantityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityError::InvalidMagnitude(value) => {
                write!(f, "invalid quantity magnitude: {}", value)
            }
        }
    }
}

impl std::error::Error for QuantityError {}

/// Capability surface for a single physical-quantity kind
///
/// All magnitude arithmetic inside the engine happens in the kind's canonical
/// unit; values carried in other units of the same kind are converted on the
/// way in. Implementations are resolved at compile time (the kind is a type
/// parameter of the engine, not a runtime tag).
pub trait Quantity: Copy + PartialEq + PartialOrd {
    /// Unit tag for this kind (e.g. millimeters vs. inches)
    type Unit: Copy + PartialEq + std::fmt::Debug;

    /// The unit all internal accumulation is performed in
    fn canonical_unit() -> Self::Unit;

    /// Scalar magnitude of this value expressed in `unit`
    fn magnitude_in(&self, unit: Self::Unit) -> f64;

    /// Construct a value from a scalar magnitude expressed in `unit`
    ///
    /// Fails with `InvalidMagnitude` for NaN or infinite input.
    fn from_magnitude(magnitude: f64, unit: Self::Unit) -> Result<Self, QuantityError>;

    /// The zero value for this kind
    fn zero() -> Self;

    /// Difference `self - other`, as a value of the same kind
    fn subtract(&self, other: &Self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_magnitude_display() {
        let err = QuantityError::InvalidMagnitude(f64::NAN);
        assert!(err.to_string().contains("invalid quantity magnitude"));
    }
}
