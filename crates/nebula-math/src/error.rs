//! Math error types.

/// Degenerate inputs rejected by the checked view builders.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Eye and look target coincide, so there is no forward direction.
    #[error("eye and center coincide; forward direction is undefined")]
    CoincidentEyeAndCenter,

    /// The up vector is parallel to the forward direction (or zero).
    #[error("up vector is parallel to the view direction")]
    ParallelUpVector,
}
