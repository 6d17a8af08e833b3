//! Errors raised at the transform boundary.

use thiserror::Error;

/// Rejected input to a transform operation.
///
/// The total operations (`rotate`, `move_to`, ...) log these and leave the
/// transform untouched; the `try_` variants hand them back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A rotation axis with (near) zero length.
    #[error("rotation axis has zero length")]
    DegenerateAxis,
    /// A look direction with (near) zero length, e.g. looking at one's own position.
    #[error("look direction has zero length")]
    DegenerateDirection,
    /// NaN or infinite input.
    #[error("non-finite {what}")]
    NonFinite { what: &'static str },
}
