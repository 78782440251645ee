//! Error taxonomy for invalid inputs accepted at a constructor boundary.
//!
//! The vertex pipeline does not use these for catastrophic invariant
//! violations such as out-of-order cells after a sort — those remain
//! programming faults that may abort. These cover inputs that a caller can
//! reasonably get wrong and that are either normalized or rejected before
//! they reach the rasterizer.

use std::fmt;

/// Errors surfaced by constructors that validate caller-supplied geometry
/// before it is consumed by the vertex pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A path carried a non-finite (`NaN`/`Inf`) coordinate, or an
    /// `end_poly` command appeared without a preceding `move_to`. The
    /// offending subpath is dropped and the source resets to a clean state.
    InvalidGeometry,
    /// A dash pattern had a non-positive dash or gap length.
    InvalidDashPattern,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidGeometry => write!(
                f,
                "path contains a non-finite coordinate or an end_poly without a preceding move_to"
            ),
            PathError::InvalidDashPattern => {
                write!(f, "dash pattern has a non-positive dash or gap length")
            }
        }
    }
}

impl std::error::Error for PathError {}
