/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT
*/
use std::error;
use std::fmt;

/// Errors surfaced at the library's public boundary.
///
/// No operation returns a partial result: every entry point either completes
/// and writes its full output, or returns one of these variants untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Priority-Flood+Epsilon was invoked on a non-floating-point elevation
    /// grid. The construction is only defined for f32/f64 elevations.
    UnsupportedType,
    /// Negative dimensions, or a buffer whose length doesn't match `m * n`.
    DimensionError(String),
    /// A non-finite value was found somewhere it breaks an invariant (e.g.
    /// an elevation comparison that can't be ordered).
    NumericError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType => write!(
                f,
                "Priority-Flood+Epsilon is only defined for floating-point elevation grids"
            ),
            Error::DimensionError(msg) => write!(f, "invalid grid dimensions: {}", msg),
            Error::NumericError(msg) => write!(f, "numeric error: {}", msg),
        }
    }
}

impl error::Error for Error {}
