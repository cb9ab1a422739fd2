use thiserror::Error;

/// Errors raised by geometry that cannot be evaluated.
///
/// These are deterministic: retrying the same computation reproduces them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("cannot normalize zero-length {context}")]
    ZeroLength { context: &'static str },

    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("focal length must be positive, got {0}")]
    NonPositiveFocalLength(f64),

    #[error("viewport must be non-empty, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
