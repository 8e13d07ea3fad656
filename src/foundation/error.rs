/// Convenience result type used across pixmill.
pub type PixmillResult<T> = Result<T, PixmillError>;

/// Top-level error taxonomy used by canvas, raster and effect APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixmillError {
    /// Inconsistent width/height/stride or an undersized buffer at canvas creation.
    #[error("construction error: {0}")]
    Construction(String),

    /// A pixel access or rectangle fell outside the addressable extent.
    #[error("coordinates ({x}, {y}) are out of bounds for canvas size ({width}, {height})")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Width of the canvas that rejected the access.
        width: i32,
        /// Height of the canvas that rejected the access.
        height: i32,
    },

    /// Invalid parameters for a multi-pixel operation or effect configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmillError {
    /// Build a [`PixmillError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`PixmillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixmillError::OutOfBounds`] value.
    pub fn out_of_bounds(x: i64, y: i64, width: i32, height: i32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
