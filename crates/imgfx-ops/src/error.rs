//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Kernel parameters can't produce a convolution kernel.
    ///
    /// Radius must be non-negative and sigma finite and positive.
    #[error("invalid kernel: radius {radius}, sigma {sigma}")]
    InvalidKernel {
        /// Requested radius
        radius: i32,
        /// Requested sigma
        sigma: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer addressing failed.
    #[error(transparent)]
    Core(#[from] imgfx_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
