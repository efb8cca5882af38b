//! Error types for slidematch.

use thiserror::Error;

/// Result alias for slidematch operations.
pub type SlideResult<T> = std::result::Result<T, SlideError>;

/// Errors that can occur while computing a slider offset.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SlideError {
    /// The input bytes are not a decodable raster image.
    #[error("failed to decode image: {reason}")]
    Decode { reason: String },
    /// A zero dimension, or a template that does not fit the background.
    #[error("invalid {context} dimensions: {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        context: &'static str,
    },
    /// A threshold or coordinate mapping parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// The score surface has no cells.
    ///
    /// Only reachable when dimensions were not validated first.
    #[error("score surface is empty")]
    EmptySurface,
    /// The backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
}
