//! Binary edge maps via two-threshold hysteresis edge detection.
//!
//! Matching on edges rather than raw intensities isolates the silhouette of
//! the puzzle piece, which is the feature that lines up with the gap.

mod canny;

use crate::image::{ImageView, OwnedImage};
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideError, SlideResult};

/// Sample value marking an edge pixel.
pub const EDGE: u8 = 255;

/// Largest threshold accepted by [`EdgeThresholds`].
pub const MAX_THRESHOLD: f32 = 255.0;

/// Hysteresis thresholds applied to the L1 Sobel gradient magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeThresholds {
    /// Weak edges must exceed this value and connect to a strong edge.
    pub low: f32,
    /// Strong edges exceed this value.
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

impl EdgeThresholds {
    /// Creates validated thresholds.
    pub fn new(low: f32, high: f32) -> SlideResult<Self> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks `0 <= low < high <= 255`.
    pub fn validate(&self) -> SlideResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(SlideError::InvalidParameter {
                name: "thresholds",
                reason: "thresholds must be finite",
            });
        }
        if self.low < 0.0 {
            return Err(SlideError::InvalidParameter {
                name: "low_threshold",
                reason: "must be non-negative",
            });
        }
        if self.high > MAX_THRESHOLD {
            return Err(SlideError::InvalidParameter {
                name: "high_threshold",
                reason: "must not exceed 255",
            });
        }
        if self.low >= self.high {
            return Err(SlideError::InvalidParameter {
                name: "low_threshold",
                reason: "must be below high_threshold",
            });
        }
        Ok(())
    }
}

/// Binary edge map with samples in `{0, 255}`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap {
    img: OwnedImage,
}

impl EdgeMap {
    /// Returns a borrowed view of the edge samples.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.img.data().iter().filter(|&&v| v == EDGE).count()
    }

    /// Returns `true` when `(x, y)` is an edge pixel.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.view().get(x, y).is_some_and(|&v| v == EDGE)
    }
}

/// Extracts a binary edge map from a grayscale image.
///
/// Uses 3x3 Sobel gradients with replicated borders, non-maximum suppression
/// along the quantized gradient direction, and hysteresis: pixels above
/// `high` are edges, pixels above `low` are edges only when 8-connected to one.
pub fn extract_edges(image: ImageView<'_, u8>, thresholds: EdgeThresholds) -> SlideResult<EdgeMap> {
    thresholds.validate()?;
    let _span = trace_span!(
        "extract_edges",
        width = image.width(),
        height = image.height()
    )
    .entered();

    let gradients = canny::sobel(image);
    let data = canny::hysteresis(&gradients, thresholds.low, thresholds.high);
    let img = OwnedImage::new(data, image.width(), image.height())?;
    let edges = EdgeMap { img };

    trace_event!("edges", count = edges.edge_count());
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::{extract_edges, EdgeThresholds};
    use crate::{ImageView, SlideError};

    #[test]
    fn thresholds_reject_bad_ordering() {
        let err = EdgeThresholds::new(150.0, 50.0).unwrap_err();
        assert!(matches!(err, SlideError::InvalidParameter { .. }));
        assert!(EdgeThresholds::new(100.0, 100.0).is_err());
        assert!(EdgeThresholds::new(-1.0, 100.0).is_err());
        assert!(EdgeThresholds::new(10.0, 300.0).is_err());
        assert!(EdgeThresholds::new(f32::NAN, 100.0).is_err());
        assert!(EdgeThresholds::new(0.0, 255.0).is_ok());
    }

    #[test]
    fn flat_image_has_no_edges() {
        let data = [128u8; 64];
        let view = ImageView::from_slice(&data, 8, 8).unwrap();
        let edges = extract_edges(view, EdgeThresholds::default()).unwrap();
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn vertical_step_yields_single_column() {
        let width = 12;
        let height = 8;
        let mut data = vec![0u8; width * height];
        for y in 0..height {
            for x in 5..width {
                data[y * width + x] = 255;
            }
        }
        let view = ImageView::from_slice(&data, width, height).unwrap();
        let edges = extract_edges(view, EdgeThresholds::default()).unwrap();
        assert_eq!((edges.width(), edges.height()), (width, height));
        assert_eq!(edges.edge_count(), height);

        for y in 0..height {
            for x in 0..width {
                assert_eq!(edges.is_edge(x, y), x == 4, "unexpected edge state at ({x}, {y})");
            }
        }
    }
}
