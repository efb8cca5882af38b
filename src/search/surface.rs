//! Score surfaces produced by sliding a template over a background.

use crate::search::Metric;
use crate::util::{SlideError, SlideResult};

/// Row-major grid of match scores, one per template placement.
///
/// Cell `(x, y)` holds the score of placing the template's top-left corner
/// at `(x, y)` in the background. Surfaces are never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    data: Vec<f32>,
    width: usize,
    height: usize,
    metric: Metric,
    template_width: usize,
    template_height: usize,
}

impl ScoreSurface {
    /// Wraps row-major scores of a `width x height` surface.
    ///
    /// Zero-sized surfaces are representable; locating a match on one fails
    /// with [`SlideError::EmptySurface`]. Every score must be finite.
    pub fn from_vec(
        data: Vec<f32>,
        width: usize,
        height: usize,
        metric: Metric,
        template_size: (usize, usize),
    ) -> SlideResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(SlideError::InvalidDimensions {
                width,
                height,
                context: "score surface",
            })?;
        if data.len() != needed {
            return Err(SlideError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(SlideError::InvalidParameter {
                name: "scores",
                reason: "scores must be finite",
            });
        }
        Ok(Self {
            data,
            width,
            height,
            metric,
            template_width: template_size.0,
            template_height: template_size.1,
        })
    }

    /// Returns the number of placements along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placements along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the metric the scores were computed with.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns the `(width, height)` of the template that produced the surface.
    pub fn template_size(&self) -> (usize, usize) {
        (self.template_width, self.template_height)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the surface has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the score at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns the row-major scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the `(min, max)` scores, or `None` when empty.
    pub fn range(&self) -> Option<(f32, f32)> {
        self.data.iter().copied().fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
