//! Template plan precomputation for correlation metrics.

use crate::image::ImageView;
use crate::util::{SlideError, SlideResult};

/// Contiguous template samples with their exact sums.
///
/// The sums are integers so every metric can be evaluated from exact
/// moments; see `Metric::score`.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    data: Vec<u8>,
    sum: u64,
    sum_sq: u64,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> SlideResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(SlideError::InvalidDimensions {
                width,
                height,
                context: "template",
            })?;

        let mut data = Vec::with_capacity(count);
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for row in tpl.rows() {
            for &value in row {
                let v = u64::from(value);
                sum += v;
                sum_sq += v * v;
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height,
            data,
            sum,
            sum_sq,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; plans are built from non-empty views.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns template row `ty`.
    #[inline]
    pub fn row(&self, ty: usize) -> &[u8] {
        let start = ty * self.width;
        &self.data[start..start + self.width]
    }

    /// Returns `Σt`.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Returns `Σt²`.
    pub fn sum_sq(&self) -> u64 {
        self.sum_sq
    }

    /// Returns the mean sample value.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.len() as f64
    }

    /// Returns the population variance of the samples.
    pub fn variance(&self) -> f64 {
        let n = self.len() as f64;
        let mean = self.mean();
        (self.sum_sq as f64 / n - mean * mean).max(0.0)
    }
}
