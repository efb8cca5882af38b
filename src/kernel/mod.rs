//! Correlation kernel implementations.
//!
//! A kernel computes the cross term `Σt·i` for one template placement. Window
//! sums come from a summed-area table, so the kernel is the only part of the
//! score that costs `O(w·h)` per cell. Scan drivers combine both into a score
//! surface row by row.

use crate::image::integral::IntegralImage;
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::ImageView;

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Exact integer moments of one background window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSums {
    /// `Σt·i` over the window.
    pub cross: u64,
    /// `Σi` over the window.
    pub sum: u64,
    /// `Σi²` over the window.
    pub sum_sq: u64,
}

/// Kernel trait for evaluating the template cross term.
pub trait Kernel {
    /// Returns `Σt·i` with the template's top-left corner at `(x, y)`.
    ///
    /// The placement must be valid: `x + plan.width() <= image.width()` and
    /// `y + plan.height() <= image.height()`.
    fn cross_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> u64;
}

/// Returns template row `ty` as seen at placement `(x, y)` in `image`.
#[inline]
pub(crate) fn window_row<'a>(
    image: &ImageView<'a, u8>,
    x: usize,
    y: usize,
    ty: usize,
    width: usize,
) -> &'a [u8] {
    let start = (y + ty) * image.stride() + x;
    &image.as_slice()[start..start + width]
}

/// Scores a single valid placement.
#[inline]
pub(crate) fn score_cell<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
    x: usize,
    y: usize,
) -> f32 {
    let (sum, sum_sq) = integral.window_sums(x, y, plan.width(), plan.height());
    let window = WindowSums {
        cross: K::cross_at(image, plan, x, y),
        sum,
        sum_sq,
    };
    metric.score(plan, window)
}

/// Scores row `y` of the surface into `out` (length `surface_width`).
#[inline]
pub(crate) fn scan_row<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
    y: usize,
    out: &mut [f32],
) {
    for (x, cell) in out.iter_mut().enumerate() {
        *cell = score_cell::<K>(image, integral, plan, metric, x, y);
    }
}

/// Sequential full scan; returns the row-major surface samples.
///
/// The template must fit inside the image.
pub(crate) fn scan_surface<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
) -> Vec<f32> {
    let surface_width = image.width() - plan.width() + 1;
    let surface_height = image.height() - plan.height() + 1;
    let mut data = vec![0.0f32; surface_width * surface_height];
    for (y, row) in data.chunks_mut(surface_width).enumerate() {
        scan_row::<K>(image, integral, plan, metric, y, row);
    }
    data
}
