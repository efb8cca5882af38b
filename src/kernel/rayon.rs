//! Row-parallel scan driver (feature-gated).
//!
//! Surface rows are independent, so each rayon task fills one output row in
//! place. Every cell is computed exactly as in the sequential driver, so the
//! resulting surfaces are bit-identical.

use crate::image::integral::IntegralImage;
use crate::kernel::{scan_row, Kernel};
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan; returns the row-major surface samples.
///
/// The template must fit inside the image.
pub(crate) fn scan_surface_par<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
) -> Vec<f32> {
    let surface_width = image.width() - plan.width() + 1;
    let surface_height = image.height() - plan.height() + 1;
    let mut data = vec![0.0f32; surface_width * surface_height];
    data.par_chunks_mut(surface_width)
        .enumerate()
        .for_each(|(y, row)| scan_row::<K>(image, integral, plan, metric, y, row));
    data
}
