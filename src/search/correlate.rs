//! Dense correlation of a template over a background.

use crate::edge::EdgeMap;
use crate::image::integral::IntegralImage;
use crate::kernel::{score_cell, scan_surface, Kernel};
use crate::search::{Metric, ScoreSurface};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideError, SlideResult};
use crate::ImageView;

#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_surface_par;

// Use the SIMD cross-product kernel when available.
#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ScalarKernel as ActiveKernel;
#[cfg(feature = "simd")]
use crate::kernel::simd::SimdKernel as ActiveKernel;

/// Fails with `InvalidDimensions` unless a `tpl_width x tpl_height` template
/// fits inside an `img_width x img_height` image.
pub fn ensure_fits(
    img_width: usize,
    img_height: usize,
    tpl_width: usize,
    tpl_height: usize,
) -> SlideResult<()> {
    if img_width == 0 || img_height == 0 {
        return Err(SlideError::InvalidDimensions {
            width: img_width,
            height: img_height,
            context: "background",
        });
    }
    if tpl_width == 0 || tpl_height == 0 {
        return Err(SlideError::InvalidDimensions {
            width: tpl_width,
            height: tpl_height,
            context: "template",
        });
    }
    if tpl_width > img_width || tpl_height > img_height {
        return Err(SlideError::InvalidDimensions {
            width: tpl_width,
            height: tpl_height,
            context: "template larger than background",
        });
    }
    Ok(())
}

/// Correlates an edge-extracted template with an edge-extracted background.
///
/// Returns a surface of `(W - w + 1) x (H - h + 1)` scores. With the `rayon`
/// feature enabled and `parallel` set, rows are scored in parallel; the
/// result is identical to the sequential scan.
pub fn correlate(
    background: &EdgeMap,
    template: &Template,
    metric: Metric,
    parallel: bool,
) -> SlideResult<ScoreSurface> {
    correlate_view(background.view(), template.plan(), metric, parallel)
}

/// Correlates a template plan with an arbitrary grayscale view.
pub fn correlate_view(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    parallel: bool,
) -> SlideResult<ScoreSurface> {
    ensure_fits(image.width(), image.height(), plan.width(), plan.height())?;
    let _span = trace_span!(
        "correlate",
        metric = metric.name(),
        parallel = parallel,
        width = image.width(),
        height = image.height()
    )
    .entered();

    let integral = IntegralImage::new(image);
    let data = run_scan(image, &integral, plan, metric, parallel);
    let surface = build_surface(data, image, plan, metric)?;

    trace_event!("surface", cells = surface.len());
    Ok(surface)
}

/// Correlates with an explicit kernel using the sequential driver.
pub fn correlate_with<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
) -> SlideResult<ScoreSurface> {
    ensure_fits(image.width(), image.height(), plan.width(), plan.height())?;
    let integral = IntegralImage::new(image);
    let data = scan_surface::<K>(image, &integral, plan, metric);
    build_surface(data, image, plan, metric)
}

/// Scores a single placement of the template's top-left corner.
pub fn score_at(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    x: usize,
    y: usize,
) -> SlideResult<f32> {
    ensure_fits(image.width(), image.height(), plan.width(), plan.height())?;
    let max_x = image.width() - plan.width();
    let max_y = image.height() - plan.height();
    if x > max_x || y > max_y {
        return Err(SlideError::InvalidDimensions {
            width: x,
            height: y,
            context: "placement",
        });
    }
    let window = image.roi(x, y, plan.width(), plan.height())?;
    let integral = IntegralImage::new(window);
    Ok(score_cell::<ActiveKernel>(
        window, &integral, plan, metric, 0, 0,
    ))
}

fn build_surface(
    data: Vec<f32>,
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
) -> SlideResult<ScoreSurface> {
    ScoreSurface::from_vec(
        data,
        image.width() - plan.width() + 1,
        image.height() - plan.height() + 1,
        metric,
        (plan.width(), plan.height()),
    )
}

#[cfg(feature = "rayon")]
fn run_scan(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
    parallel: bool,
) -> Vec<f32> {
    if parallel {
        scan_surface_par::<ActiveKernel>(image, integral, plan, metric)
    } else {
        scan_surface::<ActiveKernel>(image, integral, plan, metric)
    }
}

#[cfg(not(feature = "rayon"))]
fn run_scan(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
    _parallel: bool,
) -> Vec<f32> {
    scan_surface::<ActiveKernel>(image, integral, plan, metric)
}
