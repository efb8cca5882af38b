//! Debug rendering of score surfaces and matches.
//!
//! Nothing here runs as part of matching. Attach a [`SurfaceRecorder`] as an
//! observer, then render what it captured.

use crate::observer::MatchObserver;
use crate::search::{Extremum, MatchResult, ScoreSurface};
use crate::util::{SlideError, SlideResult};
use crate::ImageView;
use image::{GrayImage, Luma};

/// Observer that keeps a copy of the last surface and match.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRecorder {
    recorded: Option<(ScoreSurface, MatchResult)>,
}

impl SurfaceRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded surface, if any.
    pub fn surface(&self) -> Option<&ScoreSurface> {
        self.recorded.as_ref().map(|(surface, _)| surface)
    }

    /// Returns the recorded best match, if any.
    pub fn best(&self) -> Option<&MatchResult> {
        self.recorded.as_ref().map(|(_, best)| best)
    }

    /// Takes the recorded surface and match, leaving the recorder empty.
    pub fn take(&mut self) -> Option<(ScoreSurface, MatchResult)> {
        self.recorded.take()
    }
}

impl MatchObserver for SurfaceRecorder {
    fn on_match(&mut self, surface: &ScoreSurface, best: &MatchResult) {
        self.recorded = Some((surface.clone(), *best));
    }
}

/// Renders a surface as an 8-bit image where brighter means a better match.
pub fn render_surface(surface: &ScoreSurface) -> SlideResult<GrayImage> {
    if surface.is_empty() {
        return Err(SlideError::EmptySurface);
    }
    let (lo, hi) = surface.range().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let invert = surface.metric().extremum() == Extremum::Min;

    let width = surface.width() as u32;
    let height = surface.height() as u32;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let score = surface.get(x as usize, y as usize).unwrap_or(lo);
        let mut t = if span > 0.0 && score.is_finite() {
            (score - lo) / span
        } else {
            0.0
        };
        if invert {
            t = 1.0 - t;
        }
        Luma([(t * 255.0).round().clamp(0.0, 255.0) as u8])
    }))
}

/// Draws the outline of the matched template placement onto a copy of
/// `background`.
pub fn annotate_match(
    background: ImageView<'_, u8>,
    best: &MatchResult,
    value: u8,
) -> SlideResult<GrayImage> {
    let width = background.width();
    let height = background.height();
    let data = background.to_vec();
    let got = data.len();
    let mut out = GrayImage::from_raw(width as u32, height as u32, data).ok_or(
        SlideError::BufferTooSmall {
            needed: width * height,
            got,
        },
    )?;

    let x0 = best.x.min(width - 1);
    let y0 = best.y.min(height - 1);
    let x1 = (best.x + best.template_width)
        .min(width)
        .saturating_sub(1)
        .max(x0);
    let y1 = (best.y + best.template_height)
        .min(height)
        .saturating_sub(1)
        .max(y0);
    for x in x0..=x1 {
        out.put_pixel(x as u32, y0 as u32, Luma([value]));
        out.put_pixel(x as u32, y1 as u32, Luma([value]));
    }
    for y in y0..=y1 {
        out.put_pixel(x0 as u32, y as u32, Luma([value]));
        out.put_pixel(x1 as u32, y as u32, Luma([value]));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{annotate_match, render_surface, SurfaceRecorder};
    use crate::image::io::owned_from_gray_image;
    use crate::observer::MatchObserver;
    use crate::search::{locate_best, MatchResult, Metric, ScoreSurface};
    use crate::ImageView;

    #[test]
    fn render_surface_maps_best_to_white() {
        let surface =
            ScoreSurface::from_vec(vec![4.0, 2.0, 0.0, 8.0], 2, 2, Metric::SqDiff, (1, 1))
                .unwrap();
        let img = render_surface(&surface).unwrap();
        assert_eq!(img.get_pixel(0, 1).0[0], 255);
        assert_eq!(img.get_pixel(1, 1).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 191);
        assert_eq!(owned_from_gray_image(&img).unwrap().width(), 2);
    }

    #[test]
    fn annotate_match_draws_outline() {
        let data = vec![0u8; 8 * 6];
        let view = ImageView::from_slice(&data, 8, 6).unwrap();
        let best = MatchResult {
            x: 2,
            y: 1,
            score: 1.0,
            template_width: 3,
            template_height: 3,
        };
        let img = annotate_match(view, &best, 255).unwrap();
        assert_eq!(img.get_pixel(2, 1).0[0], 255);
        assert_eq!(img.get_pixel(4, 3).0[0], 255);
        assert_eq!(img.get_pixel(3, 2).0[0], 0);
        assert_eq!(img.get_pixel(5, 1).0[0], 0);
    }

    #[test]
    fn recorder_keeps_last_match() {
        let surface =
            ScoreSurface::from_vec(vec![0.1, 0.9], 2, 1, Metric::CoeffNormed, (2, 2)).unwrap();
        let best = locate_best(&surface).unwrap();
        let mut recorder = SurfaceRecorder::new();
        recorder.on_match(&surface, &best);
        assert_eq!(recorder.best().map(|b| b.x), Some(1));
        assert_eq!(recorder.surface(), Some(&surface));
        assert!(recorder.take().is_some());
        assert!(recorder.surface().is_none());
    }
}
