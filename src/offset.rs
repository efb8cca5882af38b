//! Offset resolution and the end-to-end matching pipeline.
//!
//! The pipeline runs decode → min-max normalize → edge extraction →
//! correlation → location → coordinate mapping. Every stage is a pure
//! function of its inputs; `OffsetSolver` only carries configuration.

use crate::edge::{extract_edges, EdgeThresholds};
use crate::image::io::decode_gray;
use crate::image::normalize::normalize_min_max;
use crate::observer::MatchObserver;
use crate::search::{correlate, ensure_fits, locate_best, MatchResult, Metric};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideError, SlideResult};
use crate::ImageView;

/// Maps background pixel coordinates to the caller's coordinate space.
///
/// `reported = round(x * scale + crop_origin_x)`. Use it when the matched
/// image was resized (device pixel ratio) or cropped before matching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapping {
    /// Multiplier from background pixels to target units; must be `> 0`.
    pub scale: f64,
    /// Target-space x of the background's left edge.
    pub crop_origin_x: usize,
}

impl Default for CoordinateMapping {
    fn default() -> Self {
        Self {
            scale: 1.0,
            crop_origin_x: 0,
        }
    }
}

impl CoordinateMapping {
    /// Creates a validated mapping.
    pub fn new(scale: f64, crop_origin_x: usize) -> SlideResult<Self> {
        let mapping = Self {
            scale,
            crop_origin_x,
        };
        mapping.validate()?;
        Ok(mapping)
    }

    /// Checks that `scale` is finite and positive.
    pub fn validate(&self) -> SlideResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SlideError::InvalidParameter {
                name: "scale",
                reason: "must be finite and greater than zero",
            });
        }
        Ok(())
    }

    /// Maps a background x coordinate to the target space.
    pub fn apply(&self, x: usize) -> usize {
        let mapped = x as f64 * self.scale + self.crop_origin_x as f64;
        mapped.round() as usize
    }
}

/// Returns the horizontal offset for `best` under `mapping`.
pub fn resolve_offset(best: &MatchResult, mapping: &CoordinateMapping) -> usize {
    mapping.apply(best.x)
}

/// Configuration for offset computation.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetConfig {
    /// Edge detection thresholds applied to both images.
    pub thresholds: EdgeThresholds,
    /// Metric used for the score surface.
    pub metric: Metric,
    /// Coordinate correction applied to the matched x.
    pub mapping: CoordinateMapping,
    /// Score surface rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            thresholds: EdgeThresholds::default(),
            metric: Metric::CoeffNormed,
            mapping: CoordinateMapping::default(),
            parallel: false,
        }
    }
}

impl OffsetConfig {
    /// Validates thresholds and coordinate mapping.
    pub fn validate(&self) -> SlideResult<()> {
        self.thresholds.validate()?;
        self.mapping.validate()
    }
}

/// Offset together with the match it was derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetReport {
    /// Horizontal displacement in the caller's coordinate space.
    pub offset: usize,
    /// Best placement in background pixel coordinates.
    pub best: MatchResult,
}

/// Locates a puzzle piece in a background and reports the slider offset.
#[derive(Clone, Debug, Default)]
pub struct OffsetSolver {
    cfg: OffsetConfig,
}

impl OffsetSolver {
    /// Creates a solver with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the solver configuration.
    pub fn with_config(mut self, cfg: OffsetConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Decodes both images and computes the offset.
    pub fn solve_bytes(&self, background: &[u8], piece: &[u8]) -> SlideResult<OffsetReport> {
        self.run_bytes(background, piece, None)
    }

    /// Like [`solve_bytes`](Self::solve_bytes), reporting the surface to `observer`.
    pub fn solve_bytes_observed(
        &self,
        background: &[u8],
        piece: &[u8],
        observer: &mut dyn MatchObserver,
    ) -> SlideResult<OffsetReport> {
        self.run_bytes(background, piece, Some(observer))
    }

    /// Computes the offset from already-decoded grayscale images.
    pub fn solve_images(
        &self,
        background: ImageView<'_, u8>,
        piece: ImageView<'_, u8>,
    ) -> SlideResult<OffsetReport> {
        self.cfg.validate()?;
        self.run_images(background, piece, None)
    }

    /// Like [`solve_images`](Self::solve_images), reporting the surface to `observer`.
    pub fn solve_images_observed(
        &self,
        background: ImageView<'_, u8>,
        piece: ImageView<'_, u8>,
        observer: &mut dyn MatchObserver,
    ) -> SlideResult<OffsetReport> {
        self.cfg.validate()?;
        self.run_images(background, piece, Some(observer))
    }

    fn run_bytes(
        &self,
        background: &[u8],
        piece: &[u8],
        observer: Option<&mut dyn MatchObserver>,
    ) -> SlideResult<OffsetReport> {
        // Parameters are checked before any decoding work.
        self.cfg.validate()?;
        let (background, piece) = {
            let _span = trace_span!("decode").entered();
            let background = decode_gray(background)?;
            let piece = decode_gray(piece)?;
            trace_event!(
                "decoded",
                background_width = background.width(),
                background_height = background.height(),
                piece_width = piece.width(),
                piece_height = piece.height()
            );
            (background, piece)
        };
        self.run_images(background.view(), piece.view(), observer)
    }

    fn run_images(
        &self,
        background: ImageView<'_, u8>,
        piece: ImageView<'_, u8>,
        observer: Option<&mut dyn MatchObserver>,
    ) -> SlideResult<OffsetReport> {
        ensure_fits(
            background.width(),
            background.height(),
            piece.width(),
            piece.height(),
        )?;
        let _span = trace_span!("compute_offset", metric = self.cfg.metric.name()).entered();

        let background = normalize_min_max(background)?;
        let piece = normalize_min_max(piece)?;

        let background_edges = extract_edges(background.view(), self.cfg.thresholds)?;
        let template = Template::new(extract_edges(piece.view(), self.cfg.thresholds)?)?;

        let surface = correlate(
            &background_edges,
            &template,
            self.cfg.metric,
            self.cfg.parallel,
        )?;
        let best = locate_best(&surface)?;
        if let Some(observer) = observer {
            observer.on_match(&surface, &best);
        }

        let offset = resolve_offset(&best, &self.cfg.mapping);
        trace_event!(
            "offset",
            x = best.x,
            y = best.y,
            score = best.score,
            offset = offset
        );
        Ok(OffsetReport { offset, best })
    }
}

/// Computes the slider offset for an encoded background and piece.
///
/// This is the crate's single-call entry point; see [`OffsetSolver`] for
/// access to the match itself and for observers.
pub fn compute_offset(
    background_bytes: &[u8],
    template_bytes: &[u8],
    cfg: &OffsetConfig,
) -> SlideResult<usize> {
    let solver = OffsetSolver::new().with_config(cfg.clone());
    Ok(solver.solve_bytes(background_bytes, template_bytes)?.offset)
}

#[cfg(test)]
mod tests {
    use super::{resolve_offset, CoordinateMapping, OffsetConfig};
    use crate::edge::EdgeThresholds;
    use crate::search::MatchResult;
    use crate::SlideError;

    fn match_at(x: usize) -> MatchResult {
        MatchResult {
            x,
            y: 3,
            score: 1.0,
            template_width: 10,
            template_height: 10,
        }
    }

    #[test]
    fn identity_mapping_reports_x() {
        let mapping = CoordinateMapping::default();
        assert_eq!(resolve_offset(&match_at(57), &mapping), 57);
    }

    #[test]
    fn mapping_scales_then_shifts() {
        let mapping = CoordinateMapping::new(0.5, 10).unwrap();
        assert_eq!(resolve_offset(&match_at(40), &mapping), 30);
        let mapping = CoordinateMapping::new(1.25, 0).unwrap();
        assert_eq!(resolve_offset(&match_at(3), &mapping), 4);
    }

    #[test]
    fn mapping_rejects_non_positive_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CoordinateMapping::new(scale, 0).unwrap_err();
            assert!(matches!(err, SlideError::InvalidParameter { name: "scale", .. }));
        }
    }

    #[test]
    fn config_validation_checks_thresholds_first() {
        let cfg = OffsetConfig {
            thresholds: EdgeThresholds {
                low: 150.0,
                high: 50.0,
            },
            mapping: CoordinateMapping {
                scale: 0.0,
                crop_origin_x: 0,
            },
            ..OffsetConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, SlideError::InvalidParameter { name: "low_threshold", .. }));
    }
}
