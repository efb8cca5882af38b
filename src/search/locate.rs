//! Locating the best placement on a score surface.

use crate::candidate::nms::nms_2d;
use crate::candidate::topk::{Peak, TopK};
use crate::search::ScoreSurface;
use crate::util::{SlideError, SlideResult};
use std::cmp::Ordering;

/// Best-scoring template placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// X coordinate of the template's top-left corner in the background.
    pub x: usize,
    /// Y coordinate of the template's top-left corner in the background.
    pub y: usize,
    /// Score at the placement.
    pub score: f32,
    /// Width of the matched template.
    pub template_width: usize,
    /// Height of the matched template.
    pub template_height: usize,
}

/// Returns the extremal cell of `surface` according to its metric.
///
/// Scores are ordered as in [`top_candidates`]; ties resolve to the
/// row-major first occurrence (smallest `y`, then smallest `x`).
pub fn locate_best(surface: &ScoreSurface) -> SlideResult<MatchResult> {
    let extremum = surface.metric().extremum();
    let width = surface.width();
    let mut cells = surface.as_slice().iter().copied().enumerate();
    let (mut best_idx, mut best_score) = cells.next().ok_or(SlideError::EmptySurface)?;
    for (idx, score) in cells {
        if extremum.cmp_best_first(score, best_score) == Ordering::Less {
            best_idx = idx;
            best_score = score;
        }
    }

    let (template_width, template_height) = surface.template_size();
    Ok(MatchResult {
        x: best_idx % width,
        y: best_idx / width,
        score: best_score,
        template_width,
        template_height,
    })
}

/// Returns up to `k` peaks, best first, separated by more than `nms_radius`
/// in Chebyshev distance.
///
/// The first peak always coincides with [`locate_best`].
pub fn top_candidates(surface: &ScoreSurface, k: usize, nms_radius: usize) -> Vec<Peak> {
    if k == 0 || surface.is_empty() {
        return Vec::new();
    }
    // Each kept peak suppresses fewer than (2r + 1)^2 cells, so the first `k`
    // survivors lie within this many best cells.
    let side = nms_radius.saturating_mul(2).saturating_add(1);
    let capacity = k.saturating_mul(side.saturating_mul(side));

    let extremum = surface.metric().extremum();
    let width = surface.width();
    let mut topk = TopK::new(capacity, extremum);
    for (idx, &score) in surface.as_slice().iter().enumerate() {
        topk.push(Peak {
            x: idx % width,
            y: idx / width,
            score,
        });
    }

    let mut peaks = topk.into_sorted();
    let mut kept = nms_2d(&mut peaks, nms_radius, extremum);
    kept.truncate(k);
    kept
}
