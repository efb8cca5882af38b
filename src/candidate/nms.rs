//! Non-maximum suppression utilities for candidates.

use crate::candidate::topk::{sort_peaks, Peak};
use crate::search::Extremum;

/// Applies 2D non-maximum suppression using Chebyshev distance.
///
/// Peaks are sorted best first and kept if they are farther than `radius`
/// in Chebyshev distance from all previously kept peaks.
pub fn nms_2d(peaks: &mut [Peak], radius: usize, extremum: Extremum) -> Vec<Peak> {
    sort_peaks(peaks, extremum);
    if radius == 0 {
        return peaks.to_owned();
    }

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks.iter().copied() {
        for kept_peak in kept.iter() {
            let dx = peak.x.abs_diff(kept_peak.x);
            let dy = peak.y.abs_diff(kept_peak.y);
            if dx.max(dy) <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }

    kept
}
