//! Top-K candidate tracking for score peaks.

use crate::search::Extremum;
use std::cmp::Ordering;

/// Peak candidate on a score surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the peak.
    pub x: usize,
    /// Y coordinate (row) of the peak.
    pub y: usize,
    /// Score at the peak location.
    pub score: f32,
}

/// Orders peaks best first, breaking ties in row-major order.
pub(crate) fn peak_cmp(a: &Peak, b: &Peak, extremum: Extremum) -> Ordering {
    extremum
        .cmp_best_first(a.score, b.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts peaks best first with deterministic tie-breaking.
pub(crate) fn sort_peaks(peaks: &mut [Peak], extremum: Extremum) {
    peaks.sort_by(|a, b| peak_cmp(a, b, extremum));
}

/// Top-K container with O(k) insertion cost.
pub struct TopK {
    k: usize,
    extremum: Extremum,
    items: Vec<Peak>,
}

impl TopK {
    /// Creates a new Top-K collector.
    pub fn new(k: usize, extremum: Extremum) -> Self {
        Self {
            k,
            extremum,
            items: Vec::with_capacity(k.min(1024)),
        }
    }

    /// Pushes a peak, evicting the worst one if at capacity.
    pub fn push(&mut self, peak: Peak) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(peak);
            return;
        }

        let extremum = self.extremum;
        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if peak_cmp(item, &self.items[worst_idx], extremum) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if peak_cmp(&peak, &self.items[worst_idx], extremum) == Ordering::Less {
            self.items[worst_idx] = peak;
        }
    }

    /// Returns peaks sorted best first.
    pub fn into_sorted(mut self) -> Vec<Peak> {
        sort_peaks(&mut self.items, self.extremum);
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::{Peak, TopK};
    use crate::search::Extremum;

    fn peak(x: usize, y: usize, score: f32) -> Peak {
        Peak { x, y, score }
    }

    #[test]
    fn keeps_lowest_scores_for_min_extremum() {
        let mut topk = TopK::new(2, Extremum::Min);
        for p in [peak(0, 0, 3.0), peak(1, 0, 1.0), peak(2, 0, 2.0), peak(3, 0, 5.0)] {
            topk.push(p);
        }
        let sorted = topk.into_sorted();
        assert_eq!(sorted, vec![peak(1, 0, 1.0), peak(2, 0, 2.0)]);
    }

    #[test]
    fn ties_prefer_row_major_order() {
        let mut topk = TopK::new(2, Extremum::Max);
        for p in [peak(7, 5, 1.0), peak(2, 5, 1.0), peak(9, 0, 0.5), peak(3, 6, 1.0)] {
            topk.push(p);
        }
        let sorted = topk.into_sorted();
        assert_eq!(sorted, vec![peak(2, 5, 1.0), peak(7, 5, 1.0)]);
    }
}
