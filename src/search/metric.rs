//! Matching metrics and their extremum conventions.

use crate::kernel::WindowSums;
use crate::template::TemplatePlan;
use std::cmp::Ordering;

/// Which end of the score range marks the best match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    /// Larger scores are better.
    Max,
    /// Smaller scores are better.
    Min,
}

impl Extremum {
    /// Orders scores best first.
    #[inline]
    pub fn cmp_best_first(self, a: f32, b: f32) -> Ordering {
        match self {
            Extremum::Max => b.total_cmp(&a),
            Extremum::Min => a.total_cmp(&b),
        }
    }
}

/// Matching metric used to build a score surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// Normalized correlation coefficient in `[-1, 1]`; higher is better.
    ///
    /// Both patches are mean-subtracted and the inner product is divided by
    /// the product of their standard deviations. Zero-variance patches score
    /// `0`.
    #[default]
    CoeffNormed,
    /// Mean-subtracted inner product without normalization; higher is better.
    Coeff,
    /// Sum of squared differences; lower is better.
    SqDiff,
    /// Sum of squared differences over `sqrt(Σt² · Σi²)`; lower is better.
    SqDiffNormed,
}

impl Metric {
    /// Returns the extremum convention of the metric.
    pub fn extremum(self) -> Extremum {
        match self {
            Metric::CoeffNormed | Metric::Coeff => Extremum::Max,
            Metric::SqDiff | Metric::SqDiffNormed => Extremum::Min,
        }
    }

    /// Returns a stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::CoeffNormed => "coeff_normed",
            Metric::Coeff => "coeff",
            Metric::SqDiff => "sq_diff",
            Metric::SqDiffNormed => "sq_diff_normed",
        }
    }

    /// Scores a window from exact template and window moments.
    ///
    /// With `n` samples, the mean-subtracted terms are scaled by `n` so they
    /// stay integral: `n·Σti − ΣtΣi`, `n·Σt² − (Σt)²` and `n·Σi² − (Σi)²`.
    pub fn score(self, plan: &TemplatePlan, window: WindowSums) -> f32 {
        let n = plan.len() as i128;
        let sum_t = i128::from(plan.sum());
        let sum_sq_t = i128::from(plan.sum_sq());
        let cross = i128::from(window.cross);
        let sum_i = i128::from(window.sum);
        let sum_sq_i = i128::from(window.sum_sq);

        match self {
            Metric::CoeffNormed => {
                let var_t = n * sum_sq_t - sum_t * sum_t;
                let var_i = n * sum_sq_i - sum_i * sum_i;
                if var_t <= 0 || var_i <= 0 {
                    return 0.0;
                }
                let num = (n * cross - sum_t * sum_i) as f64;
                let denom = (var_t as f64).sqrt() * (var_i as f64).sqrt();
                (num / denom).clamp(-1.0, 1.0) as f32
            }
            Metric::Coeff => {
                let num = n * cross - sum_t * sum_i;
                (num as f64 / n as f64) as f32
            }
            Metric::SqDiff => (sum_sq_t + sum_sq_i - 2 * cross) as f32,
            Metric::SqDiffNormed => {
                let sq_diff = sum_sq_t + sum_sq_i - 2 * cross;
                if sum_sq_t == 0 || sum_sq_i == 0 {
                    return if sq_diff == 0 { 0.0 } else { 1.0 };
                }
                let denom = (sum_sq_t as f64).sqrt() * (sum_sq_i as f64).sqrt();
                (sq_diff as f64 / denom) as f32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Extremum, Metric};
    use crate::kernel::WindowSums;
    use crate::template::TemplatePlan;
    use crate::ImageView;
    use std::cmp::Ordering;

    fn sums(tpl: &[u8], window: &[u8]) -> WindowSums {
        WindowSums {
            cross: tpl
                .iter()
                .zip(window)
                .map(|(&t, &i)| u64::from(t) * u64::from(i))
                .sum(),
            sum: window.iter().map(|&i| u64::from(i)).sum(),
            sum_sq: window.iter().map(|&i| u64::from(i) * u64::from(i)).sum(),
        }
    }

    #[test]
    fn coeff_normed_matches_definition() {
        let tpl = [10u8, 200, 30, 90, 0, 255];
        let window = [40u8, 180, 20, 100, 15, 240];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 3, 2).unwrap()).unwrap();

        let n = tpl.len() as f64;
        let mt = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mi = window.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mut num = 0.0;
        let mut dt = 0.0;
        let mut di = 0.0;
        for (&t, &i) in tpl.iter().zip(window.iter()) {
            let a = t as f64 - mt;
            let b = i as f64 - mi;
            num += a * b;
            dt += a * a;
            di += b * b;
        }
        let expected = num / (dt * di).sqrt();

        let score = Metric::CoeffNormed.score(&plan, sums(&tpl, &window));
        assert!((score as f64 - expected).abs() < 1e-6);

        let coeff = Metric::Coeff.score(&plan, sums(&tpl, &window));
        assert!((coeff as f64 - num).abs() < 1e-3 * num.abs().max(1.0));
    }

    #[test]
    fn coeff_normed_is_shift_invariant_and_guarded() {
        let tpl = [0u8, 255, 255, 0];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 2, 2).unwrap()).unwrap();

        let a = Metric::CoeffNormed.score(&plan, sums(&tpl, &[0, 255, 255, 0]));
        let b = Metric::CoeffNormed.score(&plan, sums(&tpl, &[0, 200, 200, 0]));
        let c = Metric::CoeffNormed.score(&plan, sums(&tpl, &[50, 250, 250, 50]));
        assert!((a - 1.0).abs() < 1e-6);
        assert!((b - 1.0).abs() < 1e-6);
        assert!((c - 1.0).abs() < 1e-6);

        let flat = Metric::CoeffNormed.score(&plan, sums(&tpl, &[7, 7, 7, 7]));
        assert_eq!(flat, 0.0);
    }

    #[test]
    fn sq_diff_variants() {
        let tpl = [1u8, 2, 3, 4];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 2, 2).unwrap()).unwrap();

        assert_eq!(Metric::SqDiff.score(&plan, sums(&tpl, &tpl)), 0.0);
        assert_eq!(Metric::SqDiff.score(&plan, sums(&tpl, &[2, 2, 3, 6])), 5.0);
        assert_eq!(Metric::SqDiffNormed.score(&plan, sums(&tpl, &tpl)), 0.0);

        let zeros = [0u8; 4];
        let zero_plan =
            TemplatePlan::from_view(ImageView::from_slice(&zeros, 2, 2).unwrap()).unwrap();
        assert_eq!(Metric::SqDiffNormed.score(&zero_plan, sums(&zeros, &zeros)), 0.0);
        assert_eq!(Metric::SqDiffNormed.score(&zero_plan, sums(&zeros, &tpl)), 1.0);
    }

    #[test]
    fn extremum_follows_metric() {
        assert_eq!(Metric::CoeffNormed.extremum(), Extremum::Max);
        assert_eq!(Metric::Coeff.extremum(), Extremum::Max);
        assert_eq!(Metric::SqDiff.extremum(), Extremum::Min);
        assert_eq!(Metric::SqDiffNormed.extremum(), Extremum::Min);
        assert_eq!(Extremum::Min.cmp_best_first(1.0, 2.0), Ordering::Less);
        assert_eq!(Extremum::Max.cmp_best_first(1.0, 1.0), Ordering::Equal);
        assert_eq!(Extremum::Max.cmp_best_first(-0.0, 0.0), Ordering::Greater);
    }
}
