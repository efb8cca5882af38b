//! Scalar reference kernel.

use crate::kernel::{window_row, Kernel};
use crate::template::TemplatePlan;
use crate::ImageView;

/// Scalar cross-product kernel.
pub struct ScalarKernel;

impl Kernel for ScalarKernel {
    fn cross_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> u64 {
        let width = plan.width();
        let mut cross = 0u64;
        for ty in 0..plan.height() {
            let img_row = window_row(&image, x, y, ty, width);
            cross += img_row
                .iter()
                .zip(plan.row(ty))
                .map(|(&i, &t)| u64::from(i) * u64::from(t))
                .sum::<u64>();
        }
        cross
    }
}
