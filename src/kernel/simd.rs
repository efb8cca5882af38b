//! SIMD cross-product kernel using the `wide` crate.
//!
//! The inner template loop processes 8 samples at a time as `i32x8`. Lane
//! accumulators are flushed to `u64` after each template row, so results are
//! exactly equal to the scalar kernel.

use crate::kernel::{window_row, Kernel};
use crate::template::TemplatePlan;
use crate::ImageView;
use wide::i32x8;

const LANES: usize = 8;

/// Load 8 u8 values and widen to i32x8.
#[inline]
fn load_u8x8(slice: &[u8]) -> i32x8 {
    i32x8::from([
        slice[0] as i32,
        slice[1] as i32,
        slice[2] as i32,
        slice[3] as i32,
        slice[4] as i32,
        slice[5] as i32,
        slice[6] as i32,
        slice[7] as i32,
    ])
}

/// Horizontal sum of i32x8 lanes (all lanes are non-negative).
#[inline]
fn hsum(v: i32x8) -> u64 {
    v.to_array().iter().map(|&lane| lane as u64).sum()
}

/// SIMD-accelerated cross-product kernel.
pub struct SimdKernel;

impl Kernel for SimdKernel {
    fn cross_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> u64 {
        let width = plan.width();
        let chunks = width / LANES;
        let tail = chunks * LANES;

        let mut cross = 0u64;
        for ty in 0..plan.height() {
            let img_row = window_row(&image, x, y, ty, width);
            let tpl_row = plan.row(ty);

            let mut acc = i32x8::splat(0);
            for chunk in 0..chunks {
                let offset = chunk * LANES;
                acc = acc + load_u8x8(&img_row[offset..]) * load_u8x8(&tpl_row[offset..]);
            }
            cross += hsum(acc);

            for tx in tail..width {
                cross += u64::from(img_row[tx]) * u64::from(tpl_row[tx]);
            }
        }
        cross
    }
}

#[cfg(test)]
mod tests {
    use super::SimdKernel;
    use crate::kernel::scalar::ScalarKernel;
    use crate::kernel::Kernel;
    use crate::template::TemplatePlan;
    use crate::ImageView;

    #[test]
    fn simd_cross_matches_scalar_with_tail() {
        let img_width = 40;
        let img_height = 12;
        let image: Vec<u8> = (0..img_width * img_height)
            .map(|i| ((i * 31 + i / 7) & 0xFF) as u8)
            .collect();
        let tpl_width = 19;
        let tpl_height = 5;
        let tpl: Vec<u8> = (0..tpl_width * tpl_height)
            .map(|i| if i % 3 == 0 { 255 } else { (i * 11) as u8 })
            .collect();

        let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let plan =
            TemplatePlan::from_view(ImageView::from_slice(&tpl, tpl_width, tpl_height).unwrap())
                .unwrap();

        for y in 0..=(img_height - tpl_height) {
            for x in 0..=(img_width - tpl_width) {
                assert_eq!(
                    SimdKernel::cross_at(image_view, &plan, x, y),
                    ScalarKernel::cross_at(image_view, &plan, x, y)
                );
            }
        }
    }
}
