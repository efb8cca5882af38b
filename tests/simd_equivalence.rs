#![cfg(feature = "simd")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slidematch::kernel::scalar::ScalarKernel;
use slidematch::kernel::simd::SimdKernel;
use slidematch::search::correlate_with;
use slidematch::{ImageView, Metric, TemplatePlan};

#[test]
fn simd_kernel_matches_scalar_kernel() {
    let mut rng = StdRng::seed_from_u64(17);
    let (width, height) = (71, 45);
    let image: Vec<u8> = (0..width * height)
        .map(|_| rng.random_range(0..=255))
        .collect();
    let view = ImageView::from_slice(&image, width, height).unwrap();

    // Widths exercise the full-lane path, the tail, and both together.
    for (tw, th) in [(8, 4), (5, 6), (29, 13)] {
        let tpl: Vec<u8> = (0..tw * th).map(|_| rng.random_range(0..=255)).collect();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, tw, th).unwrap()).unwrap();
        for metric in [Metric::CoeffNormed, Metric::SqDiff] {
            let scalar = correlate_with::<ScalarKernel>(view, &plan, metric).unwrap();
            let simd = correlate_with::<SimdKernel>(view, &plan, metric).unwrap();
            assert_eq!(scalar, simd, "{tw}x{th} {}", metric.name());
        }
    }
}
