//! Linear min-max intensity normalization.
//!
//! The background and the piece are usually composited on different
//! backdrops, so both are stretched to the full `[0, 255]` range before edge
//! extraction. The mapping is `round((v - min) * 255 / (max - min))`,
//! evaluated in integer arithmetic so that a uniform brightness shift of the
//! input yields a bit-identical output.

use crate::image::{ImageView, OwnedImage};
use crate::util::SlideResult;

/// Stretches the intensity range of `image` to `[0, 255]`.
///
/// A flat image (all samples equal) maps to all zeros.
pub fn normalize_min_max(image: ImageView<'_, u8>) -> SlideResult<OwnedImage> {
    let (min, max) = intensity_range(image);
    let range = u32::from(max - min);

    let mut data = Vec::with_capacity(image.width() * image.height());
    for row in image.rows() {
        if range == 0 {
            data.resize(data.len() + row.len(), 0);
            continue;
        }
        for &value in row {
            let shifted = u32::from(value - min);
            // Round half up: (2 * a * 255 + range) / (2 * range).
            let scaled = (2 * shifted * 255 + range) / (2 * range);
            data.push(scaled as u8);
        }
    }

    OwnedImage::new(data, image.width(), image.height())
}

/// Returns the `(min, max)` sample values of `image`.
pub fn intensity_range(image: ImageView<'_, u8>) -> (u8, u8) {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for row in image.rows() {
        for &value in row {
            min = min.min(value);
            max = max.max(value);
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::{intensity_range, normalize_min_max};
    use crate::ImageView;

    #[test]
    fn stretches_to_full_range() {
        let data = [40u8, 120, 200, 80];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let out = normalize_min_max(view).unwrap();
        assert_eq!(out.data(), &[0, 128, 255, 64]);
        assert_eq!(intensity_range(out.view()), (0, 255));
    }

    #[test]
    fn flat_image_maps_to_zero() {
        let data = [77u8; 6];
        let view = ImageView::from_slice(&data, 3, 2).unwrap();
        let out = normalize_min_max(view).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn uniform_shift_is_removed() {
        let base: Vec<u8> = (0..20u8).map(|i| i * 7 + 3).collect();
        let shifted: Vec<u8> = base.iter().map(|&v| v + 60).collect();
        let a = normalize_min_max(ImageView::from_slice(&base, 5, 4).unwrap()).unwrap();
        let b = normalize_min_max(ImageView::from_slice(&shifted, 5, 4).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
