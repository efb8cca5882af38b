//! Decoding raster input via the `image` crate.

use crate::image::{ImageView, OwnedImage};
use crate::util::{SlideError, SlideResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> SlideResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> SlideResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.as_raw().clone(), width, height)
}

/// Converts an owned image back into an `image::GrayImage`.
pub fn gray_image_from_owned(img: &OwnedImage) -> SlideResult<image::GrayImage> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    image::GrayImage::from_raw(width, height, img.data().to_vec()).ok_or(
        SlideError::BufferTooSmall {
            needed: img.width() * img.height(),
            got: img.data().len(),
        },
    )
}

/// Creates an owned grayscale image from a dynamic image.
///
/// Colour inputs are reduced to luma; any alpha channel is dropped.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SlideResult<OwnedImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(SlideError::InvalidDimensions {
            width: img.width() as usize,
            height: img.height() as usize,
            context: "decoded image",
        });
    }
    let gray = img.to_luma8();
    owned_from_gray_image(&gray)
}

/// Decodes encoded raster bytes (PNG, JPEG, WebP) into a grayscale image.
pub fn decode_gray(bytes: &[u8]) -> SlideResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| SlideError::Decode {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SlideResult<OwnedImage> {
    let img = image::open(path).map_err(|err| SlideError::Decode {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
