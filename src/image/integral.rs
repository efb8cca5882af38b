//! Summed-area tables for constant-time window statistics.

use crate::image::ImageView;

/// Integral image holding running sums of samples and squared samples.
///
/// Tables are `(width + 1) x (height + 1)` with a zero first row and column,
/// so `sum(x0..x1, y0..y1) = s[y1][x1] - s[y0][x1] - s[y1][x0] + s[y0][x0]`.
pub(crate) struct IntegralImage {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    pub(crate) fn new(image: ImageView<'_, u8>) -> Self {
        let stride = image.width() + 1;
        let len = stride * (image.height() + 1);
        let mut sum = vec![0u64; len];
        let mut sum_sq = vec![0u64; len];

        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            let above = y * stride;
            let here = (y + 1) * stride;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sum_sq += v * v;
                sum[here + x + 1] = sum[above + x + 1] + row_sum;
                sum_sq[here + x + 1] = sum_sq[above + x + 1] + row_sum_sq;
            }
        }

        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Returns `(Σi, Σi²)` over the window with top-left `(x, y)`.
    ///
    /// The window must lie inside the source image.
    #[inline]
    pub(crate) fn window_sums(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> (u64, u64) {
        let top = y * self.stride;
        let bottom = (y + height) * self.stride;
        let (x0, x1) = (x, x + width);
        let sum =
            self.sum[bottom + x1] + self.sum[top + x0] - self.sum[top + x1] - self.sum[bottom + x0];
        let sum_sq = self.sum_sq[bottom + x1] + self.sum_sq[top + x0]
            - self.sum_sq[top + x1]
            - self.sum_sq[bottom + x0];
        (sum, sum_sq)
    }
}
