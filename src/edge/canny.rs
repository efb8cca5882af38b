//! Sobel gradients, non-maximum suppression, and hysteresis.

use crate::edge::EDGE;
use crate::image::ImageView;

/// tan(22.5°) in Q15 fixed point.
const TAN_22_5_Q15: i64 = 13573;

/// Per-pixel Sobel responses and their L1 magnitude.
pub(crate) struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<i32>,
}

impl Gradients {
    /// Magnitude at `(x, y)`; zero outside the image.
    #[inline]
    fn mag_at(&self, x: isize, y: isize) -> i32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.mag[y as usize * self.width + x as usize]
    }
}

/// Computes 3x3 Sobel gradients with replicated borders.
pub(crate) fn sobel(image: ImageView<'_, u8>) -> Gradients {
    let width = image.width();
    let height = image.height();
    let len = width * height;
    let mut gx = vec![0i32; len];
    let mut gy = vec![0i32; len];
    let mut mag = vec![0i32; len];

    let sample = |x: usize, y: usize| -> i32 {
        image.get(x, y).map_or(0, |&v| i32::from(v))
    };

    for y in 0..height {
        let ym = y.saturating_sub(1);
        let yp = (y + 1).min(height - 1);
        for x in 0..width {
            let xm = x.saturating_sub(1);
            let xp = (x + 1).min(width - 1);

            let dx = (sample(xp, ym) + 2 * sample(xp, y) + sample(xp, yp))
                - (sample(xm, ym) + 2 * sample(xm, y) + sample(xm, yp));
            let dy = (sample(xm, yp) + 2 * sample(x, yp) + sample(xp, yp))
                - (sample(xm, ym) + 2 * sample(x, ym) + sample(xp, ym));

            let idx = y * width + x;
            gx[idx] = dx;
            gy[idx] = dy;
            mag[idx] = dx.abs() + dy.abs();
        }
    }

    Gradients {
        width,
        height,
        gx,
        gy,
        mag,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Suppressed,
    Weak,
    Strong,
}

/// Suppresses non-maxima and links weak edges to strong ones.
///
/// Returns a row-major buffer with `EDGE` for edge pixels and `0` elsewhere.
pub(crate) fn hysteresis(grad: &Gradients, low: f32, high: f32) -> Vec<u8> {
    let width = grad.width;
    let height = grad.height;
    let mut marks = vec![Mark::Suppressed; width * height];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = grad.mag[idx];
            if m as f32 <= low || !is_local_max(grad, x, y) {
                continue;
            }
            if m as f32 > high {
                marks[idx] = Mark::Strong;
                stack.push((x, y));
            } else {
                marks[idx] = Mark::Weak;
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let idx = ny * width + nx;
                if marks[idx] == Mark::Weak {
                    marks[idx] = Mark::Strong;
                    stack.push((nx, ny));
                }
            }
        }
    }

    marks
        .into_iter()
        .map(|mark| if mark == Mark::Strong { EDGE } else { 0 })
        .collect()
}

/// Non-maximum test along the gradient direction quantized to 4 sectors.
///
/// The backward neighbour must be strictly smaller and the forward one not
/// larger, so a two-pixel plateau keeps exactly one pixel. Diagonals require
/// strict dominance on both sides.
fn is_local_max(grad: &Gradients, x: usize, y: usize) -> bool {
    let idx = y * grad.width + x;
    let m = grad.mag[idx];
    let dx = grad.gx[idx];
    let dy = grad.gy[idx];
    let xs = i64::from(dx.abs());
    let ys = i64::from(dy.abs()) << 15;
    let tg22x = xs * TAN_22_5_Q15;
    let (xi, yi) = (x as isize, y as isize);

    if ys < tg22x {
        m > grad.mag_at(xi - 1, yi) && m >= grad.mag_at(xi + 1, yi)
    } else {
        let tg67x = tg22x + (xs << 16);
        if ys > tg67x {
            m > grad.mag_at(xi, yi - 1) && m >= grad.mag_at(xi, yi + 1)
        } else {
            let s: isize = if (dx ^ dy) < 0 { -1 } else { 1 };
            m > grad.mag_at(xi - s, yi - 1) && m > grad.mag_at(xi + s, yi + 1)
        }
    }
}
