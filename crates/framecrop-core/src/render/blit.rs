//! The affine blit: draw a source sub-rectangle into a destination rectangle.
//!
//! This is the single draw primitive shared by the display renderer (whole
//! image into its on-screen rectangle) and the crop extractor (crop source
//! rectangle into the whole output surface). Cropping and resampling happen
//! in the same pass.
//!
//! # Algorithm
//!
//! Inverse mapping: for every destination pixel whose centre lies inside
//! `dst`, the centre is mapped linearly into `src`:
//!
//! ```text
//! u = src.x + (px + 0.5 - dst.x) * src.width  / dst.width
//! v = src.y + (py + 0.5 - dst.y) * src.height / dst.height
//! ```
//!
//! Points that fall outside the source image leave the destination pixel
//! untouched, so regions of `src` beyond the image stay transparent on a
//! fresh surface.

use serde::{Deserialize, Serialize};

use super::Canvas;
use crate::decode::SourceImage;
use crate::geometry::Rect;

/// Resampling filter for the affine blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel, no smoothing.
    Nearest,
    /// Bilinear interpolation between the 4 nearest pixels, edges clamped.
    #[default]
    Bilinear,
}

/// Draw `src` (source-image pixels) into `dst` (canvas pixels).
pub fn draw_image(
    canvas: &mut Canvas,
    image: &SourceImage,
    src: Rect,
    dst: Rect,
    filter: InterpolationFilter,
) {
    if image.is_empty() || src.is_empty() || dst.is_empty() {
        return;
    }

    let size = canvas.size();
    let kx = src.width / dst.width;
    let ky = src.height / dst.height;
    let (img_w, img_h) = (image.width() as f64, image.height() as f64);

    // Source u per destination column; columns that miss the image are dropped
    let columns: Vec<(u32, f64)> = dst
        .covered_columns(size.width)
        .filter_map(|px| {
            let u = src.x + (px as f64 + 0.5 - dst.x) * kx;
            (u >= 0.0 && u < img_w).then_some((px, u))
        })
        .collect();

    if columns.is_empty() {
        return;
    }

    for py in dst.covered_rows(size.height) {
        let v = src.y + (py as f64 + 0.5 - dst.y) * ky;
        if v < 0.0 || v >= img_h {
            continue;
        }

        for &(px, u) in &columns {
            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, u, v),
                InterpolationFilter::Bilinear => sample_bilinear(image, u, v),
            };
            canvas.blend(px, py, pixel);
        }
    }
}

/// Pixel containing the continuous point `(u, v)`.
fn sample_nearest(image: &SourceImage, u: f64, v: f64) -> [u8; 4] {
    let x = (u.floor() as u32).min(image.width() - 1);
    let y = (v.floor() as u32).min(image.height() - 1);
    image.pixel(x, y)
}

/// Bilinear interpolation around the continuous point `(u, v)`.
///
/// Pixel centres sit at half-integer coordinates; neighbors beyond the image
/// edge are clamped to the edge pixel. Colors are weighted by alpha so
/// transparent pixels do not darken their neighbors.
fn sample_bilinear(image: &SourceImage, u: f64, v: f64) -> [u8; 4] {
    let fx = u - 0.5;
    let fy = v - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;
    let cx0 = (x0 as i64).clamp(0, max_x) as u32;
    let cx1 = (x0 as i64 + 1).clamp(0, max_x) as u32;
    let cy0 = (y0 as i64).clamp(0, max_y) as u32;
    let cy1 = (y0 as i64 + 1).clamp(0, max_y) as u32;

    let taps = [
        (image.pixel(cx0, cy0), (1.0 - tx) * (1.0 - ty)),
        (image.pixel(cx1, cy0), tx * (1.0 - ty)),
        (image.pixel(cx0, cy1), (1.0 - tx) * ty),
        (image.pixel(cx1, cy1), tx * ty),
    ];

    let mut premul = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (p, w) in taps {
        let a = p[3] as f64 * w;
        premul[0] += p[0] as f64 * a;
        premul[1] += p[1] as f64 * a;
        premul[2] += p[2] as f64 * a;
        alpha += a;
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    [
        (premul[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (premul[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (premul[2] / alpha).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}
