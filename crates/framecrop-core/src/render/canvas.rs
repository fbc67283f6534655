//! An owned RGBA drawing surface with the handful of paint operations the
//! cropper needs.
//!
//! Pixels are straight (non-premultiplied) alpha, row-major, 4 bytes each,
//! which is the layout `ImageData` expects on the host side.
//!
//! Rectangle coverage uses pixel centres: pixel `(i, j)` is painted when
//! `(i + 0.5, j + 0.5)` lies inside the half-open rectangle. Two rectangles
//! that share an edge therefore never paint the same pixel.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, SurfaceSize};

/// An 8-bit straight-alpha color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a fully transparent surface.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            pixels: vec![0u8; size.width as usize * size.height as usize * 4],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at integer coordinates. Caller guarantees bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Fill a rectangle, compositing `color` over the existing pixels.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        let columns = rect.covered_columns(self.width);
        for y in rect.covered_rows(self.height) {
            for x in columns.clone() {
                self.blend(x, y, color.to_array());
            }
        }
    }

    /// Stroke the outline of `rect` with a line of `line_width` centred on its
    /// edges. The four sides are painted as disjoint rectangles so a
    /// translucent stroke is blended once per pixel.
    pub fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: Color) {
        if line_width <= 0.0 || rect.is_empty() {
            return;
        }
        let half = line_width / 2.0;
        let inner_height = (rect.height - line_width).max(0.0);

        self.fill_rect(
            Rect::new(rect.x - half, rect.y - half, rect.width + line_width, line_width),
            color,
        );
        self.fill_rect(
            Rect::new(
                rect.x - half,
                rect.bottom() - half,
                rect.width + line_width,
                line_width,
            ),
            color,
        );
        self.fill_rect(
            Rect::new(rect.x - half, rect.y + half, line_width, inner_height),
            color,
        );
        self.fill_rect(
            Rect::new(rect.right() - half, rect.y + half, line_width, inner_height),
            color,
        );
    }

    /// Composite a straight-alpha pixel over the pixel at `(x, y)`.
    #[inline]
    pub(crate) fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx..idx + 4];

        match src[3] {
            0 => {}
            255 => dst.copy_from_slice(&src),
            alpha => {
                let sa = alpha as f32 / 255.0;
                let da = dst[3] as f32 / 255.0;
                let out_a = sa + da * (1.0 - sa);
                for c in 0..3 {
                    let value =
                        (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
                    dst[c] = value.clamp(0.0, 255.0).round() as u8;
                }
                dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(SurfaceSize::new(4, 3));
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
        assert!(canvas.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_fill_rect_integer_bounds() {
        let mut canvas = Canvas::new(SurfaceSize::new(10, 10));
        canvas.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), RED);

        assert_eq!(canvas.pixel(2, 3), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(5, 4), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(6, 4), [0, 0, 0, 0]);
        assert_eq!(canvas.pixel(2, 5), [0, 0, 0, 0]);
        assert_eq!(canvas.pixel(1, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = Canvas::new(SurfaceSize::new(5, 5));
        canvas.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), RED);
        assert!(canvas.pixels().chunks(4).all(|p| p == [255, 0, 0, 255]));
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let mut canvas = Canvas::new(SurfaceSize::new(1, 1));
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::rgb(200, 100, 50));
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::rgba(0, 0, 0, 128));

        let [r, g, b, a] = canvas.pixel(0, 0);
        assert_eq!(a, 255);
        assert!((r as i32 - 100).abs() <= 1);
        assert!((g as i32 - 50).abs() <= 1);
        assert!((b as i32 - 25).abs() <= 1);
    }

    #[test]
    fn test_half_alpha_over_transparent() {
        let mut canvas = Canvas::new(SurfaceSize::new(1, 1));
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::rgba(0, 0, 0, 128));
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 128]);
    }

    #[test]
    fn test_stroke_rect_centred_on_edges() {
        let mut canvas = Canvas::new(SurfaceSize::new(20, 20));
        canvas.stroke_rect(Rect::new(5.0, 5.0, 10.0, 10.0), 2.0, RED);

        // Top edge covers rows 4 and 5
        assert_eq!(canvas.pixel(10, 4), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(10, 5), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(10, 6), [0, 0, 0, 0]);
        // Right edge covers columns 14 and 15
        assert_eq!(canvas.pixel(15, 10), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(16, 10), [0, 0, 0, 0]);
        // Interior untouched
        assert_eq!(canvas.pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn test_translucent_stroke_blends_once() {
        let mut canvas = Canvas::new(SurfaceSize::new(20, 20));
        canvas.stroke_rect(Rect::new(5.0, 5.0, 10.0, 10.0), 2.0, Color::rgba(0, 0, 0, 100));
        // Corner pixels belong to exactly one side
        assert_eq!(canvas.pixel(4, 4), [0, 0, 0, 100]);
        assert_eq!(canvas.pixel(15, 15), [0, 0, 0, 100]);
        assert_eq!(canvas.pixel(4, 10), [0, 0, 0, 100]);
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(SurfaceSize::new(3, 3));
        canvas.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), RED);
        canvas.clear();
        assert!(canvas.pixels().iter().all(|&v| v == 0));
    }
}
