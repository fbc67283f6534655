//! Display-space geometry primitives.
//!
//! All coordinates are `f64` pixels with the origin at the top-left corner of
//! the display surface, x growing right and y growing down.

use serde::{Deserialize, Serialize};

/// A point in display or source-image space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Integer pixel dimensions of a drawing surface or raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface with a zero dimension cannot be drawn on.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check whether a display-space point lies on the surface.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }
}

/// An axis-aligned rectangle with fractional coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering a whole surface.
    pub fn from_size(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a point lies inside, using half-open bounds.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Integer pixel size of this rectangle, rounded to the nearest pixel.
    pub fn rounded_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }

    /// Range of pixel columns whose centres fall inside `[x, right)`,
    /// clamped to `0..limit`.
    pub(crate) fn covered_columns(&self, limit: u32) -> std::ops::Range<u32> {
        covered_span(self.x, self.right(), limit)
    }

    /// Range of pixel rows whose centres fall inside `[y, bottom)`,
    /// clamped to `0..limit`.
    pub(crate) fn covered_rows(&self, limit: u32) -> std::ops::Range<u32> {
        covered_span(self.y, self.bottom(), limit)
    }
}

/// Pixel `i` is covered when `start <= i + 0.5 < end`.
fn covered_span(start: f64, end: f64, limit: u32) -> std::ops::Range<u32> {
    if start.is_nan() || end.is_nan() || end <= start {
        return 0..0;
    }
    let first = (start - 0.5).ceil().clamp(0.0, limit as f64) as u32;
    let last = (end - 0.5).ceil().clamp(0.0, limit as f64) as u32;
    first..last.max(first)
}
