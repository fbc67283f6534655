//! Display Renderer: paints one frame for the current Transform State.

use serde::{Deserialize, Serialize};

use super::{draw_image, Canvas, Color};
use crate::config::CropperConfig;
use crate::decode::SourceImage;
use crate::geometry::{Point, Rect};
use crate::transform::{crop_window, outside_strips, TransformState};

/// Overlay, border and corner guide appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Fill for the four strips outside the crop window.
    pub overlay: Color,
    /// Crop window border color.
    pub border: Color,
    /// Border line width in pixels.
    pub border_width: f64,
    /// Corner guide accent color.
    pub guide: Color,
    /// Length of each guide arm in pixels.
    pub guide_length: f64,
    /// Guide line thickness in pixels.
    pub guide_thickness: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            overlay: Color::rgba(0, 0, 0, 128),
            border: Color::WHITE,
            border_width: 2.0,
            guide: Color::rgb(0x3B, 0x82, 0xF6),
            guide_length: 20.0,
            guide_thickness: 4.0,
        }
    }
}

/// Paint a full frame and return the crop window that was drawn.
///
/// Paint order:
/// 1. clear
/// 2. source image at `position`, scaled by `scale`
/// 3. dimming over the four strips outside the crop window
/// 4. window border
/// 5. L-shaped guides at the four window corners
pub fn render_frame(
    canvas: &mut Canvas,
    state: &TransformState,
    image: &SourceImage,
    config: &CropperConfig,
) -> Rect {
    let surface = canvas.size();
    let style = &config.style;

    canvas.clear();

    draw_image(
        canvas,
        image,
        Rect::from_size(image.size()),
        state.image_rect(image.size()),
        config.filter,
    );

    let window = crop_window(state.aspect_ratio(), surface, config);

    for strip in outside_strips(window, surface) {
        canvas.fill_rect(strip, style.overlay);
    }

    canvas.stroke_rect(window, style.border_width, style.border);
    draw_corner_guides(canvas, window, style);

    window
}

fn draw_corner_guides(canvas: &mut Canvas, window: Rect, style: &RenderStyle) {
    let corners = [
        (window.top_left(), 1.0, 1.0),
        (Point::new(window.right(), window.y), -1.0, 1.0),
        (Point::new(window.x, window.bottom()), 1.0, -1.0),
        (window.bottom_right(), -1.0, -1.0),
    ];

    for (corner, dir_x, dir_y) in corners {
        for arm in guide_arms(corner, dir_x, dir_y, style.guide_length, style.guide_thickness) {
            canvas.fill_rect(arm, style.guide);
        }
    }
}

/// The horizontal and vertical arm of one guide.
///
/// `dir_x`/`dir_y` point from the corner into the window. Arms are centred on
/// the window edges; the horizontal arm owns the corner square so the two
/// arms never overlap.
fn guide_arms(corner: Point, dir_x: f64, dir_y: f64, length: f64, thickness: f64) -> [Rect; 2] {
    let half = thickness / 2.0;

    let (hx0, hx1) = if dir_x > 0.0 {
        (corner.x - half, corner.x + length)
    } else {
        (corner.x - length, corner.x + half)
    };
    let horizontal = Rect::new(hx0, corner.y - half, hx1 - hx0, thickness);

    let (vy0, vy1) = if dir_y > 0.0 {
        (corner.y + half, corner.y + length)
    } else {
        (corner.y - length, corner.y - half)
    };
    let vertical = Rect::new(corner.x - half, vy0, thickness, (vy1 - vy0).max(0.0));

    [horizontal, vertical]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::extract::render_crop;
    use crate::transform::AspectMode;
    use proptest::prelude::*;

    proptest! {
        /// Property: every pixel outside the window (and clear of the border
        /// and guides) is dimmed exactly once.
        #[test]
        fn prop_overlay_applied_once_outside_window(
            width in 60u32..=300,
            height in 60u32..=300,
            square in any::<bool>(),
        ) {
            let mut config = CropperConfig::default();
            config.surface_width = width;
            config.surface_height = height;
            config.style.border_width = 0.0;
            config.style.guide_thickness = 0.0;

            let image = SourceImage::new(1, 1, vec![255, 255, 255, 255]);
            let aspect = if square { AspectMode::Square } else { AspectMode::Widescreen };
            let state = TransformState::from_parts(1000.0, Point::ORIGIN, aspect);

            let mut canvas = Canvas::new(config.surface_size());
            let window = render_frame(&mut canvas, &state, &image, &config);

            let once = (255.0f32 * (1.0 - 128.0 / 255.0)).round() as u8;
            for y in 0..height {
                for x in 0..width {
                    let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let [r, _, _, a] = canvas.pixel(x, y);
                    prop_assert_eq!(a, 255);
                    if window.contains(centre) {
                        prop_assert_eq!(r, 255);
                    } else {
                        prop_assert!((r as i32 - once as i32).abs() <= 1);
                    }
                }
            }
        }

        /// Property: the frame and the extractor agree on the crop window for
        /// any surface and either aspect mode.
        #[test]
        fn prop_frame_and_extract_share_window(
            width in 20u32..=400,
            height in 20u32..=400,
            square in any::<bool>(),
            scale in 0.25f64..5.0,
            x in -200.0f64..200.0,
            y in -200.0f64..200.0,
        ) {
            let mut config = CropperConfig::default();
            config.surface_width = width;
            config.surface_height = height;
            let surface = config.surface_size();

            let image = SourceImage::new(2, 2, vec![255; 16]);
            let aspect = if square { AspectMode::Square } else { AspectMode::Widescreen };
            let state = TransformState::from_parts(scale, Point::new(x, y), aspect);

            let mut canvas = Canvas::new(surface);
            let window = render_frame(&mut canvas, &state, &image, &config);
            prop_assert_eq!(window, crop_window(aspect.ratio(), surface, &config));

            let crop = render_crop(&state, Some(&image), surface, &config).unwrap();
            prop_assert_eq!(crop.size(), window.rounded_size());
        }
    }
}
