//! Crop Extractor: turns the current crop window into an output raster.
//!
//! The crop window is inverse-mapped through the Transform State into source
//! pixels, and that source rectangle is drawn into a fresh surface the size of
//! the crop window:
//!
//! ```text
//! sourceX      = (window.x - position.x) / scale
//! sourceY      = (window.y - position.y) / scale
//! sourceWidth  = window.width  / scale
//! sourceHeight = window.height / scale
//! ```
//!
//! Output dimensions depend only on the surface and the aspect mode, never on
//! the zoom level. Parts of the source rectangle that lie beyond the image are
//! transparent in the output.

use crate::config::CropperConfig;
use crate::decode::SourceImage;
use crate::encode::encode_png;
use crate::error::{CropError, CropFailure};
use crate::geometry::{Rect, SurfaceSize};
use crate::render::{draw_image, Canvas};
use crate::transform::{crop_window, TransformState};

/// An encoded crop result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Lossless PNG byte stream.
    pub png: Vec<u8>,
}

/// Draw the crop window's content into a new canvas of crop-window size.
pub fn render_crop(
    state: &TransformState,
    image: Option<&SourceImage>,
    surface: SurfaceSize,
    config: &CropperConfig,
) -> Result<Canvas, CropFailure> {
    if surface.is_empty() {
        return Err(CropFailure::SurfaceUnavailable);
    }
    let image = image.ok_or(CropFailure::NotReady)?;

    let window = crop_window(state.aspect_ratio(), surface, config);
    let output = window.rounded_size();
    if output.is_empty() {
        return Err(CropFailure::EmptyWindow);
    }

    // A zero or non-finite scale maps the window onto no real source area.
    let source = state.source_rect(window);
    let usable = state.scale() > 0.0
        && state.scale().is_finite()
        && [source.x, source.y, source.width, source.height]
            .iter()
            .all(|v| v.is_finite());
    if !usable {
        log::warn!("crop rejected: transform scale {} is unusable", state.scale());
        return Err(CropFailure::SurfaceUnavailable);
    }

    let mut canvas = Canvas::new(output);
    draw_image(
        &mut canvas,
        image,
        source,
        Rect::from_size(output),
        config.filter,
    );

    log::debug!(
        "crop source ({:.2}, {:.2}) {:.2}x{:.2} -> {}x{}",
        source.x,
        source.y,
        source.width,
        source.height,
        output.width,
        output.height
    );

    Ok(canvas)
}

/// Extract the crop window's content and encode it as PNG.
pub fn extract_crop(
    state: &TransformState,
    image: Option<&SourceImage>,
    surface: SurfaceSize,
    config: &CropperConfig,
) -> Result<OutputRaster, CropError> {
    let canvas = render_crop(state, image, surface, config)?;
    let SurfaceSize { width, height } = canvas.size();

    let png = encode_png(canvas.pixels(), width, height).map_err(CropFailure::from)?;
    log::info!("crop extracted: {}x{}, {} bytes", width, height, png.len());

    Ok(OutputRaster { width, height, png })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::transform::AspectMode;

    /// Image made of uniform 100px tiles colored (bx, by, 7, 255).
    fn block_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x / 100) as u8, (y / 100) as u8, 7, 255]);
            }
        }
        SourceImage::new(width, height, pixels)
    }

    fn surface() -> SurfaceSize {
        SurfaceSize::new(500, 500)
    }

    #[test]
    fn test_square_crop_of_fitted_image() {
        let config = CropperConfig::default();
        let image = block_image(1000, 1000);
        let state = TransformState::fit(image.size(), surface(), AspectMode::Square);

        let window = crop_window(state.aspect_ratio(), surface(), &config);
        assert_eq!(
            state.source_rect(window),
            Rect::new(100.0, 100.0, 800.0, 800.0)
        );

        let canvas = render_crop(&state, Some(&image), surface(), &config).unwrap();
        assert_eq!(canvas.size(), SurfaceSize::new(400, 400));
        assert_eq!(canvas.pixel(0, 0), [1, 1, 7, 255]);
        assert_eq!(canvas.pixel(200, 200), [5, 5, 7, 255]);
        assert_eq!(canvas.pixel(399, 399), [8, 8, 7, 255]);
    }

    #[test]
    fn test_panned_crop_starts_at_image_edge() {
        let config = CropperConfig::default();
        let image = block_image(1000, 1000);
        let state = TransformState::fit(image.size(), surface(), AspectMode::Square)
            .with_position(Point::new(50.0, 0.0));

        let window = crop_window(state.aspect_ratio(), surface(), &config);
        let source = state.source_rect(window);
        assert_eq!(source.x, 0.0);
        assert_eq!(source.y, 100.0);

        let canvas = render_crop(&state, Some(&image), surface(), &config).unwrap();
        assert_eq!(canvas.pixel(0, 0), [0, 1, 7, 255]);
        assert_eq!(canvas.pixel(399, 0), [7, 1, 7, 255]);
    }

    #[test]
    fn test_widescreen_output_size() {
        let config = CropperConfig::default();
        let image = block_image(600, 1200);
        let state = TransformState::fit(image.size(), surface(), AspectMode::Widescreen);

        let output = extract_crop(&state, Some(&image), surface(), &config).unwrap();
        assert_eq!((output.width, output.height), (425, 239));

        let decoded = image::load_from_memory(&output.png).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (425, 239));
    }

    #[test]
    fn test_output_is_png_matching_raster() {
        let config = CropperConfig::default();
        let image = block_image(1000, 1000);
        let state = TransformState::fit(image.size(), surface(), AspectMode::Square);

        let canvas = render_crop(&state, Some(&image), surface(), &config).unwrap();
        let output = extract_crop(&state, Some(&image), surface(), &config).unwrap();

        let decoded = image::load_from_memory(&output.png).unwrap().into_rgba8();
        assert_eq!(decoded.into_raw(), canvas.into_pixels());
    }

    #[test]
    fn test_area_beyond_image_is_transparent() {
        let config = CropperConfig::default();
        let image = block_image(200, 200);
        // 200px image at scale 1 at the surface origin covers only the window's top-left
        let state = TransformState::from_parts(1.0, Point::ORIGIN, AspectMode::Square);

        let canvas = render_crop(&state, Some(&image), surface(), &config).unwrap();
        assert_eq!(canvas.pixel(10, 10), [0, 0, 7, 255]);
        assert_eq!(canvas.pixel(300, 300), [0, 0, 0, 0]);
    }

    #[test]
    fn test_missing_image_fails() {
        let config = CropperConfig::default();
        let state = TransformState::fit(SurfaceSize::new(10, 10), surface(), AspectMode::Square);

        let err = extract_crop(&state, None, surface(), &config).unwrap_err();
        assert!(matches!(err, CropError::CropFailed(CropFailure::NotReady)));
    }

    #[test]
    fn test_missing_surface_fails() {
        let config = CropperConfig::default();
        let image = block_image(100, 100);
        let state = TransformState::fit(image.size(), surface(), AspectMode::Square);

        let err = extract_crop(&state, Some(&image), SurfaceSize::new(0, 500), &config).unwrap_err();
        assert!(matches!(
            err,
            CropError::CropFailed(CropFailure::SurfaceUnavailable)
        ));
    }

    #[test]
    fn test_window_rounding_to_zero_fails() {
        let config = CropperConfig::default();
        let image = block_image(100, 100);
        let tiny = SurfaceSize::new(1, 1);
        let state = TransformState::fit(image.size(), tiny, AspectMode::Widescreen);

        // 0.85px wide, 0.48px high
        let err = extract_crop(&state, Some(&image), tiny, &config).unwrap_err();
        assert!(matches!(err, CropError::CropFailed(CropFailure::EmptyWindow)));
    }

    #[test]
    fn test_zero_scale_transform_fails() {
        let config = CropperConfig::default();
        let image = block_image(100, 100);
        // Fitting against an empty surface leaves scale 0
        let state = TransformState::fit(image.size(), SurfaceSize::new(0, 0), AspectMode::Square);
        assert_eq!(state.scale(), 0.0);

        let err = extract_crop(&state, Some(&image), surface(), &config).unwrap_err();
        assert!(matches!(
            err,
            CropError::CropFailed(CropFailure::SurfaceUnavailable)
        ));
    }

    #[test]
    fn test_non_finite_position_fails() {
        let config = CropperConfig::default();
        let image = block_image(100, 100);
        let state =
            TransformState::from_parts(1.0, Point::new(f64::INFINITY, 0.0), AspectMode::Square);

        let err = render_crop(&state, Some(&image), surface(), &config).unwrap_err();
        assert!(matches!(err, CropFailure::SurfaceUnavailable));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Point;
    use crate::transform::AspectMode;
    use proptest::prelude::*;

    proptest! {
        /// Property: output size depends on surface and aspect, never on zoom or pan.
        #[test]
        fn prop_output_size_independent_of_transform(
            scale in 0.25f64..=5.0,
            x in -400.0f64..400.0,
            y in -400.0f64..400.0,
            square in any::<bool>(),
        ) {
            let mut config = CropperConfig::default();
            config.surface_width = 120;
            config.surface_height = 90;
            let surface = config.surface_size();

            let image = SourceImage::new(4, 4, vec![90; 64]);
            let aspect = if square { AspectMode::Square } else { AspectMode::Widescreen };
            let state = TransformState::from_parts(scale, Point::new(x, y), aspect);

            let canvas = render_crop(&state, Some(&image), surface, &config).unwrap();
            let expected = crop_window(aspect.ratio(), surface, &config).rounded_size();
            prop_assert_eq!(canvas.size(), expected);
        }
    }
}
