//! Source image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

/// Decode raster bytes (PNG or JPEG) into a [`SourceImage`].
///
/// The header dimensions are checked against `max_pixels` before the full
/// decode so an oversized upload is rejected without allocating its pixels.
/// EXIF orientation is applied, matching how browsers present the same bytes.
///
/// # Errors
///
/// - `DecodeError::InvalidFormat` if the container format is not recognized
/// - `DecodeError::Corrupted` if decoding fails part way
/// - `DecodeError::TooLarge` if the image exceeds `max_pixels`
/// - `DecodeError::EmptyImage` if the image has a zero dimension
pub fn decode_source(bytes: &[u8], max_pixels: u64) -> Result<SourceImage, DecodeError> {
    let (width, height) = read_dimensions(bytes)?;
    check_pixel_budget(width, height, max_pixels)?;

    let img = open_reader(bytes)?.decode().map_err(map_image_error)?;

    let orientation = extract_orientation(bytes);
    let rgba = apply_orientation(img, orientation).into_rgba8();
    let source = SourceImage::from_rgba_image(rgba);

    if source.is_empty() {
        return Err(DecodeError::EmptyImage);
    }

    log::debug!(
        "decoded source {}x{} (orientation {:?})",
        source.width(),
        source.height(),
        orientation
    );

    Ok(source)
}

fn open_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    Ok(reader)
}

/// Read width and height from the image header only.
fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    open_reader(bytes)?
        .into_dimensions()
        .map_err(map_image_error)
}

fn check_pixel_budget(width: u32, height: u32, max_pixels: u64) -> Result<(), DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }
    if width as u64 * height as u64 > max_pixels {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max_pixels,
        });
    }
    Ok(())
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::Corrupted(other.to_string()),
    }
}

/// Extract EXIF orientation, defaulting to `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
