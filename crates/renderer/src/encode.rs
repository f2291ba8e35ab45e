//! Image encoding for finished figures.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use secs_common::ImageFormat;

use crate::error::RenderResult;

/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Composite RGBA onto a white background and drop alpha.
///
/// JPEG has no transparency.
fn flatten_on_white(image: &RgbaImage) -> image::RgbImage {
    let (width, height) = image.dimensions();
    let mut out = image::RgbImage::new(width, height);
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let Rgba([r, g, b, a]) = *src;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        *dst = image::Rgb([blend(r), blend(g), blend(b)]);
    }
    out
}

/// Encode a figure in memory.
pub fn encode_image(image: &RgbaImage, format: ImageFormat) -> RenderResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut data = Vec::new();
    let mut cursor = Cursor::new(&mut data);

    match format {
        ImageFormat::Jpeg => {
            let rgb = flatten_on_white(image);
            let mut encoder = JpegEncoder::new_with_quality(&mut cursor, DEFAULT_JPEG_QUALITY);
            encoder.encode(&rgb, width, height, ColorType::Rgb8)?;
        }
        ImageFormat::Png => {
            PngEncoder::new(&mut cursor).write_image(image, width, height, ColorType::Rgba8)?;
        }
    }

    Ok(data)
}
