//! Card rasterization.
//!
//! Renders the substituted SVG document to raster bytes at the fixed card
//! resolution using various backends.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use resvg::tiny_skia;
use std::io::Cursor;
use std::sync::{Arc, LazyLock};

use crate::card::{CARD_HEIGHT, CARD_WIDTH};
use crate::config::{CardConverter, CardFormat};
use crate::utils::exec::Cmd;

/// Shared font database, loaded once (system fonts are needed for the
/// template's text elements).
static FONTDB: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Rasterize a rendered card document.
///
/// # Arguments
/// * `svg` - Substituted SVG document
/// * `format` - Target output format
/// * `converter` - Conversion backend to use
/// * `quality` - Quality for lossy formats (0-100)
///
/// # Returns
/// Encoded image bytes at exactly [`CARD_WIDTH`]x[`CARD_HEIGHT`] pixels,
/// or error if conversion fails
pub fn rasterize(
    svg: &str,
    format: &CardFormat,
    converter: &CardConverter,
    quality: u8,
) -> Result<Vec<u8>> {
    match converter {
        CardConverter::Builtin => convert_builtin(svg, format, quality),
        CardConverter::Magick => convert_magick(svg, format),
        CardConverter::Ffmpeg => convert_ffmpeg(svg, format),
    }
}

/// Convert using built-in Rust libraries (usvg + resvg + image)
fn convert_builtin(svg: &str, format: &CardFormat, quality: u8) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb = FONTDB.clone();
    let tree = usvg::Tree::from_str(svg, &options)
        .context("Failed to parse rendered card as SVG")?;

    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        anyhow::bail!("Invalid template dimensions: {}x{}", size.width(), size.height());
    }

    let mut pixmap = tiny_skia::Pixmap::new(CARD_WIDTH, CARD_HEIGHT)
        .context("Failed to allocate card pixmap")?;

    // Scale whatever the template declares onto the fixed card resolution
    #[allow(clippy::cast_precision_loss)]
    let transform = tiny_skia::Transform::from_scale(
        CARD_WIDTH as f32 / size.width(),
        CARD_HEIGHT as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    encode_pixmap(&pixmap, format, quality)
}

/// Encode rendered pixels to the target format
fn encode_pixmap(pixmap: &tiny_skia::Pixmap, format: &CardFormat, quality: u8) -> Result<Vec<u8>> {
    // tiny-skia stores premultiplied alpha; the encoders want straight alpha
    let mut rgba = Vec::with_capacity((pixmap.width() * pixmap.height() * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .context("Pixel buffer does not match card dimensions")?;
    let img = image::DynamicImage::ImageRgba8(img);

    let mut out = Cursor::new(Vec::new());
    match format {
        CardFormat::PNG => img
            .write_to(&mut out, image::ImageFormat::Png)
            .context("PNG encoding failed")?,
        CardFormat::JPG => {
            // JPEG has no alpha channel
            JpegEncoder::new_with_quality(&mut out, quality)
                .encode_image(&img.to_rgb8())
                .context("JPEG encoding failed")?;
        }
        CardFormat::WEBP => img
            .write_to(&mut out, image::ImageFormat::WebP)
            .context("WebP encoding failed")?,
    }

    Ok(out.into_inner())
}

/// Convert using ImageMagick
fn convert_magick(svg: &str, format: &CardFormat) -> Result<Vec<u8>> {
    let resize = format!("{CARD_WIDTH}x{CARD_HEIGHT}!");
    let format_arg = format!("{}:-", format.extension());

    let output = Cmd::new("magick")
        .args(["-background", "none", "-", "-resize", &resize, &format_arg])
        .stdin(svg.as_bytes())
        .run()
        .context("ImageMagick conversion failed")?;

    Ok(output.stdout)
}

/// Convert using FFmpeg
fn convert_ffmpeg(svg: &str, format: &CardFormat) -> Result<Vec<u8>> {
    let scale = format!("scale={CARD_WIDTH}:{CARD_HEIGHT}");
    let format_args: &[&str] = match format {
        CardFormat::PNG => &["-f", "image2pipe", "-c:v", "png"],
        CardFormat::JPG => &["-c:v", "mjpeg", "-f", "image2pipe"],
        CardFormat::WEBP => &["-c:v", "libwebp", "-f", "webp"],
    };

    let output = Cmd::new("ffmpeg")
        .args(["-f", "svg_pipe", "-i", "pipe:", "-vf", &scale])
        .args(format_args)
        .arg("pipe:1")
        .stdin(svg.as_bytes())
        .run()
        .context("FFmpeg conversion failed")?;

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="720" height="405" viewBox="0 0 720 405"><rect width="720" height="405" fill="#102030"/></svg>"##;

    #[test]
    fn test_builtin_png_fixed_resolution() {
        // Output is always 1440x810, regardless of the template's own size
        let bytes = rasterize(MINIMAL_SVG, &CardFormat::PNG, &CardConverter::Builtin, 90).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), CARD_WIDTH);
        assert_eq!(img.height(), CARD_HEIGHT);
    }

    #[test]
    fn test_builtin_jpeg() {
        let bytes = rasterize(MINIMAL_SVG, &CardFormat::JPG, &CardConverter::Builtin, 80).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), CARD_WIDTH);
        assert_eq!(img.height(), CARD_HEIGHT);
    }

    #[test]
    fn test_builtin_rejects_malformed_svg() {
        let result = rasterize("<svg", &CardFormat::PNG, &CardConverter::Builtin, 90);
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_rejects_non_svg() {
        let result = rasterize(
            "this is not an svg document",
            &CardFormat::PNG,
            &CardConverter::Builtin,
            90,
        );
        assert!(result.is_err());
    }
}
