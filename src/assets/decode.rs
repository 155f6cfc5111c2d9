use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rect;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Largest raster dimension produced from an SVG source.
const MAX_SVG_DIM: u32 = 16_384;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Parsed SVG, rasterized lazily at the size it is drawn.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// A decoded pixel source.
#[derive(Clone, Debug)]
pub enum PreparedSource {
    /// Bitmap formats handled by `image`.
    Raster(PreparedImage),
    /// Vector source handled by `usvg`/`resvg`.
    Svg(PreparedSvg),
}

impl PreparedSource {
    /// Natural size in pixels.
    pub fn intrinsic_size(&self) -> (f64, f64) {
        match self {
            Self::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            Self::Svg(svg) => {
                let size = svg.tree.size();
                (f64::from(size.width()), f64::from(size.height()))
            }
        }
    }
}

/// Decode bytes as SVG when the media type or content says so, otherwise as a bitmap.
pub fn decode_source(media_type: Option<&str>, bytes: &[u8]) -> BackdropResult<PreparedSource> {
    let declared_svg = media_type.is_some_and(|m| m.to_ascii_lowercase().contains("svg"));
    if declared_svg || looks_like_svg(bytes) {
        return Ok(PreparedSource::Svg(parse_svg(bytes)?));
    }
    Ok(PreparedSource::Raster(decode_image(bytes)?))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Decode a bitmap into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BackdropResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> BackdropResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Rasterize an SVG so that it fills exactly `width x height` pixels.
pub fn rasterize_svg(svg: &PreparedSvg, width: u32, height: u32) -> BackdropResult<PreparedImage> {
    rasterize_svg_region(
        svg,
        f64::from(width),
        f64::from(height),
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
    )
}

/// Rasterize only `region` of an SVG scaled to `full_width x full_height`.
///
/// `region` is in the scaled pixel space and is rounded to whole pixels; the output has one
/// pixel per unit of `region`.
pub fn rasterize_svg_region(
    svg: &PreparedSvg,
    full_width: f64,
    full_height: f64,
    region: Rect,
) -> BackdropResult<PreparedImage> {
    let width = region.width().round().max(0.0) as u32;
    let height = region.height().round().max(0.0) as u32;
    if width == 0 || height == 0 || width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(BackdropError::decode(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }
    if !(full_width.is_finite() && full_height.is_finite()) {
        return Err(BackdropError::decode("svg scale must be finite"));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BackdropError::decode("failed to allocate svg pixmap"))?;

    let size = svg.tree.size();
    let sx = (full_width as f32) / size.width();
    let sy = (full_height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_row(
        sx,
        0.0,
        0.0,
        sy,
        -(region.x0 as f32),
        -(region.y0 as f32),
    );

    resvg::render(&svg.tree, xform, &mut pixmap.as_mut());
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
