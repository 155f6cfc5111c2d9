use std::io::Cursor;

use anyhow::Context;

use crate::assets::decode::{PreparedSource, rasterize_svg, rasterize_svg_region};
use crate::assets::loader::PixelSourceLoader;
use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::geometry::resolve_draw_rect;
use crate::render::blur::blur_css_px;
use crate::render::composite::{fill_over_in_place, unpremultiply};
use crate::render::gradient::paint_gradient;
use crate::render::surface::{MAX_SURFACE_DIM, Surface};
use crate::scene::model::{BackgroundEntry, BackgroundKind};
use crate::scene::params::DisplayParams;

/// Base fill under every background layer (straight RGBA8).
pub const DEFAULT_CLEAR_RGBA: [u8; 4] = [18, 20, 28, 255];

/// Split-compare slots. Any set slot turns the export into a left/right split.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompareSlots<'a> {
    /// Entry drawn in the left half.
    pub left: Option<&'a BackgroundEntry>,
    /// Entry drawn in the right half.
    pub right: Option<&'a BackgroundEntry>,
    /// Draw `left` on the right and `right` on the left.
    pub swapped: bool,
}

impl CompareSlots<'_> {
    /// Whether split rendering is in effect.
    pub fn is_active(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Everything needed to rasterize one frame of the preview.
#[derive(Clone, Copy, Debug)]
pub struct RasterExportRequest<'a> {
    /// Active background, or `None` for the neutral surface.
    pub primary: Option<&'a BackgroundEntry>,
    /// Optional split-compare slots.
    pub compare: CompareSlots<'a>,
    /// Display parameters; clamped before use.
    pub params: DisplayParams,
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Base fill under the background (straight RGBA8).
    pub clear_rgba: [u8; 4],
}

impl<'a> RasterExportRequest<'a> {
    /// Single-background request with the default base fill.
    pub fn new(primary: Option<&'a BackgroundEntry>, params: DisplayParams, canvas: Canvas) -> Self {
        Self {
            primary,
            compare: CompareSlots::default(),
            params,
            canvas,
            clear_rgba: DEFAULT_CLEAR_RGBA,
        }
    }

    /// Same request rendered as a split compare.
    pub fn with_compare(self, compare: CompareSlots<'a>) -> Self {
        Self { compare, ..self }
    }
}

/// Rendered pixels before encoding.
#[derive(Clone, Debug)]
pub struct RenderedSurface {
    /// Premultiplied RGBA8 surface.
    pub surface: Surface,
    /// Pixel sources that failed to load or decode and were left out.
    pub skipped_sources: usize,
}

/// PNG-encoded export.
#[derive(Clone, Debug)]
pub struct RasterExport {
    /// Encoded size.
    pub canvas: Canvas,
    /// PNG file bytes.
    pub png: Vec<u8>,
    /// Pixel sources that failed to load or decode and were left out.
    pub skipped_sources: usize,
}

/// Rasterize the request into a premultiplied surface.
///
/// Only an unusable canvas size is an error. Sources that fail to load are logged, counted
/// and skipped.
pub fn render_surface(
    request: &RasterExportRequest<'_>,
    loader: &mut dyn PixelSourceLoader,
) -> BackdropResult<RenderedSurface> {
    let Canvas { width, height } = request.canvas;
    if width == 0 || height == 0 || width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(BackdropError::validation(format!(
            "export canvas {width}x{height} must be within 1..={MAX_SURFACE_DIM} per side"
        )));
    }

    let params = request.params.clamped();
    let clear = {
        let [r, g, b, a] = request.clear_rgba;
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    };
    let mut skipped = 0usize;

    let mut surface = if request.compare.is_active() {
        let mut left = request.compare.left.or(request.primary);
        let mut right = request.compare.right.or(request.primary);
        if request.compare.swapped {
            std::mem::swap(&mut left, &mut right);
        }
        tracing::debug!(
            left = left.map(|e| e.id.as_str()),
            right = right.map(|e| e.id.as_str()),
            "split compare"
        );

        let mut out = paint_layer(left, &params, request.canvas, clear, loader, &mut skipped)?;
        let right_layer = paint_layer(right, &params, request.canvas, clear, loader, &mut skipped)?;
        out.copy_columns_from(&right_layer, width / 2, width);
        out
    } else {
        paint_layer(
            request.primary,
            &params,
            request.canvas,
            clear,
            loader,
            &mut skipped,
        )?
    };

    fill_over_in_place(
        &mut surface.data,
        Rgba8Premul::from_straight_rgba(0, 0, 0, 255),
        params.overlay_alpha as f32,
    );

    Ok(RenderedSurface {
        surface,
        skipped_sources: skipped,
    })
}

/// Rasterize the request and encode it as PNG.
#[tracing::instrument(skip_all, fields(width = request.canvas.width, height = request.canvas.height))]
pub fn export_raster(
    request: &RasterExportRequest<'_>,
    loader: &mut dyn PixelSourceLoader,
) -> BackdropResult<RasterExport> {
    let rendered = render_surface(request, loader)?;
    let png = encode_png(&rendered.surface)?;
    tracing::debug!(
        bytes = png.len(),
        skipped = rendered.skipped_sources,
        "encoded png"
    );
    Ok(RasterExport {
        canvas: request.canvas,
        png,
        skipped_sources: rendered.skipped_sources,
    })
}

/// Encode a premultiplied surface as a straight-alpha PNG.
pub fn encode_png(surface: &Surface) -> BackdropResult<Vec<u8>> {
    let mut straight = Vec::with_capacity(surface.data.len());
    for px in surface.data.chunks_exact(4) {
        straight.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
    }
    let img = image::RgbaImage::from_raw(surface.width, surface.height, straight)
        .ok_or_else(|| BackdropError::validation("surface buffer does not match its size"))?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(bytes)
}

fn paint_layer(
    entry: Option<&BackgroundEntry>,
    params: &DisplayParams,
    canvas: Canvas,
    clear: Rgba8Premul,
    loader: &mut dyn PixelSourceLoader,
    skipped: &mut usize,
) -> BackdropResult<Surface> {
    let mut layer = Surface::filled(canvas.width, canvas.height, clear)?;
    let Some(entry) = entry else {
        return Ok(layer);
    };

    match &entry.kind {
        BackgroundKind::Image { pixel_source } => {
            if let Err(err) = draw_pixel_source(&mut layer, pixel_source, params, loader) {
                tracing::warn!(id = %entry.id, error = %err, "skipping undecodable pixel source");
                *skipped += 1;
            }
        }
        BackgroundKind::Procedural { gradient } => paint_gradient(&mut layer, gradient),
    }

    if params.blur_radius_px > 0.0 {
        layer.data = blur_css_px(&layer.data, layer.width, layer.height, params.blur_radius_px)?;
    }
    Ok(layer)
}

fn draw_pixel_source(
    layer: &mut Surface,
    pixel_source: &str,
    params: &DisplayParams,
    loader: &mut dyn PixelSourceLoader,
) -> BackdropResult<()> {
    let source = loader.load(pixel_source)?;
    let (sw, sh) = source.intrinsic_size();
    let rect = resolve_draw_rect(
        sw,
        sh,
        f64::from(layer.width),
        f64::from(layer.height),
        params.fit,
        params.anchor,
    );
    if rect.area() <= 0.0 {
        return Ok(());
    }

    match source {
        PreparedSource::Raster(img) => layer.draw_image(&img, rect, params.repeat_tile),
        PreparedSource::Svg(svg) if params.repeat_tile => {
            // A tile cell never needs more pixels per axis than the canvas shows.
            let (rw, rh) = tile_raster_size(rect, layer.width, layer.height);
            let img = rasterize_svg(&svg, rw, rh)?;
            layer.draw_image(&img, rect, true);
        }
        PreparedSource::Svg(svg) => {
            let Some(visible) = visible_pixels(rect, layer.width, layer.height) else {
                return Ok(());
            };
            let region = visible - rect.origin().to_vec2();
            let img = rasterize_svg_region(&svg, rect.width(), rect.height(), region)?;
            layer.draw_image(&img, visible, false);
        }
    }
    Ok(())
}

/// Pixel-aligned part of `rect` that falls on a `width x height` canvas.
fn visible_pixels(rect: Rect, width: u32, height: u32) -> Option<Rect> {
    let x0 = rect.x0.floor().max(0.0);
    let y0 = rect.y0.floor().max(0.0);
    let x1 = rect.x1.ceil().min(f64::from(width));
    let y1 = rect.y1.ceil().min(f64::from(height));
    (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1, y1))
}

fn tile_raster_size(rect: Rect, width: u32, height: u32) -> (u32, u32) {
    let side = |v: f64, cap: u32| (v.round() as u32).clamp(1, cap.min(MAX_SURFACE_DIM));
    (side(rect.width(), width), side(rect.height(), height))
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
