use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::composite::over;

/// Largest surface edge accepted for rendering.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// CPU pixel buffer in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl Surface {
    pub(crate) fn new(width: u32, height: u32) -> BackdropResult<Self> {
        if width == 0 || height == 0 {
            return Err(BackdropError::validation("surface width/height must be > 0"));
        }
        if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
            return Err(BackdropError::validation(format!(
                "surface {width}x{height} exceeds {MAX_SURFACE_DIM}px per side"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BackdropError::validation("surface size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub(crate) fn filled(width: u32, height: u32, color: Rgba8Premul) -> BackdropResult<Self> {
        let mut s = Self::new(width, height)?;
        s.fill(color);
        Ok(s)
    }

    pub(crate) fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Draw `img` scaled into `dest`; with `tile`, repeat it in both directions across the
    /// whole surface using `dest` as the tile cell.
    pub(crate) fn draw_image(&mut self, img: &PreparedImage, dest: Rect, tile: bool) {
        let (dw, dh) = (dest.width(), dest.height());
        if img.width == 0 || img.height == 0 {
            return;
        }
        if dw.is_nan() || dh.is_nan() || dw <= 0.0 || dh <= 0.0 {
            return;
        }
        let sx_scale = f64::from(img.width) / dw;
        let sy_scale = f64::from(img.height) / dh;

        let (x_range, y_range) = if tile {
            (0..self.width, 0..self.height)
        } else {
            let x0 = dest.x0.max(0.0).floor() as u32;
            let y0 = dest.y0.max(0.0).floor() as u32;
            let x1 = (dest.x1.ceil().max(0.0) as u32).min(self.width);
            let y1 = (dest.y1.ceil().max(0.0) as u32).min(self.height);
            (x0..x1, y0..y1)
        };

        for y in y_range {
            let cy = f64::from(y) + 0.5;
            if !tile && (cy < dest.y0 || cy >= dest.y1) {
                continue;
            }
            let mut v = (cy - dest.y0) * sy_scale;
            if tile {
                v = v.rem_euclid(f64::from(img.height));
            }
            for x in x_range.clone() {
                let cx = f64::from(x) + 0.5;
                if !tile && (cx < dest.x0 || cx >= dest.x1) {
                    continue;
                }
                let mut u = (cx - dest.x0) * sx_scale;
                if tile {
                    u = u.rem_euclid(f64::from(img.width));
                }
                let src = sample_bilinear(img, u, v, tile);
                let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                let dst = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                self.data[i..i + 4].copy_from_slice(&over(dst, src, 1.0));
            }
        }
    }

    /// Copy columns `x0..x1` from `src`, which must share this surface's size.
    pub(crate) fn copy_columns_from(&mut self, src: &Surface, x0: u32, x1: u32) {
        if src.width != self.width || src.height != self.height {
            return;
        }
        let x1 = x1.min(self.width);
        if x0 >= x1 {
            return;
        }
        let row = (self.width as usize) * 4;
        let (a, b) = ((x0 as usize) * 4, (x1 as usize) * 4);
        for y in 0..self.height as usize {
            let start = y * row;
            self.data[start + a..start + b].copy_from_slice(&src.data[start + a..start + b]);
        }
    }
}

fn sample_bilinear(img: &PreparedImage, u: f64, v: f64, wrap: bool) -> [u8; 4] {
    let w = img.width as i64;
    let h = img.height as i64;
    let fx = u - 0.5;
    let fy = v - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let index = |x: i64, y: i64| -> usize {
        let (x, y) = if wrap {
            (x.rem_euclid(w), y.rem_euclid(h))
        } else {
            (x.clamp(0, w - 1), y.clamp(0, h - 1))
        };
        ((y * w + x) as usize) * 4
    };

    let (x0, y0) = (x0 as i64, y0 as i64);
    let taps = [
        (index(x0, y0), (1.0 - tx) * (1.0 - ty)),
        (index(x0 + 1, y0), tx * (1.0 - ty)),
        (index(x0, y0 + 1), (1.0 - tx) * ty),
        (index(x0 + 1, y0 + 1), tx * ty),
    ];

    let px = &img.rgba8_premul;
    let mut out = [0u8; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let acc: f64 = taps
            .iter()
            .map(|&(i, wgt)| f64::from(px[i + c]) * wgt)
            .sum();
        *o = acc.round().clamp(0.0, 255.0) as u8;
    }
    // Bilinear mixing can push a color channel past alpha by rounding.
    let a = out[3];
    for c in out.iter_mut().take(3) {
        *c = (*c).min(a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
