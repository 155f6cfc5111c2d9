use crate::color::{MAX_EXTRACTED_STOPS, extract_colors};
use crate::render::composite::over;
use crate::render::surface::Surface;
use crate::scene::gradient::{GradientDef, GradientShape};

/// Paint `gradient` over the whole surface.
///
/// Colors are recovered from the gradient's CSS text (up to six, in order) and spread evenly
/// along the gradient line. One color paints a flat fill; none leaves the surface untouched.
pub(crate) fn paint_gradient(surface: &mut Surface, gradient: &GradientDef) {
    let stops: Vec<[u8; 4]> = extract_colors(&gradient.to_css(), MAX_EXTRACTED_STOPS)
        .into_iter()
        .map(|c| c.to_premul().to_array())
        .collect();
    match stops.as_slice() {
        [] => {}
        [only] => paint_with(surface, |_, _| *only),
        _ => {
            let param = GradientParam::new(gradient, surface.width, surface.height);
            paint_with(surface, |x, y| sample_stops(&stops, param.t_at(x, y)));
        }
    }
}

fn paint_with(surface: &mut Surface, mut shade: impl FnMut(f64, f64) -> [u8; 4]) {
    for y in 0..surface.height {
        for x in 0..surface.width {
            let src = shade(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if let Some(dst) = surface.pixel(x, y) {
                surface.set_pixel(x, y, over(dst, src, 1.0));
            }
        }
    }
}

enum GradientParam {
    Linear {
        cx: f64,
        cy: f64,
        dx: f64,
        dy: f64,
        length: f64,
    },
    Radial {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
}

impl GradientParam {
    fn new(gradient: &GradientDef, width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let (cx, cy) = (w / 2.0, h / 2.0);
        match &gradient.shape {
            GradientShape::Linear { .. } => {
                let a = gradient.angle_deg().to_radians();
                let (dx, dy) = (a.sin(), -a.cos());
                let length = (w * dx).abs() + (h * dy).abs();
                Self::Linear {
                    cx,
                    cy,
                    dx,
                    dy,
                    length: length.max(f64::EPSILON),
                }
            }
            GradientShape::Radial { shape } => {
                let (rx, ry) = if shape.to_ascii_lowercase().contains("circle") {
                    let r = cx.hypot(cy);
                    (r, r)
                } else {
                    (cx * std::f64::consts::SQRT_2, cy * std::f64::consts::SQRT_2)
                };
                Self::Radial {
                    cx,
                    cy,
                    rx: rx.max(f64::EPSILON),
                    ry: ry.max(f64::EPSILON),
                }
            }
        }
    }

    fn t_at(&self, x: f64, y: f64) -> f64 {
        let t = match *self {
            Self::Linear {
                cx,
                cy,
                dx,
                dy,
                length,
            } => ((x - cx) * dx + (y - cy) * dy) / length + 0.5,
            Self::Radial { cx, cy, rx, ry } => ((x - cx) / rx).hypot((y - cy) / ry),
        };
        t.clamp(0.0, 1.0)
    }
}

fn sample_stops(stops: &[[u8; 4]], t: f64) -> [u8; 4] {
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let local = pos - i as f64;
    lerp_premul(stops[i], stops[i + 1], local)
}

fn lerp_premul(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
        let a = f64::from(a);
        let b = f64::from(b);
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    }
    [
        lerp_u8(a[0], b[0], t),
        lerp_u8(a[1], b[1], t),
        lerp_u8(a[2], b[2], t),
        lerp_u8(a[3], b[3], t),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
