//! CSS color token parsing and ordered color-stop extraction.
//!
//! Only the notations a background gradient realistically carries are understood: hex
//! (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()` and `hsl()`/`hsla()`. Named
//! colors are accepted by [`parse_color`] for a handful of common names but are never
//! extracted from gradient text.

use crate::foundation::core::Color;
use crate::foundation::math::unit_to_u8;

/// Upper bound on stops recovered from a gradient description for raster export.
pub const MAX_EXTRACTED_STOPS: usize = 6;

/// Parse a single CSS color token.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(open) = lower.find('(') {
        let name = lower[..open].trim();
        let Some(args) = lower[open + 1..].strip_suffix(')') else {
            return Err(format!("unterminated color function \"{s}\""));
        };
        return match name {
            "rgb" | "rgba" => parse_rgb_args(args),
            "hsl" | "hsla" => parse_hsl_args(args),
            _ => Err(format!("unsupported color function \"{name}\"")),
        };
    }
    match lower.as_str() {
        "white" => Ok(Color::WHITE),
        "black" => Ok(Color::BLACK),
        "transparent" => Ok(Color::rgba(0, 0, 0, 0)),
        _ => Err(format!("unrecognized color \"{s}\"")),
    }
}

/// Scan `text` for color tokens in order of appearance, keeping at most `max` of them.
///
/// Tokens that look like colors but fail to parse are skipped.
pub fn extract_colors(text: &str, max: usize) -> Vec<Color> {
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() && out.len() < max {
        if bytes[i] == b'#' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_hexdigit() {
                end += 1;
            }
            let boundary = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
            if boundary && let Ok(c) = parse_hex(&lower[start..end]) {
                out.push(c);
            }
            i = end.max(i + 1);
            continue;
        }

        if let Some(len) = color_function_at(&lower, i) {
            if let Ok(c) = parse_color(&lower[i..i + len]) {
                out.push(c);
            }
            i += len;
            continue;
        }

        i += lower[i..].chars().next().map_or(1, char::len_utf8);
    }
    out
}

/// Length of a `rgb(...)`/`rgba(...)`/`hsl(...)`/`hsla(...)` token starting at `at`.
fn color_function_at(lower: &str, at: usize) -> Option<usize> {
    const NAMES: [&str; 4] = ["rgba(", "rgb(", "hsla(", "hsl("];

    let rest = lower.get(at..)?;
    if at > 0 && lower.as_bytes()[at - 1].is_ascii_alphanumeric() {
        return None;
    }
    let name = NAMES.iter().find(|n| rest.starts_with(**n))?;
    let close = rest[name.len()..].find(')')?;
    Some(name.len() + close + 1)
}

fn parse_hex(hex: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }
    fn byte(pair: &[u8]) -> Result<u8, String> {
        Ok(nibble(pair[0])? << 4 | nibble(pair[1])?)
    }

    let b = hex.as_bytes();
    match b.len() {
        3 | 4 => {
            let r = nibble(b[0])? * 17;
            let g = nibble(b[1])? * 17;
            let bl = nibble(b[2])? * 17;
            let a = if b.len() == 4 { nibble(b[3])? * 17 } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        6 | 8 => {
            let r = byte(&b[0..2])?;
            let g = byte(&b[2..4])?;
            let bl = byte(&b[4..6])?;
            let a = if b.len() == 8 { byte(&b[6..8])? } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        _ => Err("hex color must have 3, 4, 6 or 8 digits".to_owned()),
    }
}

/// Split functional-notation arguments on commas, whitespace and `/`.
fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_number(tok: &str) -> Result<f64, String> {
    tok.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid number \"{tok}\""))
}

fn parse_alpha(tok: Option<&&str>) -> Result<f64, String> {
    let Some(tok) = tok else {
        return Ok(1.0);
    };
    match tok.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0),
        None => parse_number(tok),
    }
}

fn parse_rgb_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() < 3 || parts.len() > 4 {
        return Err("rgb() takes 3 or 4 arguments".to_owned());
    }
    let channel = |tok: &str| -> Result<u8, String> {
        let v = match tok.strip_suffix('%') {
            Some(p) => parse_number(p)? / 100.0 * 255.0,
            None => parse_number(tok)?,
        };
        Ok(v.clamp(0.0, 255.0).round() as u8)
    };
    Ok(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        unit_to_u8(parse_alpha(parts.get(3))?),
    ))
}

fn parse_hsl_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() < 3 || parts.len() > 4 {
        return Err("hsl() takes 3 or 4 arguments".to_owned());
    }
    let h = parse_number(parts[0].trim_end_matches("deg"))?;
    let pct = |tok: &str| -> Result<f64, String> {
        Ok(parse_number(tok.trim_end_matches('%'))? / 100.0)
    };
    let (r, g, b) = hsl_to_rgb(h, pct(parts[1])?, pct(parts[2])?);
    Ok(Color::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(parse_alpha(parts.get(3))?),
    ))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

#[cfg(test)]
#[path = "../tests/unit/color/parse.rs"]
mod tests;
