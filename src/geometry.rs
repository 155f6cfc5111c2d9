use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rect;
use crate::foundation::error::{BackdropError, BackdropResult};

/// How a source image is scaled into the destination box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Scale uniformly so the destination is fully covered.
    #[default]
    Cover,
    /// Scale uniformly so the whole image is visible.
    Contain,
    /// Native size, placed at the origin.
    Auto,
}

impl Fit {
    /// CSS `background-size` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

impl FromStr for Fit {
    type Err = BackdropError;

    fn from_str(s: &str) -> BackdropResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            "auto" => Ok(Self::Auto),
            other => Err(BackdropError::validation(format!("unknown fit \"{other}\""))),
        }
    }
}

/// Placement along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisAlign {
    /// Left or top edge.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Right or bottom edge.
    End,
}

impl AxisAlign {
    /// Offset of a `size`-long span inside a `dest`-long span.
    pub fn offset(self, dest: f64, size: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (dest - size) / 2.0,
            Self::End => dest - size,
        }
    }
}

/// Two-axis position keyword pair (`left top`, `center center`, `right bottom`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// Horizontal placement.
    pub x: AxisAlign,
    /// Vertical placement.
    pub y: AxisAlign,
}

impl Anchor {
    /// Anchor from explicit axis placements.
    pub const fn new(x: AxisAlign, y: AxisAlign) -> Self {
        Self { x, y }
    }

    /// The nine canonical positions in reading order.
    pub fn grid() -> [Anchor; 9] {
        use AxisAlign::{Center, End, Start};
        [
            Self::new(Start, Start),
            Self::new(Center, Start),
            Self::new(End, Start),
            Self::new(Start, Center),
            Self::new(Center, Center),
            Self::new(End, Center),
            Self::new(Start, End),
            Self::new(Center, End),
            Self::new(End, End),
        ]
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self.x {
            AxisAlign::Start => "left",
            AxisAlign::Center => "center",
            AxisAlign::End => "right",
        };
        let y = match self.y {
            AxisAlign::Start => "top",
            AxisAlign::Center => "center",
            AxisAlign::End => "bottom",
        };
        write!(f, "{x} {y}")
    }
}

impl FromStr for Anchor {
    type Err = BackdropError;

    /// Accepts one or two keywords in either order; missing axes default to `center`.
    fn from_str(s: &str) -> BackdropResult<Self> {
        let lower = s.to_ascii_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 2 {
            return Err(BackdropError::validation(format!(
                "anchor must be one or two keywords, got \"{s}\""
            )));
        }

        let mut x: Option<AxisAlign> = None;
        let mut y: Option<AxisAlign> = None;
        for tok in &tokens {
            let (slot, value) = match *tok {
                "left" => (&mut x, AxisAlign::Start),
                "right" => (&mut x, AxisAlign::End),
                "top" => (&mut y, AxisAlign::Start),
                "bottom" => (&mut y, AxisAlign::End),
                "center" => continue,
                other => {
                    return Err(BackdropError::validation(format!(
                        "unknown anchor keyword \"{other}\""
                    )));
                }
            };
            if slot.replace(value).is_some() {
                return Err(BackdropError::validation(format!(
                    "anchor \"{s}\" sets the same axis twice"
                )));
            }
        }

        Ok(Self {
            x: x.unwrap_or_default(),
            y: y.unwrap_or_default(),
        })
    }
}

impl Serialize for Anchor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Rectangle, in destination coordinates, at which one copy of the source is drawn.
///
/// Zero or non-finite dimensions yield [`Rect::ZERO`]; callers treat a zero-area result as
/// "draw nothing".
pub fn resolve_draw_rect(
    source_width: f64,
    source_height: f64,
    dest_width: f64,
    dest_height: f64,
    fit: Fit,
    anchor: Anchor,
) -> Rect {
    if !positive_finite(source_width) || !positive_finite(source_height) {
        return Rect::ZERO;
    }
    if !positive_finite(dest_width) || !positive_finite(dest_height) {
        return Rect::ZERO;
    }
    if fit == Fit::Auto {
        return Rect::new(0.0, 0.0, source_width, source_height);
    }

    // Aspect ratios compared by cross multiplication; the matched axis is the destination
    // size exactly.
    let lhs = source_width * dest_height;
    let rhs = dest_width * source_height;
    let (w, h) = if lhs == rhs {
        (dest_width, dest_height)
    } else {
        let source_is_wider = lhs > rhs;
        let match_height = match fit {
            Fit::Cover => source_is_wider,
            Fit::Contain | Fit::Auto => !source_is_wider,
        };
        if match_height {
            (source_width * dest_height / source_height, dest_height)
        } else {
            (dest_width, source_height * dest_width / source_width)
        }
    };

    let x = anchor.x.offset(dest_width, w);
    let y = anchor.y.offset(dest_height, h);
    Rect::new(x, y, x + w, y + h)
}

#[cfg(test)]
#[path = "../tests/unit/geometry/resolve.rs"]
mod tests;
