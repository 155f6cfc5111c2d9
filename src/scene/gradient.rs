use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::foundation::core::Color;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Geometry of a procedural gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum GradientShape {
    /// `linear-gradient(<direction>, ...)`; `direction` may be empty.
    Linear {
        /// Direction text such as `135deg` or `to right`.
        direction: String,
    },
    /// `radial-gradient(<shape>, ...)`; `shape` may be empty.
    Radial {
        /// Shape text such as `circle` or `ellipse at top`.
        shape: String,
    },
}

/// One color stop of a gradient.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    /// Stop color.
    pub color: Color,
    /// Optional position text (`40%`, `120px`).
    pub position: Option<String>,
}

impl ColorStop {
    /// Stop without an explicit position.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            position: None,
        }
    }

    /// Stop with an explicit position.
    pub fn at(color: Color, position: impl Into<String>) -> Self {
        Self {
            color,
            position: Some(position.into()),
        }
    }
}

/// Procedural background: a shape plus ordered color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDef {
    /// Linear or radial geometry.
    pub shape: GradientShape,
    /// Ordered color stops.
    pub stops: Vec<ColorStop>,
}

impl GradientDef {
    /// Linear gradient along `direction`.
    pub fn linear(direction: impl Into<String>, stops: Vec<ColorStop>) -> Self {
        Self {
            shape: GradientShape::Linear {
                direction: direction.into(),
            },
            stops,
        }
    }

    /// Radial gradient with the given shape text.
    pub fn radial(shape: impl Into<String>, stops: Vec<ColorStop>) -> Self {
        Self {
            shape: GradientShape::Radial {
                shape: shape.into(),
            },
            stops,
        }
    }

    /// Whether the gradient is radial.
    pub fn is_radial(&self) -> bool {
        matches!(self.shape, GradientShape::Radial { .. })
    }

    /// CSS gradient function text.
    pub fn to_css(&self) -> String {
        let (func, lead) = match &self.shape {
            GradientShape::Linear { direction } => ("linear-gradient", direction.trim()),
            GradientShape::Radial { shape } => ("radial-gradient", shape.trim()),
        };
        let mut args: Vec<String> = Vec::with_capacity(self.stops.len() + 1);
        if !lead.is_empty() {
            args.push(lead.to_owned());
        }
        for stop in &self.stops {
            match stop.position.as_deref().map(str::trim) {
                Some(pos) if !pos.is_empty() => args.push(format!("{} {pos}", stop.color.to_css())),
                _ => args.push(stop.color.to_css()),
            }
        }
        format!("{func}({})", args.join(", "))
    }

    /// Parse CSS gradient text (`linear-gradient(...)`, `radial-gradient(...)` and their
    /// `repeating-` forms). Stops whose color cannot be parsed are dropped.
    pub fn from_css(text: &str) -> BackdropResult<Self> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();
        let open = lower
            .find('(')
            .ok_or_else(|| BackdropError::validation("gradient text has no argument list"))?;
        let func = lower[..open].trim();
        let radial = match func.trim_start_matches("repeating-") {
            "linear-gradient" => false,
            "radial-gradient" => true,
            other => {
                return Err(BackdropError::validation(format!(
                    "unsupported gradient function \"{other}\""
                )));
            }
        };
        let inner = text[open + 1..]
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| BackdropError::validation("gradient text is not closed"))?;

        let mut args = split_top_level(inner).into_iter().peekable();
        let mut lead = String::new();
        if let Some(first) = args.peek()
            && parse_stop(first).is_none()
        {
            lead = first.to_string();
            args.next();
        }
        let stops = args.filter_map(parse_stop).collect();

        Ok(Self {
            shape: if radial {
                GradientShape::Radial { shape: lead }
            } else {
                GradientShape::Linear { direction: lead }
            },
            stops,
        })
    }

    /// Direction of a linear gradient in CSS degrees (0 points up, 90 points right).
    ///
    /// Unknown or empty directions resolve to the CSS default of `to bottom` (180).
    pub fn angle_deg(&self) -> f64 {
        let GradientShape::Linear { direction } = &self.shape else {
            return 180.0;
        };
        parse_direction(direction).unwrap_or(180.0)
    }
}

fn parse_direction(direction: &str) -> Option<f64> {
    let d = direction.trim().to_ascii_lowercase();
    if let Some(sides) = d.strip_prefix("to ") {
        let mut words: Vec<&str> = sides.split_whitespace().collect();
        words.sort_unstable();
        return match words.as_slice() {
            ["top"] => Some(0.0),
            ["right"] => Some(90.0),
            ["bottom"] => Some(180.0),
            ["left"] => Some(270.0),
            ["right", "top"] => Some(45.0),
            ["bottom", "right"] => Some(135.0),
            ["bottom", "left"] => Some(225.0),
            ["left", "top"] => Some(315.0),
            _ => None,
        };
    }
    let units: [(&str, f64); 4] = [
        ("deg", 1.0),
        ("grad", 0.9),
        ("rad", 180.0 / std::f64::consts::PI),
        ("turn", 360.0),
    ];
    for (suffix, factor) in units {
        if let Some(num) = d.strip_suffix(suffix) {
            if let Ok(v) = num.trim().parse::<f64>()
                && v.is_finite()
            {
                return Some(v * factor);
            }
        }
    }
    None
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                out.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn parse_stop(arg: &str) -> Option<ColorStop> {
    let arg = arg.trim();
    let split_at = if arg.contains('(') {
        arg.find(')')? + 1
    } else {
        arg.find(char::is_whitespace).unwrap_or(arg.len())
    };
    let color = parse_color(&arg[..split_at]).ok()?;
    let rest = arg[split_at..].trim();
    Some(ColorStop {
        color,
        position: (!rest.is_empty()).then(|| rest.to_owned()),
    })
}

impl Serialize for GradientDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for GradientDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StopRepr {
            Bare(Color),
            Obj {
                color: Color,
                #[serde(default)]
                position: Option<String>,
            },
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Obj {
                #[serde(default)]
                radial: bool,
                #[serde(default)]
                direction: String,
                stops: Vec<StopRepr>,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => Self::from_css(&s).map_err(serde::de::Error::custom),
            Repr::Obj {
                radial,
                direction,
                stops,
            } => {
                let stops = stops
                    .into_iter()
                    .map(|s| match s {
                        StopRepr::Bare(color) => ColorStop::new(color),
                        StopRepr::Obj { color, position } => ColorStop { color, position },
                    })
                    .collect();
                Ok(if radial {
                    Self::radial(direction, stops)
                } else {
                    Self::linear(direction, stops)
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/gradient.rs"]
mod tests;
