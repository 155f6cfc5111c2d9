//! Declarative background style shared by the live surface and the CSS exporter.

use crate::geometry::{Anchor, Fit};
use crate::scene::model::{BackgroundEntry, BackgroundKind};
use crate::scene::params::{DisplayParams, clamp_blur_radius, clamp_overlay_alpha};

/// Image layer of a style descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundLayer {
    /// `url("...")` reference to an image source.
    Url(String),
    /// CSS gradient function text.
    Gradient(String),
}

impl BackgroundLayer {
    /// Value for the `background-image` property.
    pub fn to_css(&self) -> String {
        match self {
            Self::Url(src) => {
                let escaped = src.replace('\\', "\\\\").replace('"', "\\\"");
                format!("url(\"{escaped}\")")
            }
            Self::Gradient(text) => text.clone(),
        }
    }
}

/// Layered background description (image, size, repeat, position, blur).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDescriptor {
    /// Image or gradient; `None` is the neutral descriptor.
    pub layer: Option<BackgroundLayer>,
    /// `background-size`.
    pub size: Fit,
    /// `background-repeat: repeat` when set.
    pub repeat: bool,
    /// `background-position`.
    pub position: Anchor,
    /// Blur filter radius in pixels.
    pub blur_px: f64,
}

impl StyleDescriptor {
    /// Descriptor with no background layer.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// `background-image` value (`none` for the neutral descriptor).
    pub fn image_css(&self) -> String {
        self.layer
            .as_ref()
            .map_or_else(|| "none".to_owned(), BackgroundLayer::to_css)
    }

    /// `background-repeat` value.
    pub fn repeat_css(&self) -> &'static str {
        if self.repeat { "repeat" } else { "no-repeat" }
    }

    /// Property/value pairs for the live display surface.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("background-image", self.image_css()),
            ("background-size", self.size.as_css().to_owned()),
            ("background-repeat", self.repeat_css().to_owned()),
            ("background-position", self.position.to_string()),
        ];
        if self.blur_px > 0.0 {
            out.push(("filter", format!("blur({}px)", trim_float(self.blur_px))));
        }
        out
    }

    /// Declarations joined as an inline `style` attribute.
    pub fn to_inline_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn layer_for(entry: &BackgroundEntry) -> BackgroundLayer {
    match &entry.kind {
        BackgroundKind::Image { pixel_source } => BackgroundLayer::Url(pixel_source.clone()),
        BackgroundKind::Procedural { gradient } => BackgroundLayer::Gradient(gradient.to_css()),
    }
}

/// Build the style descriptor for `entry` under `params`. `None` yields the neutral descriptor.
pub fn build_background_style(
    entry: Option<&BackgroundEntry>,
    params: &DisplayParams,
) -> StyleDescriptor {
    let Some(entry) = entry else {
        return StyleDescriptor::neutral();
    };
    StyleDescriptor {
        layer: Some(layer_for(entry)),
        size: params.fit,
        repeat: params.repeat_tile,
        position: params.anchor,
        blur_px: clamp_blur_radius(params.blur_radius_px),
    }
}

/// Copy-paste CSS: a background rule plus a `::before` overlay rule.
pub fn css_snippet(
    entry: Option<&BackgroundEntry>,
    fit: Fit,
    repeat: bool,
    anchor: Anchor,
    overlay_alpha: f64,
) -> String {
    let params = DisplayParams {
        fit,
        repeat_tile: repeat,
        anchor,
        ..DisplayParams::default()
    };
    let style = build_background_style(entry, &params);
    let alpha = clamp_overlay_alpha(overlay_alpha);

    format!(
        "/* Background */\n\
         .selector {{\n  \
         background-image: {};\n  \
         background-size: {};\n  \
         background-repeat: {};\n  \
         background-position: {};\n  \
         position: relative;\n\
         }}\n\
         /* Overlay */\n\
         .selector::before {{\n  \
         content: \"\"; position: absolute; inset: 0;\n  \
         background: rgba(0,0,0,{alpha:.2});\n  \
         pointer-events: none;\n\
         }}\n",
        style.image_css(),
        style.size.as_css(),
        style.repeat_css(),
        style.position,
    )
}

#[cfg(test)]
#[path = "../tests/unit/style/snippet.rs"]
mod tests;
