use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;
use crate::foundation::math::clamp_or;
use crate::geometry::{Anchor, Fit};

/// Upper bound of the darkness overlay slider.
pub const OVERLAY_ALPHA_MAX: f64 = 0.95;
/// Upper bound of the blur slider, in CSS pixels.
pub const BLUR_RADIUS_MAX_PX: f64 = 12.0;

pub(crate) const DEFAULT_OVERLAY_ALPHA: f64 = 0.35;
pub(crate) const DEFAULT_CARD_OPACITY: f64 = 0.08;

/// Settings applied uniformly to whichever background is active.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayParams {
    /// Image scaling mode.
    pub fit: Fit,
    /// Tile the image across the surface.
    pub repeat_tile: bool,
    /// Two-axis position.
    pub anchor: Anchor,
    /// Darkness overlay alpha in `[0, 0.95]`.
    pub overlay_alpha: f64,
    /// Gaussian blur radius in `[0, 12]` pixels.
    pub blur_radius_px: f64,
    /// Card panel opacity in `[0, 1]`.
    pub card_opacity: f64,
    /// Card panel color.
    pub card_color: Color,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            fit: Fit::Cover,
            repeat_tile: false,
            anchor: Anchor::default(),
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            blur_radius_px: 0.0,
            card_opacity: DEFAULT_CARD_OPACITY,
            card_color: Color::WHITE,
        }
    }
}

impl DisplayParams {
    /// Clamp every numeric field into its legal range; non-finite values take the default.
    pub fn clamped(self) -> Self {
        Self {
            overlay_alpha: clamp_overlay_alpha(self.overlay_alpha),
            blur_radius_px: clamp_blur_radius(self.blur_radius_px),
            card_opacity: clamp_card_opacity(self.card_opacity),
            card_color: self.card_color.opaque(),
            ..self
        }
    }
}

/// Clamp an overlay alpha into `[0, 0.95]`.
pub fn clamp_overlay_alpha(v: f64) -> f64 {
    clamp_or(v, 0.0, OVERLAY_ALPHA_MAX, DEFAULT_OVERLAY_ALPHA)
}

/// Clamp a blur radius into `[0, 12]`.
pub fn clamp_blur_radius(v: f64) -> f64 {
    clamp_or(v, 0.0, BLUR_RADIUS_MAX_PX, 0.0)
}

/// Clamp a card opacity into `[0, 1]`.
pub fn clamp_card_opacity(v: f64) -> f64 {
    clamp_or(v, 0.0, 1.0, DEFAULT_CARD_OPACITY)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;
