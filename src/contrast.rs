//! Conservative WCAG contrast estimates for page text and card text.
//!
//! Both estimates assume the underlying background could be pure white, so they bound the
//! worst case: a pass holds for any image, a fail is advisory.

use std::fmt;

use serde::Serialize;

use crate::foundation::core::Color;
use crate::scene::params::{clamp_card_opacity, clamp_overlay_alpha};

/// Minimum ratio for WCAG AA body text.
pub const WCAG_AA: f64 = 4.5;
/// Minimum ratio for WCAG AAA body text.
pub const WCAG_AAA: f64 = 7.0;

/// A contrast ratio with its AA/AAA verdicts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    /// `(L1 + 0.05) / (L2 + 0.05)` with `L1 >= L2`.
    pub ratio: f64,
    /// `ratio >= 4.5`.
    pub passes_aa: bool,
    /// `ratio >= 7.0`.
    pub passes_aaa: bool,
}

impl ContrastReport {
    /// Report for two relative luminances, in any order.
    pub fn from_luminances(a: f64, b: f64) -> Self {
        Self::from_ratio(contrast_ratio(a, b))
    }

    fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            passes_aa: ratio >= WCAG_AA,
            passes_aaa: ratio >= WCAG_AAA,
        }
    }

    /// Short grade label: `AAA`, `AA` or `fail`.
    pub fn grade(&self) -> &'static str {
        if self.passes_aaa {
            "AAA"
        } else if self.passes_aa {
            "AA"
        } else {
            "fail"
        }
    }
}

impl fmt::Display for ContrastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:1 ({})", self.ratio, self.grade())
    }
}

/// Text color picked for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    /// `#ffffff`.
    White,
    /// `#000000`.
    Black,
}

impl TextColor {
    /// The concrete color.
    pub fn color(self) -> Color {
        match self {
            Self::White => Color::WHITE,
            Self::Black => Color::BLACK,
        }
    }
}

/// Card text decision plus both candidate ratios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardContrast {
    /// Color with the higher ratio (white wins ties).
    pub text_color: TextColor,
    /// Report for the chosen color.
    pub report: ContrastReport,
    /// Ratio of white text on the composited card.
    pub ratio_white: f64,
    /// Ratio of black text on the composited card.
    pub ratio_black: f64,
    /// Composited card luminance.
    pub card_luminance: f64,
}

/// WCAG contrast ratio for two relative luminances.
pub fn contrast_ratio(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    (hi + 0.05) / (lo + 0.05)
}

/// Perceived luminance `0.299R + 0.587G + 0.114B` with channels normalized to `[0, 1]`.
pub fn weighted_luminance(color: Color) -> f64 {
    let n = |c: u8| f64::from(c) / 255.0;
    0.299 * n(color.r) + 0.587 * n(color.g) + 0.114 * n(color.b)
}

/// Brightest luminance a background can have under the darkness overlay.
pub fn luminance_under_overlay(overlay_alpha: f64) -> f64 {
    1.0 - clamp_overlay_alpha(overlay_alpha)
}

/// Minimum guaranteed contrast of white page text under the overlay.
pub fn estimate_min_contrast_from_overlay(overlay_alpha: f64) -> ContrastReport {
    ContrastReport::from_luminances(1.0, luminance_under_overlay(overlay_alpha))
}

/// Pick black or white card text for a translucent card over the overlay.
///
/// The card is blended as `opacity * card + (1 - opacity) * under`; this order fixes where
/// the white/black decision flips.
pub fn estimate_card_contrast(
    overlay_alpha: f64,
    card_opacity: f64,
    card_color: Color,
) -> CardContrast {
    let under = luminance_under_overlay(overlay_alpha);
    let opacity = clamp_card_opacity(card_opacity);
    let card_luminance = opacity * weighted_luminance(card_color) + (1.0 - opacity) * under;

    let ratio_white = contrast_ratio(1.0, card_luminance);
    let ratio_black = contrast_ratio(0.0, card_luminance);
    let (text_color, ratio) = if ratio_white >= ratio_black {
        (TextColor::White, ratio_white)
    } else {
        (TextColor::Black, ratio_black)
    };

    CardContrast {
        text_color,
        report: ContrastReport::from_ratio(ratio),
        ratio_white,
        ratio_black,
        card_luminance,
    }
}

#[cfg(test)]
#[path = "../tests/unit/contrast/estimate.rs"]
mod tests;
