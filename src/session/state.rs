use crate::cards::Card;
use crate::cards::generate_cards;
use crate::contrast::{
    CardContrast, ContrastReport, estimate_card_contrast, estimate_min_contrast_from_overlay,
};
use crate::foundation::core::{Canvas, Color};
use crate::geometry::{Anchor, Fit};
use crate::scene::model::BackgroundEntry;
use crate::scene::params::{
    DisplayParams, clamp_blur_radius, clamp_card_opacity, clamp_overlay_alpha,
};
use crate::scene::presets::preset_backgrounds;
use crate::style::{StyleDescriptor, build_background_style, css_snippet};
use crate::viewport::{ViewportDescriptor, default_viewport, resolve_viewport_key};

/// Number of cards in a fresh session.
pub const DEFAULT_CARD_COUNT: usize = 6;

/// Complete state of one preview session.
///
/// Values are never mutated in place; [`reduce`] returns the next state.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// Background catalogue in display order.
    pub backgrounds: Vec<BackgroundEntry>,
    /// Index of the active background; `0` when the catalogue is empty.
    pub active_index: usize,
    /// Display parameters, always clamped.
    pub params: DisplayParams,
    /// Selected device profile.
    pub viewport: &'static ViewportDescriptor,
    /// Swap the profile's width and height.
    pub rotated: bool,
    /// Current card batch.
    pub cards: Vec<Card>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            backgrounds: preset_backgrounds(),
            active_index: 0,
            params: DisplayParams::default(),
            viewport: default_viewport(),
            rotated: false,
            cards: generate_cards(DEFAULT_CARD_COUNT),
        }
    }
}

impl SessionState {
    /// The active background, if the catalogue is non-empty.
    pub fn active_entry(&self) -> Option<&BackgroundEntry> {
        self.backgrounds.get(self.active_index)
    }

    /// Entries marked as favorite, in catalogue order.
    pub fn favorites(&self) -> Vec<&BackgroundEntry> {
        self.backgrounds.iter().filter(|e| e.is_favorite).collect()
    }

    /// Pixel size of the PNG export for the current viewport.
    pub fn export_canvas(&self) -> Canvas {
        self.viewport.export_canvas(self.rotated)
    }

    /// Style for the live preview surface.
    pub fn style(&self) -> StyleDescriptor {
        build_background_style(self.active_entry(), &self.params)
    }

    /// CSS snippet for the active background.
    pub fn css_snippet(&self) -> String {
        css_snippet(
            self.active_entry(),
            self.params.fit,
            self.params.repeat_tile,
            self.params.anchor,
            self.params.overlay_alpha,
        )
    }

    /// Worst-case contrast of white page text.
    pub fn page_contrast(&self) -> ContrastReport {
        estimate_min_contrast_from_overlay(self.params.overlay_alpha)
    }

    /// Contrast estimate for text on the cards.
    pub fn card_contrast(&self) -> CardContrast {
        estimate_card_contrast(
            self.params.overlay_alpha,
            self.params.card_opacity,
            self.params.card_color,
        )
    }
}

/// A single state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Make the entry at this index active; out-of-range indices are ignored.
    SelectBackground(usize),
    /// Append entries; invalid entries and id collisions are skipped. The first appended
    /// entry becomes active.
    AddBackgrounds(Vec<BackgroundEntry>),
    /// Remove the entry with this id, whatever its provenance.
    RemoveBackground(String),
    /// Flip the favorite flag of the entry with this id.
    ToggleFavorite(String),
    /// Advance to the next background, wrapping around.
    NextBackground,
    /// Step back to the previous background, wrapping around.
    PreviousBackground,
    /// Set the fit mode.
    SetFit(Fit),
    /// Enable or disable tiling.
    SetRepeatTile(bool),
    /// Set the anchor.
    SetAnchor(Anchor),
    /// Set the overlay alpha (clamped).
    SetOverlayAlpha(f64),
    /// Set the blur radius (clamped).
    SetBlurRadius(f64),
    /// Set the card opacity (clamped).
    SetCardOpacity(f64),
    /// Set the card color (alpha dropped).
    SetCardColor(Color),
    /// Select a viewport by current or legacy key; unknown keys are ignored.
    SelectViewport(String),
    /// Set the rotation flag.
    SetRotated(bool),
    /// Flip the rotation flag.
    ToggleRotated,
    /// Replace the card batch wholesale.
    ReplaceCards(Vec<Card>),
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: SessionState, action: Action) -> SessionState {
    let mut next = state;
    match action {
        Action::SelectBackground(index) => {
            if index < next.backgrounds.len() {
                next.active_index = index;
            } else {
                tracing::debug!(index, len = next.backgrounds.len(), "ignoring out-of-range selection");
            }
        }
        Action::AddBackgrounds(entries) => {
            let mut first_added = None;
            for entry in entries {
                if let Err(err) = entry.validate() {
                    tracing::warn!(error = %err, "skipping invalid background");
                    continue;
                }
                if next.backgrounds.iter().any(|e| e.id == entry.id) {
                    tracing::debug!(id = %entry.id, "background already present");
                    continue;
                }
                first_added.get_or_insert(next.backgrounds.len());
                next.backgrounds.push(entry);
            }
            if let Some(index) = first_added {
                next.active_index = index;
            }
        }
        Action::RemoveBackground(id) => {
            if let Some(pos) = next.backgrounds.iter().position(|e| e.id == id) {
                next.backgrounds.remove(pos);
                if pos < next.active_index {
                    next.active_index -= 1;
                }
                next.active_index = next
                    .active_index
                    .min(next.backgrounds.len().saturating_sub(1));
            }
        }
        Action::ToggleFavorite(id) => {
            if let Some(entry) = next.backgrounds.iter_mut().find(|e| e.id == id) {
                entry.is_favorite = !entry.is_favorite;
            }
        }
        Action::NextBackground => {
            let len = next.backgrounds.len();
            if len > 0 {
                next.active_index = (next.active_index + 1) % len;
            }
        }
        Action::PreviousBackground => {
            let len = next.backgrounds.len();
            if len > 0 {
                next.active_index = (next.active_index + len - 1) % len;
            }
        }
        Action::SetFit(fit) => next.params.fit = fit,
        Action::SetRepeatTile(repeat) => next.params.repeat_tile = repeat,
        Action::SetAnchor(anchor) => next.params.anchor = anchor,
        Action::SetOverlayAlpha(v) => next.params.overlay_alpha = clamp_overlay_alpha(v),
        Action::SetBlurRadius(v) => next.params.blur_radius_px = clamp_blur_radius(v),
        Action::SetCardOpacity(v) => next.params.card_opacity = clamp_card_opacity(v),
        Action::SetCardColor(color) => next.params.card_color = color.opaque(),
        Action::SelectViewport(key) => match resolve_viewport_key(&key) {
            Some(viewport) => next.viewport = viewport,
            None => tracing::debug!(key = %key, "ignoring unknown viewport"),
        },
        Action::SetRotated(rotated) => next.rotated = rotated,
        Action::ToggleRotated => next.rotated = !next.rotated,
        Action::ReplaceCards(cards) => {
            if !cards.is_empty() {
                next.cards = cards;
            }
        }
    }
    next
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
