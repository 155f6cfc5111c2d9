use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cards::{Card, generate_cards};
use crate::foundation::core::Color;
use crate::foundation::error::BackdropResult;
use crate::geometry::{Anchor, Fit};
use crate::scene::model::{BackgroundEntry, normalize_entries};
use crate::scene::params::{
    DisplayParams, clamp_blur_radius, clamp_card_opacity, clamp_overlay_alpha,
};
use crate::scene::presets::preset_backgrounds;
use crate::session::state::{DEFAULT_CARD_COUNT, SessionState};
use crate::viewport::{ViewportDescriptor, default_viewport, resolve_viewport_key};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile<'a> {
    backgrounds: &'a [BackgroundEntry],
    active_index: usize,
    #[serde(flatten)]
    params: DisplayParams,
    viewport: &'static str,
    rotated: bool,
    cards: &'a [Card],
}

/// Serialize a session as the flat camelCase JSON document.
pub fn session_to_json(state: &SessionState) -> BackdropResult<String> {
    let file = SessionFile {
        backgrounds: &state.backgrounds,
        active_index: state.active_index,
        params: state.params.clamped(),
        viewport: state.viewport.key,
        rotated: state.rotated,
        cards: &state.cards,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Load a session from JSON text. Never fails.
///
/// Unparseable text yields the default session. Otherwise every field is read on its own and
/// falls back to its default when missing or mistyped; entries are normalized, numbers are
/// clamped and legacy viewport forms are migrated.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn session_from_json_str(text: &str) -> SessionState {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => session_from_map(&map),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "session json is not an object; using defaults");
            SessionState::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "unparseable session json; using defaults");
            SessionState::default()
        }
    }
}

fn session_from_map(map: &Map<String, Value>) -> SessionState {
    let backgrounds = match map.get("backgrounds") {
        Some(Value::Array(items)) => normalize_entries(items.clone()),
        _ => Vec::new(),
    };
    let backgrounds = if backgrounds.is_empty() {
        tracing::debug!("no usable backgrounds; seeding presets");
        preset_backgrounds()
    } else {
        backgrounds
    };

    let active_index = map
        .get("activeIndex")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map_or(0, |v| v as usize)
        .min(backgrounds.len().saturating_sub(1));

    let defaults = DisplayParams::default();
    let params = DisplayParams {
        fit: field::<Fit>(map, "fit").unwrap_or(defaults.fit),
        repeat_tile: map
            .get("repeatTile")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.repeat_tile),
        anchor: field::<Anchor>(map, "anchor").unwrap_or(defaults.anchor),
        overlay_alpha: number(map, "overlayAlpha")
            .map_or(defaults.overlay_alpha, clamp_overlay_alpha),
        blur_radius_px: number(map, "blurRadiusPx")
            .map_or(defaults.blur_radius_px, clamp_blur_radius),
        card_opacity: number(map, "cardOpacity")
            .map_or(defaults.card_opacity, clamp_card_opacity),
        card_color: field::<Color>(map, "cardColor")
            .map_or(defaults.card_color, Color::opaque),
    };

    let (viewport, legacy_rotated) = viewport_from_map(map);
    let rotated = map
        .get("rotated")
        .and_then(Value::as_bool)
        .or(legacy_rotated)
        .unwrap_or(false);

    let cards: Vec<Card> = match map.get("cards") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| serde_json::from_value::<Card>(v.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };
    let cards = if cards.is_empty() {
        generate_cards(DEFAULT_CARD_COUNT)
    } else {
        cards
    };

    SessionState {
        backgrounds,
        active_index,
        params,
        viewport,
        rotated,
        cards,
    }
}

/// Resolve the viewport from `viewport` (string or legacy object) or legacy `viewportKey`.
///
/// Also returns the rotation flag carried by the legacy object form.
fn viewport_from_map(map: &Map<String, Value>) -> (&'static ViewportDescriptor, Option<bool>) {
    let mut rotated = None;
    let key = match map.get("viewport") {
        Some(Value::String(key)) => Some(key.as_str()),
        Some(Value::Object(obj)) => {
            rotated = obj.get("rotated").and_then(Value::as_bool);
            ["name", "key", "id"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_str))
        }
        _ => None,
    };
    let key = key.or_else(|| map.get("viewportKey").and_then(Value::as_str));

    let viewport = match key {
        Some(key) => resolve_viewport_key(key).unwrap_or_else(|| {
            tracing::warn!(key, "unknown viewport key; using default");
            default_viewport()
        }),
        None => default_viewport(),
    };
    (viewport, rotated)
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    match serde_json::from_value::<T>(value.clone()) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(field = key, error = %err, "ignoring malformed session field");
            None
        }
    }
}

fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/load.rs"]
mod tests;
