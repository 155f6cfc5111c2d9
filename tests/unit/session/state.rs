use super::*;
use crate::scene::model::Provenance;
use crate::scene::params::OVERLAY_ALPHA_MAX;

fn upload(id: &str) -> BackgroundEntry {
    BackgroundEntry::image(id, id, format!("data:image/png;base64,{id}"), Provenance::UserSupplied)
}

fn state_with(ids: &[&str]) -> SessionState {
    SessionState {
        backgrounds: ids.iter().map(|id| upload(id)).collect(),
        cards: Vec::new(),
        ..SessionState::default()
    }
}

#[test]
fn default_state_uses_presets_and_documented_params() {
    let s = SessionState::default();
    assert!(!s.backgrounds.is_empty());
    assert!(s.backgrounds.iter().all(|e| e.provenance == Provenance::Preset));
    assert_eq!(s.active_index, 0);
    assert_eq!(s.params, DisplayParams::default());
    assert_eq!(s.viewport.key, "fluid");
    assert_eq!(s.cards.len(), DEFAULT_CARD_COUNT);
    assert_eq!(s.export_canvas(), Canvas { width: 1440, height: 900 });
}

#[test]
fn add_selects_first_new_entry_and_skips_duplicates() {
    let s = state_with(&["a"]);
    let s = reduce(
        s,
        Action::AddBackgrounds(vec![upload("a"), upload("b"), upload("c")]),
    );
    let ids: Vec<&str> = s.backgrounds.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(s.active_index, 1);
}

#[test]
fn add_skips_invalid_entries_without_changing_selection() {
    let s = state_with(&["a", "b"]);
    let s = reduce(s, Action::SelectBackground(1));
    let s = reduce(s, Action::AddBackgrounds(vec![upload("")]));
    assert_eq!(s.backgrounds.len(), 2);
    assert_eq!(s.active_index, 1);
}

#[test]
fn remove_keeps_active_index_pointing_at_a_valid_entry() {
    let s = reduce(state_with(&["a", "b", "c"]), Action::SelectBackground(2));
    let s = reduce(s, Action::RemoveBackground("a".into()));
    assert_eq!(s.active_entry().map(|e| e.id.as_str()), Some("c"));

    let s = reduce(s, Action::RemoveBackground("c".into()));
    assert_eq!(s.active_entry().map(|e| e.id.as_str()), Some("b"));

    let s = reduce(s, Action::RemoveBackground("b".into()));
    assert!(s.active_entry().is_none());
    assert_eq!(s.active_index, 0);
}

#[test]
fn presets_can_be_removed() {
    let s = SessionState::default();
    let id = s.backgrounds[0].id.clone();
    let s = reduce(s, Action::RemoveBackground(id.clone()));
    assert!(s.backgrounds.iter().all(|e| e.id != id));
}

#[test]
fn select_out_of_range_is_ignored() {
    let s = reduce(state_with(&["a", "b"]), Action::SelectBackground(7));
    assert_eq!(s.active_index, 0);
}

#[test]
fn next_and_previous_wrap_around() {
    let s = state_with(&["a", "b", "c"]);
    let s = reduce(s, Action::PreviousBackground);
    assert_eq!(s.active_index, 2);
    let s = reduce(s, Action::NextBackground);
    assert_eq!(s.active_index, 0);

    let empty = reduce(state_with(&[]), Action::NextBackground);
    assert_eq!(empty.active_index, 0);
}

#[test]
fn favorites_follow_toggles() {
    let s = state_with(&["a", "b", "c"]);
    let s = reduce(s, Action::ToggleFavorite("b".into()));
    let s = reduce(s, Action::ToggleFavorite("c".into()));
    let s = reduce(s, Action::ToggleFavorite("c".into()));
    let favs: Vec<&str> = s.favorites().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(favs, ["b"]);
}

#[test]
fn setters_clamp() {
    let s = state_with(&["a"]);
    let s = reduce(s, Action::SetOverlayAlpha(2.0));
    let s = reduce(s, Action::SetBlurRadius(40.0));
    let s = reduce(s, Action::SetCardOpacity(-1.0));
    let s = reduce(s, Action::SetCardColor(Color::rgba(1, 2, 3, 4)));
    assert_eq!(s.params.overlay_alpha, OVERLAY_ALPHA_MAX);
    assert_eq!(s.params.blur_radius_px, 12.0);
    assert_eq!(s.params.card_opacity, 0.0);
    assert_eq!(s.params.card_color, Color::rgb(1, 2, 3));
}

#[test]
fn viewport_selection_accepts_legacy_keys_and_rotation() {
    let s = reduce(state_with(&["a"]), Action::SelectViewport("iphone".into()));
    assert_eq!(s.viewport.key, "phone");
    let s = reduce(s, Action::ToggleRotated);
    assert_eq!(s.export_canvas(), Canvas { width: 844, height: 390 });

    let s = reduce(s, Action::SelectViewport("watch".into()));
    assert_eq!(s.viewport.key, "phone");
}

#[test]
fn replace_cards_swaps_the_whole_batch() {
    let s = state_with(&["a"]);
    let batch = generate_cards(3);
    let s = reduce(s, Action::ReplaceCards(batch.clone()));
    assert_eq!(s.cards, batch);
}

#[test]
fn css_snippet_tracks_active_entry() {
    let s = SessionState::default();
    assert!(s.css_snippet().contains("linear-gradient("));
    let s = reduce(s, Action::SetOverlayAlpha(0.5));
    assert!(s.css_snippet().contains("rgba(0,0,0,0.50)"));
    assert_eq!(s.page_contrast().ratio, estimate_min_contrast_from_overlay(0.5).ratio);
}
