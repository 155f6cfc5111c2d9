use super::*;
use crate::scene::model::Provenance;

#[test]
fn empty_object_yields_default_params() {
    let s = session_from_json_str("{}");
    assert_eq!(s.params, DisplayParams::default());
    assert_eq!(s.backgrounds, preset_backgrounds());
    assert_eq!(s.active_index, 0);
    assert_eq!(s.viewport.key, "fluid");
    assert!(!s.rotated);
    assert_eq!(s.cards.len(), DEFAULT_CARD_COUNT);
}

#[test]
fn garbage_text_yields_defaults() {
    for text in ["", "not json", "[1,2,3]", "null", "42"] {
        let s = session_from_json_str(text);
        assert_eq!(s.params, DisplayParams::default(), "{text:?}");
        assert!(!s.backgrounds.is_empty());
    }
}

#[test]
fn mistyped_fields_fall_back_independently() {
    let s = session_from_json_str(
        r##"{
            "fit": 12,
            "repeatTile": "yes",
            "anchor": "right bottom",
            "overlayAlpha": "dark",
            "blurRadiusPx": 4,
            "cardOpacity": null,
            "cardColor": "#123456"
        }"##,
    );
    let d = DisplayParams::default();
    assert_eq!(s.params.fit, d.fit);
    assert_eq!(s.params.repeat_tile, d.repeat_tile);
    assert_eq!(s.params.anchor.to_string(), "right bottom");
    assert_eq!(s.params.overlay_alpha, d.overlay_alpha);
    assert_eq!(s.params.blur_radius_px, 4.0);
    assert_eq!(s.params.card_opacity, d.card_opacity);
    assert_eq!(s.params.card_color, Color::rgb(0x12, 0x34, 0x56));
}

#[test]
fn numbers_are_clamped() {
    let s = session_from_json_str(
        r#"{"overlayAlpha": 3, "blurRadiusPx": 99, "cardOpacity": -2}"#,
    );
    assert_eq!(s.params.overlay_alpha, 0.95);
    assert_eq!(s.params.blur_radius_px, 12.0);
    assert_eq!(s.params.card_opacity, 0.0);
}

#[test]
fn malformed_entries_are_dropped_and_index_clamped() {
    let s = session_from_json_str(
        r#"{
            "backgrounds": [
                {"id": "ok", "name": "Ok", "kind": "image", "pixelSource": "data:image/png;base64,AA"},
                {"id": "", "kind": "image", "pixelSource": "x.png"},
                {"id": "no-src", "kind": "image", "pixelSource": ""},
                "nonsense",
                {"id": "grad", "kind": "procedural", "gradient": "linear-gradient(#000, #fff)", "isFavorite": true}
            ],
            "activeIndex": 9
        }"#,
    );
    let ids: Vec<&str> = s.backgrounds.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["ok", "grad"]);
    assert_eq!(s.active_index, 1);
    assert!(!s.backgrounds[0].is_favorite);
    assert!(s.backgrounds[1].is_favorite);
}

#[test]
fn legacy_viewport_keys_migrate() {
    let cases = [
        (r#"{"viewport": "mobile"}"#, "phone"),
        (r#"{"viewport": "iphone"}"#, "phone"),
        (r#"{"viewport": "ipad"}"#, "tablet"),
        (r#"{"viewport": "macbook"}"#, "laptop"),
        (r#"{"viewport": "full"}"#, "fluid"),
        (r#"{"viewport": "auto"}"#, "fluid"),
        (r#"{"viewportKey": "ipad"}"#, "tablet"),
        (r#"{"viewport": "desktop"}"#, "desktop"),
        (r#"{"viewport": "toaster"}"#, "fluid"),
    ];
    for (text, expected) in cases {
        assert_eq!(session_from_json_str(text).viewport.key, expected, "{text}");
    }
}

#[test]
fn legacy_viewport_object_keeps_rotation() {
    let s = session_from_json_str(r#"{"viewport": {"name": "iphone", "rotated": true}}"#);
    assert_eq!(s.viewport.key, "phone");
    assert!(s.rotated);
    assert_eq!(s.export_canvas().width, 844);
}

#[test]
fn export_then_load_preserves_state() {
    let mut state = SessionState::default();
    state.backgrounds.push(BackgroundEntry::image(
        "upload-1",
        "photo",
        "data:image/png;base64,AAAA",
        Provenance::UserSupplied,
    ));
    state.active_index = state.backgrounds.len() - 1;
    state.params.overlay_alpha = 0.5;
    state.params.fit = Fit::Contain;
    state.rotated = true;

    let json = session_to_json(&state).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    for key in [
        "backgrounds",
        "activeIndex",
        "fit",
        "repeatTile",
        "anchor",
        "overlayAlpha",
        "blurRadiusPx",
        "cardOpacity",
        "cardColor",
        "viewport",
        "rotated",
        "cards",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }

    let loaded = session_from_json_str(&json);
    assert_eq!(loaded, state);
}
