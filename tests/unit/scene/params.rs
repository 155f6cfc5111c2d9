use super::*;

#[test]
fn defaults_match_documented_values() {
    let p = DisplayParams::default();
    assert_eq!(p.fit, Fit::Cover);
    assert!(!p.repeat_tile);
    assert_eq!(p.anchor.to_string(), "center center");
    assert_eq!(p.overlay_alpha, 0.35);
    assert_eq!(p.blur_radius_px, 0.0);
    assert_eq!(p.card_opacity, 0.08);
    assert_eq!(p.card_color, Color::WHITE);
}

#[test]
fn clamped_pulls_values_into_range() {
    let p = DisplayParams {
        overlay_alpha: 1.5,
        blur_radius_px: -3.0,
        card_opacity: f64::NAN,
        card_color: Color::rgba(10, 20, 30, 5),
        ..DisplayParams::default()
    }
    .clamped();
    assert_eq!(p.overlay_alpha, OVERLAY_ALPHA_MAX);
    assert_eq!(p.blur_radius_px, 0.0);
    assert_eq!(p.card_opacity, 0.08);
    assert_eq!(p.card_color, Color::rgb(10, 20, 30));

    let p = DisplayParams {
        blur_radius_px: 40.0,
        ..DisplayParams::default()
    }
    .clamped();
    assert_eq!(p.blur_radius_px, BLUR_RADIUS_MAX_PX);
}

#[test]
fn serializes_camel_case_fields() {
    let v = serde_json::to_value(DisplayParams::default()).unwrap();
    assert_eq!(v["fit"], "cover");
    assert_eq!(v["repeatTile"], false);
    assert_eq!(v["anchor"], "center center");
    assert_eq!(v["overlayAlpha"], 0.35);
    assert_eq!(v["blurRadiusPx"], 0.0);
    assert_eq!(v["cardOpacity"], 0.08);
    assert_eq!(v["cardColor"], "#ffffff");
}
