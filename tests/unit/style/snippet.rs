use super::*;
use crate::color::{MAX_EXTRACTED_STOPS, extract_colors};
use crate::foundation::core::Color;
use crate::geometry::AxisAlign;
use crate::scene::gradient::{ColorStop, GradientDef};
use crate::scene::model::Provenance;

fn gradient_entry(stops: Vec<ColorStop>) -> BackgroundEntry {
    BackgroundEntry::procedural(
        "g",
        "Gradient",
        GradientDef::linear("135deg", stops),
        Provenance::Preset,
    )
}

#[test]
fn neutral_descriptor_for_missing_entry() {
    let style = build_background_style(None, &DisplayParams::default());
    assert_eq!(style, StyleDescriptor::neutral());
    assert_eq!(style.image_css(), "none");
}

#[test]
fn image_entry_maps_params_through() {
    let entry = BackgroundEntry::image("i", "Photo", "data:image/png;base64,AAAA", Provenance::UserSupplied);
    let params = DisplayParams {
        fit: Fit::Contain,
        repeat_tile: true,
        anchor: Anchor::new(AxisAlign::End, AxisAlign::Start),
        blur_radius_px: 4.0,
        ..DisplayParams::default()
    };
    let style = build_background_style(Some(&entry), &params);
    assert_eq!(
        style.layer,
        Some(BackgroundLayer::Url("data:image/png;base64,AAAA".to_owned()))
    );
    assert_eq!(
        style.to_inline_css(),
        "background-image: url(\"data:image/png;base64,AAAA\"); background-size: contain; \
         background-repeat: repeat; background-position: right top; filter: blur(4px);"
    );
}

#[test]
fn blur_is_clamped_and_omitted_at_zero() {
    let entry = gradient_entry(vec![ColorStop::new(Color::WHITE)]);
    let params = DisplayParams {
        blur_radius_px: 99.0,
        ..DisplayParams::default()
    };
    let style = build_background_style(Some(&entry), &params);
    assert_eq!(style.blur_px, 12.0);

    let style = build_background_style(Some(&entry), &DisplayParams::default());
    assert!(style.declarations().iter().all(|(k, _)| *k != "filter"));
}

#[test]
fn url_quotes_are_escaped() {
    let layer = BackgroundLayer::Url(r#"a"b\c.png"#.to_owned());
    assert_eq!(layer.to_css(), r#"url("a\"b\\c.png")"#);
}

#[test]
fn snippet_has_exact_shape() {
    let entry = gradient_entry(vec![
        ColorStop::at(Color::rgb(0x1e, 0x3c, 0x72), "0%"),
        ColorStop::at(Color::rgb(0x2a, 0x52, 0x98), "100%"),
    ]);
    let css = css_snippet(Some(&entry), Fit::Cover, false, Anchor::default(), 0.35);
    let expected = "/* Background */
.selector {
  background-image: linear-gradient(135deg, #1e3c72 0%, #2a5298 100%);
  background-size: cover;
  background-repeat: no-repeat;
  background-position: center center;
  position: relative;
}
/* Overlay */
.selector::before {
  content: \"\"; position: absolute; inset: 0;
  background: rgba(0,0,0,0.35);
  pointer-events: none;
}
";
    assert_eq!(css, expected);
}

#[test]
fn snippet_alpha_has_two_decimals() {
    let css = css_snippet(None, Fit::Auto, true, Anchor::default(), 0.5);
    assert!(css.contains("rgba(0,0,0,0.50);"));
    assert!(css.contains("background-image: none;"));
    assert!(css.contains("background-repeat: repeat;"));

    let css = css_snippet(None, Fit::Auto, true, Anchor::default(), 0.0);
    assert!(css.contains("rgba(0,0,0,0.00);"));

    let css = css_snippet(None, Fit::Auto, true, Anchor::default(), 3.0);
    assert!(css.contains("rgba(0,0,0,0.95);"));
}

#[test]
fn gradient_stops_survive_style_and_snippet() {
    let colors = vec![
        Color::rgb(0x0f, 0x20, 0x27),
        Color::rgba(0x20, 0x3a, 0x43, 128),
        Color::rgb(0x2c, 0x53, 0x64),
        Color::rgb(255, 0, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 0, 255),
        Color::rgb(9, 9, 9),
    ];
    let entry = gradient_entry(colors.iter().copied().map(ColorStop::new).collect());
    let css = css_snippet(Some(&entry), Fit::Cover, false, Anchor::default(), 0.35);

    let line = css
        .lines()
        .find(|l| l.trim_start().starts_with("background-image:"))
        .unwrap();
    let extracted = extract_colors(line, MAX_EXTRACTED_STOPS);
    assert_eq!(extracted, colors[..MAX_EXTRACTED_STOPS].to_vec());
}
