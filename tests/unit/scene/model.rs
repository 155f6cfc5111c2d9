use serde_json::json;

use super::*;
use crate::foundation::core::Color;
use crate::scene::gradient::ColorStop;

#[test]
fn favorite_defaults_to_false_when_absent() {
    let e: BackgroundEntry = serde_json::from_value(json!({
        "id": "a",
        "name": "A",
        "kind": "image",
        "pixelSource": "data:image/png;base64,AAAA"
    }))
    .unwrap();
    assert!(!e.is_favorite);
    assert_eq!(e.provenance, Provenance::Preset);
}

#[test]
fn legacy_aliases_are_accepted() {
    let e: BackgroundEntry = serde_json::from_value(json!({
        "id": "g",
        "displayName": "Sunset",
        "kind": "gradient",
        "css": "linear-gradient(#ff512f, #dd2476)",
        "favorite": true,
        "provenance": "user"
    }))
    .unwrap();
    assert_eq!(e.name, "Sunset");
    assert!(e.is_favorite);
    assert_eq!(e.provenance, Provenance::UserSupplied);
    let BackgroundKind::Procedural { gradient } = &e.kind else {
        panic!("expected procedural entry");
    };
    assert_eq!(gradient.stops.len(), 2);
}

#[test]
fn serializes_flat_camel_case() {
    let e = BackgroundEntry::image("a", "A", "img.png", Provenance::UserSupplied);
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(
        v,
        json!({
            "id": "a",
            "name": "A",
            "kind": "image",
            "pixelSource": "img.png",
            "provenance": "userSupplied",
            "isFavorite": false
        })
    );
}

#[test]
fn validate_rejects_undrawable_entries() {
    let empty_src = BackgroundEntry::image("a", "A", "  ", Provenance::Preset);
    assert!(empty_src.validate().is_err());

    let no_stops = BackgroundEntry::procedural(
        "g",
        "G",
        GradientDef::linear("", vec![]),
        Provenance::Preset,
    );
    assert!(no_stops.validate().is_err());

    let no_id = BackgroundEntry::image("", "A", "x.png", Provenance::Preset);
    assert!(no_id.validate().is_err());

    let ok = BackgroundEntry::procedural(
        "g",
        "G",
        GradientDef::linear("", vec![ColorStop::new(Color::WHITE)]),
        Provenance::Preset,
    );
    assert!(ok.validate().is_ok());
}

#[test]
fn normalize_drops_malformed_and_duplicate_entries() {
    let entries = normalize_entries(vec![
        json!({"id": "a", "kind": "image", "pixelSource": "a.png"}),
        json!({"id": "b", "kind": "image"}),
        json!({"id": "c", "kind": "procedural", "gradient": "linear-gradient(to right, red, blue)"}),
        json!({"id": "a", "kind": "image", "pixelSource": "dup.png"}),
        json!("not an object"),
        json!({"id": "d", "kind": "procedural", "gradient": "linear-gradient(#000, #fff)"}),
    ]);
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "d"]);
}
