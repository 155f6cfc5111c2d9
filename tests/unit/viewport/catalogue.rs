use super::*;

#[test]
fn rotation_swaps_concrete_sizes_only() {
    let phone = find_viewport("phone").unwrap();
    assert_eq!(
        phone.resolved_size(false),
        Some(Canvas {
            width: 390,
            height: 844
        })
    );
    assert_eq!(
        phone.resolved_size(true),
        Some(Canvas {
            width: 844,
            height: 390
        })
    );

    let fluid = find_viewport("fluid").unwrap();
    assert_eq!(fluid.resolved_size(true), None);
}

#[test]
fn fluid_exports_at_fallback_size() {
    let fluid = default_viewport();
    assert_eq!(fluid.key, DEFAULT_VIEWPORT_KEY);
    assert_eq!(fluid.export_canvas(false), FALLBACK_EXPORT_CANVAS);
    assert_eq!(fluid.export_canvas(true), FALLBACK_EXPORT_CANVAS);
}

#[test]
fn legacy_keys_migrate() {
    assert_eq!(resolve_viewport_key("mobile").unwrap().key, "phone");
    assert_eq!(resolve_viewport_key("iPhone").unwrap().key, "phone");
    assert_eq!(resolve_viewport_key("ipad").unwrap().key, "tablet");
    assert_eq!(resolve_viewport_key("auto").unwrap().key, "fluid");
    assert_eq!(resolve_viewport_key(" desktop ").unwrap().key, "desktop");
    assert!(resolve_viewport_key("watch").is_none());
}

#[test]
fn keys_are_unique() {
    for (i, v) in VIEWPORTS.iter().enumerate() {
        assert!(VIEWPORTS[i + 1..].iter().all(|w| w.key != v.key));
    }
}
