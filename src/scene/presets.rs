use crate::foundation::core::Color;
use crate::scene::gradient::{ColorStop, GradientDef};
use crate::scene::model::{BackgroundEntry, Provenance};

fn two_stop(direction: &str, a: Color, b: Color) -> GradientDef {
    GradientDef::linear(
        direction,
        vec![ColorStop::at(a, "0%"), ColorStop::at(b, "100%")],
    )
}

/// Built-in backgrounds used for a first run or when persisted state has none.
pub fn preset_backgrounds() -> Vec<BackgroundEntry> {
    let entry = |id: &str, name: &str, gradient: GradientDef| {
        BackgroundEntry::procedural(id, name, gradient, Provenance::Preset)
    };
    vec![
        entry(
            "preset-midnight",
            "Midnight",
            two_stop("135deg", Color::rgb(0x1e, 0x3c, 0x72), Color::rgb(0x2a, 0x52, 0x98)),
        ),
        entry(
            "preset-sunset",
            "Sunset",
            two_stop("to right", Color::rgb(0xff, 0x51, 0x2f), Color::rgb(0xdd, 0x24, 0x76)),
        ),
        entry(
            "preset-aurora",
            "Aurora",
            GradientDef::linear(
                "160deg",
                vec![
                    ColorStop::at(Color::rgb(0x0f, 0x20, 0x27), "0%"),
                    ColorStop::at(Color::rgb(0x20, 0x3a, 0x43), "50%"),
                    ColorStop::at(Color::rgb(0x2c, 0x53, 0x64), "100%"),
                ],
            ),
        ),
        entry(
            "preset-peach",
            "Peach",
            two_stop("to bottom", Color::rgb(0xff, 0xec, 0xd2), Color::rgb(0xfc, 0xb6, 0x9f)),
        ),
        entry(
            "preset-spotlight",
            "Spotlight",
            GradientDef::radial(
                "circle at center",
                vec![
                    ColorStop::at(Color::rgb(0x43, 0x43, 0x43), "0%"),
                    ColorStop::at(Color::rgb(0x00, 0x00, 0x00), "100%"),
                ],
            ),
        ),
        entry(
            "preset-mint",
            "Mint",
            two_stop("45deg", Color::rgb(0x11, 0x99, 0x8e), Color::rgb(0x38, 0xef, 0x7d)),
        ),
    ]
}
