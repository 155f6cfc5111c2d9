use crate::foundation::core::Canvas;

/// Export size used when the viewport has no concrete pixel size.
pub const FALLBACK_EXPORT_CANVAS: Canvas = Canvas {
    width: 1440,
    height: 900,
};

/// Key of the viewport selected when nothing else is known.
pub const DEFAULT_VIEWPORT_KEY: &str = "fluid";

/// Nominal size of a device profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportSize {
    /// Fill the surrounding frame.
    Fluid,
    /// Concrete CSS pixel size.
    Fixed {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// A named device profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportDescriptor {
    /// Stable key persisted in session state.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Nominal size.
    pub size: ViewportSize,
}

impl ViewportDescriptor {
    /// Pixel size after rotation, or `None` for fluid profiles.
    pub fn resolved_size(&self, rotated: bool) -> Option<Canvas> {
        match self.size {
            ViewportSize::Fluid => None,
            ViewportSize::Fixed { width, height } if rotated => Some(Canvas {
                width: height,
                height: width,
            }),
            ViewportSize::Fixed { width, height } => Some(Canvas { width, height }),
        }
    }

    /// Size used for PNG export: the resolved size or [`FALLBACK_EXPORT_CANVAS`].
    pub fn export_canvas(&self, rotated: bool) -> Canvas {
        self.resolved_size(rotated).unwrap_or(FALLBACK_EXPORT_CANVAS)
    }
}

/// Built-in device profiles.
pub const VIEWPORTS: &[ViewportDescriptor] = &[
    ViewportDescriptor {
        key: "fluid",
        label: "Fluid",
        size: ViewportSize::Fluid,
    },
    ViewportDescriptor {
        key: "phone",
        label: "Phone",
        size: ViewportSize::Fixed {
            width: 390,
            height: 844,
        },
    },
    ViewportDescriptor {
        key: "tablet",
        label: "Tablet",
        size: ViewportSize::Fixed {
            width: 820,
            height: 1180,
        },
    },
    ViewportDescriptor {
        key: "laptop",
        label: "Laptop",
        size: ViewportSize::Fixed {
            width: 1440,
            height: 900,
        },
    },
    ViewportDescriptor {
        key: "desktop",
        label: "Desktop",
        size: ViewportSize::Fixed {
            width: 1920,
            height: 1080,
        },
    },
];

/// Keys written by older releases and their current equivalents.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("mobile", "phone"),
    ("iphone", "phone"),
    ("ipad", "tablet"),
    ("macbook", "laptop"),
    ("full", "fluid"),
    ("auto", "fluid"),
];

/// Look up a profile by its current key.
pub fn find_viewport(key: &str) -> Option<&'static ViewportDescriptor> {
    VIEWPORTS.iter().find(|v| v.key == key)
}

/// Map a current or legacy key to a known profile.
pub fn resolve_viewport_key(key: &str) -> Option<&'static ViewportDescriptor> {
    let key = key.trim().to_ascii_lowercase();
    let key = LEGACY_KEYS
        .iter()
        .find(|(old, _)| *old == key)
        .map_or(key.as_str(), |(_, new)| *new);
    find_viewport(key)
}

/// The profile selected when nothing else is known.
pub fn default_viewport() -> &'static ViewportDescriptor {
    &VIEWPORTS[0]
}

#[cfg(test)]
#[path = "../tests/unit/viewport/catalogue.rs"]
mod tests;
