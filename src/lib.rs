//! Backdrop is the core of a background preview tool.
//!
//! It answers one question for a page designer: how does a given background (an uploaded
//! image or a CSS gradient) look behind page content under a chosen fit, anchor, blur and
//! darkness overlay, and is text on top of it still readable?
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: uploads and persisted JSON become validated [`BackgroundEntry`] values
//!    ([`ingest_uploads`], [`session_from_json_str`]).
//! 2. **Resolve**: [`resolve_draw_rect`] places one copy of the source for `cover`,
//!    `contain` or `auto`.
//! 3. **Style**: [`build_background_style`] and [`css_snippet`] describe the live surface and
//!    the copy-paste CSS.
//! 4. **Measure**: [`estimate_min_contrast_from_overlay`] and [`estimate_card_contrast`] give
//!    WCAG ratios from the overlay and card settings.
//! 5. **Export**: [`export_raster`] rasterizes the preview into PNG bytes;
//!    [`session_to_json`] writes the session back out.
//!
//! Session state is an immutable [`SessionState`] value advanced by the pure [`reduce`].
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Clamp, never reject**: numeric parameters are clamped; malformed persisted state falls
//!   back field by field.
//! - **Premultiplied RGBA8** inside the raster exporter; PNG output is straight alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod cards;
mod color;
mod contrast;
mod foundation;
mod geometry;
mod render;
mod scene;
mod session;
mod style;
mod viewport;

pub use assets::data_uri::{DataUri, encode_data_uri, is_data_uri, parse_data_uri};
pub use assets::decode::{
    PreparedImage, PreparedSource, PreparedSvg, decode_image, decode_source, parse_svg,
    rasterize_svg, rasterize_svg_region,
};
pub use assets::loader::{PixelSourceLoader, SourceLoader, media_type_for_extension};
pub use assets::upload::{IMAGE_EXTENSIONS, UploadFile, entry_from_upload, ingest_uploads};
pub use cards::{BODY_POOL, Card, MAX_CARDS, MIN_CARDS, TITLE_POOL, generate_cards, generate_cards_with};
pub use color::{MAX_EXTRACTED_STOPS, extract_colors, parse_color};
pub use contrast::{
    CardContrast, ContrastReport, TextColor, WCAG_AA, WCAG_AAA, contrast_ratio,
    estimate_card_contrast, estimate_min_contrast_from_overlay, luminance_under_overlay,
    weighted_luminance,
};
pub use foundation::core::{Canvas, Color, Point, Rect, Rgba8Premul, Size};
pub use foundation::error::{BackdropError, BackdropResult};
pub use geometry::{Anchor, AxisAlign, Fit, resolve_draw_rect};
pub use render::export::{
    CompareSlots, DEFAULT_CLEAR_RGBA, RasterExport, RasterExportRequest, RenderedSurface,
    encode_png, export_raster, render_surface,
};
pub use render::surface::{MAX_SURFACE_DIM, Surface};
pub use scene::gradient::{ColorStop, GradientDef, GradientShape};
pub use scene::model::{BackgroundEntry, BackgroundKind, Provenance, normalize_entries};
pub use scene::params::{
    BLUR_RADIUS_MAX_PX, DisplayParams, OVERLAY_ALPHA_MAX, clamp_blur_radius, clamp_card_opacity,
    clamp_overlay_alpha,
};
pub use scene::presets::preset_backgrounds;
pub use session::load::{session_from_json_str, session_to_json};
pub use session::state::{Action, DEFAULT_CARD_COUNT, SessionState, reduce};
pub use style::{BackgroundLayer, StyleDescriptor, build_background_style, css_snippet};
pub use viewport::{
    DEFAULT_VIEWPORT_KEY, FALLBACK_EXPORT_CANVAS, VIEWPORTS, ViewportDescriptor, ViewportSize,
    default_viewport, find_viewport, resolve_viewport_key,
};
