use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;

use crate::assets::data_uri::{is_data_uri, parse_data_uri};
use crate::assets::decode::{PreparedSource, decode_source};
use crate::foundation::error::{BackdropError, BackdropResult};

/// Resolves an image entry's pixel source into decoded pixels.
///
/// Decoding is a single-shot call: it either yields pixels or fails, and callers decide how
/// to degrade.
pub trait PixelSourceLoader {
    /// Resolve and decode `pixel_source`.
    fn load(&mut self, pixel_source: &str) -> BackdropResult<PreparedSource>;
}

/// Default loader: `data:` URIs, plus relative file paths when a root directory is set.
///
/// Decoded sources are cached by their source string.
#[derive(Default)]
pub struct SourceLoader {
    root: Option<PathBuf>,
    cache: HashMap<String, PreparedSource>,
}

impl SourceLoader {
    /// Loader that only accepts `data:` URIs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that also resolves relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            cache: HashMap::new(),
        }
    }

    fn load_uncached(&self, pixel_source: &str) -> BackdropResult<PreparedSource> {
        if is_data_uri(pixel_source) {
            let uri = parse_data_uri(pixel_source)?;
            return decode_source(Some(&uri.media_type), &uri.bytes);
        }

        let Some(root) = &self.root else {
            return Err(BackdropError::decode(
                "only data: URIs can be loaded without an assets root",
            ));
        };
        let rel = normalize_rel_path(pixel_source)?;
        let path = root.join(&rel);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        let media_type = rel
            .rsplit_once('.')
            .and_then(|(_, ext)| media_type_for_extension(ext));
        decode_source(media_type, &bytes)
    }
}

impl PixelSourceLoader for SourceLoader {
    #[tracing::instrument(skip_all, fields(source_len = pixel_source.len()))]
    fn load(&mut self, pixel_source: &str) -> BackdropResult<PreparedSource> {
        if let Some(hit) = self.cache.get(pixel_source) {
            return Ok(hit.clone());
        }
        let prepared = self.load_uncached(pixel_source)?;
        tracing::debug!(size = ?prepared.intrinsic_size(), "decoded pixel source");
        self.cache.insert(pixel_source.to_owned(), prepared.clone());
        Ok(prepared)
    }
}

/// Media type for a known image file extension.
pub fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    let mt = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mt)
}

/// Normalize and validate session-relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths,
/// URLs, or parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> BackdropResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') || s.contains("://") {
        return Err(BackdropError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(BackdropError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BackdropError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BackdropError::validation("image path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
