use serde::{Deserialize, Serialize};

use crate::foundation::error::{BackdropError, BackdropResult};
use crate::scene::gradient::GradientDef;

/// Where a background entry came from. Provenance never restricts deletion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    /// Shipped with the application.
    #[default]
    Preset,
    /// Added by the user (upload or import).
    #[serde(alias = "user", alias = "upload")]
    UserSupplied,
}

/// Payload of a background entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackgroundKind {
    /// Raster or vector image addressed by a stable source string.
    Image {
        /// `data:` URI, or a path relative to the session file.
        #[serde(rename = "pixelSource", alias = "src", alias = "url")]
        pixel_source: String,
    },
    /// CSS-style gradient.
    #[serde(alias = "gradient")]
    Procedural {
        /// Gradient shape and stops.
        #[serde(alias = "css")]
        gradient: GradientDef,
    },
}

/// One selectable background.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundEntry {
    /// Stable unique id.
    pub id: String,
    /// Display label.
    #[serde(default, alias = "displayName", alias = "label")]
    pub name: String,
    /// Image or gradient payload.
    #[serde(flatten)]
    pub kind: BackgroundKind,
    /// Preset or user supplied.
    #[serde(default)]
    pub provenance: Provenance,
    /// Favorite flag; absent means `false`.
    #[serde(default, alias = "favorite")]
    pub is_favorite: bool,
}

impl BackgroundEntry {
    /// Image entry.
    pub fn image(
        id: impl Into<String>,
        name: impl Into<String>,
        pixel_source: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: BackgroundKind::Image {
                pixel_source: pixel_source.into(),
            },
            provenance,
            is_favorite: false,
        }
    }

    /// Procedural (gradient) entry.
    pub fn procedural(
        id: impl Into<String>,
        name: impl Into<String>,
        gradient: GradientDef,
        provenance: Provenance,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: BackgroundKind::Procedural { gradient },
            provenance,
            is_favorite: false,
        }
    }

    /// Reject entries that cannot be drawn: empty id, empty pixel source, or no stops.
    pub fn validate(&self) -> BackdropResult<()> {
        if self.id.trim().is_empty() {
            return Err(BackdropError::validation("background entry id must be non-empty"));
        }
        match &self.kind {
            BackgroundKind::Image { pixel_source } if pixel_source.trim().is_empty() => {
                Err(BackdropError::validation(format!(
                    "image entry \"{}\" has no pixel source",
                    self.id
                )))
            }
            BackgroundKind::Procedural { gradient } if gradient.stops.is_empty() => {
                Err(BackdropError::validation(format!(
                    "gradient entry \"{}\" has no color stops",
                    self.id
                )))
            }
            BackgroundKind::Image { .. } | BackgroundKind::Procedural { .. } => Ok(()),
        }
    }
}

/// Parse loosely shaped JSON values into entries, dropping anything malformed.
///
/// This is the single normalization step applied at every ingestion boundary.
pub fn normalize_entries(values: Vec<serde_json::Value>) -> Vec<BackgroundEntry> {
    let mut out: Vec<BackgroundEntry> = Vec::with_capacity(values.len());
    for value in values {
        let entry = match serde_json::from_value::<BackgroundEntry>(value) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "dropping unparseable background entry");
                continue;
            }
        };
        if let Err(err) = entry.validate() {
            tracing::warn!(error = %err, "dropping invalid background entry");
            continue;
        }
        if out.iter().any(|e| e.id == entry.id) {
            tracing::warn!(id = %entry.id, "dropping background entry with duplicate id");
            continue;
        }
        out.push(entry);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
