use crate::assets::data_uri::encode_data_uri;
use crate::assets::loader::media_type_for_extension;
use crate::foundation::math::Fnv1a64;
use crate::scene::model::{BackgroundEntry, Provenance};

/// Raster and vector extensions accepted even without a declared image media type.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "avif", "ico", "tif", "tiff",
];

/// A file offered for upload.
#[derive(Clone, Debug)]
pub struct UploadFile {
    /// File name including extension.
    pub name: String,
    /// Declared media type, if any.
    pub media_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    fn declared_image_type(&self) -> Option<&str> {
        self.media_type
            .as_deref()
            .map(str::trim)
            .filter(|m| m.to_ascii_lowercase().starts_with("image/"))
    }

    /// Whether the file is an image by media type or by extension.
    pub fn is_accepted(&self) -> bool {
        if self.declared_image_type().is_some() {
            return true;
        }
        self.extension().is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    fn resolved_media_type(&self) -> String {
        if let Some(mt) = self.declared_image_type() {
            return mt.to_ascii_lowercase();
        }
        self.extension()
            .and_then(media_type_for_extension)
            .unwrap_or("application/octet-stream")
            .to_owned()
    }

    fn display_name(&self) -> String {
        let base = self.name.rsplit(['/', '\\']).next().unwrap_or(&self.name);
        let stem = base.rsplit_once('.').map_or(base, |(stem, _)| stem);
        if stem.is_empty() { base.to_owned() } else { stem.to_owned() }
    }
}

/// Turn an accepted upload into a user-supplied image entry.
///
/// The id is a content hash, so uploading the same file twice yields the same id.
pub fn entry_from_upload(file: &UploadFile) -> Option<BackgroundEntry> {
    if file.bytes.is_empty() || !file.is_accepted() {
        return None;
    }
    let mut hash = Fnv1a64::new_default();
    hash.write_bytes(file.name.as_bytes());
    hash.write_bytes(&file.bytes);

    Some(BackgroundEntry::image(
        format!("upload-{:016x}", hash.finish()),
        file.display_name(),
        encode_data_uri(&file.resolved_media_type(), &file.bytes),
        Provenance::UserSupplied,
    ))
}

/// Convert a dropped batch into entries, silently skipping anything that is not an image.
pub fn ingest_uploads<'a>(files: impl IntoIterator<Item = &'a UploadFile>) -> Vec<BackgroundEntry> {
    let mut out = Vec::new();
    for file in files {
        match entry_from_upload(file) {
            Some(entry) => out.push(entry),
            None => tracing::debug!(name = %file.name, "skipping non-image upload"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/upload.rs"]
mod tests;
