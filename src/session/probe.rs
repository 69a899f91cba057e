//! Image dimension probing for photo placement.
//!
//! Placement needs the native aspect ratio before creating elements. Probing is a collaborator
//! so hosts can supply dimensions from wherever they already have bytes (memory, cache, a HEAD
//! request); the built-in helper reads encoded headers via the `image` crate without decoding
//! pixel data.

use crate::{
    foundation::error::{KeepsakeError, KeepsakeResult},
    session::media::Media,
};

pub trait DimensionProbe {
    fn probe(&mut self, media: &Media) -> KeepsakeResult<(u32, u32)>;
}

/// Read `(width, height)` from encoded image bytes.
pub fn probe_dimensions(bytes: &[u8]) -> KeepsakeResult<(u32, u32)> {
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| KeepsakeError::media(format!("unreadable image bytes: {e}")))?;
    reader
        .into_dimensions()
        .map_err(|e| KeepsakeError::media(format!("failed to read image dimensions: {e}")))
}

/// Probe backed by in-memory byte slices keyed by media id. Useful for hosts that already hold
/// the upload buffer, and for tests.
#[derive(Default)]
pub struct BytesProbe {
    entries: std::collections::BTreeMap<String, Vec<u8>>,
}

impl BytesProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, media_id: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(media_id.into(), bytes);
    }
}

impl DimensionProbe for BytesProbe {
    fn probe(&mut self, media: &Media) -> KeepsakeResult<(u32, u32)> {
        let bytes = self
            .entries
            .get(&media.id)
            .ok_or_else(|| KeepsakeError::media(format!("no bytes for media '{}'", media.id)))?;
        probe_dimensions(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn reads_png_dimensions() {
        let bytes = tiny_png(12, 34);
        assert_eq!(probe_dimensions(&bytes).unwrap(), (12, 34));
    }

    #[test]
    fn garbage_bytes_error() {
        assert!(probe_dimensions(b"not an image").is_err());
    }

    #[test]
    fn bytes_probe_resolves_by_media_id() {
        let mut probe = BytesProbe::new();
        probe.insert("m1", tiny_png(20, 10));
        let media = Media::photo("m1", "https://cdn/m1.png");
        assert_eq!(probe.probe(&media).unwrap(), (20, 10));

        let missing = Media::photo("m2", "https://cdn/m2.png");
        assert!(probe.probe(&missing).is_err());
    }
}
