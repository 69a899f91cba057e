//! Read-only media list supplied by the hosting page, and the load-time reconciliation of
//! element references against it.

use crate::document::model::{Document, ElementKind};

/// One uploaded media item. The list is supplied fresh on each load; URLs may be time-limited
/// signed links that rotate, which is why element sources are refreshed rather than trusted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Media {
    pub id: String,
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl Media {
    pub fn photo(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Photo,
            url: url.into(),
            thumbnail_url: None,
            caption: None,
            location: None,
            date_taken: None,
        }
    }

    pub fn video(
        id: impl Into<String>,
        url: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Video,
            url: url.into(),
            thumbnail_url,
            caption: None,
            location: None,
            date_taken: None,
        }
    }
}

/// Drop image/video elements whose `media_id` no longer resolves, and refresh sources for those
/// that do. Returns the number of dropped elements.
pub fn reconcile_media(document: &mut Document, media: &[Media]) -> usize {
    let mut dropped = 0usize;

    for page in &mut document.pages {
        page.elements.retain_mut(|el| match &mut el.kind {
            ElementKind::Image(img) => match media.iter().find(|m| m.id == img.media_id) {
                Some(m) => {
                    img.src = m.url.clone();
                    true
                }
                None => {
                    tracing::debug!(element = %el.id, media = %img.media_id, "dropping image with dangling media reference");
                    dropped += 1;
                    false
                }
            },
            ElementKind::Video(vid) => match media.iter().find(|m| m.id == vid.media_id) {
                Some(m) => {
                    vid.src = m.url.clone();
                    vid.thumbnail = m.thumbnail_url.clone();
                    true
                }
                None => {
                    tracing::debug!(element = %el.id, media = %vid.media_id, "dropping video with dangling media reference");
                    dropped += 1;
                    false
                }
            },
            _ => true,
        });
    }

    dropped
}
