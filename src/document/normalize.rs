//! Load-path normalization: any stored blob (current, legacy, or garbage) becomes a canonical
//! multi-page [`Document`]. This is the one place backward compatibility is handled, and it never
//! fails — malformed input degrades to a single default page.

use serde_json::Value;

use crate::document::model::{
    Background, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH, Document, Element, Page,
};

/// Normalize a raw persisted value into a canonical document.
///
/// Accepted shapes:
/// - current versioned form: `{ version, pages: [...] }`
/// - legacy single-page form: `{ width?, height?, background?, elements: [...] }`
/// - anything else: replaced by a single default page
///
/// Guarantees: at least one page; every element carries a `z_index` (missing ones get their
/// insertion index); unknown element types and malformed elements are dropped silently.
pub fn normalize(raw: &Value) -> Document {
    let Some(obj) = raw.as_object() else {
        return Document::with_default_page();
    };

    if let Some(pages) = obj.get("pages").and_then(Value::as_array) {
        let mut out = Vec::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            out.push(normalize_page(page, idx));
        }
        if out.is_empty() {
            return Document::with_default_page();
        }
        return Document { pages: out };
    }

    // Legacy blobs predate multi-page documents and stored one page's fields at the top level.
    if obj.contains_key("elements") || (obj.contains_key("width") && obj.contains_key("height")) {
        return Document {
            pages: vec![normalize_page(raw, 0)],
        };
    }

    Document::with_default_page()
}

fn normalize_page(raw: &Value, index: usize) -> Page {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("page-{}", index + 1));

    let width = finite_or(raw.get("width"), DEFAULT_PAGE_WIDTH);
    let height = finite_or(raw.get("height"), DEFAULT_PAGE_HEIGHT);

    let background = raw
        .get("background")
        .and_then(|v| serde_json::from_value::<Background>(v.clone()).ok())
        .unwrap_or_default();

    let mut elements = Vec::new();
    if let Some(items) = raw.get("elements").and_then(Value::as_array) {
        for item in items {
            let has_z = item.get("z_index").is_some();
            match serde_json::from_value::<Element>(item.clone()) {
                Ok(mut el) => {
                    if !has_z {
                        el.z_index = elements.len() as i32;
                    }
                    elements.push(el);
                }
                Err(err) => {
                    tracing::debug!(%err, "dropping unreadable element during normalize");
                }
            }
        }
    }

    Page {
        id,
        width,
        height,
        background,
        elements,
    }
}

fn finite_or(v: Option<&Value>, fallback: f64) -> f64 {
    match v.and_then(Value::as_f64) {
        Some(n) if n.is_finite() && n > 0.0 => n,
        _ => fallback,
    }
}
