//! Read-only rendering adapter.
//!
//! The viewer compiles pages through the same [`compile_page`] pipeline as the editor, so a
//! shared document renders bit-identically in both. It owns no session, accepts no input, and
//! adds only cosmetic chrome (the scrapbook binding strip) that never touches the document.

use kurbo::Affine;
use serde_json::Value;

use crate::{
    document::{model::Document, normalize::normalize},
    render::{
        compile::{DisplayList, compile_page},
        fingerprint::{SceneFingerprint, fingerprint_display_list},
    },
};

pub struct ViewerSurface {
    document: Document,
    scale: f64,
}

impl ViewerSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            scale: 1.0,
        }
    }

    /// Build a viewer straight from stored JSON, tolerating legacy shapes the same way a
    /// session would.
    pub fn from_value(raw: &Value) -> Self {
        Self::new(normalize(raw))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    /// Uniform display scale applied outside the compiled scene. Page-space coordinates in the
    /// scene are unaffected, so fingerprints stay comparable across zoom levels.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn root_transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    pub fn scene(&self, page_index: usize) -> Option<DisplayList> {
        self.document.pages.get(page_index).map(compile_page)
    }

    pub fn fingerprint(&self, page_index: usize) -> Option<SceneFingerprint> {
        self.scene(page_index).map(|list| fingerprint_display_list(&list))
    }

    /// Decorative spiral-binding strip drawn along the left edge of every page. Pure chrome:
    /// generated per render, never stored.
    pub fn binding_overlay(&self, page_index: usize) -> Option<String> {
        let page = self.document.pages.get(page_index)?;
        let h = page.height;
        let ring_gap = 46.0;
        let count = ((h - 20.0) / ring_gap).floor().max(1.0) as usize;

        let mut body = String::new();
        for i in 0..count {
            let cy = 30.0 + i as f64 * ring_gap;
            body.push_str(&format!(
                "<ellipse cx='4' cy='{cy}' rx='9' ry='5' fill='none' stroke='#9b9b9b' stroke-width='2.5' transform='rotate(-30 4 {cy})'/>",
            ));
        }
        Some(format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='18' height='{h}' viewBox='0 0 18 {h}'>{body}</svg>",
        ))
    }
}
