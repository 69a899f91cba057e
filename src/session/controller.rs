//! The authoritative mutable state for one editing session of one document.
//!
//! All mutating operations are synchronous and atomic with respect to the host's event loop.
//! Each one pushes a deep-clone history snapshot taken inside the call, so concurrent reads of
//! the history never observe a half-applied mutation, and entries are never missing or
//! duplicated relative to the sequence of mutating calls.

use std::time::{Duration, Instant};

use crate::{
    document::model::{Background, Document, Element, ElementKind, Page},
    foundation::{core::Frame, error::KeepsakeResult},
    session::{
        layout::LayoutGenerator,
        media::{self, Media, MediaKind},
        probe::DimensionProbe,
    },
};

/// Injected persistence collaborator. Saves the full document blob; the session never persists
/// partial state.
pub trait DocumentStore {
    fn save(&mut self, document: &Document) -> KeepsakeResult<()>;
}

#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    /// Maximum history snapshots retained; oldest entries are evicted on overflow.
    pub max_history: usize,
    /// Quiet window after the last change before auto-save fires.
    pub autosave_debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_history: 50,
            autosave_debounce: Duration::from_millis(1500),
        }
    }
}

/// Field-merge patch for [`CanvasSession::update_element`]. Unset fields are left alone;
/// `kind` replaces the whole typed payload.
#[derive(Clone, Debug, Default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub z_index: Option<i32>,
    pub locked: Option<bool>,
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn kind(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

pub struct CanvasSession {
    document: Document,
    active_page: usize,
    selected: Option<String>,
    history: Vec<Document>,
    cursor: usize,
    opts: SessionOptions,
    store: Box<dyn DocumentStore>,
    next_id: u64,
    // Autosave bookkeeping. Mutations bump `revision`; `poll_autosave` turns a quiet window
    // after the latest revision into exactly one save attempt.
    revision: u64,
    observed_revision: u64,
    attempted_revision: u64,
    quiet_since: Option<Instant>,
}

impl CanvasSession {
    pub fn new(document: Document, store: Box<dyn DocumentStore>, opts: SessionOptions) -> Self {
        let document = if document.pages.is_empty() {
            Document::with_default_page()
        } else {
            document
        };
        let next_id = next_free_element_seq(&document);
        Self {
            history: vec![document.clone()],
            cursor: 0,
            document,
            active_page: 0,
            selected: None,
            opts,
            store,
            next_id,
            revision: 0,
            observed_revision: 0,
            attempted_revision: 0,
            quiet_since: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    pub fn active_page(&self) -> &Page {
        &self.document.pages[self.active_page]
    }

    pub fn set_active_page(&mut self, index: usize) {
        if index < self.document.pages.len() {
            self.active_page = index;
            self.selected = None;
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selection is UI state, not document state: it never pushes history.
    pub fn select(&mut self, id: &str) {
        if self.active_page().element(id).is_some() {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Allocate a fresh element id. Ids are monotonic and never reused within the session.
    pub fn allocate_element_id(&mut self) -> String {
        loop {
            let candidate = format!("el-{}", self.next_id);
            self.next_id += 1;
            if !self.id_in_use(&candidate) {
                return candidate;
            }
        }
    }

    pub fn add_element(&mut self, mut el: Element) {
        if self.id_in_use(&el.id) {
            tracing::warn!(id = %el.id, "ignoring add_element with duplicate id");
            return;
        }
        el.clamp_min_size();
        let id = el.id.clone();
        self.document.pages[self.active_page].elements.push(el);
        self.selected = Some(id);
        self.commit();
    }

    /// Merge `patch` into the matching element on the active page. Unknown id is a silent no-op.
    pub fn update_element(&mut self, id: &str, patch: ElementPatch) {
        let page = &mut self.document.pages[self.active_page];
        let Some(el) = page.element_mut(id) else {
            return;
        };

        if let Some(x) = patch.x {
            el.x = x;
        }
        if let Some(y) = patch.y {
            el.y = y;
        }
        if let Some(w) = patch.width {
            el.width = w;
        }
        if let Some(h) = patch.height {
            el.height = h;
        }
        if let Some(r) = patch.rotation {
            el.rotation = r;
        }
        if let Some(sx) = patch.scale_x {
            el.scale_x = sx;
        }
        if let Some(sy) = patch.scale_y {
            el.scale_y = sy;
        }
        if let Some(z) = patch.z_index {
            el.z_index = z;
        }
        if let Some(locked) = patch.locked {
            el.locked = locked;
        }
        if let Some(kind) = patch.kind {
            el.kind = kind;
        }
        el.clamp_min_size();

        self.commit();
    }

    pub fn remove_element(&mut self, id: &str) {
        let page = &mut self.document.pages[self.active_page];
        let before = page.elements.len();
        page.elements.retain(|e| e.id != id);
        if page.elements.len() == before {
            return;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.commit();
    }

    pub fn set_background(&mut self, background: Background) {
        self.document.pages[self.active_page].background = background;
        self.commit();
    }

    /// Re-lay-out all image elements on the active page. Positions are applied by index modulo
    /// the generated length; non-image elements are untouched. Empty output is a no-op.
    pub fn apply_layout(&mut self, generator: &dyn LayoutGenerator) {
        let page = &self.document.pages[self.active_page];
        let image_count = page
            .elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Image(_)))
            .count();
        let positions = generator.positions(image_count, page.width, page.height);
        if positions.is_empty() {
            return;
        }

        let page = &mut self.document.pages[self.active_page];
        let mut idx = 0usize;
        for el in &mut page.elements {
            if !matches!(el.kind, ElementKind::Image(_)) {
                continue;
            }
            let pos = positions[idx % positions.len()];
            el.x = pos.x;
            el.y = pos.y;
            el.width = pos.width;
            el.height = pos.height;
            el.rotation = pos.rotation;
            el.clamp_min_size();
            idx += 1;
        }

        self.commit();
    }

    pub fn add_page(&mut self, background: Option<Background>) {
        let id = self.allocate_page_id();
        let mut page = Page::default_canvas(id);
        if let Some(bg) = background {
            page.background = bg;
        }
        self.document.pages.push(page);
        self.active_page = self.document.pages.len() - 1;
        self.selected = None;
        self.commit();
    }

    /// Refused while only one page remains; a document is never empty.
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.document.pages.len() <= 1 || index >= self.document.pages.len() {
            return false;
        }
        self.document.pages.remove(index);
        if self.active_page >= self.document.pages.len() {
            self.active_page = self.document.pages.len() - 1;
        }
        self.selected = None;
        self.commit();
        true
    }

    pub fn reorder_page(&mut self, from: usize, to: usize) -> bool {
        let n = self.document.pages.len();
        if from >= n || to >= n || from == to {
            return false;
        }
        let page = self.document.pages.remove(from);
        self.document.pages.insert(to, page);
        // The move rotates every page between `from` and `to` by one slot; the active index
        // follows whichever page it referred to.
        if self.active_page == from {
            self.active_page = to;
        } else if from < self.active_page && self.active_page <= to {
            self.active_page -= 1;
        } else if to <= self.active_page && self.active_page < from {
            self.active_page += 1;
        }
        self.commit();
        true
    }

    /// Probe dimensions for every photo in `media`, then place them all with `generator` in one
    /// batch (a single history entry). A failed probe falls back to a 1x1 aspect instead of
    /// failing the batch.
    pub fn place_photos(
        &mut self,
        media: &[Media],
        probe: &mut dyn DimensionProbe,
        generator: &dyn LayoutGenerator,
    ) {
        let photos: Vec<&Media> = media.iter().filter(|m| m.kind == MediaKind::Photo).collect();
        if photos.is_empty() {
            return;
        }

        // All probes complete before any placement.
        let dims: Vec<(u32, u32)> = photos
            .iter()
            .map(|m| match probe.probe(m) {
                Ok(d) => d,
                Err(err) => {
                    tracing::warn!(media = %m.id, %err, "dimension probe failed, using 1x1 placeholder");
                    (1, 1)
                }
            })
            .collect();

        let page = &self.document.pages[self.active_page];
        let positions = generator.positions(photos.len(), page.width, page.height);
        if positions.is_empty() {
            return;
        }
        let mut z = page.next_z_index();

        for (i, (m, (pw, ph))) in photos.iter().zip(dims).enumerate() {
            let slot = positions[i % positions.len()];
            let frame = fit_into(pw as f64, ph as f64, slot.x, slot.y, slot.width, slot.height);
            let id = self.allocate_element_id();
            let mut el = Element::image(id, &m.id, &m.url, frame, slot.rotation, z);
            el.clamp_min_size();
            self.document.pages[self.active_page].elements.push(el);
            z += 1;
        }

        self.commit();
    }

    /// Load-time reconciliation: drop dangling media references, refresh sources, and reset the
    /// history baseline to the reconciled state (loading is not an undoable edit).
    pub fn reconcile_media(&mut self, media: &[Media]) -> usize {
        let dropped = media::reconcile_media(&mut self.document, media);
        self.history = vec![self.document.clone()];
        self.cursor = 0;
        dropped
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.document = self.history[self.cursor].clone();
        self.clamp_active_page();
        self.selected = None;
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        self.document = self.history[self.cursor].clone();
        self.clamp_active_page();
        self.selected = None;
        self.revision += 1;
        true
    }

    /// Drive the auto-save debounce from the host's tick. The first poll after a change opens
    /// the quiet window at `now`; once a full debounce window passes with no further change, the
    /// store is invoked exactly once for that state. A failed save is logged and not retried
    /// until the next change.
    pub fn poll_autosave(&mut self, now: Instant) {
        if self.revision != self.observed_revision {
            self.observed_revision = self.revision;
            self.quiet_since = Some(now);
            return;
        }

        let Some(since) = self.quiet_since else {
            return;
        };
        if self.revision == self.attempted_revision {
            self.quiet_since = None;
            return;
        }
        if now.duration_since(since) < self.opts.autosave_debounce {
            return;
        }

        self.quiet_since = None;
        self.attempted_revision = self.revision;
        if let Err(err) = self.store.save(&self.document) {
            // Local state is kept; the next change re-arms the debounce and retries naturally.
            tracing::warn!(%err, "auto-save failed");
        }
    }

    /// Teardown contract: cancel any pending debounce so no save fires after the session ends.
    pub fn shutdown(&mut self) {
        self.quiet_since = None;
        self.attempted_revision = self.revision;
        self.observed_revision = self.revision;
    }

    fn commit(&mut self) {
        // Truncate the redo tail: a new edit after undo discards the redone-away branch.
        self.history.truncate(self.cursor + 1);
        self.history.push(self.document.clone());
        if self.history.len() > self.opts.max_history {
            let overflow = self.history.len() - self.opts.max_history;
            self.history.drain(0..overflow);
        }
        self.cursor = self.history.len() - 1;
        self.revision += 1;
    }

    fn clamp_active_page(&mut self) {
        if self.active_page >= self.document.pages.len() {
            self.active_page = self.document.pages.len() - 1;
        }
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.document
            .pages
            .iter()
            .any(|p| p.elements.iter().any(|e| e.id == id))
    }

    fn allocate_page_id(&self) -> String {
        let mut n = self.document.pages.len() + 1;
        loop {
            let candidate = format!("page-{n}");
            if !self.document.pages.iter().any(|p| p.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Fit a `(w, h)` aspect into a slot, centered, preserving aspect ratio.
fn fit_into(w: f64, h: f64, slot_x: f64, slot_y: f64, slot_w: f64, slot_h: f64) -> Frame {
    let aspect = if h > 0.0 { w / h } else { 1.0 };
    let (fit_w, fit_h) = if slot_w / slot_h > aspect {
        (slot_h * aspect, slot_h)
    } else {
        (slot_w, slot_w / aspect)
    };
    Frame::new(
        slot_x + (slot_w - fit_w) / 2.0,
        slot_y + (slot_h - fit_h) / 2.0,
        fit_w,
        fit_h,
    )
}

fn next_free_element_seq(document: &Document) -> u64 {
    let mut max = 0u64;
    for page in &document.pages {
        for el in &page.elements {
            if let Some(n) = el.id.strip_prefix("el-").and_then(|s| s.parse::<u64>().ok()) {
                max = max.max(n);
            }
        }
    }
    max + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::model::Background, session::layout::GridLayout};

    struct NullStore;
    impl DocumentStore for NullStore {
        fn save(&mut self, _document: &Document) -> KeepsakeResult<()> {
            Ok(())
        }
    }

    fn session() -> CanvasSession {
        CanvasSession::new(
            Document::with_default_page(),
            Box::new(NullStore),
            SessionOptions::default(),
        )
    }

    fn image(id: &str, x: f64, y: f64) -> Element {
        Element::image(id, "m1", "u", Frame::new(x, y, 100.0, 100.0), 0.0, 0)
    }

    #[test]
    fn add_selects_and_pushes_history() {
        let mut s = session();
        s.add_element(image("e1", 10.0, 10.0));
        assert_eq!(s.selected(), Some("e1"));
        assert_eq!(s.history_len(), 2);
        assert!(s.can_undo());
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut s = session();
        s.add_element(image("e1", 10.0, 10.0));
        s.add_element(image("e1", 99.0, 99.0));
        assert_eq!(s.active_page().elements.len(), 1);
        assert_eq!(s.active_page().elements[0].x, 10.0);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut s = session();
        let before = s.history_len();
        s.update_element("ghost", ElementPatch::position(1.0, 2.0));
        assert_eq!(s.history_len(), before);
    }

    #[test]
    fn update_merges_only_set_fields() {
        let mut s = session();
        s.add_element(image("e1", 10.0, 20.0));
        s.update_element("e1", ElementPatch::position(50.0, 60.0));
        let el = s.active_page().element("e1").unwrap();
        assert_eq!((el.x, el.y), (50.0, 60.0));
        assert_eq!(el.width, 100.0);
    }

    #[test]
    fn resize_below_minimum_clamps() {
        let mut s = session();
        s.add_element(image("e1", 0.0, 0.0));
        s.update_element("e1", ElementPatch::size(10.0, 10.0));
        let el = s.active_page().element("e1").unwrap();
        assert_eq!((el.width, el.height), (30.0, 30.0));
    }

    #[test]
    fn remove_clears_selection() {
        let mut s = session();
        s.add_element(image("e1", 0.0, 0.0));
        s.remove_element("e1");
        assert_eq!(s.selected(), None);
        assert!(s.active_page().elements.is_empty());
    }

    #[test]
    fn undo_redo_restore_exact_states() {
        let mut s = session();
        s.add_element(image("e1", 0.0, 0.0));
        s.update_element("e1", ElementPatch::position(100.0, 100.0));
        let final_state = s.document().clone();

        assert!(s.undo());
        assert!(s.undo());
        assert!(s.active_page().elements.is_empty());
        assert!(!s.undo(), "past-start undo must be a no-op");

        assert!(s.redo());
        assert!(s.redo());
        assert_eq!(*s.document(), final_state);
        assert!(!s.redo(), "past-end redo must be a no-op");
    }

    #[test]
    fn new_edit_truncates_redo_tail() {
        let mut s = session();
        s.add_element(image("e1", 0.0, 0.0));
        s.add_element(image("e2", 10.0, 10.0));
        s.undo();
        s.add_element(image("e3", 20.0, 20.0));
        assert!(!s.can_redo());
        assert!(s.active_page().element("e2").is_none());
        assert!(s.active_page().element("e3").is_some());
    }

    #[test]
    fn history_is_capped_and_oldest_evicted() {
        let mut s = CanvasSession::new(
            Document::with_default_page(),
            Box::new(NullStore),
            SessionOptions {
                max_history: 5,
                ..SessionOptions::default()
            },
        );
        for i in 0..10 {
            s.add_element(image(&format!("e{i}"), i as f64, 0.0));
        }
        assert_eq!(s.history_len(), 5);
        while s.undo() {}
        // The empty initial state was evicted; the oldest reachable state has 6 elements.
        assert_eq!(s.active_page().elements.len(), 6);
    }

    #[test]
    fn delete_last_page_is_refused() {
        let mut s = session();
        assert!(!s.delete_page(0));
        assert_eq!(s.document().pages.len(), 1);
    }

    #[test]
    fn page_lifecycle() {
        let mut s = session();
        s.add_page(Some(Background::Texture("dots".to_string())));
        assert_eq!(s.document().pages.len(), 2);
        assert_eq!(s.active_page_index(), 1);
        assert!(s.reorder_page(1, 0));
        assert_eq!(s.active_page_index(), 0);
        assert!(s.delete_page(1));
        assert_eq!(s.document().pages.len(), 1);
    }

    #[test]
    fn layout_moves_images_only() {
        let mut s = session();
        s.add_element(image("e1", 700.0, 900.0));
        s.add_element(Element::text("t1", 5.0, 5.0, 1));
        s.apply_layout(&GridLayout::default());
        let img = s.active_page().element("e1").unwrap();
        assert_ne!((img.x, img.y), (700.0, 900.0));
        let text = s.active_page().element("t1").unwrap();
        assert_eq!((text.x, text.y), (5.0, 5.0));
    }

    #[test]
    fn allocated_ids_are_unique_and_monotonic() {
        let mut s = session();
        let a = s.allocate_element_id();
        let b = s.allocate_element_id();
        assert_ne!(a, b);
    }

    #[test]
    fn fit_into_preserves_aspect() {
        let f = fit_into(200.0, 100.0, 0.0, 0.0, 100.0, 100.0);
        assert_eq!((f.width, f.height), (100.0, 50.0));
        assert_eq!(f.y, 25.0);
    }
}
