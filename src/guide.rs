//! # Keepsake guide
//!
//! This module is a standalone, end-to-end walkthrough of Keepsake's architecture and public
//! API. It is intentionally detailed so integrations (native shells, sync servers, export
//! workers) can build on a shared mental model of what "a page" means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Document`](crate::Document): pages of typed elements, the unit of persistence and sync
//! - [`CanvasSession`](crate::CanvasSession): the editing controller (history, auto-save,
//!   media reconciliation)
//! - [`DisplayList`](crate::DisplayList): backend-agnostic scene IR for a single page
//! - [`EditorSurface`](crate::EditorSurface): interactive adapter (pointer/key input, gestures)
//! - [`ViewerSurface`](crate::ViewerSurface): read-only adapter (scaling, cosmetic chrome)
//! - [`SceneFingerprint`](crate::SceneFingerprint): the reproducibility oracle
//!
//! The rendering pipeline is explicitly staged:
//!
//! 1. Normalize stored JSON: [`normalize`](crate::normalize)
//! 2. Compile a page into a scene: [`compile_page`](crate::compile_page)
//! 3. Hand the scene to a drawing host (the [`DisplayList`](crate::DisplayList) serializes to
//!    JSON)
//!
//! ---
//!
//! ## Determinism (and why)
//!
//! The same document must render identically in the editor, the viewer, on another machine,
//! and next week. Keepsake gets there by construction:
//!
//! - everything cosmetic-but-persistent is derived from element IDs through
//!   [`SeededRng`](crate::SeededRng), a tiny seeded LCG — torn and scalloped photo frames,
//!   washi tape palettes and patterns all regenerate byte-identically per
//!   `(id, width, height)`
//! - no wall-clock reads in the core: auto-save debouncing takes an explicit `Instant` via
//!   [`CanvasSession::poll_autosave`](crate::CanvasSession::poll_autosave), so tests drive a
//!   fake clock
//! - scene compilation is a pure function of the page; two compilations of the same page
//!   produce equal display lists and equal fingerprints
//!
//! [`fingerprint_display_list`](crate::fingerprint_display_list) folds every field of the
//! scene through a pair of FNV-1a 64 hashes. Editor/viewer parity tests compare fingerprints
//! instead of pixels.
//!
//! ---
//!
//! ## Building and editing a document
//!
//! JSON is supported through Serde (and [`normalize`](crate::normalize) tolerates legacy
//! single-page payloads), but for programmatic usage prefer the builders and the session:
//!
//! ```rust
//! use keepsake::{
//!     CanvasSession, Document, DocumentStore, Element, Frame, FrameStyle, KeepsakeResult,
//!     SessionOptions,
//! };
//!
//! struct MemoryStore(Vec<Document>);
//! impl DocumentStore for MemoryStore {
//!     fn save(&mut self, document: &Document) -> KeepsakeResult<()> {
//!         self.0.push(document.clone());
//!         Ok(())
//!     }
//! }
//!
//! # fn main() {
//! let mut session = CanvasSession::new(
//!     Document::with_default_page(),
//!     Box::new(MemoryStore(Vec::new())),
//!     SessionOptions::default(),
//! );
//!
//! session.add_element(Element::image(
//!     "el-1",
//!     "media-42",
//!     "https://cdn.example/photo.jpg",
//!     Frame::new(80.0, 120.0, 320.0, 240.0),
//!     -2.5,
//!     0,
//! ));
//! session.update_element("el-1", keepsake::ElementPatch::position(100.0, 120.0));
//! assert!(session.undo());
//! assert!(session.redo());
//! # }
//! ```
//!
//! Notes:
//!
//! - every mutation commits one history snapshot; history is capped and drops oldest first
//! - [`Element`](crate::Element) constructors apply per-type defaults (placeholder text,
//!   sticker sizing, minimum dimensions)
//!
//! ---
//!
//! ## The session: history, auto-save, media
//!
//! [`CanvasSession`](crate::CanvasSession) owns the document and is the only place it mutates:
//!
//! - `add_element` / `update_element` / `remove_element` — element lifecycle, with per-type
//!   minimum-size clamping
//! - `apply_layout` — repositions image elements through a [`LayoutGenerator`](crate::LayoutGenerator)
//!   ([`GridLayout`](crate::GridLayout), [`MosaicLayout`](crate::MosaicLayout))
//! - `place_photos` — imports media: probes intrinsic dimensions through a
//!   [`DimensionProbe`](crate::DimensionProbe), aspect-fits each photo into a generated slot,
//!   and commits the batch as a single history entry
//! - `reconcile_media` — prunes elements whose media was deleted elsewhere and refreshes
//!   stale URLs; runs outside history so it cannot be undone into a dangling reference
//! - `poll_autosave(now)` — after a quiet debounce window, saves through the injected
//!   [`DocumentStore`](crate::DocumentStore) exactly once per revision; failures log and wait
//!   for the next change
//!
//! ---
//!
//! ## Alignment and snapping
//!
//! [`compute_snap`](crate::compute_snap) is a pure function: given the dragged element's size
//! and proposed position plus [`snap_candidates`](crate::snap_candidates) (canvas edges and
//! center, sibling edges and centers), it returns the adjusted position and the
//! [`Guide`](crate::Guide) lines to flash. Per axis the element's own edges are tried in fixed
//! order and the first within-threshold candidate wins. A held modifier key disables snapping
//! for the duration of the drag.
//!
//! ---
//!
//! ## Compilation: from page to `DisplayList`
//!
//! [`compile_page`](crate::compile_page) produces a backend-agnostic scene:
//!
//! - nodes sorted by `(z_index, insertion order)` — painter's order, later on top
//! - each node carries a resolved `kurbo::Affine` (translate x rotate-about-center x scale)
//! - all procedural decoration is resolved here: clip paths, frame padding and overlays,
//!   washi tape SVGs, background textures, filter channel values and their CSS string
//!
//! ### Coordinate conventions
//!
//! - page space: origin top-left, y down, page-native units (no display scaling)
//! - element space: `[0,0]..[width,height]`, mapped into page space by the node transform
//! - stroke points and clip paths are element-local
//!
//! ### Filters
//!
//! Image filters are named presets ([`filter_channels`](crate::filter_channels)) interpolated
//! toward neutral by an intensity in `[0, 100]` ([`channels_at`](crate::channels_at)). The
//! scene carries both the raw [`FilterChannels`](crate::FilterChannels) and a pre-formatted
//! CSS `filter` string so hosts on any backend apply the exact same numbers.
//!
//! ---
//!
//! ## Surfaces: editor and viewer
//!
//! [`EditorSurface`](crate::EditorSurface) translates typed pointer/key input into session
//! operations. Gestures (drag with snapping, handle resize, rotate, freehand draw) preview in
//! an overlay and commit exactly one `update_element` on release, so a whole gesture is one
//! undo step. In-place text editing is a small state machine: at most one element edits at a
//! time, empty commits restore the placeholder.
//!
//! [`ViewerSurface`](crate::ViewerSurface) is read-only: a uniform display scale applied
//! outside the scene, plus cosmetic chrome (the spiral-binding strip) that never enters the
//! document. Because both surfaces compile through [`compile_page`](crate::compile_page), a
//! shared page fingerprints identically in both.
