//! Keepsake is a deterministic canvas composition engine for collaborative scrapbook pages.
//!
//! The public API is session-oriented:
//!
//! - Load or [`normalize`] a [`Document`] (pages of typed elements)
//! - Drive edits through a [`CanvasSession`] (history, auto-save, media reconciliation)
//! - Compile any page into a [`DisplayList`] and render it through [`EditorSurface`] or
//!   [`ViewerSurface`] — both produce bit-identical scenes for the same document
//!
//! Start with the [`guide`] module for an end-to-end walkthrough.
#![forbid(unsafe_code)]

pub mod align;
pub mod document;
pub mod foundation;
pub mod geometry;
pub mod guide;
pub mod render;
pub mod session;

pub use crate::foundation::core::{Affine, BezPath, Frame, Point, Rect, Vec2};
pub use crate::foundation::error::{KeepsakeError, KeepsakeResult};
pub use crate::foundation::hash::{Fnv1a64, fnv1a64};
pub use crate::foundation::seed::SeededRng;

pub use crate::document::builder::{DocumentBuilder, PageBuilder};
pub use crate::document::model::{
    Background, BrushKind, Document, DrawingElement, Element, ElementKind, FrameStyle,
    ImageElement, Page, SCHEMA_VERSION, ShapeElement, ShapeType, StickerCategory, StickerElement,
    Stroke, TextAlign, TextElement, VideoElement,
};
pub use crate::document::normalize::normalize;

pub use crate::align::{
    Guide, GuideAxis, SNAP_THRESHOLD, SnapCandidates, SnapResult, compute_snap, snap_candidates,
};
pub use crate::geometry::clip::frame_clip_path;
pub use crate::geometry::filter::{FilterChannels, channels_at, filter_channels};
pub use crate::geometry::shape::shape_path;

pub use crate::session::controller::{
    CanvasSession, DocumentStore, ElementPatch, SessionOptions,
};
pub use crate::session::layout::{GridLayout, LayoutGenerator, MosaicLayout, PlacedFrame};
pub use crate::session::media::{Media, MediaKind, reconcile_media};
pub use crate::session::probe::{BytesProbe, DimensionProbe, probe_dimensions};

pub use crate::render::compile::{DisplayList, NodeContent, SceneNode, compile_page};
pub use crate::render::editor::{EditorSurface, Key, Modifiers, PointerInput, Tool};
pub use crate::render::fingerprint::{SceneFingerprint, fingerprint_display_list};
pub use crate::render::viewer::ViewerSurface;
