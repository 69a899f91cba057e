//! Interactive rendering adapter.
//!
//! The editor owns a [`CanvasSession`] and translates typed pointer/key input into session
//! operations. Document content always renders through the same [`compile_page`] as the viewer;
//! everything interactive (selection box, handles, snap guides, drag preview, in-progress
//! stroke) lives in a separate overlay that is never part of the document.
//!
//! Gestures commit exactly one `update_element` on release, so a whole drag is one history
//! entry and one undo step.

use std::collections::BTreeSet;

use kurbo::Point;

use crate::{
    align::{Guide, SnapCandidates, compute_snap, sibling_frames, snap_candidates},
    document::model::{
        BrushKind, DrawingElement, Element, ElementKind, Stroke, TEXT_PLACEHOLDER, TextElement,
    },
    foundation::core::Frame,
    render::{
        compile::{DisplayList, compile_page, element_transform},
        fingerprint::{SceneFingerprint, fingerprint_display_list},
    },
    session::controller::{CanvasSession, ElementPatch},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Held modifier key that bypasses snapping during a drag.
    pub disable_snap: bool,
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Page-native coordinates; the host divides screen coordinates by its display scale.
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter { shift: bool },
    Escape,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tool {
    Select,
    Draw(DrawOptions),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawOptions {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub brush: BrushKind,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            color: "#3d3d3d".to_string(),
            width: 3.0,
            opacity: 1.0,
            brush: BrushKind::Pen,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// In-place text editing: Idle -> Editing -> Idle. At most one element edits at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEditState {
    Idle,
    Editing { id: String, draft: String },
}

enum Gesture {
    Idle,
    Drag {
        id: String,
        grab_dx: f64,
        grab_dy: f64,
        candidates: SnapCandidates,
        siblings: Vec<Frame>,
        preview: Option<(f64, f64)>,
    },
    Resize {
        id: String,
        handle: ResizeHandle,
        start: Frame,
        start_local: Point,
        rotation: f64,
        preview: Option<Frame>,
    },
    Rotate {
        id: String,
        center: Point,
        start_rotation: f64,
        start_angle: f64,
        preview: Option<f64>,
    },
    Draw {
        points: Vec<f64>,
        options: DrawOptions,
    },
}

/// Non-document visuals drawn on top of the compiled scene.
#[derive(Clone, Debug, Default)]
pub struct EditorOverlay {
    pub selection: Option<SelectionOverlay>,
    pub guides: Vec<Guide>,
    /// Live position of a dragged element before the gesture commits.
    pub drag_preview: Option<(String, f64, f64)>,
    /// Live frame of a resizing element before the gesture commits.
    pub resize_preview: Option<(String, Frame)>,
    /// Live rotation of a rotating element before the gesture commits.
    pub rotate_preview: Option<(String, f64)>,
    /// Stroke being drawn right now, in page coordinates.
    pub pending_stroke: Option<Vec<f64>>,
}

#[derive(Clone, Debug)]
pub struct SelectionOverlay {
    pub id: String,
    pub frame: Frame,
    pub rotation: f64,
    pub locked: bool,
    pub handles: Vec<(ResizeHandle, Point)>,
}

pub struct EditorSurface {
    session: CanvasSession,
    tool: Tool,
    gesture: Gesture,
    text_edit: TextEditState,
    guides: Vec<Guide>,
    playing: BTreeSet<String>,
    mounted: bool,
}

impl EditorSurface {
    pub fn new(session: CanvasSession) -> Self {
        Self {
            session,
            tool: Tool::Select,
            gesture: Gesture::Idle,
            text_edit: TextEditState::Idle,
            guides: Vec::new(),
            playing: BTreeSet::new(),
            mounted: true,
        }
    }

    pub fn session(&self) -> &CanvasSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CanvasSession {
        &mut self.session
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
        self.guides.clear();
    }

    /// Compile the active page. Identical to what the viewer produces for the same document.
    pub fn scene(&self) -> DisplayList {
        compile_page(self.session.active_page())
    }

    pub fn fingerprint(&self) -> SceneFingerprint {
        fingerprint_display_list(&self.scene())
    }

    /// Topmost unlocked element under the pointer, in paint order.
    pub fn hit_test(&self, p: Point) -> Option<&Element> {
        let page = self.session.active_page();
        let mut ordered: Vec<(usize, &Element)> = page.elements.iter().enumerate().collect();
        ordered.sort_by(|(sa, a), (sb, b)| b.z_index.cmp(&a.z_index).then(sb.cmp(sa)));

        ordered.into_iter().map(|(_, el)| el).find(|el| {
            let inv = element_transform(el).inverse();
            let local = inv * p;
            local.x >= 0.0 && local.x <= el.width && local.y >= 0.0 && local.y <= el.height
        })
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        if !self.mounted {
            return;
        }
        self.commit_text_edit();

        if let Tool::Draw(options) = self.tool.clone() {
            self.gesture = Gesture::Draw {
                points: vec![input.x, input.y],
                options,
            };
            return;
        }

        match self.hit_test(input.point()) {
            Some(el) if !el.locked => {
                let id = el.id.clone();
                let (ex, ey) = (el.x, el.y);
                self.session.select(&id);
                let page = self.session.active_page();
                let candidates =
                    snap_candidates(&page.elements, &id, page.width, page.height);
                let siblings = sibling_frames(&page.elements, &id);
                self.gesture = Gesture::Drag {
                    id,
                    grab_dx: input.x - ex,
                    grab_dy: input.y - ey,
                    candidates,
                    siblings,
                    preview: None,
                };
            }
            Some(el) => {
                // Locked elements select but never drag.
                let id = el.id.clone();
                self.session.select(&id);
            }
            None => self.session.clear_selection(),
        }
    }

    /// Start a resize gesture from a bounding-box handle of the current selection. Invoked by
    /// the host chrome when a handle is grabbed.
    pub fn begin_resize(&mut self, handle: ResizeHandle, input: PointerInput) {
        let Some(el) = self.selected_element() else {
            return;
        };
        if el.locked {
            return;
        }
        let start = el.frame();
        let rotation = el.rotation;
        let id = el.id.clone();
        let start_local = to_unrotated_local(input.point(), &start, rotation);
        self.gesture = Gesture::Resize {
            id,
            handle,
            start,
            start_local,
            rotation,
            preview: None,
        };
    }

    /// Start a rotate gesture from the rotation handle of the current selection.
    pub fn begin_rotate(&mut self, input: PointerInput) {
        let Some(el) = self.selected_element() else {
            return;
        };
        if el.locked {
            return;
        }
        let center = el.frame().center();
        let start_angle = (input.y - center.y).atan2(input.x - center.x);
        self.gesture = Gesture::Rotate {
            id: el.id.clone(),
            center,
            start_rotation: el.rotation,
            start_angle,
            preview: None,
        };
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        if !self.mounted {
            return;
        }
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drag {
                id,
                grab_dx,
                grab_dy,
                candidates,
                siblings,
                preview,
            } => {
                let proposed_x = input.x - *grab_dx;
                let proposed_y = input.y - *grab_dy;
                let page = self.session.active_page();
                let Some(el) = page.element(id) else {
                    return;
                };
                let result = compute_snap(
                    el.width,
                    el.height,
                    proposed_x,
                    proposed_y,
                    candidates,
                    siblings,
                    page.width,
                    page.height,
                    input.modifiers.disable_snap,
                );
                *preview = Some((result.x, result.y));
                self.guides = result.guides;
            }
            Gesture::Resize {
                id,
                handle,
                start,
                start_local,
                rotation,
                preview,
            } => {
                let local = to_unrotated_local(input.point(), start, *rotation);
                let dx = local.x - start_local.x;
                let dy = local.y - start_local.y;
                let mut frame = apply_resize(*start, *handle, dx, dy);
                let (min_w, min_h) = self
                    .session
                    .active_page()
                    .element(id)
                    .map(|el| el.kind.min_size())
                    .unwrap_or((30.0, 30.0));
                clamp_frame(&mut frame, *start, *handle, min_w, min_h);
                *preview = Some(frame);
            }
            Gesture::Rotate {
                center,
                start_rotation,
                start_angle,
                preview,
                ..
            } => {
                let angle = (input.y - center.y).atan2(input.x - center.x);
                let mut rotation = *start_rotation + (angle - *start_angle).to_degrees();
                if input.modifiers.shift {
                    rotation = (rotation / 15.0).round() * 15.0;
                }
                *preview = Some(rotation);
            }
            Gesture::Draw { points, .. } => {
                points.push(input.x);
                points.push(input.y);
            }
        }
    }

    pub fn pointer_up(&mut self, _input: PointerInput) {
        if !self.mounted {
            return;
        }
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        self.guides.clear();

        match gesture {
            Gesture::Idle => {}
            Gesture::Drag { id, preview, .. } => {
                if let Some((x, y)) = preview {
                    self.session.update_element(&id, ElementPatch::position(x, y));
                }
            }
            Gesture::Resize { id, preview, .. } => {
                if let Some(f) = preview {
                    self.session.update_element(
                        &id,
                        ElementPatch {
                            x: Some(f.x),
                            y: Some(f.y),
                            width: Some(f.width),
                            height: Some(f.height),
                            ..ElementPatch::default()
                        },
                    );
                }
            }
            Gesture::Rotate { id, preview, .. } => {
                if let Some(r) = preview {
                    self.session.update_element(&id, ElementPatch::rotation(r));
                }
            }
            Gesture::Draw { points, options } => self.commit_stroke(points, options),
        }
    }

    pub fn key(&mut self, key: Key) {
        if !self.mounted {
            return;
        }
        match key {
            Key::Enter { shift } => {
                if matches!(self.text_edit, TextEditState::Editing { .. }) && !shift {
                    self.commit_text_edit();
                }
            }
            Key::Escape => {
                if matches!(self.text_edit, TextEditState::Editing { .. }) {
                    self.commit_text_edit();
                } else {
                    self.session.clear_selection();
                }
            }
            Key::Delete => {
                if matches!(self.text_edit, TextEditState::Idle)
                    && let Some(id) = self.session.selected().map(str::to_string)
                {
                    self.session.remove_element(&id);
                }
            }
        }
    }

    // --- text editing state machine -------------------------------------------------------

    pub fn text_edit_state(&self) -> &TextEditState {
        &self.text_edit
    }

    /// Enter Editing for a text element. Refused while another element is editing, for locked
    /// elements, and for non-text elements.
    pub fn begin_text_edit(&mut self, id: &str) -> bool {
        if !matches!(self.text_edit, TextEditState::Idle) {
            return false;
        }
        let Some(el) = self.session.active_page().element(id) else {
            return false;
        };
        let ElementKind::Text(text) = &el.kind else {
            return false;
        };
        if el.locked {
            return false;
        }
        self.text_edit = TextEditState::Editing {
            id: id.to_string(),
            draft: text.content.clone(),
        };
        self.session.select(id);
        true
    }

    pub fn text_edit_input(&mut self, content: &str) {
        if let TextEditState::Editing { draft, .. } = &mut self.text_edit {
            *draft = content.to_string();
        }
    }

    /// Commit the draft (blur path). Empty drafts fall back to the placeholder.
    pub fn commit_text_edit(&mut self) {
        let TextEditState::Editing { id, draft } =
            std::mem::replace(&mut self.text_edit, TextEditState::Idle)
        else {
            return;
        };

        let Some(el) = self.session.active_page().element(&id) else {
            return;
        };
        let ElementKind::Text(text) = &el.kind else {
            return;
        };

        let committed = if draft.trim().is_empty() {
            TEXT_PLACEHOLDER.to_string()
        } else {
            draft
        };
        if committed == text.content {
            return;
        }

        let kind = ElementKind::Text(TextElement {
            content: committed,
            ..text.clone()
        });
        self.session.update_element(&id, ElementPatch::kind(kind));
    }

    /// Host blur event: same commit semantics as Escape/Enter.
    pub fn blur(&mut self) {
        self.commit_text_edit();
    }

    // --- video playback state machine -----------------------------------------------------

    /// Toggle Paused <-> Playing. Returns whether the element is playing afterwards. Playback
    /// is UI-local and never persisted.
    pub fn toggle_playback(&mut self, id: &str) -> bool {
        let is_video = self
            .session
            .active_page()
            .element(id)
            .is_some_and(|el| matches!(el.kind, ElementKind::Video(_)));
        if !is_video {
            return false;
        }
        if self.playing.remove(id) {
            false
        } else {
            self.playing.insert(id.to_string());
            true
        }
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.contains(id)
    }

    /// Whether the host should keep a per-frame redraw loop running.
    pub fn redraw_loop_active(&self) -> bool {
        !self.playing.is_empty()
    }

    /// Teardown: stops playback loops, drops any pending gesture, commits nothing further, and
    /// cancels the session's pending auto-save. Input after unmount is ignored.
    pub fn unmount(&mut self) {
        self.playing.clear();
        self.gesture = Gesture::Idle;
        self.text_edit = TextEditState::Idle;
        self.guides.clear();
        self.session.shutdown();
        self.mounted = false;
    }

    pub fn overlay(&self) -> EditorOverlay {
        let mut overlay = EditorOverlay {
            guides: self.guides.clone(),
            ..EditorOverlay::default()
        };

        if let Some(el) = self.selected_element() {
            overlay.selection = Some(SelectionOverlay {
                id: el.id.clone(),
                frame: el.frame(),
                rotation: el.rotation,
                locked: el.locked,
                handles: handle_anchors(el),
            });
        }

        match &self.gesture {
            Gesture::Drag { id, preview: Some((x, y)), .. } => {
                overlay.drag_preview = Some((id.clone(), *x, *y));
            }
            Gesture::Resize { id, preview: Some(f), .. } => {
                overlay.resize_preview = Some((id.clone(), *f));
            }
            Gesture::Rotate { id, preview: Some(r), .. } => {
                overlay.rotate_preview = Some((id.clone(), *r));
            }
            Gesture::Draw { points, .. } => {
                overlay.pending_stroke = Some(points.clone());
            }
            _ => {}
        }

        overlay
    }

    fn selected_element(&self) -> Option<&Element> {
        let id = self.session.selected()?;
        self.session.active_page().element(id)
    }

    /// Append a finished stroke to the selected drawing element, or create a new drawing
    /// element sized to the stroke. The element frame grows to cover the stroke; existing
    /// strokes shift with the origin so they stay put on the page.
    fn commit_stroke(&mut self, points: Vec<f64>, options: DrawOptions) {
        if points.len() < 4 {
            return;
        }

        let pad = options.width / 2.0 + 2.0;
        let (min_x, min_y, max_x, max_y) = stroke_bounds(&points, pad);

        let target = self
            .session
            .selected()
            .and_then(|id| self.session.active_page().element(id))
            .filter(|el| matches!(el.kind, ElementKind::Drawing(_)))
            .map(|el| el.id.clone());

        match target {
            Some(id) => {
                let Some(el) = self.session.active_page().element(&id) else {
                    return;
                };
                let ElementKind::Drawing(drawing) = &el.kind else {
                    return;
                };

                let new_x = el.x.min(min_x);
                let new_y = el.y.min(min_y);
                let new_w = el.frame().right().max(max_x) - new_x;
                let new_h = el.frame().bottom().max(max_y) - new_y;
                let shift_x = el.x - new_x;
                let shift_y = el.y - new_y;

                let mut strokes = drawing.strokes.clone();
                if shift_x != 0.0 || shift_y != 0.0 {
                    for s in &mut strokes {
                        shift_points(&mut s.points, shift_x, shift_y);
                    }
                }
                strokes.push(make_stroke(&points, new_x, new_y, &options));

                self.session.update_element(
                    &id,
                    ElementPatch {
                        x: Some(new_x),
                        y: Some(new_y),
                        width: Some(new_w),
                        height: Some(new_h),
                        kind: Some(ElementKind::Drawing(DrawingElement { strokes })),
                        ..ElementPatch::default()
                    },
                );
            }
            None => {
                let id = self.session.allocate_element_id();
                let z = self.session.active_page().next_z_index();
                let frame = Frame::new(min_x, min_y, max_x - min_x, max_y - min_y);
                let mut el = Element::drawing(id, frame, z);
                el.kind = ElementKind::Drawing(DrawingElement {
                    strokes: vec![make_stroke(&points, min_x, min_y, &options)],
                });
                el.clamp_min_size();
                self.session.add_element(el);
            }
        }
    }
}

fn stroke_bounds(points: &[f64], pad: f64) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for pair in points.chunks_exact(2) {
        min_x = min_x.min(pair[0]);
        max_x = max_x.max(pair[0]);
        min_y = min_y.min(pair[1]);
        max_y = max_y.max(pair[1]);
    }
    (min_x - pad, min_y - pad, max_x + pad, max_y + pad)
}

fn make_stroke(page_points: &[f64], origin_x: f64, origin_y: f64, options: &DrawOptions) -> Stroke {
    let mut local = page_points.to_vec();
    shift_points(&mut local, -origin_x, -origin_y);
    Stroke {
        points: local,
        color: options.color.clone(),
        width: options.width,
        opacity: options.opacity,
        brush: options.brush,
    }
}

fn shift_points(points: &mut [f64], dx: f64, dy: f64) {
    for pair in points.chunks_exact_mut(2) {
        pair[0] += dx;
        pair[1] += dy;
    }
}

/// Map a page-space point into the element's unrotated local axes (origin at the frame's
/// top-left), so resize deltas follow the handles even on rotated elements.
fn to_unrotated_local(p: Point, frame: &Frame, rotation_deg: f64) -> Point {
    let c = frame.center();
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    let rad = -rotation_deg.to_radians();
    let rx = dx * rad.cos() - dy * rad.sin();
    let ry = dx * rad.sin() + dy * rad.cos();
    Point::new(rx + frame.width / 2.0, ry + frame.height / 2.0)
}

fn apply_resize(start: Frame, handle: ResizeHandle, dx: f64, dy: f64) -> Frame {
    let mut left = start.left();
    let mut top = start.top();
    let mut right = start.right();
    let mut bottom = start.bottom();

    match handle {
        ResizeHandle::North => top += dy,
        ResizeHandle::South => bottom += dy,
        ResizeHandle::East => right += dx,
        ResizeHandle::West => left += dx,
        ResizeHandle::NorthEast => {
            top += dy;
            right += dx;
        }
        ResizeHandle::NorthWest => {
            top += dy;
            left += dx;
        }
        ResizeHandle::SouthEast => {
            bottom += dy;
            right += dx;
        }
        ResizeHandle::SouthWest => {
            bottom += dy;
            left += dx;
        }
    }

    Frame::new(left, top, right - left, bottom - top)
}

/// Clamp a resized frame to the minimum size, keeping the anchored (non-dragged) edge fixed.
fn clamp_frame(frame: &mut Frame, start: Frame, handle: ResizeHandle, min_w: f64, min_h: f64) {
    if frame.width < min_w {
        let anchored_left = !matches!(
            handle,
            ResizeHandle::West | ResizeHandle::NorthWest | ResizeHandle::SouthWest
        );
        frame.width = min_w;
        if !anchored_left {
            frame.x = start.right() - min_w;
        } else {
            frame.x = start.left();
        }
    }
    if frame.height < min_h {
        let anchored_top = !matches!(
            handle,
            ResizeHandle::North | ResizeHandle::NorthEast | ResizeHandle::NorthWest
        );
        frame.height = min_h;
        if !anchored_top {
            frame.y = start.bottom() - min_h;
        } else {
            frame.y = start.top();
        }
    }
}

fn handle_anchors(el: &Element) -> Vec<(ResizeHandle, Point)> {
    let t = element_transform(el);
    let w = el.width;
    let h = el.height;
    vec![
        (ResizeHandle::NorthWest, t * Point::new(0.0, 0.0)),
        (ResizeHandle::North, t * Point::new(w / 2.0, 0.0)),
        (ResizeHandle::NorthEast, t * Point::new(w, 0.0)),
        (ResizeHandle::East, t * Point::new(w, h / 2.0)),
        (ResizeHandle::SouthEast, t * Point::new(w, h)),
        (ResizeHandle::South, t * Point::new(w / 2.0, h)),
        (ResizeHandle::SouthWest, t * Point::new(0.0, h)),
        (ResizeHandle::West, t * Point::new(0.0, h / 2.0)),
    ]
}
