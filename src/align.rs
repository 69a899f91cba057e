//! Snap-to-sibling alignment for drag gestures.
//!
//! Pure computation: given a dragged element's proposed position, the engine returns a possibly
//! adjusted position plus guide lines to draw. Callers apply the returned x/y to the dragged
//! node and discard the guides once the drag ends.

use crate::{
    document::model::Element,
    foundation::core::Frame,
};

/// Maximum distance, in page-native units, at which an edge locks onto a candidate.
pub const SNAP_THRESHOLD: f64 = 8.0;

/// Guides extend this far past the spanned extent so short alignments stay visible.
pub const GUIDE_EXTENSION: f64 = 20.0;

const EDGE_EPSILON: f64 = 1e-6;

/// Candidate snap coordinates per axis: canvas edges/center plus the edges and centers of every
/// unlocked sibling. Deduplicated, ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapCandidates {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// A vertical line at `position` (an x snap).
    Vertical,
    /// A horizontal line at `position` (a y snap).
    Horizontal,
}

/// A visual alignment line shown while a snap is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Guide {
    pub axis: GuideAxis,
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    pub guides: Vec<Guide>,
}

/// Collect snap candidates from the canvas bounds and every unlocked sibling of `exclude_id`.
pub fn snap_candidates(
    elements: &[Element],
    exclude_id: &str,
    canvas_w: f64,
    canvas_h: f64,
) -> SnapCandidates {
    let mut xs = vec![0.0, canvas_w / 2.0, canvas_w];
    let mut ys = vec![0.0, canvas_h / 2.0, canvas_h];

    for el in elements {
        if el.id == exclude_id || el.locked {
            continue;
        }
        let f = el.frame();
        xs.extend([f.left(), f.center_x(), f.right()]);
        ys.extend([f.top(), f.center_y(), f.bottom()]);
    }

    SnapCandidates {
        xs: dedup_sorted(xs),
        ys: dedup_sorted(ys),
    }
}

/// Sibling frames eligible to anchor guides: every unlocked element except the dragged one.
pub fn sibling_frames(elements: &[Element], exclude_id: &str) -> Vec<Frame> {
    elements
        .iter()
        .filter(|el| el.id != exclude_id && !el.locked)
        .map(Element::frame)
        .collect()
}

/// Snap a dragged element at its proposed position.
///
/// Per axis, the element's own checkpoints are tried in fixed order (left, center, right for x;
/// top, middle, bottom for y) and the first checkpoint with a candidate inside
/// [`SNAP_THRESHOLD`] wins — no averaging across candidates. `disabled` (held modifier key)
/// short-circuits before any candidate search.
pub fn compute_snap(
    width: f64,
    height: f64,
    proposed_x: f64,
    proposed_y: f64,
    candidates: &SnapCandidates,
    siblings: &[Frame],
    canvas_w: f64,
    canvas_h: f64,
    disabled: bool,
) -> SnapResult {
    if disabled {
        return SnapResult {
            x: proposed_x,
            y: proposed_y,
            guides: Vec::new(),
        };
    }

    let x_hit = snap_axis(proposed_x, &[0.0, width / 2.0, width], &candidates.xs);
    let y_hit = snap_axis(proposed_y, &[0.0, height / 2.0, height], &candidates.ys);

    let x = x_hit.map_or(proposed_x, |hit| hit.origin);
    let y = y_hit.map_or(proposed_y, |hit| hit.origin);

    let mut guides = Vec::new();
    if let Some(hit) = x_hit {
        guides.push(vertical_guide(hit.candidate, y, height, siblings, canvas_w, canvas_h));
    }
    if let Some(hit) = y_hit {
        guides.push(horizontal_guide(hit.candidate, x, width, siblings, canvas_w, canvas_h));
    }

    SnapResult { x, y, guides }
}

#[derive(Clone, Copy)]
struct AxisHit {
    /// Snapped origin coordinate for the element.
    origin: f64,
    /// The candidate line the edge locked onto.
    candidate: f64,
}

fn snap_axis(proposed: f64, offsets: &[f64], candidates: &[f64]) -> Option<AxisHit> {
    for &offset in offsets {
        let target = proposed + offset;
        let mut best: Option<f64> = None;
        for &cand in candidates {
            let d = (cand - target).abs();
            if d <= SNAP_THRESHOLD && best.is_none_or(|b| d < (b - target).abs()) {
                best = Some(cand);
            }
        }
        if let Some(cand) = best {
            return Some(AxisHit {
                origin: cand - offset,
                candidate: cand,
            });
        }
    }
    None
}

fn vertical_guide(
    position: f64,
    y: f64,
    height: f64,
    siblings: &[Frame],
    canvas_w: f64,
    canvas_h: f64,
) -> Guide {
    if (position - canvas_w / 2.0).abs() < EDGE_EPSILON {
        return Guide {
            axis: GuideAxis::Vertical,
            position,
            start: 0.0,
            end: canvas_h,
        };
    }

    let mut start = y;
    let mut end = y + height;
    for s in siblings {
        let matches = [s.left(), s.center_x(), s.right()]
            .iter()
            .any(|&e| (e - position).abs() < EDGE_EPSILON);
        if matches {
            start = start.min(s.top());
            end = end.max(s.bottom());
        }
    }

    Guide {
        axis: GuideAxis::Vertical,
        position,
        start: start - GUIDE_EXTENSION,
        end: end + GUIDE_EXTENSION,
    }
}

fn horizontal_guide(
    position: f64,
    x: f64,
    width: f64,
    siblings: &[Frame],
    canvas_w: f64,
    canvas_h: f64,
) -> Guide {
    if (position - canvas_h / 2.0).abs() < EDGE_EPSILON {
        return Guide {
            axis: GuideAxis::Horizontal,
            position,
            start: 0.0,
            end: canvas_w,
        };
    }

    let mut start = x;
    let mut end = x + width;
    for s in siblings {
        let matches = [s.top(), s.center_y(), s.bottom()]
            .iter()
            .any(|&e| (e - position).abs() < EDGE_EPSILON);
        if matches {
            start = start.min(s.left());
            end = end.max(s.right());
        }
    }

    Guide {
        axis: GuideAxis::Horizontal,
        position,
        start: start - GUIDE_EXTENSION,
        end: end + GUIDE_EXTENSION,
    }
}

fn dedup_sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < EDGE_EPSILON);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::model::Element, foundation::core::Frame};

    fn image_at(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::image(id, "m", "u", Frame::new(x, y, w, h), 0.0, 0)
    }

    #[test]
    fn candidates_include_canvas_and_sibling_lines() {
        let els = vec![image_at("a", 100.0, 100.0, 200.0, 200.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        for expected in [0.0, 100.0, 200.0, 300.0, 400.0, 800.0] {
            assert!(c.xs.contains(&expected), "missing x candidate {expected}");
        }
        assert!(c.ys.contains(&500.0)); // canvas center
        assert!(c.xs.windows(2).all(|w| w[0] < w[1]), "not sorted/deduped");
    }

    #[test]
    fn excluded_and_locked_elements_contribute_nothing() {
        let mut locked = image_at("a", 111.0, 0.0, 10.0, 10.0);
        locked.locked = true;
        let els = vec![locked, image_at("b", 222.0, 0.0, 10.0, 10.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        assert!(!c.xs.contains(&111.0));
        assert!(!c.xs.contains(&222.0));
    }

    #[test]
    fn disabled_bypasses_everything() {
        let els = vec![image_at("a", 100.0, 100.0, 200.0, 200.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        let r = compute_snap(200.0, 200.0, 103.0, 99.0, &c, &sib, 800.0, 1000.0, true);
        assert_eq!((r.x, r.y), (103.0, 99.0));
        assert!(r.guides.is_empty());
    }

    #[test]
    fn snap_is_pure() {
        let els = vec![image_at("a", 100.0, 100.0, 200.0, 200.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        let r1 = compute_snap(200.0, 200.0, 103.0, 99.0, &c, &sib, 800.0, 1000.0, false);
        let r2 = compute_snap(200.0, 200.0, 103.0, 99.0, &c, &sib, 800.0, 1000.0, false);
        assert_eq!(r1, r2);
    }

    #[test]
    fn first_matching_edge_wins() {
        // Left edge at 103 is within threshold of 100; center/right would also be near other
        // candidates, but left is checked first and wins.
        let els = vec![image_at("a", 100.0, 500.0, 200.0, 10.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        let r = compute_snap(200.0, 50.0, 103.0, 700.0, &c, &sib, 800.0, 1000.0, false);
        assert_eq!(r.x, 100.0);
    }

    #[test]
    fn far_positions_do_not_snap() {
        let els = vec![image_at("a", 100.0, 100.0, 200.0, 200.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        let r = compute_snap(20.0, 20.0, 537.0, 637.0, &c, &sib, 800.0, 1000.0, false);
        assert_eq!((r.x, r.y), (537.0, 637.0));
        assert!(r.guides.is_empty());
    }

    #[test]
    fn sibling_top_edge_snap_spans_both_elements() {
        // 800x1000 canvas, image at (100,100,200,200), second 200x200 element dragged to
        // (350, 98) snaps to y=100 with a horizontal guide across both extents.
        let els = vec![image_at("a", 100.0, 100.0, 200.0, 200.0)];
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        let r = compute_snap(200.0, 200.0, 350.0, 98.0, &c, &sib, 800.0, 1000.0, false);
        assert_eq!(r.y, 100.0);

        let guide = r
            .guides
            .iter()
            .find(|g| g.axis == GuideAxis::Horizontal)
            .expect("horizontal guide");
        assert_eq!(guide.position, 100.0);
        assert_eq!(guide.start, 100.0 - GUIDE_EXTENSION);
        assert_eq!(guide.end, 550.0 + GUIDE_EXTENSION);
    }

    #[test]
    fn canvas_center_guide_spans_full_canvas() {
        let els: Vec<Element> = Vec::new();
        let c = snap_candidates(&els, "b", 800.0, 1000.0);
        let sib = sibling_frames(&els, "b");
        // Element center at 398 -> snaps to canvas center x=400.
        let r = compute_snap(100.0, 100.0, 348.0, 700.0, &c, &sib, 800.0, 1000.0, false);
        assert_eq!(r.x, 350.0);
        let guide = r
            .guides
            .iter()
            .find(|g| g.axis == GuideAxis::Vertical)
            .expect("vertical guide");
        assert_eq!(guide.position, 400.0);
        assert_eq!((guide.start, guide.end), (0.0, 1000.0));
    }
}
