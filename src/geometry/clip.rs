//! Seeded clip paths for photo frame treatments.
//!
//! Torn and scalloped clips are pure functions of `(element id, width, height)`: the jitter is
//! driven by the shared LCG seeded from the id, so the same element tears identically across
//! reloads and between editor and viewer, while a different element gets a visually distinct
//! tear. Output is SVG path data (`d` attribute) because the byte string itself is the
//! compatibility contract.

use kurbo::BezPath;

use crate::{
    document::model::{FrameStyle, ShapeType},
    foundation::seed::SeededRng,
    geometry::shape::shape_path,
};

/// Jagged tear outline. Step length and jitter depth scale with the edge, so small and large
/// photos tear at a similar visual grain.
pub fn torn_clip_path(id: &str, w: f64, h: f64) -> String {
    if w <= 0.0 || h <= 0.0 {
        return String::new();
    }

    let mut rng = SeededRng::from_id(id);
    let step = (w.min(h) / 9.0).clamp(8.0, 28.0);
    let depth = step * 0.45;

    let mut p = BezPath::new();
    p.move_to((jitter(&mut rng, depth), jitter(&mut rng, depth)));

    walk_edge(&mut p, &mut rng, (0.0, 0.0), (w, 0.0), step, depth);
    walk_edge(&mut p, &mut rng, (w, 0.0), (w, h), step, depth);
    walk_edge(&mut p, &mut rng, (w, h), (0.0, h), step, depth);
    walk_edge(&mut p, &mut rng, (0.0, h), (0.0, 0.0), step, depth);

    p.close_path();
    p.to_svg()
}

/// Scallop bumps around the border; bump radius jitters slightly per element.
pub fn scalloped_clip_path(id: &str, w: f64, h: f64) -> String {
    if w <= 0.0 || h <= 0.0 {
        return String::new();
    }

    let mut rng = SeededRng::from_id(id);
    let bump = (w.min(h) / 8.0).clamp(6.0, 20.0) * rng.next_range(0.9, 1.1);
    let inset = bump / 2.0;
    let nx = ((w / bump / 2.0).round() as usize).max(2);
    let ny = ((h / bump / 2.0).round() as usize).max(2);

    let mut p = BezPath::new();
    p.move_to((inset, inset));
    for i in 0..nx {
        let x0 = inset + i as f64 * (w - 2.0 * inset) / nx as f64;
        let x1 = inset + (i + 1) as f64 * (w - 2.0 * inset) / nx as f64;
        p.quad_to(((x0 + x1) / 2.0, inset - bump), (x1, inset));
    }
    for i in 0..ny {
        let y0 = inset + i as f64 * (h - 2.0 * inset) / ny as f64;
        let y1 = inset + (i + 1) as f64 * (h - 2.0 * inset) / ny as f64;
        p.quad_to((w - inset + bump, (y0 + y1) / 2.0), (w - inset, y1));
    }
    for i in 0..nx {
        let x0 = w - inset - i as f64 * (w - 2.0 * inset) / nx as f64;
        let x1 = w - inset - (i + 1) as f64 * (w - 2.0 * inset) / nx as f64;
        p.quad_to(((x0 + x1) / 2.0, h - inset + bump), (x1, h - inset));
    }
    for i in 0..ny {
        let y0 = h - inset - i as f64 * (h - 2.0 * inset) / ny as f64;
        let y1 = h - inset - (i + 1) as f64 * (h - 2.0 * inset) / ny as f64;
        p.quad_to((inset - bump, (y0 + y1) / 2.0), (inset, y1));
    }
    p.close_path();
    p.to_svg()
}

/// Clip path for a frame style, if the style clips at all.
pub fn frame_clip_path(style: FrameStyle, id: &str, w: f64, h: f64) -> Option<String> {
    match style {
        FrameStyle::Torn => Some(torn_clip_path(id, w, h)),
        FrameStyle::Scalloped => Some(scalloped_clip_path(id, w, h)),
        FrameStyle::Oval => Some(shape_path(ShapeType::Oval, w, h, 0.0).to_svg()),
        FrameStyle::Heart => Some(shape_path(ShapeType::Heart, w, h, 0.0).to_svg()),
        FrameStyle::Rounded => {
            Some(shape_path(ShapeType::Rectangle, w, h, (w.min(h) * 0.08).max(6.0)).to_svg())
        }
        FrameStyle::None
        | FrameStyle::Classic
        | FrameStyle::Polaroid
        | FrameStyle::Film
        | FrameStyle::Stamp => None,
    }
}

fn walk_edge(
    p: &mut BezPath,
    rng: &mut SeededRng,
    from: (f64, f64),
    to: (f64, f64),
    step: f64,
    depth: f64,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let len = dx.hypot(dy);
    let n = ((len / step).round() as usize).max(2);

    for i in 1..=n {
        let t = i as f64 / n as f64;
        let bx = from.0 + dx * t;
        let by = from.1 + dy * t;
        // Jitter pulls inward only, so the tear never exceeds the element bounds.
        let (jx, jy) = if dx.abs() > dy.abs() {
            // Horizontal edge: top edge (y near 0) jitters down, bottom edge jitters up.
            (0.0, if from.1 <= 0.5 { jitter(rng, depth) } else { -jitter(rng, depth) })
        } else {
            // Vertical edge: left edge (x near 0) jitters right, right edge jitters left.
            (if from.0 <= 0.5 { jitter(rng, depth) } else { -jitter(rng, depth) }, 0.0)
        };
        p.line_to((bx + jx, by + jy));
    }
}

fn jitter(rng: &mut SeededRng, depth: f64) -> f64 {
    rng.next_range(0.0, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torn_path_is_byte_identical_for_same_inputs() {
        let a = torn_clip_path("el-1", 200.0, 150.0);
        let b = torn_clip_path("el-1", 200.0, 150.0);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn torn_path_differs_per_element_id() {
        let a = torn_clip_path("el-1", 200.0, 150.0);
        let b = torn_clip_path("el-2", 200.0, 150.0);
        assert_ne!(a, b);
    }

    #[test]
    fn torn_path_differs_per_size() {
        let a = torn_clip_path("el-1", 200.0, 150.0);
        let b = torn_clip_path("el-1", 300.0, 150.0);
        assert_ne!(a, b);
    }

    #[test]
    fn scalloped_clip_is_deterministic() {
        assert_eq!(
            scalloped_clip_path("el-9", 120.0, 90.0),
            scalloped_clip_path("el-9", 120.0, 90.0)
        );
    }

    #[test]
    fn zero_size_yields_empty_string() {
        assert_eq!(torn_clip_path("el-1", 0.0, 100.0), "");
        assert_eq!(scalloped_clip_path("el-1", 100.0, 0.0), "");
    }

    #[test]
    fn frame_clip_only_for_clipping_styles() {
        assert!(frame_clip_path(FrameStyle::Torn, "e", 100.0, 100.0).is_some());
        assert!(frame_clip_path(FrameStyle::Heart, "e", 100.0, 100.0).is_some());
        assert!(frame_clip_path(FrameStyle::None, "e", 100.0, 100.0).is_none());
        assert!(frame_clip_path(FrameStyle::Polaroid, "e", 100.0, 100.0).is_none());
    }
}
