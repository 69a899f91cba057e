//! Native vector shape outlines.
//!
//! Every routine paths directly against `(width, height)` in local (0,0)-origin coordinates, so
//! the same function serves preview thumbnails and full-size renders without parameterized
//! scaling. Generators never fail for finite input; non-positive dimensions degrade to an empty
//! path.

use std::f64::consts::PI;

use kurbo::{BezPath, Ellipse, Point, Rect, RoundedRect, Shape as _};

use crate::document::model::ShapeType;

const PATH_TOLERANCE: f64 = 0.1;

/// Outline for a shape element, in element-local coordinates.
pub fn shape_path(shape: ShapeType, w: f64, h: f64, corner_radius: f64) -> BezPath {
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return BezPath::new();
    }

    match shape {
        ShapeType::Rectangle => rectangle(w, h, corner_radius),
        ShapeType::Oval => Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0)
            .to_path(PATH_TOLERANCE),
        ShapeType::Pill => RoundedRect::new(0.0, 0.0, w, h, w.min(h) / 2.0).to_path(PATH_TOLERANCE),
        ShapeType::Heart => heart(w, h),
        ShapeType::Star => star_polygon(w, h, 5, 0.4),
        ShapeType::Starburst => star_polygon(w, h, 12, 0.75),
        ShapeType::Scalloped => scalloped(w, h),
        ShapeType::Cloud => cloud(w, h),
        ShapeType::Arrow => arrow(w, h),
        ShapeType::Banner => banner(w, h),
        ShapeType::Ribbon => ribbon(w, h),
        ShapeType::Ticket => ticket(w, h),
        ShapeType::Tag => tag(w, h),
        ShapeType::SpeechBubble => speech_bubble(w, h, corner_radius),
        ShapeType::ThoughtBubble => thought_bubble(w, h),
    }
}

fn rectangle(w: f64, h: f64, corner_radius: f64) -> BezPath {
    let r = corner_radius.clamp(0.0, w.min(h) / 2.0);
    if r > 0.0 {
        RoundedRect::new(0.0, 0.0, w, h, r).to_path(PATH_TOLERANCE)
    } else {
        Rect::new(0.0, 0.0, w, h).to_path(PATH_TOLERANCE)
    }
}

/// Two mirrored cubic lobes meeting at the notch and the tip.
fn heart(w: f64, h: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.5 * w, 0.95 * h));
    p.curve_to((0.2 * w, 0.75 * h), (0.0, 0.55 * h), (0.0, 0.3 * h));
    p.curve_to((0.0, 0.1 * h), (0.15 * w, 0.0), (0.3 * w, 0.0));
    p.curve_to((0.4 * w, 0.0), (0.48 * w, 0.06 * h), (0.5 * w, 0.15 * h));
    p.curve_to((0.52 * w, 0.06 * h), (0.6 * w, 0.0), (0.7 * w, 0.0));
    p.curve_to((0.85 * w, 0.0), (w, 0.1 * h), (w, 0.3 * h));
    p.curve_to((w, 0.55 * h), (0.8 * w, 0.75 * h), (0.5 * w, 0.95 * h));
    p.close_path();
    p
}

/// Alternating outer/inner vertices around the center, starting at 12 o'clock.
fn star_polygon(w: f64, h: f64, points: usize, inner_ratio: f64) -> BezPath {
    let cx = w / 2.0;
    let cy = h / 2.0;
    let rx = w / 2.0;
    let ry = h / 2.0;

    let mut p = BezPath::new();
    for i in 0..points * 2 {
        let angle = -PI / 2.0 + (i as f64) * PI / points as f64;
        let (fx, fy) = if i % 2 == 0 {
            (rx, ry)
        } else {
            (rx * inner_ratio, ry * inner_ratio)
        };
        let pt = Point::new(cx + fx * angle.cos(), cy + fy * angle.sin());
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p.close_path();
    p
}

/// Rounded bumps around the rectangle border, bump count derived from edge length.
fn scalloped(w: f64, h: f64) -> BezPath {
    let bump = (w.min(h) / 6.0).clamp(6.0, 24.0);
    let nx = ((w / bump / 2.0).round() as usize).max(2);
    let ny = ((h / bump / 2.0).round() as usize).max(2);
    let sx = w / nx as f64;
    let sy = h / ny as f64;
    let out = bump / 2.0;

    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    for i in 0..nx {
        let x0 = i as f64 * sx;
        p.quad_to((x0 + sx / 2.0, -out), (x0 + sx, 0.0));
    }
    for i in 0..ny {
        let y0 = i as f64 * sy;
        p.quad_to((w + out, y0 + sy / 2.0), (w, y0 + sy));
    }
    for i in 0..nx {
        let x0 = w - i as f64 * sx;
        p.quad_to((x0 - sx / 2.0, h + out), (x0 - sx, h));
    }
    for i in 0..ny {
        let y0 = h - i as f64 * sy;
        p.quad_to((-out, y0 - sy / 2.0), (0.0, y0 - sy));
    }
    p.close_path();
    p
}

/// Flat base plus a fixed arrangement of bumps across the top.
fn cloud(w: f64, h: f64) -> BezPath {
    let base = 0.8 * h;
    let mut p = BezPath::new();
    p.move_to((0.12 * w, base));
    p.quad_to((0.0, base), (0.02 * w, 0.62 * h));
    p.quad_to((0.04 * w, 0.38 * h), (0.22 * w, 0.42 * h));
    p.quad_to((0.26 * w, 0.12 * h), (0.48 * w, 0.2 * h));
    p.quad_to((0.62 * w, 0.0), (0.76 * w, 0.22 * h));
    p.quad_to((0.96 * w, 0.2 * h), (0.96 * w, 0.48 * h));
    p.quad_to((1.04 * w, 0.64 * h), (0.9 * w, base));
    p.close_path();
    p
}

fn arrow(w: f64, h: f64) -> BezPath {
    let shaft_top = 0.3 * h;
    let shaft_bottom = 0.7 * h;
    let head_start = 0.62 * w;

    let mut p = BezPath::new();
    p.move_to((0.0, shaft_top));
    p.line_to((head_start, shaft_top));
    p.line_to((head_start, 0.0));
    p.line_to((w, 0.5 * h));
    p.line_to((head_start, h));
    p.line_to((head_start, shaft_bottom));
    p.line_to((0.0, shaft_bottom));
    p.close_path();
    p
}

/// Horizontal banner with swallowtail notches at both ends.
fn banner(w: f64, h: f64) -> BezPath {
    let notch = (0.12 * w).min(h);
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((w, 0.0));
    p.line_to((w - notch, 0.5 * h));
    p.line_to((w, h));
    p.line_to((0.0, h));
    p.line_to((notch, 0.5 * h));
    p.close_path();
    p
}

/// Center band with folded tails hanging below each end.
fn ribbon(w: f64, h: f64) -> BezPath {
    let band_top = 0.18 * h;
    let band_bottom = 0.72 * h;
    let tail = 0.14 * w;

    let mut p = BezPath::new();
    p.move_to((tail, band_top));
    p.line_to((w - tail, band_top));
    p.line_to((w - tail, band_bottom));
    p.line_to((tail, band_bottom));
    p.close_path();

    p.move_to((0.0, 0.3 * h));
    p.line_to((tail, band_top));
    p.line_to((tail, band_bottom));
    p.line_to((0.0, h));
    p.line_to((0.08 * w, 0.65 * h));
    p.close_path();

    p.move_to((w, 0.3 * h));
    p.line_to((w - tail, band_top));
    p.line_to((w - tail, band_bottom));
    p.line_to((w, h));
    p.line_to((0.92 * w, 0.65 * h));
    p.close_path();
    p
}

/// Rectangle with semicircular punch-outs centered on the short edges.
fn ticket(w: f64, h: f64) -> BezPath {
    let r = (0.12 * h).min(0.2 * w);
    let mid = h / 2.0;

    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((w, 0.0));
    p.line_to((w, mid - r));
    p.quad_to((w - 1.4 * r, mid), (w, mid + r));
    p.line_to((w, h));
    p.line_to((0.0, h));
    p.line_to((0.0, mid + r));
    p.quad_to((1.4 * r, mid), (0.0, mid - r));
    p.close_path();
    p
}

/// Gift-tag outline with a pointed left end and a punch hole subpath.
fn tag(w: f64, h: f64) -> BezPath {
    let point = 0.22 * w;
    let mut p = BezPath::new();
    p.move_to((point, 0.0));
    p.line_to((w, 0.0));
    p.line_to((w, h));
    p.line_to((point, h));
    p.line_to((0.0, 0.5 * h));
    p.close_path();

    let hole = Ellipse::new((point + 0.06 * w, 0.5 * h), (0.04 * w, 0.04 * w), 0.0);
    p.extend(hole.to_path(PATH_TOLERANCE));
    p
}

/// Rounded body over the top part, triangular tail toward bottom-left.
fn speech_bubble(w: f64, h: f64, corner_radius: f64) -> BezPath {
    let body_h = 0.78 * h;
    let r = if corner_radius > 0.0 {
        corner_radius.clamp(0.0, w.min(body_h) / 2.0)
    } else {
        0.12 * w.min(body_h)
    };

    let mut p = RoundedRect::new(0.0, 0.0, w, body_h, r).to_path(PATH_TOLERANCE);
    p.move_to((0.22 * w, body_h));
    p.line_to((0.18 * w, h));
    p.line_to((0.38 * w, body_h));
    p.close_path();
    p
}

/// Cloud body plus two trailing thought circles toward bottom-left.
fn thought_bubble(w: f64, h: f64) -> BezPath {
    let mut p = cloud(w, 0.72 * h);
    let big = Ellipse::new((0.24 * w, 0.82 * h), (0.06 * w, 0.05 * h), 0.0);
    let small = Ellipse::new((0.14 * w, 0.94 * h), (0.035 * w, 0.03 * h), 0.0);
    p.extend(big.to_path(PATH_TOLERANCE));
    p.extend(small.to_path(PATH_TOLERANCE));
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_shapes() -> Vec<ShapeType> {
        vec![
            ShapeType::Rectangle,
            ShapeType::Oval,
            ShapeType::Pill,
            ShapeType::Heart,
            ShapeType::Star,
            ShapeType::Scalloped,
            ShapeType::Starburst,
            ShapeType::Cloud,
            ShapeType::Arrow,
            ShapeType::Banner,
            ShapeType::Ribbon,
            ShapeType::Ticket,
            ShapeType::Tag,
            ShapeType::SpeechBubble,
            ShapeType::ThoughtBubble,
        ]
    }

    #[test]
    fn every_shape_produces_geometry() {
        for shape in all_shapes() {
            let p = shape_path(shape, 120.0, 90.0, 8.0);
            assert!(!p.is_empty(), "{shape:?} produced an empty path");
        }
    }

    #[test]
    fn zero_size_degrades_to_empty_path() {
        for shape in all_shapes() {
            assert!(shape_path(shape, 0.0, 0.0, 0.0).is_empty());
            assert!(shape_path(shape, -5.0, 10.0, 0.0).is_empty());
        }
    }

    #[test]
    fn paths_are_deterministic() {
        for shape in all_shapes() {
            let a = shape_path(shape, 200.0, 150.0, 10.0).to_svg();
            let b = shape_path(shape, 200.0, 150.0, 10.0).to_svg();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn geometry_stays_near_local_bounds() {
        // Shapes path against (w, h) directly; bumps may overshoot slightly (scallops), but the
        // bounding box must stay in the same neighborhood as the requested size.
        for shape in all_shapes() {
            let bbox = shape_path(shape, 100.0, 100.0, 0.0).bounding_box();
            assert!(bbox.min_x() >= -30.0 && bbox.max_x() <= 130.0, "{shape:?}: {bbox:?}");
            assert!(bbox.min_y() >= -30.0 && bbox.max_y() <= 130.0, "{shape:?}: {bbox:?}");
        }
    }

    #[test]
    fn rectangle_honors_corner_radius() {
        let sharp = shape_path(ShapeType::Rectangle, 100.0, 60.0, 0.0).to_svg();
        let round = shape_path(ShapeType::Rectangle, 100.0, 60.0, 12.0).to_svg();
        assert_ne!(sharp, round);
    }
}
