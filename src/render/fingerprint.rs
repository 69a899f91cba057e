//! Scene fingerprinting: a paired FNV-1a 64 digest of a compiled display list.
//!
//! The fingerprint is the parity oracle for the editor/viewer reproducibility contract: two
//! surfaces that compile the same page must produce identical fingerprints. Two independent
//! seeds keep accidental collisions out of test noise.

use crate::{
    foundation::hash::{FNV_OFFSET_BASIS, Fnv1a64},
    render::compile::{BackgroundPaint, DisplayList, NodeContent, SceneNode},
};

const SECOND_SEED: u64 = 0x9ae16a3b2f90404f;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_display_list(list: &DisplayList) -> SceneFingerprint {
    let mut a = Fnv1a64::new(FNV_OFFSET_BASIS);
    let mut b = Fnv1a64::new(SECOND_SEED);

    write_str(&mut a, &mut b, &list.page_id);
    write_f64(&mut a, &mut b, list.width);
    write_f64(&mut a, &mut b, list.height);

    match &list.background {
        BackgroundPaint::Color { value } => {
            write_u8(&mut a, &mut b, 0);
            write_str(&mut a, &mut b, value);
        }
        BackgroundPaint::Texture { id, src } => {
            write_u8(&mut a, &mut b, 1);
            write_str(&mut a, &mut b, id);
            write_str(&mut a, &mut b, src);
        }
    }

    write_u64(&mut a, &mut b, list.nodes.len() as u64);
    for node in &list.nodes {
        write_node(&mut a, &mut b, node);
    }

    SceneFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_node(a: &mut Fnv1a64, b: &mut Fnv1a64, node: &SceneNode) {
    write_str(a, b, &node.id);
    write_u64(a, b, node.z_index as i64 as u64);
    write_u64(a, b, node.seq as u64);
    for c in node.transform.as_coeffs() {
        write_f64(a, b, c);
    }
    write_f64(a, b, node.width);
    write_f64(a, b, node.height);
    write_u8(a, b, u8::from(node.locked));

    match &node.content {
        NodeContent::Image {
            src,
            clip,
            padding,
            overlay,
            channels,
            css_filter,
            border_color,
        } => {
            write_u8(a, b, 0);
            write_str(a, b, src);
            write_opt_str(a, b, clip.as_deref());
            for v in [padding.top, padding.right, padding.bottom, padding.left] {
                write_f64(a, b, v);
            }
            write_opt_str(a, b, overlay.as_deref());
            for v in [
                channels.brightness,
                channels.contrast,
                channels.saturate,
                channels.grayscale,
                channels.sepia,
                channels.hue_rotate_deg,
                channels.blur_px,
            ] {
                write_f64(a, b, v);
            }
            write_str(a, b, css_filter);
            write_opt_str(a, b, border_color.as_deref());
        }
        NodeContent::Video { src, thumbnail } => {
            write_u8(a, b, 1);
            write_str(a, b, src);
            write_opt_str(a, b, thumbnail.as_deref());
        }
        NodeContent::Sticker {
            category,
            sticker_id,
            src,
        } => {
            write_u8(a, b, 2);
            write_u8(a, b, *category as u8);
            write_str(a, b, sticker_id);
            write_opt_str(a, b, src.as_deref());
        }
        NodeContent::Text {
            content,
            font_family,
            font_size,
            bold,
            italic,
            underline,
            fill,
            align,
            vertical_align,
            container,
        } => {
            write_u8(a, b, 3);
            write_str(a, b, content);
            write_str(a, b, font_family);
            write_f64(a, b, *font_size);
            write_u8(a, b, u8::from(*bold));
            write_u8(a, b, u8::from(*italic));
            write_u8(a, b, u8::from(*underline));
            write_str(a, b, fill);
            write_u8(a, b, *align as u8);
            write_u8(a, b, *vertical_align as u8);
            match container {
                Some(c) => {
                    write_u8(a, b, 1);
                    write_str(a, b, &c.color);
                    write_str(a, b, &c.path);
                    write_f64(a, b, c.padding);
                }
                None => write_u8(a, b, 0),
            }
        }
        NodeContent::Drawing { strokes } => {
            write_u8(a, b, 4);
            write_u64(a, b, strokes.len() as u64);
            for s in strokes {
                write_str(a, b, &s.d);
                write_str(a, b, &s.color);
                write_f64(a, b, s.width);
                write_f64(a, b, s.opacity);
                write_u8(a, b, s.brush as u8);
            }
        }
        NodeContent::Shape {
            path,
            fill,
            stroke_color,
            stroke_width,
            opacity,
        } => {
            write_u8(a, b, 5);
            write_str(a, b, path);
            write_str(a, b, fill);
            write_opt_str(a, b, stroke_color.as_deref());
            write_f64(a, b, *stroke_width);
            write_f64(a, b, *opacity);
        }
    }
}

fn write_u8(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_f64(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    write_u64(a, b, v.to_bits());
}

fn write_str(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

fn write_opt_str(a: &mut Fnv1a64, b: &mut Fnv1a64, s: Option<&str>) {
    match s {
        Some(s) => {
            write_u8(a, b, 1);
            write_str(a, b, s);
        }
        None => write_u8(a, b, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::model::{Document, Element},
        foundation::core::Frame,
        render::compile::compile_page,
    };

    fn page_with_image(x: f64) -> crate::document::model::Page {
        let mut doc = Document::with_default_page();
        doc.pages[0].elements.push(Element::image(
            "e1",
            "m1",
            "https://cdn/p.jpg",
            Frame::new(x, 50.0, 200.0, 150.0),
            0.0,
            0,
        ));
        doc.pages.remove(0)
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let list = compile_page(&page_with_image(100.0));
        assert_eq!(fingerprint_display_list(&list), fingerprint_display_list(&list));
    }

    #[test]
    fn fingerprint_changes_when_scene_changes() {
        let a = compile_page(&page_with_image(100.0));
        let b = compile_page(&page_with_image(101.0));
        assert_ne!(fingerprint_display_list(&a), fingerprint_display_list(&b));
    }

    #[test]
    fn fingerprint_separates_stroke_brushes() {
        use crate::document::model::{BrushKind, DrawingElement, Stroke};

        let page_with_brush = |brush| {
            let mut doc = Document::with_default_page();
            doc.pages[0].elements.push(Element {
                kind: crate::document::model::ElementKind::Drawing(DrawingElement {
                    strokes: vec![Stroke {
                        points: vec![0.0, 0.0, 40.0, 40.0],
                        color: "#3d3d3d".to_string(),
                        width: 3.0,
                        opacity: 1.0,
                        brush,
                    }],
                }),
                ..Element::drawing("d1", Frame::new(10.0, 10.0, 80.0, 80.0), 0)
            });
            doc.pages.remove(0)
        };
        let pen = fingerprint_display_list(&compile_page(&page_with_brush(BrushKind::Pen)));
        let marker = fingerprint_display_list(&compile_page(&page_with_brush(BrushKind::Marker)));
        assert_ne!(pen, marker);
    }

    #[test]
    fn display_is_32_hex_chars() {
        let fp = fingerprint_display_list(&compile_page(&page_with_image(0.0)));
        assert_eq!(fp.to_string().len(), 32);
    }
}
