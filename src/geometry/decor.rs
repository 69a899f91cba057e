//! Decorative SVG assets: washi tape and frame overlays.
//!
//! These are generated as data URIs sized exactly to the consuming element's current
//! width/height and regenerated on every resize — never cached at a stale size. Pattern choice
//! and palette are deterministic per sticker id.

use std::fmt::Write as _;

use crate::{document::model::FrameStyle, foundation::seed::SeededRng};

/// Per-side padding a frame style reserves around the photo content.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Content padding for a frame style at the element's current size.
pub fn frame_padding(style: FrameStyle, w: f64, h: f64) -> Edges {
    let unit = (w.min(h) * 0.05).clamp(4.0, 18.0);
    match style {
        FrameStyle::Classic => Edges::uniform(unit),
        FrameStyle::Polaroid => Edges {
            top: unit,
            right: unit,
            bottom: (h * 0.18).clamp(unit, 64.0),
            left: unit,
        },
        FrameStyle::Film => Edges {
            top: unit * 1.5,
            right: 0.0,
            bottom: unit * 1.5,
            left: 0.0,
        },
        FrameStyle::Stamp => Edges::uniform(unit * 0.8),
        _ => Edges::default(),
    }
}

const WASHI_PALETTES: &[(&str, &str)] = &[
    ("#f7c5cc", "#e8899a"),
    ("#c5e0f7", "#7fa8d9"),
    ("#d9ecc7", "#95bf74"),
    ("#f9e4b7", "#e0b94f"),
    ("#e4d0f0", "#a883c9"),
    ("#fcd7b6", "#e89a5b"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WashiPattern {
    Stripes,
    Dots,
    Zigzag,
    Plaid,
    Grid,
}

const WASHI_PATTERNS: &[WashiPattern] = &[
    WashiPattern::Stripes,
    WashiPattern::Dots,
    WashiPattern::Zigzag,
    WashiPattern::Plaid,
    WashiPattern::Grid,
];

/// Washi tape SVG data URI at the element's current size.
///
/// Pattern and palette are chosen from the sticker id, so "washi-3" always looks like
/// "washi-3" whatever size the guest stretches it to.
pub fn washi_svg(sticker_id: &str, w: f64, h: f64) -> String {
    let w = w.max(1.0);
    let h = h.max(1.0);

    let mut rng = SeededRng::from_id(sticker_id);
    let (base, accent) = WASHI_PALETTES[rng.next_index(WASHI_PALETTES.len())];
    let pattern = WASHI_PATTERNS[rng.next_index(WASHI_PATTERNS.len())];

    let mut body = String::new();
    let _ = write!(
        body,
        "<rect width='{w}' height='{h}' fill='{base}' fill-opacity='0.85'/>"
    );

    match pattern {
        WashiPattern::Stripes => {
            let step = (h * 0.9).clamp(6.0, 18.0);
            let mut x = -h;
            while x < w + h {
                let _ = write!(
                    body,
                    "<line x1='{x}' y1='0' x2='{}' y2='{h}' stroke='{accent}' stroke-width='{}'/>",
                    x + h,
                    step * 0.35,
                );
                x += step;
            }
        }
        WashiPattern::Dots => {
            let step = (h / 2.5).clamp(6.0, 16.0);
            let r = step * 0.22;
            let mut y = step / 2.0;
            let mut row = 0;
            while y < h {
                let offset = if row % 2 == 0 { step / 2.0 } else { step };
                let mut x = offset;
                while x < w {
                    let _ = write!(body, "<circle cx='{x}' cy='{y}' r='{r}' fill='{accent}'/>");
                    x += step;
                }
                y += step;
                row += 1;
            }
        }
        WashiPattern::Zigzag => {
            let step = (h * 0.8).clamp(8.0, 20.0);
            let mid = h / 2.0;
            let amp = h * 0.3;
            let mut d = format!("M0 {mid}");
            let mut x = 0.0;
            let mut up = true;
            while x < w {
                x += step / 2.0;
                let y = if up { mid - amp } else { mid + amp };
                let _ = write!(d, " L{x} {y}");
                up = !up;
            }
            let _ = write!(
                body,
                "<path d='{d}' fill='none' stroke='{accent}' stroke-width='{}'/>",
                h * 0.12,
            );
        }
        WashiPattern::Plaid => {
            let step = (h / 2.0).clamp(8.0, 22.0);
            let mut x = step / 2.0;
            while x < w {
                let _ = write!(
                    body,
                    "<rect x='{x}' y='0' width='{}' height='{h}' fill='{accent}' fill-opacity='0.4'/>",
                    step * 0.4,
                );
                x += step;
            }
            let mut y = step / 2.0;
            while y < h {
                let _ = write!(
                    body,
                    "<rect x='0' y='{y}' width='{w}' height='{}' fill='{accent}' fill-opacity='0.4'/>",
                    step * 0.4,
                );
                y += step;
            }
        }
        WashiPattern::Grid => {
            let step = (h / 2.0).clamp(6.0, 18.0);
            let mut x = 0.0;
            while x <= w {
                let _ = write!(
                    body,
                    "<line x1='{x}' y1='0' x2='{x}' y2='{h}' stroke='{accent}' stroke-width='1' stroke-opacity='0.6'/>"
                );
                x += step;
            }
            let mut y = 0.0;
            while y <= h {
                let _ = write!(
                    body,
                    "<line x1='0' y1='{y}' x2='{w}' y2='{y}' stroke='{accent}' stroke-width='1' stroke-opacity='0.6'/>"
                );
                y += step;
            }
        }
    }

    svg_data_uri(w, h, &body)
}

/// Overlay artwork for frame styles that paint on top of the photo. Clip-only styles return
/// `None`; their treatment lives in [`crate::geometry::clip`].
pub fn frame_overlay_svg(style: FrameStyle, w: f64, h: f64) -> Option<String> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    match style {
        FrameStyle::Classic => {
            let pad = frame_padding(style, w, h).top;
            let body = format!(
                "<rect x='{half}' y='{half}' width='{iw}' height='{ih}' fill='none' stroke='#ffffff' stroke-width='{pad}'/>",
                half = pad / 2.0,
                iw = w - pad,
                ih = h - pad,
            );
            Some(svg_data_uri(w, h, &body))
        }
        FrameStyle::Polaroid => {
            let e = frame_padding(style, w, h);
            let mut body = String::new();
            let _ = write!(
                body,
                "<path d='M0 0 H{w} V{h} H0 Z M{l} {t} H{r} V{b} H{l} Z' fill='#fdfdf8' fill-rule='evenodd'/>",
                l = e.left,
                t = e.top,
                r = w - e.right,
                b = h - e.bottom,
            );
            Some(svg_data_uri(w, h, &body))
        }
        FrameStyle::Film => {
            let e = frame_padding(style, w, h);
            let mut body = String::new();
            let _ = write!(
                body,
                "<rect width='{w}' height='{t}' fill='#1a1a1a'/><rect y='{by}' width='{w}' height='{t}' fill='#1a1a1a'/>",
                t = e.top,
                by = h - e.bottom,
            );
            let hole_w = e.top * 0.5;
            let hole_h = e.top * 0.45;
            let step = hole_w * 2.2;
            let mut x = step / 2.0;
            while x + hole_w < w {
                let _ = write!(
                    body,
                    "<rect x='{x}' y='{ty}' width='{hole_w}' height='{hole_h}' rx='1' fill='#f0f0e8'/><rect x='{x}' y='{byy}' width='{hole_w}' height='{hole_h}' rx='1' fill='#f0f0e8'/>",
                    ty = (e.top - hole_h) / 2.0,
                    byy = h - e.bottom + (e.bottom - hole_h) / 2.0,
                );
                x += step;
            }
            Some(svg_data_uri(w, h, &body))
        }
        FrameStyle::Stamp => {
            let r = (w.min(h) * 0.03).clamp(3.0, 8.0);
            let mut body = format!("<rect width='{w}' height='{h}' fill='none'/>");
            let _ = write!(body, "<g fill='#f7f3e9'>");
            perforation_row(&mut body, w, r, |x| (x, 0.0));
            perforation_row(&mut body, w, r, |x| (x, h));
            perforation_row(&mut body, h, r, |y| (0.0, y));
            perforation_row(&mut body, h, r, |y| (w, y));
            let _ = write!(body, "</g>");
            Some(svg_data_uri(w, h, &body))
        }
        _ => None,
    }
}

fn perforation_row(body: &mut String, len: f64, r: f64, pos: impl Fn(f64) -> (f64, f64)) {
    let step = r * 2.8;
    let mut t = step / 2.0;
    while t < len {
        let (cx, cy) = pos(t);
        let _ = write!(body, "<circle cx='{cx}' cy='{cy}' r='{r}'/>");
        t += step;
    }
}

/// Wrap SVG body markup in a minimally-encoded `data:` URI. Attribute values use single quotes
/// so only `#` needs escaping for URI safety.
pub fn svg_data_uri(w: f64, h: f64, body: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>{body}</svg>"
    );
    format!("data:image/svg+xml;utf8,{}", svg.replace('#', "%23"))
}
