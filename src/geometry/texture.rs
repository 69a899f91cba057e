//! Procedural page background textures, generated at the page's native size.

use std::fmt::Write as _;

use crate::geometry::decor::svg_data_uri;

/// Texture id → SVG data URI at the page's dimensions. Unknown ids fall back to plain paper so
/// an old document never fails to render after a texture is retired.
pub fn background_texture_svg(texture_id: &str, w: f64, h: f64) -> String {
    let w = w.max(1.0);
    let h = h.max(1.0);

    let mut body = String::new();
    match texture_id {
        "dots" => {
            let _ = write!(body, "<rect width='{w}' height='{h}' fill='#fdfbf5'/>");
            let step = 28.0;
            let mut y = step / 2.0;
            while y < h {
                let mut x = step / 2.0;
                while x < w {
                    let _ = write!(body, "<circle cx='{x}' cy='{y}' r='2' fill='#d8cfc0'/>");
                    x += step;
                }
                y += step;
            }
        }
        "grid" => {
            let _ = write!(body, "<rect width='{w}' height='{h}' fill='#fbfaf4'/>");
            let step = 32.0;
            let mut x = 0.0;
            while x <= w {
                let _ = write!(
                    body,
                    "<line x1='{x}' y1='0' x2='{x}' y2='{h}' stroke='#e0d8ca' stroke-width='1'/>"
                );
                x += step;
            }
            let mut y = 0.0;
            while y <= h {
                let _ = write!(
                    body,
                    "<line x1='0' y1='{y}' x2='{w}' y2='{y}' stroke='#e0d8ca' stroke-width='1'/>"
                );
                y += step;
            }
        }
        "lines" => {
            let _ = write!(body, "<rect width='{w}' height='{h}' fill='#fdfcf7'/>");
            let step = 36.0;
            let mut y = step;
            while y < h {
                let _ = write!(
                    body,
                    "<line x1='24' y1='{y}' x2='{x2}' y2='{y}' stroke='#c9d4e0' stroke-width='1.5'/>",
                    x2 = w - 24.0,
                );
                y += step;
            }
        }
        "craft" => {
            let _ = write!(body, "<rect width='{w}' height='{h}' fill='#d9c7a8'/>");
            // Sparse fleck pattern on a fixed lattice keeps the texture stable per size.
            let step = 18.0;
            let mut y = 4.0;
            let mut row = 0usize;
            while y < h {
                let mut x = if row % 2 == 0 { 6.0 } else { 14.0 };
                while x < w {
                    let _ = write!(
                        body,
                        "<circle cx='{x}' cy='{y}' r='0.8' fill='#c4b08c' fill-opacity='0.7'/>"
                    );
                    x += step;
                }
                y += step * 0.75;
                row += 1;
            }
        }
        _ => {
            let _ = write!(body, "<rect width='{w}' height='{h}' fill='#f7f3e9'/>");
        }
    }

    svg_data_uri(w, h, &body)
}
