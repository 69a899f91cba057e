//! Pluggable photo layout strategies.
//!
//! A generator maps `(count, canvas_w, canvas_h)` to target frames; the session applies them to
//! image elements by index modulo the generated length. Generators must be deterministic — the
//! same inputs always produce the same frames.

/// One target slot produced by a layout generator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

pub trait LayoutGenerator {
    fn positions(&self, count: usize, canvas_w: f64, canvas_h: f64) -> Vec<PlacedFrame>;
}

/// Even rows and columns with a fixed gutter, no rotation.
#[derive(Clone, Copy, Debug)]
pub struct GridLayout {
    pub gutter: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { gutter: 24.0 }
    }
}

impl LayoutGenerator for GridLayout {
    fn positions(&self, count: usize, canvas_w: f64, canvas_h: f64) -> Vec<PlacedFrame> {
        if count == 0 {
            return Vec::new();
        }

        let cols = (count as f64).sqrt().ceil() as usize;
        let rows = count.div_ceil(cols);
        let cell_w = (canvas_w - self.gutter * (cols + 1) as f64) / cols as f64;
        let cell_h = (canvas_h - self.gutter * (rows + 1) as f64) / rows as f64;

        (0..count)
            .map(|i| {
                let col = i % cols;
                let row = i / cols;
                PlacedFrame {
                    x: self.gutter + col as f64 * (cell_w + self.gutter),
                    y: self.gutter + row as f64 * (cell_h + self.gutter),
                    width: cell_w.max(1.0),
                    height: cell_h.max(1.0),
                    rotation: 0.0,
                }
            })
            .collect()
    }
}

/// Staggered scrapbook look: two columns of alternating tall/short tiles with a small
/// index-derived tilt.
#[derive(Clone, Copy, Debug, Default)]
pub struct MosaicLayout;

impl LayoutGenerator for MosaicLayout {
    fn positions(&self, count: usize, canvas_w: f64, canvas_h: f64) -> Vec<PlacedFrame> {
        if count == 0 {
            return Vec::new();
        }

        let margin = canvas_w * 0.06;
        let col_w = (canvas_w - margin * 3.0) / 2.0;
        let rows = count.div_ceil(2);
        let row_h = ((canvas_h - margin) / rows as f64 - margin).max(canvas_h * 0.12);

        (0..count)
            .map(|i| {
                let col = i % 2;
                let row = i / 2;
                let tall = (i % 3) == 0;
                let height = if tall { row_h * 1.15 } else { row_h * 0.85 };
                // Alternating tilt in [-4, 4] degrees, derived from the index alone.
                let rotation = ((i * 7) % 9) as f64 - 4.0;
                PlacedFrame {
                    x: margin + col as f64 * (col_w + margin),
                    y: margin + row as f64 * (row_h + margin),
                    width: col_w,
                    height,
                    rotation,
                }
            })
            .collect()
    }
}
