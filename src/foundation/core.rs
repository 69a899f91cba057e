//! Shared geometry vocabulary.
//!
//! All page-space geometry in Keepsake is expressed with `kurbo` primitives. Element positions
//! and sizes are stored in page-native units; display scaling is a render-time concern and never
//! leaks into the document model.

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Axis-aligned frame of an element in page-native units, before rotation/scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_edges_and_center() {
        let f = Frame::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(f.left(), 10.0);
        assert_eq!(f.right(), 110.0);
        assert_eq!(f.top(), 20.0);
        assert_eq!(f.bottom(), 70.0);
        assert_eq!(f.center_x(), 60.0);
        assert_eq!(f.center_y(), 45.0);
    }
}
