//! Rectangle shape used for landing-page blocks and buttons.

use super::{ShapeId, ShapeTrait, clamp_size};
use crate::color::SerializableColor;
use kurbo::{Point, RoundedRect, Size};
use serde::{Deserialize, Serialize};

/// A filled rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Fill color.
    pub fill: SerializableColor,
    /// Corner radius (0 = sharp corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl RectShape {
    /// Default corner radius for buttons.
    pub const BUTTON_RADIUS: f64 = 12.0;

    pub fn new(position: Point, width: f64, height: f64) -> Self {
        let size = clamp_size(Size::new(width, height));
        Self {
            id: ShapeId::new(),
            position,
            width: size.width,
            height: size.height,
            fill: SerializableColor::white(),
            corner_radius: 0.0,
        }
    }

    pub fn with_fill(mut self, fill: SerializableColor) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Rounded outline; the radius never exceeds half the shorter side.
    pub fn as_rounded_rect(&self) -> RoundedRect {
        let radius = self.corner_radius.min(self.width.min(self.height) / 2.0);
        RoundedRect::from_rect(self.bounds(), radius)
    }
}

impl ShapeTrait for RectShape {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn set_id(&mut self, id: ShapeId) {
        self.id = id;
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn set_size(&mut self, size: Size) {
        let size = clamp_size(size);
        self.width = size.width;
        self.height = size.height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_radius_capped() {
        let rect = RectShape::new(Point::ZERO, 100.0, 30.0).with_corner_radius(40.0);
        let rr = rect.as_rounded_rect();
        assert!((rr.radii().top_left - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut rect = RectShape::new(Point::new(5.0, 5.0), 40.0, 40.0);
        rect.translate(kurbo::Vec2::new(10.0, -5.0));
        assert_eq!(rect.position, Point::new(15.0, 0.0));
    }
}
