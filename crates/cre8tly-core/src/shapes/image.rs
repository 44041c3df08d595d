//! Image shape referencing external pixel content.

use super::{ShapeId, ShapeTrait, clamp_size};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// An image placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    pub(crate) id: ShapeId,
    /// Resource locator for the pixel content (URL or data URI).
    pub src: String,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ImageShape {
    /// Create a new image shape.
    pub fn new(position: Point, src: impl Into<String>, width: f64, height: f64) -> Self {
        let size = clamp_size(Size::new(width, height));
        Self {
            id: ShapeId::new(),
            src: src.into(),
            position,
            width: size.width,
            height: size.height,
            opacity: 1.0,
        }
    }

    /// Scale the image to fit within max dimensions while preserving aspect ratio.
    pub fn fit_within(mut self, max_width: f64, max_height: f64) -> Self {
        let aspect = self.width / self.height;
        let target_aspect = max_width / max_height;

        let size = if aspect > target_aspect {
            Size::new(max_width, max_width / aspect)
        } else {
            Size::new(max_height * aspect, max_height)
        };
        self.set_size(size);
        self
    }

    /// Whether the source is inlined rather than fetched.
    pub fn is_inline(&self) -> bool {
        self.src.starts_with("data:")
    }
}

impl ShapeTrait for ImageShape {
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
    fn test_fit_within() {
        let img = ImageShape::new(Point::ZERO, "a.png", 1000.0, 500.0);

        // Fit 1000x500 (2:1 aspect) into 400x400 box
        let fitted = img.fit_within(400.0, 400.0);
        assert!((fitted.width - 400.0).abs() < 0.01);
        assert!((fitted.height - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_bounds() {
        let img = ImageShape::new(Point::new(10.0, 20.0), "a.png", 100.0, 50.0);
        let bounds = img.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_clamps_to_floor() {
        let img = ImageShape::new(Point::ZERO, "a.png", 4.0, 400.0);
        assert_eq!(img.width, 20.0);
        assert_eq!(img.height, 400.0);
    }

    #[test]
    fn test_inline_source() {
        assert!(ImageShape::new(Point::ZERO, "data:image/png;base64,AAAA", 30.0, 30.0).is_inline());
        assert!(!ImageShape::new(Point::ZERO, "https://cdn.example/a.png", 30.0, 30.0).is_inline());
    }

    #[test]
    fn test_hit_test_with_tolerance() {
        let img = ImageShape::new(Point::new(0.0, 0.0), "a.png", 50.0, 50.0);
        assert!(img.hit_test(Point::new(25.0, 25.0), 0.0));
        assert!(!img.hit_test(Point::new(53.0, 25.0), 0.0));
        assert!(img.hit_test(Point::new(53.0, 25.0), 5.0));
    }
}
