//! Shape definitions for the landing-page canvas.

mod image;
mod rectangle;
mod text;

pub use image::ImageShape;
pub use rectangle::RectShape;
pub use text::TextShape;

use crate::time;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Smallest width or height a shape may have after any transform.
pub const MIN_SHAPE_SIZE: f64 = 20.0;

/// Clamp a size so neither axis drops below [`MIN_SHAPE_SIZE`].
pub fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(MIN_SHAPE_SIZE), size.height.max(MIN_SHAPE_SIZE))
}

/// Opaque unique identifier for shapes.
///
/// Unique within a document for the whole editing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Fresh identifier for a newly created shape.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Identifier for the `index`-th copy in a duplication batch:
    /// `<unix millis>-<index>-<random suffix>`.
    pub fn for_duplicate(index: usize) -> Self {
        let entropy = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}-{}", time::unix_millis(), index, &entropy[..9]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &ShapeId;

    /// Replace the identifier.
    fn set_id(&mut self, id: ShapeId);

    /// Top-left corner in canvas coordinates.
    fn position(&self) -> Point;

    fn set_position(&mut self, position: Point);

    /// Current width and height.
    fn size(&self) -> Size;

    /// Set the size. Implementations clamp to [`MIN_SHAPE_SIZE`].
    fn set_size(&mut self, size: Size);

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Move the shape by an offset.
    fn translate(&mut self, offset: Vec2) {
        let position = self.position() + offset;
        self.set_position(position);
    }
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Image(ImageShape),
    Rectangle(RectShape),
    Text(TextShape),
}

impl Shape {
    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Image(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Text(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Image(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Text(s) => s,
        }
    }

    pub fn id(&self) -> &ShapeId {
        self.inner().id()
    }

    pub fn position(&self) -> Point {
        self.inner().position()
    }

    pub fn set_position(&mut self, position: Point) {
        self.inner_mut().set_position(position);
    }

    pub fn size(&self) -> Size {
        self.inner().size()
    }

    pub fn set_size(&mut self, size: Size) {
        self.inner_mut().set_size(size);
    }

    pub fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.inner().hit_test(point, tolerance)
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.inner_mut().translate(offset);
    }

    /// Clone this shape under a different identifier.
    pub fn with_new_id(&self, id: ShapeId) -> Self {
        let mut copy = self.clone();
        copy.inner_mut().set_id(id);
        copy
    }

    /// Get the image if this shape is an image.
    pub fn as_image(&self) -> Option<&ImageShape> {
        match self {
            Shape::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Short kind name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Image(_) => "image",
            Shape::Rectangle(_) => "rectangle",
            Shape::Text(_) => "text",
        }
    }
}

impl From<ImageShape> for Shape {
    fn from(shape: ImageShape) -> Self {
        Shape::Image(shape)
    }
}

impl From<RectShape> for Shape {
    fn from(shape: RectShape) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<TextShape> for Shape {
    fn from(shape: TextShape) -> Self {
        Shape::Text(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let a = ShapeId::new();
        let b = ShapeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_duplicate_id_layout() {
        let id = ShapeId::for_duplicate(3);
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u128>().is_ok());
        assert_eq!(parts[1], "3");
        assert_eq!(parts[2].len(), 9);
        assert_ne!(ShapeId::for_duplicate(3), id);
    }

    #[test]
    fn test_clamp_size_is_per_axis() {
        let size = clamp_size(Size::new(50.0, 5.0));
        assert_eq!(size, Size::new(50.0, MIN_SHAPE_SIZE));
    }

    #[test]
    fn test_with_new_id_keeps_geometry() {
        let shape: Shape = RectShape::new(Point::new(10.0, 10.0), 40.0, 30.0).into();
        let copy = shape.with_new_id(ShapeId::from("copy"));
        assert_eq!(copy.id().as_str(), "copy");
        assert_eq!(copy.bounds(), shape.bounds());
        assert_ne!(copy.id(), shape.id());
    }

    #[test]
    fn test_serialized_tag() {
        let shape: Shape = ImageShape::new(Point::ZERO, "https://cdn.example/a.png", 100.0, 80.0).into();
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "image");
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }
}
