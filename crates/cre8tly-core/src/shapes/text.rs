//! Text block shape.

use super::{ShapeId, ShapeTrait, clamp_size};
use crate::color::{SerializableColor, TextTone};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// A text block laid out inside a fixed box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub(crate) id: ShapeId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Text content.
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    pub color: SerializableColor,
}

impl TextShape {
    pub const DEFAULT_FONT_SIZE: f64 = 18.0;

    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: ShapeId::new(),
            position,
            width: 240.0,
            height: 48.0,
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            color: SerializableColor::black(),
        }
    }

    /// Recolor the text for legibility on a solid background.
    pub fn adapt_to_background(&mut self, tone: TextTone) {
        self.color = tone.color();
    }
}

impl ShapeTrait for TextShape {
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
