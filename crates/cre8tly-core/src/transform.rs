//! Committing interactive resize/move gestures into shape records.
//!
//! While a gesture is in flight the shape is drawn through a transient
//! transform (absolute position plus scale factors relative to the last
//! committed size). When the gesture ends the transient is folded into the
//! shape's width/height and the scale is reset, so the next gesture starts
//! from the committed size instead of compounding on top of it.

use crate::shapes::Shape;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Visual transform applied to a shape during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransientTransform {
    /// Absolute position the gesture ended at.
    pub position: Point,
    /// Horizontal scale relative to the committed width.
    pub scale_x: f64,
    /// Vertical scale relative to the committed height.
    pub scale_y: f64,
}

impl TransientTransform {
    pub fn new(position: Point, scale_x: f64, scale_y: f64) -> Self {
        Self { position, scale_x, scale_y }
    }

    /// Unscaled transform sitting at `position`.
    pub fn identity_at(position: Point) -> Self {
        Self::new(position, 1.0, 1.0)
    }

    pub fn is_identity_scale(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0
    }

    /// Drop the accumulated scale, keeping the position.
    pub fn reset_scale(&mut self) {
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }
}

/// Fold `transient` into a copy of `shape` and reset the transient's scale.
///
/// Width and height are scaled independently and each is floored at
/// [`MIN_SHAPE_SIZE`](crate::shapes::MIN_SHAPE_SIZE). No upper bound applies.
pub fn commit_transform(shape: &Shape, transient: &mut TransientTransform) -> Shape {
    let mut committed = shape.clone();
    let size = shape.size();
    committed.set_size(Size::new(
        size.width * transient.scale_x,
        size.height * transient.scale_y,
    ));
    committed.set_position(transient.position);
    transient.reset_scale();
    committed
}
