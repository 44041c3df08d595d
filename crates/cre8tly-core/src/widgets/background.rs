//! Widget backgrounds and the edits the background picker emits.

use serde::{Deserialize, Serialize};

use crate::color::{SerializableColor, TextTone, tone_for};

/// Angle used when a solid background is turned into a gradient.
pub const DEFAULT_GRADIENT_ANGLE: f64 = 135.0;

/// Widget background.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    #[default]
    None,
    Solid(SerializableColor),
    Gradient {
        from: SerializableColor,
        to: SerializableColor,
        /// Degrees, normalized to `[0, 360)`.
        angle: f64,
    },
}

impl Background {
    /// CSS `background` value.
    pub fn css(&self) -> String {
        match self {
            Background::None => "transparent".to_string(),
            Background::Solid(color) => color.to_hex(),
            Background::Gradient { from, to, angle } => format!(
                "linear-gradient({}deg, {}, {})",
                angle,
                from.to_hex(),
                to.to_hex()
            ),
        }
    }

    /// Text tone readable on this background. Gradients and no background
    /// get light text.
    pub fn text_tone(&self) -> TextTone {
        match self {
            Background::Solid(color) => tone_for(*color),
            Background::None | Background::Gradient { .. } => TextTone::Light,
        }
    }

    /// The color a gradient edit starts from.
    fn base_color(&self) -> SerializableColor {
        match self {
            Background::None => SerializableColor::black(),
            Background::Solid(color) => *color,
            Background::Gradient { from, .. } => *from,
        }
    }

    /// Apply an edit. Returns whether anything changed.
    pub fn apply(&mut self, edit: BackgroundEdit) -> bool {
        let next = match (edit, *self) {
            (BackgroundEdit::Clear, _) => Background::None,
            (BackgroundEdit::Solid(color), _) => Background::Solid(color),
            (BackgroundEdit::GradientFrom(from), Background::Gradient { to, angle, .. }) => {
                Background::Gradient { from, to, angle }
            }
            (BackgroundEdit::GradientFrom(from), current) => Background::Gradient {
                from,
                to: current.base_color(),
                angle: DEFAULT_GRADIENT_ANGLE,
            },
            (BackgroundEdit::GradientTo(to), Background::Gradient { from, angle, .. }) => {
                Background::Gradient { from, to, angle }
            }
            (BackgroundEdit::GradientTo(to), current) => Background::Gradient {
                from: current.base_color(),
                to,
                angle: DEFAULT_GRADIENT_ANGLE,
            },
            (BackgroundEdit::Angle(angle), Background::Gradient { from, to, .. }) => {
                Background::Gradient {
                    from,
                    to,
                    angle: angle.rem_euclid(360.0),
                }
            }
            // Angle only means something for gradients.
            (BackgroundEdit::Angle(_), current) => current,
        };
        if next == *self {
            return false;
        }
        log::debug!("Background changed to {}", next.css());
        *self = next;
        true
    }
}

/// Edits produced by the background picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", content = "value", rename_all = "snake_case")]
pub enum BackgroundEdit {
    Clear,
    Solid(SerializableColor),
    GradientFrom(SerializableColor),
    GradientTo(SerializableColor),
    Angle(f64),
}
