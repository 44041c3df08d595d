//! Color parsing and contrast-aware text color selection.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Luminance threshold (in thousandths of full scale) above which dark text
/// is chosen. Equivalent to `0.6` on a normalized 0..1 scale.
const DARK_TEXT_THRESHOLD: u32 = 600 * 255;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self::rgb(
                byte(&hex[0..1])? * 17,
                byte(&hex[1..2])? * 17,
                byte(&hex[2..3])? * 17,
            )),
            6 => Ok(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Ok(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Weighted channel sum `299R + 587G + 114B`, i.e. perceived luminance
    /// scaled by 1000 * 255. Integer so threshold comparisons are exact.
    fn weighted_luma(&self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Perceived luminance normalized to `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        self.weighted_luma() as f64 / (1000.0 * 255.0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Binary text color choice for legibility on a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    /// Utility class label used by the front-end.
    pub fn label(&self) -> &'static str {
        match self {
            TextTone::Light => "text-white",
            TextTone::Dark => "text-black",
        }
    }

    pub fn color(&self) -> SerializableColor {
        match self {
            TextTone::Light => SerializableColor::white(),
            TextTone::Dark => SerializableColor::black(),
        }
    }
}

/// Pick light or dark text for the given background.
///
/// Absent, empty and gradient backgrounds always get light text. Any other
/// value must be a hex color; dark text is chosen only when its luminance
/// is strictly above `0.6`.
pub fn readable_text_color(background: Option<&str>) -> Result<TextTone, ColorError> {
    let Some(background) = background.map(str::trim) else {
        return Ok(TextTone::Light);
    };
    if background.is_empty() || background.to_ascii_lowercase().contains("gradient") {
        return Ok(TextTone::Light);
    }
    let color = SerializableColor::from_hex(background)?;
    Ok(tone_for(color))
}

/// Text tone for an already-parsed solid color.
pub fn tone_for(color: SerializableColor) -> TextTone {
    if color.weighted_luma() > DARK_TEXT_THRESHOLD {
        TextTone::Dark
    } else {
        TextTone::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_gets_dark_text() {
        assert_eq!(readable_text_color(Some("#FFFFFF")), Ok(TextTone::Dark));
    }

    #[test]
    fn test_black_gets_light_text() {
        assert_eq!(readable_text_color(Some("#000000")), Ok(TextTone::Light));
    }

    #[test]
    fn test_missing_and_gradient_default_to_light() {
        assert_eq!(readable_text_color(None), Ok(TextTone::Light));
        assert_eq!(readable_text_color(Some("")), Ok(TextTone::Light));
        assert_eq!(
            readable_text_color(Some("linear-gradient(90deg, #fff, #eee)")),
            Ok(TextTone::Light)
        );
        assert_eq!(
            readable_text_color(Some("radial-gradient(circle, #ffffff 0%, #000 100%)")),
            Ok(TextTone::Light)
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0.299 * 153 + 0.587 * 153 + 0.114 * 153 == 153 == 0.6 * 255
        let at_threshold = SerializableColor::rgb(153, 153, 153);
        assert!((at_threshold.luminance() - 0.6).abs() < 1e-12);
        assert_eq!(readable_text_color(Some("#999999")), Ok(TextTone::Light));
        // One step above tips it over.
        assert_eq!(readable_text_color(Some("#9A9A9A")), Ok(TextTone::Dark));
    }

    #[test]
    fn test_hash_is_optional() {
        assert_eq!(readable_text_color(Some("ffffff")), Ok(TextTone::Dark));
        assert_eq!(readable_text_color(Some("  #ffff00 ")), Ok(TextTone::Dark));
    }

    #[test]
    fn test_malformed_hex_is_an_error() {
        assert!(matches!(
            readable_text_color(Some("#GGGGGG")),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(matches!(
            readable_text_color(Some("#12345")),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(matches!(
            readable_text_color(Some("blue")),
            Err(ColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_pure_function() {
        for _ in 0..3 {
            assert_eq!(readable_text_color(Some("#3B82F6")), Ok(TextTone::Light));
        }
    }

    #[test]
    fn test_hex_round_trip_and_short_form() {
        let c = SerializableColor::from_hex("#3b82f6").unwrap();
        assert_eq!(c, SerializableColor::rgb(0x3B, 0x82, 0xF6));
        assert_eq!(c.to_hex(), "#3B82F6");
        assert_eq!(SerializableColor::from_hex("#fff").unwrap(), SerializableColor::white());
        assert_eq!(
            SerializableColor::from_hex("#00000080").unwrap().to_hex(),
            "#00000080"
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(TextTone::Light.label(), "text-white");
        assert_eq!(TextTone::Dark.label(), "text-black");
        assert_eq!(TextTone::Dark.color(), SerializableColor::black());
    }
}
