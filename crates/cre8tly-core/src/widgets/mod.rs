//! Display widgets for landing pages.
//!
//! Each widget is a plain data type plus the few derived values a front-end
//! needs to draw it. Style choices are closed enums with an `apply`
//! step rather than free-form option bags.

mod background;
mod merch;
mod review;

pub use background::{Background, BackgroundEdit, DEFAULT_GRADIENT_ANGLE};
pub use merch::{MerchCard, format_price};
pub use review::{MAX_RATING, ReviewSummary, StarFill};

use serde::{Deserialize, Serialize};

/// A widget placed in a landing-page block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Reviews(ReviewSummary),
    Merch(MerchCard),
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Reviews(_) => "reviews",
            Widget::Merch(_) => "merch",
        }
    }
}

impl From<ReviewSummary> for Widget {
    fn from(summary: ReviewSummary) -> Self {
        Widget::Reviews(summary)
    }
}

impl From<MerchCard> for Widget {
    fn from(card: MerchCard) -> Self {
        Widget::Merch(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_tagged_serde() {
        let widget: Widget = MerchCard::new("Sticker pack", 499).into();
        let json = serde_json::to_string(&widget).unwrap();
        assert!(json.contains("\"widget\":\"merch\""));
        let back: Widget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, widget);
        assert_eq!(back.kind(), "merch");
    }
}
