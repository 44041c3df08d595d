//! Storefront product cards.

use serde::{Deserialize, Serialize};

use super::Background;
use crate::color::TextTone;

/// Product card shown in a storefront block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchCard {
    pub title: String,
    /// Price in the smallest currency unit.
    pub price_cents: u64,
    /// ISO 4217 code.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Units left; `None` means untracked.
    #[serde(default)]
    pub inventory: Option<u32>,
    #[serde(default)]
    pub sold_out: bool,
    #[serde(default)]
    pub background: Background,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl MerchCard {
    pub fn new(title: impl Into<String>, price_cents: u64) -> Self {
        Self {
            title: title.into(),
            price_cents,
            currency: default_currency(),
            image_url: None,
            inventory: None,
            sold_out: false,
            background: Background::None,
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_inventory(mut self, inventory: u32) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Sold out when flagged or when tracked inventory hits zero.
    pub fn is_sold_out(&self) -> bool {
        self.sold_out || self.inventory == Some(0)
    }

    pub fn price_label(&self) -> String {
        format_price(self.price_cents, &self.currency)
    }

    /// Badge text, if any.
    pub fn badge(&self) -> Option<&'static str> {
        self.is_sold_out().then_some("Sold out")
    }

    /// Text tone for the badge and title on the card background.
    pub fn badge_tone(&self) -> TextTone {
        self.background.text_tone()
    }
}

/// Format an amount in cents, e.g. `$1,299.00` or `12.50 EUR`.
pub fn format_price(cents: u64, currency: &str) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let amount = format!("{}.{:02}", grouped, cents % 100);
    match currency {
        "USD" => format!("${}", amount),
        other => format!("{} {}", amount, other),
    }
}
