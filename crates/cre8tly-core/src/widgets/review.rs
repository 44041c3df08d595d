//! Star-rating aggregates for review widgets.

use serde::{Deserialize, Serialize};

/// Highest rating a review can give.
pub const MAX_RATING: u8 = 5;

/// How much of a star is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Aggregate of the star ratings left on a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Number of reviews per rating; index 0 is one star.
    counts: [u32; MAX_RATING as usize],
}

impl ReviewSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from individual ratings. Ratings outside `1..=5` are clamped.
    pub fn from_ratings(ratings: impl IntoIterator<Item = u8>) -> Self {
        let mut summary = Self::new();
        for rating in ratings {
            summary.add(rating);
        }
        summary
    }

    pub fn add(&mut self, rating: u8) {
        let rating = rating.clamp(1, MAX_RATING);
        let slot = &mut self.counts[rating as usize - 1];
        *slot = slot.saturating_add(1);
    }

    /// Total number of reviews.
    pub fn count(&self) -> u64 {
        self.counts.iter().map(|&n| u64::from(n)).sum()
    }

    /// Reviews with exactly `rating` stars.
    pub fn count_for(&self, rating: u8) -> u32 {
        match rating {
            1..=MAX_RATING => self.counts[rating as usize - 1],
            _ => 0,
        }
    }

    /// Mean rating, or `None` when there are no reviews.
    pub fn average(&self) -> Option<f64> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        let total: u64 = self
            .counts
            .iter()
            .zip(1u64..)
            .map(|(&n, stars)| u64::from(n) * stars)
            .sum();
        Some(total as f64 / count as f64)
    }

    /// Average with one decimal, e.g. `"4.3"`, or `"No reviews"`.
    pub fn display_average(&self) -> String {
        match self.average() {
            Some(avg) => format!("{:.1}", avg),
            None => "No reviews".to_string(),
        }
    }

    /// Fill of each of the five stars, with the average rounded to the
    /// nearest half star.
    pub fn stars(&self) -> [StarFill; MAX_RATING as usize] {
        let rounded = (self.average().unwrap_or(0.0) * 2.0).round() / 2.0;
        std::array::from_fn(|i| {
            let i = i as f64;
            if rounded >= i + 1.0 {
                StarFill::Full
            } else if rounded >= i + 0.5 {
                StarFill::Half
            } else {
                StarFill::Empty
            }
        })
    }
}
