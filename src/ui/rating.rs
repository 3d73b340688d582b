//! Five-star rating widget with half-star granularity.

use crate::domain::book::MAX_RATING;

/// Number of star positions.
pub const STAR_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    /// Icon name for this star.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Full => "star",
            Self::Half => "star-half-full",
            Self::Empty => "star-outline",
        }
    }
}

/// Splits a rating into five stars.
///
/// Position `i` is full when `rating - i >= 1`, half when `>= 0.5`, and empty
/// otherwise.
pub fn stars(rating: f32) -> [Star; STAR_COUNT] {
    let rating = if rating.is_finite() { rating.clamp(0.0, MAX_RATING) } else { 0.0 };
    let mut out = [Star::Empty; STAR_COUNT];
    for (i, star) in out.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let diff = rating - i as f32;
        *star = if diff >= 1.0 {
            Star::Full
        } else if diff >= 0.5 {
            Star::Half
        } else {
            Star::Empty
        };
    }
    out
}

/// Rating caption, e.g. `"3.5 (120 reviews)"`.
pub fn rating_label(rating: f32, reviews_count: Option<u32>) -> String {
    match reviews_count {
        Some(count) => format!("{rating:.1} ({count} reviews)"),
        None => format!("{rating:.1}"),
    }
}
