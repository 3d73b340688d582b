//! Book record shown by every screen.
//!
//! A [`Book`] is the local display model produced from one catalog item. It is
//! immutable once constructed and carries no identity beyond `id`, which the
//! catalog does not guarantee to be unique across pages.

/// Upper bound of the rating scale.
pub const MAX_RATING: f32 = 5.0;

/// A single book as displayed by the plugin.
///
/// Only `id` and `title` are always present; every other field is absent when
/// the catalog did not provide it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Contributors joined with `", "`.
    pub author: Option<String>,
    /// Four-digit publication year.
    pub year: Option<String>,
    /// Cover image URL, always `https://` when it came from the catalog.
    pub cover: Option<String>,
    /// Average rating in `[0, 5]`.
    pub rating: Option<f32>,
    pub reviews_count: Option<u32>,
    /// Never populated by the catalog mapper.
    pub author_bio: Option<String>,
    pub summary: Option<String>,
}

impl Book {
    /// Creates a book with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the "by {author}" line used in result lists.
    pub fn byline(&self) -> Option<String> {
        self.author.as_ref().map(|author| format!("by {author}"))
    }

    /// Returns the list key for this book at `position`.
    ///
    /// Pages may repeat an id, so the key combines the id with the position.
    pub fn list_key(&self, position: usize) -> String {
        format!("{}-{position}", self.id)
    }
}

/// Clamps a catalog rating into `[0, MAX_RATING]`, dropping non-finite values.
pub fn normalize_rating(rating: f32) -> Option<f32> {
    rating.is_finite().then(|| rating.clamp(0.0, MAX_RATING))
}
