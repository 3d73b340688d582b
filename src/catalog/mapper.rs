//! Book Model Mapper: catalog item → [`Book`].
//!
//! A pure function with no I/O. Missing optional fields map to `None`; the
//! mapper never fails.

use super::wire::{ImageLinks, VolumeItem};
use crate::domain::book::{normalize_rating, Book};

const INSECURE_SCHEME: &str = "http://";
const SECURE_SCHEME: &str = "https://";

/// Converts one catalog item into a [`Book`].
///
/// # Rules
///
/// - `year`: text before the first `-` of the publication date
/// - `author`: contributors joined with `", "`, absent when there are none
/// - `cover`: the larger thumbnail, else the smaller one, upgraded to `https://`
/// - `rating`: clamped into `[0, 5]`
/// - `author_bio`: never populated
pub fn map_volume(item: &VolumeItem) -> Book {
    let info = &item.volume_info;

    Book {
        id: item.id.clone(),
        title: info.title.clone(),
        author: join_authors(info.authors.as_deref()),
        year: info.published_date.as_deref().and_then(publication_year),
        cover: info.image_links.as_ref().and_then(cover_url),
        rating: info.average_rating.and_then(normalize_rating),
        reviews_count: info.ratings_count,
        author_bio: None,
        summary: info.description.clone(),
    }
}

fn join_authors(authors: Option<&[String]>) -> Option<String> {
    authors
        .filter(|names| !names.is_empty())
        .map(|names| names.join(", "))
}

fn publication_year(date: &str) -> Option<String> {
    date.split('-')
        .next()
        .filter(|year| !year.is_empty())
        .map(ToString::to_string)
}

fn cover_url(links: &ImageLinks) -> Option<String> {
    let url = links
        .thumbnail
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| links.small_thumbnail.as_deref().filter(|url| !url.is_empty()))?;

    Some(url.strip_prefix(INSECURE_SCHEME).map_or_else(
        || url.to_string(),
        |rest| format!("{SECURE_SCHEME}{rest}"),
    ))
}
