//! Details screen controller.
//!
//! Presents one immutable [`Book`] plus the loading state of its cover image.
//! The cover is fetched on mount; a failed load can be retried, which bumps
//! the retry version and refetches the same URL with a cache-busting
//! parameter.

use image::ImageFormat;

use super::actions::Action;
use super::ids::{IdSource, RequestId};
use crate::domain::error::{BookfinderError, Result};
use crate::domain::Book;

/// A cover image that decoded successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
}

impl CoverImage {
    /// Decodes a cover response.
    ///
    /// The container is detected from the body, then the whole image is
    /// decoded so that truncated or corrupt data is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::ImageLoad`] for a non-2xx status, a body
    /// that is not a recognized image, or an image that fails to decode.
    pub fn decode(status: u16, body: &[u8]) -> Result<Self> {
        if !(200..300).contains(&status) {
            return Err(BookfinderError::ImageLoad(format!("HTTP {status}")));
        }

        let format = image::guess_format(body).map_err(|e| {
            BookfinderError::ImageLoad(format!("unrecognized image data ({} bytes): {e}", body.len()))
        })?;
        let decoded = image::load_from_memory_with_format(body, format)
            .map_err(|e| BookfinderError::ImageLoad(format!("failed to decode {format:?} cover: {e}")))?;

        Ok(Self {
            format,
            width: decoded.width(),
            height: decoded.height(),
            byte_len: body.len(),
        })
    }

    /// Short name of the image container, e.g. `"JPEG"`.
    pub fn format_label(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WEBP",
            _ => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState {
    Loading,
    Loaded(CoverImage),
    Failed,
}

#[derive(Debug, Clone)]
pub struct DetailController {
    book: Book,
    /// `None` when the book has no cover.
    cover: Option<CoverState>,
    retry_version: u32,
    in_flight: Option<RequestId>,
}

impl DetailController {
    /// Mounts the screen for `book`, starting the cover fetch if it has one.
    pub fn mount(book: Book, ids: &mut IdSource) -> (Self, Vec<Action>) {
        let mut controller = Self {
            book,
            cover: None,
            retry_version: 0,
            in_flight: None,
        };
        let actions = controller.fetch_cover(ids);
        (controller, actions)
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn cover(&self) -> Option<CoverState> {
        self.cover
    }

    pub fn retry_version(&self) -> u32 {
        self.retry_version
    }

    pub fn is_loading(&self) -> bool {
        self.cover == Some(CoverState::Loading)
    }

    pub fn has_error(&self) -> bool {
        self.cover == Some(CoverState::Failed)
    }

    pub fn awaits(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    /// Cover URL carrying the current retry version.
    pub fn cover_url(&self) -> Option<String> {
        self.book.cover.as_ref().map(|cover| {
            let sep = if cover.contains('?') { '&' } else { '?' };
            format!("{cover}{sep}v={}", self.retry_version)
        })
    }

    fn fetch_cover(&mut self, ids: &mut IdSource) -> Vec<Action> {
        let Some(url) = self.cover_url() else {
            return vec![];
        };
        let request_id = ids.next_request();
        self.cover = Some(CoverState::Loading);
        self.in_flight = Some(request_id);
        tracing::debug!(request_id = %request_id, url = %url, "loading cover");
        vec![Action::FetchCover { request_id, url }]
    }

    /// Applies a settled cover request.
    ///
    /// # Parameters
    ///
    /// * `request_id` - Request the result belongs to
    /// * `result` - Decoded image or the reason it failed
    ///
    /// # Returns
    ///
    /// `true` if the cover state changed and the screen should re-render.
    pub fn on_cover(&mut self, request_id: RequestId, result: Result<CoverImage>) -> bool {
        if !self.awaits(request_id) {
            tracing::debug!(request_id = %request_id, "dropping stale cover response");
            return false;
        }
        self.in_flight = None;
        self.cover = Some(match result {
            Ok(image) => CoverState::Loaded(image),
            Err(e) => {
                tracing::warn!(error = %e, book_id = %self.book.id, "cover failed to load");
                CoverState::Failed
            }
        });
        true
    }

    /// Refetches a failed cover with a bumped retry version.
    pub fn retry(&mut self, ids: &mut IdSource) -> Vec<Action> {
        if !self.has_error() {
            return vec![];
        }
        self.retry_version += 1;
        self.fetch_cover(ids)
    }

    pub fn teardown(&mut self) {
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    fn png() -> Vec<u8> {
        encoded(ImageFormat::Png, 2, 3)
    }

    fn with_cover(url: &str) -> Book {
        Book {
            cover: Some(url.to_string()),
            ..Book::new("abc", "Dune")
        }
    }

    fn cover_fetch(actions: &[Action]) -> (RequestId, String) {
        match actions {
            [Action::FetchCover { request_id, url }] => (*request_id, url.clone()),
            other => panic!("expected one cover fetch, got {other:?}"),
        }
    }

    #[test]
    fn book_without_cover_has_no_image_region() {
        let mut ids = IdSource::new();
        let (details, actions) = DetailController::mount(Book::new("abc", "Dune"), &mut ids);
        assert!(actions.is_empty());
        assert_eq!(details.cover(), None);
        assert_eq!(details.cover_url(), None);
    }

    #[test]
    fn cover_url_appends_version_parameter() {
        let mut ids = IdSource::new();
        let (plain, _) = DetailController::mount(with_cover("https://img.example/a.jpg"), &mut ids);
        assert_eq!(plain.cover_url().as_deref(), Some("https://img.example/a.jpg?v=0"));

        let (query, _) =
            DetailController::mount(with_cover("https://img.example/a?id=1&zoom=1"), &mut ids);
        assert_eq!(query.cover_url().as_deref(), Some("https://img.example/a?id=1&zoom=1&v=0"));
    }

    #[test]
    fn mount_starts_loading_and_success_settles() {
        let mut ids = IdSource::new();
        let (mut details, actions) = DetailController::mount(with_cover("https://img.example/a"), &mut ids);
        assert!(details.is_loading());

        let (id, _) = cover_fetch(&actions);
        assert!(details.on_cover(id, CoverImage::decode(200, &png())));
        assert!(matches!(details.cover(), Some(CoverState::Loaded(CoverImage { format: ImageFormat::Png, width: 2, height: 3, .. }))));
        assert!(details.retry(&mut ids).is_empty());
    }

    #[test]
    fn retry_after_error_bumps_version() {
        let mut ids = IdSource::new();
        let (mut details, actions) = DetailController::mount(with_cover("https://img.example/a"), &mut ids);
        let (id, _) = cover_fetch(&actions);
        details.on_cover(id, CoverImage::decode(404, b""));
        assert!(details.has_error());
        assert!(!details.is_loading());

        let actions = details.retry(&mut ids);
        let (retry_id, url) = cover_fetch(&actions);
        assert_eq!(url, "https://img.example/a?v=1");
        assert_eq!(details.retry_version(), 1);
        assert!(details.is_loading());
        assert!(!details.has_error());

        assert!(!details.on_cover(id, CoverImage::decode(200, &png())));
        assert!(details.on_cover(retry_id, CoverImage::decode(200, &png())));
    }

    #[test]
    fn decodes_supported_formats_with_dimensions() {
        for (format, label) in [(ImageFormat::Png, "PNG"), (ImageFormat::Jpeg, "JPEG")] {
            let image = CoverImage::decode(200, &encoded(format, 8, 12)).unwrap();
            assert_eq!(image.format, format);
            assert_eq!((image.width, image.height), (8, 12));
            assert_eq!(image.format_label(), label);
        }
    }

    #[test]
    fn truncated_image_is_image_load_error() {
        let png = png();
        let err = CoverImage::decode(200, &png[..png.len() / 2]).unwrap_err();
        assert!(matches!(err, BookfinderError::ImageLoad(_)));

        let signature_only = CoverImage::decode(200, b"\x89PNG\r\n\x1a\n");
        assert!(matches!(signature_only, Err(BookfinderError::ImageLoad(_))));

        let bare_jpeg_marker = CoverImage::decode(200, &[0xFF, 0xD8, 0xFF, 0, 0]);
        assert!(matches!(bare_jpeg_marker, Err(BookfinderError::ImageLoad(_))));
    }

    #[test]
    fn corrupt_cover_fails_and_can_be_retried() {
        let mut ids = IdSource::new();
        let (mut details, actions) = DetailController::mount(with_cover("https://img.example/a"), &mut ids);
        let (id, _) = cover_fetch(&actions);

        let png = png();
        details.on_cover(id, CoverImage::decode(200, &png[..png.len() / 2]));
        assert_eq!(details.cover(), Some(CoverState::Failed));
        assert_eq!(details.retry(&mut ids).len(), 1);
    }

    #[test]
    fn non_image_body_is_image_load_error() {
        let err = CoverImage::decode(200, b"<html>").unwrap_err();
        assert!(matches!(err, BookfinderError::ImageLoad(_)));
    }
}
