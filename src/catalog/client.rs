//! Search Client for the remote catalog.
//!
//! The plugin runtime owns all network I/O, so a search is split into two
//! halves: [`CatalogClient::search`] plans the request (or answers it directly
//! for a blank query) and [`CatalogClient::decode`] turns the host's response
//! into a [`SearchPage`]. Calls are independent and stateless: no retries, no
//! caching.

use http::StatusCode;

use super::mapper::map_volume;
use super::wire::VolumesResponse;
use crate::domain::error::{BookfinderError, Result};
use crate::domain::Book;

/// Path of the search endpoint below the configured base URL.
const VOLUMES_PATH: &str = "/volumes";

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub items: Vec<Book>,
    /// Total matches reported by the server, across all pages.
    pub total_items: usize,
}

/// A fully-built catalog request waiting to be sent by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub query: String,
}

/// Outcome of planning a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    /// Answered without touching the network.
    Ready(SearchPage),
    /// Needs one GET request.
    Fetch(SearchRequest),
}

/// Client for the catalog's `/volumes` search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClient {
    base_url: String,
    page_size: u32,
}

impl CatalogClient {
    /// Creates a client for `base_url` using `page_size` results per page by default.
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
        }
    }

    /// Plans a search starting at `start_index` with the default page size.
    pub fn search(&self, query: &str, start_index: usize) -> SearchPlan {
        self.search_with_size(query, start_index, self.page_size)
    }

    /// Plans a search with an explicit page size.
    ///
    /// A query that is blank after trimming is answered immediately with an
    /// empty page and no request.
    pub fn search_with_size(&self, query: &str, start_index: usize, page_size: u32) -> SearchPlan {
        if query.trim().is_empty() {
            tracing::debug!("blank query, skipping catalog request");
            return SearchPlan::Ready(SearchPage::default());
        }

        let url = format!(
            "{}{VOLUMES_PATH}?q={}&startIndex={start_index}&maxResults={page_size}",
            self.base_url,
            urlencoding::encode(query),
        );

        tracing::debug!(url = %url, start_index = start_index, page_size = page_size, "planned catalog request");

        SearchPlan::Fetch(SearchRequest {
            url,
            query: query.to_string(),
        })
    }

    /// Decodes a catalog response.
    ///
    /// # Errors
    ///
    /// - [`BookfinderError::Remote`] if `status` is not 2xx
    /// - [`BookfinderError::Transport`] if the body is not a valid catalog response
    pub fn decode(&self, status: u16, body: &[u8]) -> Result<SearchPage> {
        if !(200..300).contains(&status) {
            let status_text = reason_phrase(status).to_string();
            tracing::warn!(status = status, status_text = %status_text, "catalog request failed");
            return Err(BookfinderError::Remote { status, status_text });
        }

        let response: VolumesResponse = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, body_len = body.len(), "malformed catalog response");
            BookfinderError::Transport(format!("malformed catalog response: {e}"))
        })?;

        let items: Vec<Book> = response
            .items
            .unwrap_or_default()
            .iter()
            .map(map_volume)
            .collect();

        tracing::debug!(
            item_count = items.len(),
            total_items = response.total_items,
            "catalog page decoded"
        );

        Ok(SearchPage {
            items,
            total_items: response.total_items,
        })
    }
}

/// Canonical reason phrase for `status`, or `"Unknown Status"`.
fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new("https://catalog.example/books/v1/", 10)
    }

    #[test]
    fn blank_query_is_answered_without_request() {
        assert_eq!(client().search("   ", 0), SearchPlan::Ready(SearchPage::default()));
        assert_eq!(client().search("", 20), SearchPlan::Ready(SearchPage::default()));
    }

    #[test]
    fn builds_encoded_paginated_url() {
        let SearchPlan::Fetch(request) = client().search("dune & messiah", 20) else {
            panic!("expected a request");
        };
        assert_eq!(
            request.url,
            "https://catalog.example/books/v1/volumes?q=dune%20%26%20messiah&startIndex=20&maxResults=10"
        );
        assert_eq!(request.query, "dune & messiah");
    }

    #[test]
    fn explicit_page_size_overrides_default() {
        let SearchPlan::Fetch(request) = client().search_with_size("dune", 0, 40) else {
            panic!("expected a request");
        };
        assert!(request.url.ends_with("startIndex=0&maxResults=40"));
    }

    #[test]
    fn non_success_status_is_remote_error() {
        let err = client().decode(500, b"oops").unwrap_err();
        match err {
            BookfinderError::Remote { status, status_text } => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remote_error_carries_canonical_status_text() {
        for (code, text) in [
            (410, "Gone"),
            (418, "I'm a teapot"),
            (422, "Unprocessable Entity"),
            (501, "Not Implemented"),
            (599, "Unknown Status"),
        ] {
            let err = client().decode(code, b"").unwrap_err();
            assert_eq!(err.to_string(), format!("API Error: {code} {text}"));
        }
    }

    #[test]
    fn malformed_body_is_transport_error() {
        let err = client().decode(200, b"<html>").unwrap_err();
        assert!(matches!(err, BookfinderError::Transport(_)));
    }

    #[test]
    fn missing_items_decode_to_empty_page() {
        let page = client().decode(200, br#"{"kind":"books#volumes","totalItems":0}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn decodes_and_maps_items() {
        let body = br#"{"totalItems":23,"items":[
            {"id":"a","volumeInfo":{"title":"Dune","publishedDate":"1965-08-01"}},
            {"id":"b","volumeInfo":{"title":"Dune Messiah","authors":["Frank Herbert"]}}
        ]}"#;
        let page = client().decode(200, body).unwrap();
        assert_eq!(page.total_items, 23);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].year.as_deref(), Some("1965"));
        assert_eq!(page.items[1].author.as_deref(), Some("Frank Herbert"));
    }
}
