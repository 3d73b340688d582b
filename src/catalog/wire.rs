//! Wire types for the catalog's `/volumes` search response.
//!
//! Only the fields the plugin displays are modeled; everything else in the
//! response is ignored by `serde`. Every nested field is optional so that a
//! sparse item never fails the whole page.

use serde::Deserialize;

/// Top-level body of a `/volumes` search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Total number of matches reported by the server for this query.
    #[serde(default)]
    pub total_items: usize,

    /// Items of the requested page. Absent when the page is empty.
    #[serde(default)]
    pub items: Option<Vec<VolumeItem>>,
}

/// One catalog item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic details of a catalog item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    pub authors: Option<Vec<String>>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub average_rating: Option<f32>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
}

/// Cover thumbnails in two sizes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_response() {
        let body = r#"{"kind":"books#volumes","totalItems":2,"items":[
            {"id":"a","volumeInfo":{"title":"Dune","authors":["Frank Herbert"],
             "imageLinks":{"smallThumbnail":"http://x/s","thumbnail":"http://x/t"}}},
            {"id":"b","volumeInfo":{"title":"Children of Dune"}}
        ]}"#;

        let response: VolumesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_items, 2);

        let items = response.items.unwrap();
        assert_eq!(items[0].volume_info.authors.as_deref(), Some(&["Frank Herbert".to_string()][..]));
        let links = items[0].volume_info.image_links.as_ref().unwrap();
        assert_eq!(links.thumbnail.as_deref(), Some("http://x/t"));
        assert!(items[1].volume_info.image_links.is_none());
    }

    #[test]
    fn missing_items_field_is_none() {
        let response: VolumesResponse = serde_json::from_str(r#"{"totalItems":0}"#).unwrap();
        assert!(response.items.is_none());
    }
}
