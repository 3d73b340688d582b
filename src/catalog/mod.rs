//! Remote book catalog integration.
//!
//! - [`wire`]: `serde` types for the `/volumes` response
//! - [`mapper`]: pure conversion from catalog items to [`Book`](crate::domain::Book)
//! - [`client`]: request planning and response decoding

pub mod client;
pub mod mapper;
pub mod wire;

pub use client::{CatalogClient, SearchPage, SearchPlan, SearchRequest};
pub use mapper::map_volume;
