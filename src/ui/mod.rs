//! User interface rendering layer with component-based architecture.
//!
//! This module turns the mounted screen into ANSI-styled output through
//! composable rendering components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types, one body per screen
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers and screen layouts
//! - [`helpers`]: Shared rendering utilities (highlighting, wrapping, truncation)
//! - [`icons`]: Named glyph lookup
//! - [`rating`]: Half-star rating display
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod icons;
pub mod rating;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CoverView, DetailsView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, RatingView,
    ResultsView, ScreenView, SearchBarInfo, SearchView, UIViewModel,
};
