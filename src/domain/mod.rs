//! Domain layer for the Bookfinder plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs and of the catalog's wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: The book record displayed by every screen

pub mod book;
pub mod error;

pub use book::Book;
pub use error::{BookfinderError, Result};
