//! # Toolflow Catalog
//!
//! The read-only tool catalog the flow engine ranks over.
//!
//! A catalog is an ordered list of [`Tool`] records with unique, URL-safe
//! slugs. It can be loaded from JSON (a top-level array) or TOML (`[[tools]]`
//! tables), or taken from the built-in set via [`Catalog::builtin`].

mod catalog;
mod error;
mod types;

pub use catalog::{is_valid_slug, Catalog};
pub use error::{CatalogError, Result};
pub use types::Tool;
