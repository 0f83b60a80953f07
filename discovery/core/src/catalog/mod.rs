//! Movie Catalog Integration
//!
//! Read-only access to the movie metadata API through a common trait, so the
//! discovery core can run against TMDB in production and a mock in tests.
//!
//! # Usage
//!
//! ```ignore
//! use cinescope_core::catalog::{MovieCatalog, MovieQuery, TmdbCatalog};
//!
//! let catalog = TmdbCatalog::from_config(&config.catalog)?;
//! let movies = catalog.fetch(&MovieQuery::from_text("Inception")).await?;
//! ```

mod query;
mod tmdb;
mod traits;

pub use query::{MovieQuery, DEFAULT_BASE_URL};
pub use tmdb::TmdbCatalog;
pub use traits::{CatalogError, MovieCatalog};
