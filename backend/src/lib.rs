//! Faceted search menus built from search backend facet counts.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod error;
pub mod facets;

pub use config::FacetConfig;
pub use error::{FacetError, FacetResult};
