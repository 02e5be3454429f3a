//! Search API handlers and module exports.

mod search_facet_menu;
pub use search_facet_menu::{FacetMenuResponse, search_facet_menu};

pub mod search_params;
