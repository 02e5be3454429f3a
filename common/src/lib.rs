//! Common models shared by the facet menu builder and its callers.

extern crate serde;


pub mod facet_counts;
pub mod facet_menu;
pub mod facet_query;
pub mod vocabulary;
