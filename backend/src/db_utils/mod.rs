//! Search backend clients.

pub mod solr_utils;
