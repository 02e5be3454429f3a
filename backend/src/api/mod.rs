//! API entry points.

pub mod search;
