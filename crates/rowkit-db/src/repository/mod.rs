//! Fixed-shape operations on the known tables.

pub mod project;
pub mod weather;
