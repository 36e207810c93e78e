//! Column references used to name filter and assignment keys.

pub mod column;

pub use column::Col;
