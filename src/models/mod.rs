//! Request-scoped data models

pub mod dataset;

pub use dataset::*;
