//! HTTP handlers for producer CRUD and unmatched requests.

pub mod fallback;
pub mod producer;
pub use producer::*;
