//! Custom Axum extractors.

mod claims;
mod listing;
mod validated;

pub use claims::*;
pub use listing::*;
pub use validated::*;
