//! # Storefront Core
//!
//! Core types, error definitions and the product domain shared by every
//! layer of the storefront service.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod query;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use query::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
