//! Product domain entities and access roles.

mod product;
mod role;

pub use product::*;
pub use role::*;
