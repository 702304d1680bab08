//! Data Transfer Objects (DTOs).

mod cache_dto;
mod product_dto;

pub use cache_dto::*;
pub use product_dto::*;
