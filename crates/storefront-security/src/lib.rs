//! # Storefront Security
//!
//! Bearer token handling for the storefront API: JWT issuance and
//! validation, plus role checks on validated claims.

pub mod jwt;
pub mod rbac;

pub use jwt::*;
pub use rbac::*;
