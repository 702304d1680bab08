//! # Storefront Server Library
//!
//! Dependency injection wiring and startup utilities for the storefront
//! server binary.

pub mod di;
pub mod startup;
