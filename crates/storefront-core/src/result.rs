//! Result type alias for storefront operations.

use crate::StorefrontError;

/// A specialized `Result` type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;
