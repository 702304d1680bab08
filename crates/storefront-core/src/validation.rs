//! Validation utilities.

use crate::{FieldError, StorefrontError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `StorefrontError` on failure.
    fn validate_request(&self) -> Result<(), StorefrontError> {
        self.validate().map_err(validation_errors_to_storefront_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator` errors into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `StorefrontError`.
#[must_use]
pub fn validation_errors_to_storefront_error(errors: ValidationErrors) -> StorefrontError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    StorefrontError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a stock keeping unit: 1-64 chars of letters, digits, `-` or `_`.
    pub fn valid_sku(sku: &str) -> Result<(), ValidationError> {
        if sku.is_empty() || sku.len() > 64 {
            return Err(ValidationError::new("sku_length"));
        }
        if !sku
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::new("sku_invalid_characters"));
        }
        Ok(())
    }
}
