//! Product cache key schema.

use storefront_core::ProductId;

/// The whole active catalog, in catalog order.
pub const ALL_PRODUCTS: &str = "products:all";

/// Every list key, used for fan-out invalidation.
pub const LIST_PATTERN: &str = "products:*";

/// Every single-product key.
pub const PRODUCT_PATTERN: &str = "product:*";

/// Per-category list keys. Nothing writes these; stats still report the pattern.
pub const CATEGORY_PATTERN: &str = "products:category:*";

/// Patterns reported by cache stats.
pub const STATS_PATTERNS: [&str; 3] = [ALL_PRODUCTS, PRODUCT_PATTERN, CATEGORY_PATTERN];

/// Key for a single product.
#[must_use]
pub fn product(id: ProductId) -> String {
    format!("product:{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::glob::glob_match;

    #[test]
    fn test_product_key() {
        assert_eq!(product(ProductId(7)), "product:7");
    }

    #[test]
    fn test_list_pattern_spares_single_products() {
        assert!(glob_match(LIST_PATTERN, ALL_PRODUCTS));
        assert!(glob_match(LIST_PATTERN, "products:category:2"));
        assert!(!glob_match(LIST_PATTERN, &product(ProductId(7))));
    }

    #[test]
    fn test_product_pattern() {
        assert!(glob_match(PRODUCT_PATTERN, &product(ProductId(42))));
        assert!(!glob_match(PRODUCT_PATTERN, ALL_PRODUCTS));
    }
}
