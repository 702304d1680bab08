//! Product listing filters.

use crate::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category filter parsed from the raw `category_id` query value.
///
/// A value that is not an integer is kept as [`CategoryFilter::Unparseable`]
/// and matches nothing, so the listing is empty rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    Any,
    /// Only products in this category.
    Id(CategoryId),
    /// A value that failed integer parsing.
    Unparseable,
}

impl CategoryFilter {
    /// Parses a raw query value. Absent and empty values mean [`CategoryFilter::Any`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Any,
            Some(value) => value
                .parse::<CategoryId>()
                .map_or(Self::Unparseable, Self::Id),
        }
    }

    /// Checks whether a product with the given category passes the filter.
    ///
    /// Products without a category only pass [`CategoryFilter::Any`].
    #[must_use]
    pub fn matches(&self, category: Option<CategoryId>) -> bool {
        match self {
            Self::Any => true,
            Self::Id(id) => category == Some(*id),
            Self::Unparseable => false,
        }
    }
}

/// Whitelisted sort columns for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProductSortField {
    /// Catalog order.
    #[default]
    Id,
    Name,
    Price,
    CreatedAt,
}

impl ProductSortField {
    /// Returns the qualified SQL column for `ORDER BY`.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Id => "p.id",
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::CreatedAt => "p.created_at",
        }
    }
}

impl fmt::Display for ProductSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
        };
        write!(f, "{}", name)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filters applied to active-product listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: ProductSortField,
    pub direction: SortDirection,
}

impl ProductFilter {
    /// Returns true when the listing is a category-filtered slice of the full
    /// catalog in catalog order, i.e. it can be answered from the cached catalog.
    #[must_use]
    pub fn is_catalog_view(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.sort == ProductSortField::Id
            && self.direction == SortDirection::Asc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::Any);
        assert_eq!(CategoryFilter::parse(Some("")), CategoryFilter::Any);
        assert_eq!(CategoryFilter::parse(Some("2")), CategoryFilter::Id(CategoryId(2)));
        assert_eq!(CategoryFilter::parse(Some("not-a-number")), CategoryFilter::Unparseable);
    }

    #[test]
    fn test_category_filter_matches() {
        let two = CategoryFilter::Id(CategoryId(2));
        assert!(two.matches(Some(CategoryId(2))));
        assert!(!two.matches(Some(CategoryId(1))));
        assert!(!two.matches(None));

        assert!(CategoryFilter::Any.matches(None));
        assert!(!CategoryFilter::Unparseable.matches(Some(CategoryId(2))));
        assert!(!CategoryFilter::Unparseable.matches(None));
    }

    #[test]
    fn test_default_filter_is_catalog_view() {
        assert!(ProductFilter::default().is_catalog_view());

        let with_category = ProductFilter {
            category: CategoryFilter::Id(CategoryId(1)),
            ..Default::default()
        };
        assert!(with_category.is_catalog_view());
    }

    #[test]
    fn test_search_or_sort_is_not_catalog_view() {
        let search = ProductFilter {
            search: Some("phone".to_string()),
            ..Default::default()
        };
        assert!(!search.is_catalog_view());

        let sorted = ProductFilter {
            sort: ProductSortField::Price,
            ..Default::default()
        };
        assert!(!sorted.is_catalog_view());

        let price = ProductFilter {
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(!price.is_catalog_view());
    }

    #[test]
    fn test_sort_field_serde() {
        let field: ProductSortField = serde_json::from_str("\"created_at\"").unwrap();
        assert_eq!(field, ProductSortField::CreatedAt);
        assert!(serde_json::from_str::<ProductSortField>("\"id; DROP TABLE\"").is_err());
        assert_eq!(field.column(), "p.created_at");
    }
}
