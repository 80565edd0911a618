//! Client-side catalog filtering and sorting.
//!
//! The backend returns the whole catalog; narrowing and ordering happen on
//! the client so a filter change never costs a network round trip.

use crate::api::types::Product;

/// Categories the storefront shows. Products outside this list are hidden
/// regardless of any other filter.
pub const CATEGORIES: &[&str] = &[
    "Apparel & Accessories",
    "Home & Garden",
    "Beauty & Personal Care",
    "Electronics",
    "Books & Media",
    "Groceries",
];

/// Buyer-selected catalog filters.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring match on the product name.
    pub search: String,
    /// Selected categories; empty means all.
    pub categories: Vec<String>,
    /// Only show zero-waste products.
    pub zero_waste_only: bool,
}

impl CatalogFilter {
    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !CATEGORIES.contains(&product.category.as_str()) {
            return false;
        }

        let search_match = product
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let category_match =
            self.categories.is_empty() || self.categories.contains(&product.category);
        let zero_waste_match = !self.zero_waste_only || product.zero_waste;

        search_match && category_match && zero_waste_match
    }

    /// Toggle a category in or out of the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category.to_string());
        }
    }
}

/// Catalog ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Backend order, untouched.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Apply `filter` then `sort` to the catalog.
///
/// Sorting is stable, so products with equal prices keep their backend
/// order.
#[must_use]
pub fn filter_and_sort(
    products: &[Product],
    filter: &CatalogFilter,
    sort: SortOrder,
) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match sort {
        SortOrder::Default => {}
        SortOrder::PriceAsc => filtered.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        SortOrder::PriceDesc => filtered.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
    }

    filtered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::NaiveDateTime;
    use ecobazaar_core::{CurrencyCode, Price, ProductId, SellerId};

    use crate::api::types::SellerSummary;

    fn product(id: i64, name: &str, category: &str, price: &str, zero_waste: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            description: String::new(),
            stock: 5,
            category: category.into(),
            image_path: None,
            carbon_emission: 1.0,
            price: Price::new(price.parse().unwrap(), CurrencyCode::INR),
            created_at: NaiveDateTime::default(),
            zero_waste,
            seller: SellerSummary {
                id: SellerId::new(1),
                name: "Asha".into(),
                email: "asha@greengoods.in".into(),
                business_name: "Green Goods".into(),
            },
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Bamboo Toothbrush", "Beauty & Personal Care", "12.99", true),
            product(2, "Solar Charger", "Electronics", "59.99", false),
            product(3, "Organic Tea", "Groceries", "8.50", true),
            product(4, "Mystery Box", "Uncategorized", "1.00", false),
        ]
    }

    #[test]
    fn test_unknown_categories_are_always_hidden() {
        let results = filter_and_sort(&catalog(), &CatalogFilter::default(), SortOrder::Default);
        assert!(results.iter().all(|p| p.category != "Uncategorized"));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = CatalogFilter {
            search: "bamboo".into(),
            ..Default::default()
        };
        let results = filter_and_sort(&catalog(), &filter, SortOrder::Default);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "Bamboo Toothbrush");
    }

    #[test]
    fn test_category_filter() {
        let filter = CatalogFilter {
            categories: vec!["Groceries".into(), "Electronics".into()],
            ..Default::default()
        };
        let results = filter_and_sort(&catalog(), &filter, SortOrder::Default);
        let ids: Vec<i64> = results.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_zero_waste_filter() {
        let filter = CatalogFilter {
            zero_waste_only: true,
            ..Default::default()
        };
        let results = filter_and_sort(&catalog(), &filter, SortOrder::Default);
        assert!(results.iter().all(|p| p.zero_waste));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_price_sorting() {
        let asc = filter_and_sort(&catalog(), &CatalogFilter::default(), SortOrder::PriceAsc);
        let prices: Vec<String> = asc.iter().map(|p| p.price.amount.to_string()).collect();
        assert_eq!(prices, vec!["8.50", "12.99", "59.99"]);

        let desc = filter_and_sort(&catalog(), &CatalogFilter::default(), SortOrder::PriceDesc);
        assert_eq!(desc.first().unwrap().id.as_i64(), 2);
    }

    #[test]
    fn test_toggle_category() {
        let mut filter = CatalogFilter::default();
        filter.toggle_category("Groceries");
        assert_eq!(filter.categories, vec!["Groceries"]);
        filter.toggle_category("Groceries");
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert!("by-vibes".parse::<SortOrder>().is_err());
    }
}
