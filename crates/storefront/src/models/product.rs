//! Product catalog records and browsing filters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vibe_commerce_core::ProductId;

/// A catalog product.
///
/// Products are immutable after seeding; carts reference them by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
}

/// Category assigned when a product has none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    PriceLow,
    PriceHigh,
    Name,
    /// Store order (seed position). Unknown values fall back here.
    #[default]
    #[serde(other)]
    Featured,
}

/// Optional filters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or description.
    pub q: Option<String>,
    /// Exact category; `all` disables the filter.
    pub category: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl ProductQuery {
    /// Filter and order a product list.
    ///
    /// Sorting is stable, so ties keep store order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let needle = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all");

        let mut products: Vec<Product> = products
            .into_iter()
            .filter(|p| {
                needle.as_deref().is_none_or(|q| {
                    p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
                })
            })
            .filter(|p| category.is_none_or(|c| p.category_or_default() == c))
            .collect();

        match self.sort {
            ProductSort::Featured => {}
            ProductSort::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Name => {
                products.sort_by_cached_key(|p| p.name.to_lowercase());
            }
        }

        products
    }
}

impl Product {
    /// Category, or [`DEFAULT_CATEGORY`] when blank.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }
}

/// The fixed catalog inserted into an empty store.
#[must_use]
pub fn seed_catalog() -> Vec<Product> {
    [
        (
            "1",
            "Premium Wireless Headphones",
            14_999,
            "Electronics",
            "High-quality sound with noise cancellation",
            "/wireless-headphones.png",
        ),
        (
            "2",
            "Elegant Wrist Watch",
            19_999,
            "Fashion",
            "Luxury timepiece with classic design",
            "/wrist-watch.jpg",
        ),
        (
            "3",
            "Professional Camera",
            89_999,
            "Electronics",
            "Advanced DSLR camera with 4K capability",
            "/vintage-camera-still-life.png",
        ),
        (
            "4",
            "Designer Sunglasses",
            24_999,
            "Fashion",
            "UV protection with premium materials",
            "/stylish-sunglasses.png",
        ),
        (
            "5",
            "Portable Speaker",
            7_999,
            "Electronics",
            "Waterproof with 12-hour battery life",
            "/bluetooth-speaker.jpg",
        ),
        (
            "6",
            "Smart Fitness Watch",
            29_999,
            "Electronics",
            "Track your health and fitness goals",
            "/modern-smartwatch.png",
        ),
        (
            "7",
            "Premium Leather Bag",
            34_999,
            "Fashion",
            "Handcrafted Italian leather",
            "/brown-leather-messenger-bag.png",
        ),
        (
            "8",
            "Wireless Charger Pad",
            5_999,
            "Electronics",
            "Fast charging for all compatible devices",
            "/wireless-charger.png",
        ),
    ]
    .into_iter()
    .map(|(id, name, cents, category, description, image)| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(cents, 2),
        category: category.to_owned(),
        description: description.to_owned(),
        image: image.to_owned(),
        in_stock: true,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal_macros::dec;

    use super::*;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_seed_catalog_has_eight_unique_products() {
        let catalog = seed_catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.first().map(|p| p.price), Some(dec!(149.99)));

        let unique: HashSet<&str> = ids(&catalog).into_iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_default_query_keeps_store_order() {
        let catalog = seed_catalog();
        let listed = ProductQuery::default().apply(catalog.clone());
        assert_eq!(listed, catalog);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let query = ProductQuery {
            q: Some("WATCH".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(seed_catalog())), vec!["2", "6"]);

        let query = ProductQuery {
            q: Some("italian".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(seed_catalog())), vec!["7"]);
    }

    #[test]
    fn test_category_filter_and_all() {
        let fashion = ProductQuery {
            category: Some("Fashion".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&fashion.apply(seed_catalog())), vec!["2", "4", "7"]);

        let all = ProductQuery {
            category: Some("all".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(all.apply(seed_catalog()).len(), 8);
    }

    #[test]
    fn test_sorting() {
        let by = |sort| ProductQuery {
            sort,
            ..ProductQuery::default()
        };

        let low = by(ProductSort::PriceLow).apply(seed_catalog());
        assert_eq!(low.first().map(|p| p.id.as_str()), Some("8"));
        assert_eq!(low.last().map(|p| p.id.as_str()), Some("3"));

        let high = by(ProductSort::PriceHigh).apply(seed_catalog());
        assert_eq!(high.first().map(|p| p.id.as_str()), Some("3"));

        let name = by(ProductSort::Name).apply(seed_catalog());
        assert_eq!(name.first().map(|p| p.name.as_str()), Some("Designer Sunglasses"));
    }

    #[test]
    fn test_unknown_sort_falls_back_to_featured() {
        let sort: ProductSort = serde_json::from_str("\"newest\"").unwrap_or(ProductSort::Name);
        assert_eq!(sort, ProductSort::Featured);
    }

    #[test]
    fn test_query_string_sort_values() {
        let sort = |raw: &str| {
            serde_json::from_value::<ProductQuery>(serde_json::json!({ "sort": raw }))
                .map(|q| q.sort)
                .ok()
        };
        assert_eq!(sort("price-low"), Some(ProductSort::PriceLow));
        assert_eq!(sort("price-high"), Some(ProductSort::PriceHigh));
        assert_eq!(sort("name"), Some(ProductSort::Name));
        assert_eq!(sort("featured"), Some(ProductSort::Featured));
        assert_eq!(sort("rating"), Some(ProductSort::Featured));

        let empty: Option<ProductQuery> = serde_json::from_str("{}").ok();
        assert_eq!(empty.map(|q| q.sort), Some(ProductSort::Featured));
    }

    #[test]
    fn test_product_serializes_camel_case_with_numeric_price() {
        let product = seed_catalog().remove(4);
        let json = serde_json::to_value(&product).unwrap_or_default();
        assert_eq!(json["inStock"], serde_json::Value::Bool(true));
        let price = json["price"].as_f64().unwrap_or_default();
        assert!((price - 79.99).abs() < 1e-9);
        assert_eq!(json["id"], "5");
    }
}
