//! Catalog fixture records and product filtering.
//!
//! These mirror the JSON fixtures the storefront serves. Products are never
//! mutated; carts and wishlists hold snapshot copies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AdId, ProductId, SellerId};

/// A product from `products.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: Decimal,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seller: Option<SellerInfo>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

const fn in_stock_default() -> bool {
    true
}

impl Product {
    /// The primary image, falling back to the first gallery image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// Seller block embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub seller_name: String,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
}

/// A category tile from `categories.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A hero banner from `ads.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// A seller directory entry from `sellers.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub joined: Option<String>,
}

/// Search box suggestions from `search.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestions {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl SearchSuggestions {
    /// Suggestions containing `query` (case-insensitive), at most `limit`.
    ///
    /// A blank query returns the first `limit` suggestions.
    #[must_use]
    pub fn matching(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Price bands offered on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    /// Below 500.
    Low,
    /// 500 to 2000 inclusive.
    Medium,
    /// Above 2000.
    High,
}

impl PriceRange {
    const LOW_CEILING: i64 = 500;
    const HIGH_FLOOR: i64 = 2000;

    /// Parse the query-string value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Label shown in the filter select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Below ₹500",
            Self::Medium => "₹500 - ₹2000",
            Self::High => "Above ₹2000",
        }
    }

    /// All bands in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Whether `price` falls in this band.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let low = Decimal::from(Self::LOW_CEILING);
        let high = Decimal::from(Self::HIGH_FLOOR);
        match self {
            Self::Low => price < low,
            Self::Medium => price >= low && price <= high,
            Self::High => price > high,
        }
    }
}

/// Listing criteria. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
}

impl ProductFilter {
    /// Whether a single product passes every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search {
            if !product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(range) = self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !product
                .brand
                .to_lowercase()
                .contains(&brand.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if product.rating < min {
                return false;
            }
        }
        true
    }

    /// Products passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Heading for the listing page.
    #[must_use]
    pub fn title(&self) -> String {
        match (&self.search, &self.category) {
            (Some(search), _) => format!("Search results for \"{search}\""),
            (None, Some(category)) => format!("Category: {category}"),
            (None, None) => "All Products".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str, category: &str, brand: &str, price: i64, rating: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            brand: brand.to_string(),
            price: Decimal::from(price),
            rating,
            image: None,
            images: Vec::new(),
            features: Vec::new(),
            description: None,
            seller: None,
            reviews: Vec::new(),
            in_stock: true,
        }
    }

    fn fixtures() -> Vec<Product> {
        vec![
            product(1, "iPhone 15", "Electronics", "Apple", 79_900, 4.7),
            product(2, "Running Shoes", "Clothing", "Nike", 4_999, 4.2),
            product(3, "Cotton Socks", "Clothing", "Nike", 299, 3.1),
            product(4, "Galaxy Buds", "Electronics", "Samsung", 1_999, 3.9),
            product(5, "Desk Lamp", "Home", "Philips", 500, 2.5),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        let products = fixtures();
        assert_eq!(ids(&ProductFilter::default().apply(&products)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_category_is_exact() {
        let products = fixtures();
        let filter = ProductFilter {
            category: Some("Electronics".to_string()),
            ..Default::default()
        };
        let found = filter.apply(&products);
        assert_eq!(ids(&found), vec![1, 4]);
        assert!(found.iter().all(|p| p.category == "Electronics"));

        let lower = ProductFilter {
            category: Some("electronics".to_string()),
            ..Default::default()
        };
        assert!(lower.apply(&products).is_empty());
    }

    #[test]
    fn test_price_bands() {
        let products = fixtures();
        let band = |range| ProductFilter {
            price_range: Some(range),
            ..Default::default()
        };
        assert_eq!(ids(&band(PriceRange::Low).apply(&products)), vec![3]);
        assert_eq!(ids(&band(PriceRange::Medium).apply(&products)), vec![4, 5]);
        assert_eq!(ids(&band(PriceRange::High).apply(&products)), vec![1, 2]);
    }

    #[test]
    fn test_search_and_brand_are_case_insensitive() {
        let products = fixtures();
        let filter = ProductFilter {
            search: Some("SHOES".to_string()),
            brand: Some("nik".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&products)), vec![2]);
    }

    #[test]
    fn test_min_rating_inclusive() {
        let products = fixtures();
        let filter = ProductFilter {
            min_rating: Some(4.2),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&products)), vec![1, 2]);
    }

    #[test]
    fn test_title() {
        let mut filter = ProductFilter::default();
        assert_eq!(filter.title(), "All Products");
        filter.category = Some("Home".to_string());
        assert_eq!(filter.title(), "Category: Home");
        filter.search = Some("lamp".to_string());
        assert_eq!(filter.title(), "Search results for \"lamp\"");
    }

    #[test]
    fn test_price_range_parse() {
        assert_eq!(PriceRange::parse("medium"), Some(PriceRange::Medium));
        assert_eq!(PriceRange::parse("cheap"), None);
    }

    #[test]
    fn test_product_json_uses_camel_case_and_defaults() {
        let json = r#"{
            "id": 9,
            "name": "Kettle",
            "category": "Home",
            "brand": "Prestige",
            "price": 1499,
            "seller": { "sellerName": "HomeMart", "returnPolicy": "7 days" }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::from(1499));
        assert!(product.in_stock);
        assert_eq!(product.seller.as_ref().unwrap().seller_name, "HomeMart");
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn test_primary_image_falls_back_to_gallery() {
        let mut p = product(1, "A", "B", "C", 1, 1.0);
        p.image = Some("  ".to_string());
        p.images = vec!["/img/a.png".to_string()];
        assert_eq!(p.primary_image(), Some("/img/a.png"));
    }

    #[test]
    fn test_suggestions_matching() {
        let s = SearchSuggestions {
            suggestions: vec!["iPhone".into(), "iPad".into(), "Shoes".into()],
        };
        assert_eq!(s.matching("ip", 8), vec!["iPhone", "iPad"]);
        assert_eq!(s.matching("", 2), vec!["iPhone", "iPad"]);
    }
}
