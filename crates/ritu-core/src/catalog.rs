//! Product catalog domain models.
//!
//! The catalog is loaded once at startup and is immutable afterwards. It is
//! the single authority for which product ids exist; every selection mutation
//! validates against it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RituError};

/// A purchasable item from the catalog.
///
/// Externally supplied and never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: u32,
    pub name: String,
    pub brand: String,
    /// Raw category key (e.g. "skincare", "hair color").
    pub category: String,
    pub description: String,
    /// Image URI, passed through to the rendering surface untouched.
    pub image: String,
}

/// Wire shape of the catalog resource: `{ "products": [...] }`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// Filter criteria for browsing the catalog.
///
/// Category equality and case-insensitive substring search over
/// name/brand/description. Both are optional and combine with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }

    /// Whether a product passes every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let needle = needle.trim();
            if !needle.is_empty() {
                let hit = product.name.to_lowercase().contains(needle)
                    || product.brand.to_lowercase().contains(needle)
                    || product.description.to_lowercase().contains(needle);
                if !hit {
                    return false;
                }
            }
        }

        true
    }
}

/// The immutable product catalog.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Builds a catalog from a product list. Later duplicates of an id are
    /// ignored; the first occurrence wins.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut kept = Vec::with_capacity(products.len());
        for product in products {
            if by_id.contains_key(&product.id) {
                continue;
            }
            by_id.insert(product.id, kept.len());
            kept.push(product);
        }
        Self {
            products: kept,
            by_id,
        }
    }

    /// An empty catalog, used when the initial load fails so the session can
    /// continue with browsing disabled.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parses the catalog resource (`{ "products": [...] }`).
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)
            .map_err(|e| RituError::catalog_load(e.to_string()))?;
        Ok(Self::new(document.products))
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.by_id.get(&id).map(|&idx| &self.products[idx])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The category vocabulary in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// Applies a filter, preserving catalog order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: 1,
                name: "Glow Serum".to_string(),
                brand: "Lumina".to_string(),
                category: "skincare".to_string(),
                description: "Brightening vitamin C serum".to_string(),
                image: "https://img.example/1.jpg".to_string(),
            },
            Product {
                id: 2,
                name: "Matte Lip".to_string(),
                brand: "Velvet".to_string(),
                category: "makeup".to_string(),
                description: "Long-wear matte lip color".to_string(),
                image: "https://img.example/2.jpg".to_string(),
            },
        ])
    }

    #[test]
    fn test_category_filter() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            category: Some("skincare".to_string()),
            search: None,
        };
        let ids: Vec<u32> = catalog.filter(&filter).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_filter_is_case_insensitive() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            category: None,
            search: Some("LIP".to_string()),
        };
        let ids: Vec<u32> = catalog.filter(&filter).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_search_covers_description() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            category: None,
            search: Some("vitamin".to_string()),
        };
        let ids: Vec<u32> = catalog.filter(&filter).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_contradictory_filters_return_empty() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            category: Some("skincare".to_string()),
            search: Some("lip".to_string()),
        };
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["skincare", "makeup"]);
    }

    #[test]
    fn test_from_json_str() {
        let raw = r#"{"products":[{"id":7,"name":"N","brand":"B","category":"suncare","description":"D","image":"I"}]}"#;
        let catalog = Catalog::from_json_str(raw).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(7));
    }

    #[test]
    fn test_malformed_catalog_is_a_load_error() {
        let err = Catalog::from_json_str("{oops").unwrap_err();
        assert!(matches!(err, RituError::CatalogLoad(_)));
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let mut products = sample_catalog().products().to_vec();
        let mut dup = products[0].clone();
        dup.name = "Impostor".to_string();
        products.push(dup);
        let catalog = Catalog::new(products);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "Glow Serum");
    }
}
