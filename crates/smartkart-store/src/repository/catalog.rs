//! # Catalog Repository
//!
//! Read-only product catalog.
//!
//! ## Catalog File
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  data/products.json                                                     │
//! │                                                                         │
//! │  { "products": [                                                        │
//! │      { "product_id": "A1", "name": "Amul Butter 500g",                  │
//! │        "category": "Dairy", "aisle": "Aisle 2",                         │
//! │        "variable_weight": false, "price": 275, "expected_weight": 500 },│
//! │      { "product_id": "V1", "name": "Tomatoes",                          │
//! │        "category": "Vegetables", "aisle": "Aisle 1",                    │
//! │        "variable_weight": true, "price_per_kg": 40 } ] }                │
//! │                                                                         │
//! │  Loaded once → Vec<Product> (file order) + HashMap<id, position>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;
use smartkart_core::Product;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Read access to the product catalog.
///
/// An unknown id is a normal outcome (`None`), never an error.
pub trait CatalogProvider: Send + Sync {
    /// All products, in catalog order.
    fn all_products(&self) -> &[Product];

    /// Looks up a product by id.
    fn product(&self, product_id: &str) -> Option<&Product>;

    /// Distinct categories, sorted lexicographically.
    fn categories(&self) -> Vec<String>;
}

/// Top-level shape of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Catalog loaded from a JSON document and held in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl JsonCatalog {
    /// Builds a catalog from already-decoded products.
    ///
    /// Fails with [`StoreError::DuplicateProduct`] if two products share
    /// an id.
    pub fn from_products(products: Vec<Product>) -> StoreResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.product_id.clone(), position).is_some() {
                return Err(StoreError::DuplicateProduct(product.product_id.clone()));
            }
        }

        Ok(JsonCatalog { products, index })
    }

    /// Parses a catalog document (`{"products": [...]}`).
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_products(file.products)
    }

    /// Reads and parses the catalog file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading catalog");

        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;

        info!(
            path = %path.display(),
            products = catalog.products.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for JsonCatalog {
    fn all_products(&self) -> &[Product] {
        &self.products
    }

    fn product(&self, product_id: &str) -> Option<&Product> {
        self.index
            .get(product_id)
            .and_then(|&position| self.products.get(position))
    }

    fn categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartkart_core::{Money, Pricing, Weight};
    use std::io::Write;

    const CATALOG: &str = r#"{
        "products": [
            {"product_id": "A1", "name": "Amul Butter 500g", "category": "Dairy",
             "aisle": "Aisle 2", "variable_weight": false, "price": 275, "expected_weight": 500},
            {"product_id": "V1", "name": "Tomatoes", "category": "Vegetables",
             "aisle": "Aisle 1", "variable_weight": true, "price_per_kg": 40},
            {"product_id": "B7", "name": "Brown Bread", "category": "Bakery",
             "aisle": "Aisle 4", "variable_weight": false, "price": 45, "expected_weight": 400},
            {"product_id": "D2", "name": "Paneer 200g", "category": "Dairy",
             "aisle": "Aisle 2", "variable_weight": false, "price": 90, "expected_weight": 200}
        ]
    }"#;

    #[test]
    fn test_lookup_and_order() {
        let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();

        let ids: Vec<_> = catalog
            .all_products()
            .iter()
            .map(|p| p.product_id.as_str())
            .collect();
        assert_eq!(ids, ["A1", "V1", "B7", "D2"]);

        let butter = catalog.product("A1").unwrap();
        assert_eq!(
            butter.pricing,
            Pricing::Fixed {
                price: Money::from_paise(27500),
                expected_weight: Weight::from_grams(500),
            }
        );
        assert!(catalog.product("V1").unwrap().is_variable_weight());
        assert!(catalog.product("nope").is_none());
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.categories(), ["Bakery", "Dairy", "Vegetables"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"products": [
            {"product_id": "A1", "name": "x", "category": "c", "aisle": "a", "price": 1, "expected_weight": 1},
            {"product_id": "A1", "name": "y", "category": "c", "aisle": "a", "price": 2, "expected_weight": 2}
        ]}"#;
        assert!(matches!(
            JsonCatalog::from_json_str(json),
            Err(StoreError::DuplicateProduct(id)) if id == "A1"
        ));
    }

    #[test]
    fn test_incoherent_record_rejected() {
        let json = r#"{"products": [
            {"product_id": "V1", "name": "Tomatoes", "category": "Vegetables",
             "aisle": "Aisle 1", "variable_weight": true}
        ]}"#;
        assert!(matches!(
            JsonCatalog::from_json_str(json),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = JsonCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonCatalog::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = JsonCatalog::from_json_str(r#"{"products": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }
}
