//! # Domain Types
//!
//! Core domain types used throughout SmartKart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │       Product        │          │       CartItem       │            │
//! │  │  ──────────────────  │  weigh   │  ──────────────────  │            │
//! │  │  product_id          │ ───────► │  product snapshot    │            │
//! │  │  name/category/aisle │          │  price (final)       │            │
//! │  │  pricing: Pricing    │          │  measured_weight     │            │
//! │  └──────────┬───────────┘          │  kind: LineKind      │            │
//! │             │                      │  added_at            │            │
//! │   ┌─────────┴──────────┐           └──────────────────────┘            │
//! │   ▼                    ▼                                                │
//! │  Fixed               Variable                                           │
//! │  price               price_per_kg                                       │
//! │  expected_weight                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Records
//! The catalog file and the JSON API use a flat shape with a
//! `variable_weight` flag and optional pricing fields. In memory that flag
//! becomes the [`Pricing`] / [`LineKind`] enums, so a variable-weight
//! product without a `price_per_kg` cannot exist. [`ProductRecord`] and
//! [`CartItemRecord`] are the flat shapes; serde converts through them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::weight::Weight;

// =============================================================================
// Pricing
// =============================================================================

/// How a product is priced. Exactly one mode per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    /// Pre-packed item: the weight is a verification check only.
    Fixed { price: Money, expected_weight: Weight },
    /// Loose item: the weight is a pricing input.
    Variable { price_per_kg: Money },
}

impl Pricing {
    #[inline]
    pub fn is_variable_weight(&self) -> bool {
        matches!(self, Pricing::Variable { .. })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    /// Unique catalog identifier (scanned code).
    pub product_id: String,
    pub name: String,
    pub category: String,
    /// Where the shopper finds it, e.g. "Aisle 3".
    pub aisle: String,
    pub pricing: Pricing,
}

impl Product {
    /// Builds a fixed-weight product.
    pub fn fixed_weight(
        product_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        aisle: impl Into<String>,
        price: Money,
        expected_weight: Weight,
    ) -> Self {
        Product {
            product_id: product_id.into(),
            name: name.into(),
            category: category.into(),
            aisle: aisle.into(),
            pricing: Pricing::Fixed {
                price,
                expected_weight,
            },
        }
    }

    /// Builds a variable-weight (priced per kg) product.
    pub fn variable_weight(
        product_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        aisle: impl Into<String>,
        price_per_kg: Money,
    ) -> Self {
        Product {
            product_id: product_id.into(),
            name: name.into(),
            category: category.into(),
            aisle: aisle.into(),
            pricing: Pricing::Variable { price_per_kg },
        }
    }

    #[inline]
    pub fn is_variable_weight(&self) -> bool {
        self.pricing.is_variable_weight()
    }
}

/// Flat wire form of a [`Product`], as stored in `products.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub aisle: String,
    #[serde(default)]
    pub variable_weight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub expected_weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub price_per_kg: Option<Money>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    /// Checks that the pricing fields match the `variable_weight` flag.
    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if record.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }

        let pricing = if record.variable_weight {
            let price_per_kg = record.price_per_kg.ok_or_else(|| ValidationError::Required {
                field: format!("price_per_kg of {}", record.product_id),
            })?;
            if price_per_kg.is_negative() {
                return Err(ValidationError::MustNotBeNegative {
                    field: format!("price_per_kg of {}", record.product_id),
                });
            }
            Pricing::Variable { price_per_kg }
        } else {
            let price = record.price.ok_or_else(|| ValidationError::Required {
                field: format!("price of {}", record.product_id),
            })?;
            if price.is_negative() {
                return Err(ValidationError::MustNotBeNegative {
                    field: format!("price of {}", record.product_id),
                });
            }
            let expected_weight =
                record
                    .expected_weight
                    .ok_or_else(|| ValidationError::Required {
                        field: format!("expected_weight of {}", record.product_id),
                    })?;
            if !expected_weight.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: format!("expected_weight of {}", record.product_id),
                });
            }
            Pricing::Fixed {
                price,
                expected_weight,
            }
        };

        Ok(Product {
            product_id: record.product_id,
            name: record.name,
            category: record.category,
            aisle: record.aisle,
            pricing,
        })
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        let (price, expected_weight, price_per_kg) = match product.pricing {
            Pricing::Fixed {
                price,
                expected_weight,
            } => (Some(price), Some(expected_weight), None),
            Pricing::Variable { price_per_kg } => (None, None, Some(price_per_kg)),
        };

        ProductRecord {
            product_id: product.product_id,
            name: product.name,
            category: product.category,
            aisle: product.aisle,
            variable_weight: product.pricing.is_variable_weight(),
            price,
            expected_weight,
            price_per_kg,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// Mode-specific audit data kept on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The weight was checked against this expected value.
    Fixed { expected_weight: Weight },
    /// The price was computed from the weight at this rate.
    Variable { price_per_kg: Money },
}

/// A validated line in the cart.
///
/// Uses the snapshot pattern: product data is frozen at the moment the item
/// was weighed, and the line is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "CartItemRecord")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    /// Final line price: catalog price or computed from weight.
    pub price: Money,
    pub category: String,
    pub aisle: String,
    pub measured_weight: Weight,
    pub kind: LineKind,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    #[inline]
    pub fn is_variable_weight(&self) -> bool {
        matches!(self.kind, LineKind::Variable { .. })
    }
}

/// Flat wire form of a [`CartItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItemRecord {
    pub product_id: String,
    pub name: String,
    #[ts(as = "f64")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub price_per_kg: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub expected_weight: Option<Weight>,
    #[ts(as = "f64")]
    pub measured_weight: Weight,
    pub category: String,
    pub aisle: String,
    pub variable_weight: bool,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemRecord {
    fn from(item: CartItem) -> Self {
        let (price_per_kg, expected_weight) = match item.kind {
            LineKind::Fixed { expected_weight } => (None, Some(expected_weight)),
            LineKind::Variable { price_per_kg } => (Some(price_per_kg), None),
        };

        CartItemRecord {
            variable_weight: matches!(item.kind, LineKind::Variable { .. }),
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            price_per_kg,
            expected_weight,
            measured_weight: item.measured_weight,
            category: item.category,
            aisle: item.aisle,
            added_at: item.added_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_product_from_json() {
        let product: Product = serde_json::from_value(json!({
            "product_id": "A1",
            "name": "Butter 500g",
            "category": "Dairy",
            "aisle": "Aisle 2",
            "variable_weight": false,
            "price": 50,
            "expected_weight": 500
        }))
        .unwrap();

        assert_eq!(
            product.pricing,
            Pricing::Fixed {
                price: Money::from_paise(5000),
                expected_weight: Weight::from_grams(500),
            }
        );
        assert!(!product.is_variable_weight());
    }

    #[test]
    fn test_variable_product_from_json() {
        let product: Product = serde_json::from_value(json!({
            "product_id": "V1",
            "name": "Tomatoes",
            "category": "Vegetables",
            "aisle": "Aisle 1",
            "variable_weight": true,
            "price_per_kg": 40.5
        }))
        .unwrap();

        assert_eq!(
            product.pricing,
            Pricing::Variable {
                price_per_kg: Money::from_paise(4050)
            }
        );
    }

    #[test]
    fn test_variable_product_without_rate_is_rejected() {
        let result: Result<Product, _> = serde_json::from_value(json!({
            "product_id": "V1",
            "name": "Tomatoes",
            "category": "Vegetables",
            "aisle": "Aisle 1",
            "variable_weight": true,
            "price": 10
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("price_per_kg of V1 is required"), "{err}");
    }

    #[test]
    fn test_fixed_product_needs_positive_expected_weight() {
        let record = ProductRecord {
            product_id: "A1".to_string(),
            name: "Butter".to_string(),
            category: "Dairy".to_string(),
            aisle: "Aisle 2".to_string(),
            variable_weight: false,
            price: Some(Money::from_paise(5000)),
            expected_weight: Some(Weight::from_grams(0)),
            price_per_kg: None,
        };
        assert!(matches!(
            Product::try_from(record),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_product_serializes_flat() {
        let product = Product::variable_weight(
            "V1",
            "Tomatoes",
            "Vegetables",
            "Aisle 1",
            Money::from_paise(4000),
        );
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["variable_weight"], json!(true));
        assert_eq!(value["price_per_kg"], json!(40.0));
        assert!(value.get("price").is_none());
        assert!(value.get("expected_weight").is_none());
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem {
            product_id: "A1".to_string(),
            name: "Butter 500g".to_string(),
            price: Money::from_paise(5000),
            category: "Dairy".to_string(),
            aisle: "Aisle 2".to_string(),
            measured_weight: Weight::from_grams(540),
            kind: LineKind::Fixed {
                expected_weight: Weight::from_grams(500),
            },
            added_at: Utc::now(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["price"], json!(50.0));
        assert_eq!(value["expected_weight"], json!(500.0));
        assert_eq!(value["measured_weight"], json!(540.0));
        assert_eq!(value["variable_weight"], json!(false));
        assert!(value.get("price_per_kg").is_none());
    }
}
