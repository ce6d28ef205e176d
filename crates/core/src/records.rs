//! Normalized row types returned by every store driver.
//!
//! One `ProductRecord`/`OrderRecord` per remote resource, independent of
//! which platform produced it. Status vocabularies are platform-native and
//! passed through verbatim - the record model normalizes shape, not
//! vocabulary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized product row.
///
/// `id` is the platform-native identifier and is never translated across
/// backends. `stock_quantity` defaults to 0 when the platform omits it and
/// is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Platform-native product id.
    pub id: i64,
    /// Display name / title.
    pub name: String,
    /// Price normalized to a decimal. `None` when the platform has no price
    /// for the product (e.g. a Shopify product with zero variants).
    pub price: Option<Decimal>,
    /// Platform-native status string (`publish`, `active`, `draft`, ...).
    pub status: String,
    /// Units in stock, defaulted to 0 when absent.
    pub stock_quantity: i64,
    /// Category names joined with `", "` for display.
    pub categories: String,
    /// Free-text description, defaulted to empty.
    pub description: String,
    /// First image URL, if any.
    pub image: Option<String>,
}

/// A normalized order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Platform-native order id.
    pub id: i64,
    /// Platform-native status (`pending`, `completed`, financial status...).
    pub status: String,
    /// Order total as the platform reports it.
    pub total: String,
    /// Billing first name, or `"Unknown"` for guest orders.
    pub customer: String,
    /// ISO-8601 creation timestamp.
    pub date: String,
    /// Product id of the first line item, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

/// Uniform response of any mutating driver call.
///
/// Failures are raised as errors, not returned; the one exception is the
/// "not found" case on delete operations, which comes back as a
/// message-only result with no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Id of the affected resource. `None` for message-only results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Human-readable outcome.
    pub message: String,
}

impl OperationResult {
    /// A completed mutation touching `id`.
    #[must_use]
    pub fn completed(id: i64, message: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            message: message.into(),
        }
    }

    /// A message-only result with no affected id (e.g. delete of a missing
    /// resource).
    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
        }
    }
}

/// Best-selling-product report for the current day.
///
/// An empty query window is not an error - it is the `NoSales` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BestSellerReport {
    /// At least one sale in the window.
    Sales {
        /// Platform-native product id.
        product_id: i64,
        /// Product display name.
        product_name: String,
        /// Units sold in the window.
        quantity_sold: i64,
        /// Revenue for the window (quantity x unit price).
        total_sales: Decimal,
    },
    /// No sales recorded in the window.
    NoSales {
        /// Human-readable absence message.
        message: String,
    },
}

impl BestSellerReport {
    /// The "no sales today" shape.
    #[must_use]
    pub fn no_sales() -> Self {
        Self::NoSales {
            message: "No sales recorded today".to_string(),
        }
    }
}

/// Fields for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name / title.
    pub name: String,
    /// Regular price.
    pub price: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Fields for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Customer display name (billing first name).
    pub customer: String,
    /// Platform-native product id to order.
    pub product_id: i64,
    /// Units ordered.
    pub quantity: i64,
    /// Order total.
    pub total: Decimal,
}
