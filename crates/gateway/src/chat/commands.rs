//! Chat command patterns.
//!
//! A fixed regex set compiled once, matched in order; the first match wins.
//! Specific patterns (reports, mutations) come before the broad list
//! keywords, so "out of stock" is never swallowed by the product-list rule.
//! Anything that matches nothing is handed to the language model instead.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// A recognized chat command, ready to execute against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    ListProducts,
    ListOrders,
    CreateProduct { name: String, price: Decimal },
    CreateOrder {
        customer: String,
        product_id: i64,
        quantity: i64,
        total: Decimal,
    },
    UpdateOrderStatus { id: i64, status: String },
    DeleteProduct { id: i64 },
    DeleteOrder { id: i64 },
    BestSeller,
    OutOfStock,
    LastOrder,
}

static BEST_SELLER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?i)\bbest[ -]?sell(?:er|ing)\b").unwrap()
});

static OUT_OF_STOCK: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)\bout\s+of\s+stock\b").unwrap()
});

static LAST_ORDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)\b(?:last|latest|most\s+recent)\s+order\b").unwrap()
});

static CREATE_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(
        r"(?i)^\s*(?:add|create)\s+(?:a\s+)?product\s+(?P<name>.+?)\s+(?:at|for|priced?\s+at)\s+\$?(?P<price>\d+(?:\.\d+)?)\s*$",
    )
    .unwrap()
});

static CREATE_ORDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(
        r"(?i)^\s*(?:create|place)\s+(?:an?\s+)?order\s+for\s+(?P<customer>.+?)\s*:\s*product\s+#?(?P<product_id>\d+)\s*,?\s+(?:qty|quantity)\s+(?P<quantity>\d+)\s*,?\s+total\s+\$?(?P<total>\d+(?:\.\d+)?)\s*$",
    )
    .unwrap()
});

static UPDATE_ORDER_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(
        r"(?i)^\s*(?:mark|update|set)\s+order\s+#?(?P<id>\d+)\s+(?:status\s+)?(?:to|as)\s+(?P<status>[a-z][a-z-]*)\s*$",
    )
    .unwrap()
});

static DELETE_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)^\s*(?:delete|remove)\s+product\s+#?(?P<id>\d+)\s*$").unwrap()
});

static DELETE_ORDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)^\s*(?:delete|remove|cancel)\s+order\s+#?(?P<id>\d+)\s*$").unwrap()
});

static LIST_PRODUCTS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)\b(?:list|show|view)\b.*\b(?:products|inventory)\b").unwrap()
});

static LIST_ORDERS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)\b(?:list|show|view)\b.*\borders\b").unwrap()
});

impl ChatCommand {
    /// Match `input` against the command set; `None` means free text.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        if BEST_SELLER.is_match(input) {
            return Some(Self::BestSeller);
        }
        if OUT_OF_STOCK.is_match(input) {
            return Some(Self::OutOfStock);
        }
        if LAST_ORDER.is_match(input) {
            return Some(Self::LastOrder);
        }
        if let Some(caps) = CREATE_PRODUCT.captures(input) {
            return Some(Self::CreateProduct {
                name: caps["name"].to_string(),
                price: caps["price"].parse().ok()?,
            });
        }
        if let Some(caps) = CREATE_ORDER.captures(input) {
            return Some(Self::CreateOrder {
                customer: caps["customer"].to_string(),
                product_id: caps["product_id"].parse().ok()?,
                quantity: caps["quantity"].parse().ok()?,
                total: caps["total"].parse().ok()?,
            });
        }
        if let Some(caps) = UPDATE_ORDER_STATUS.captures(input) {
            return Some(Self::UpdateOrderStatus {
                id: caps["id"].parse().ok()?,
                status: caps["status"].to_lowercase(),
            });
        }
        if let Some(caps) = DELETE_PRODUCT.captures(input) {
            return Some(Self::DeleteProduct {
                id: caps["id"].parse().ok()?,
            });
        }
        if let Some(caps) = DELETE_ORDER.captures(input) {
            return Some(Self::DeleteOrder {
                id: caps["id"].parse().ok()?,
            });
        }
        if LIST_PRODUCTS.is_match(input) {
            return Some(Self::ListProducts);
        }
        if LIST_ORDERS.is_match(input) {
            return Some(Self::ListOrders);
        }
        None
    }

    /// Whether executing this command changes the remote store.
    ///
    /// Mutations trigger a WhatsApp notification when Twilio is configured.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateProduct { .. }
                | Self::CreateOrder { .. }
                | Self::UpdateOrderStatus { .. }
                | Self::DeleteProduct { .. }
                | Self::DeleteOrder { .. }
        )
    }
}
