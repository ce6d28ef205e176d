//! Store driver layer.
//!
//! One [`StoreDriver`] capability trait, two backend adapters
//! ([`WooCommerceDriver`], [`ShopifyDriver`]) and the [`Store`] facade that
//! owns exactly one of them for the process lifetime.
//!
//! # Architecture
//!
//! - Each driver wraps a `reqwest::Client` and normalizes its platform's
//!   REST responses into the shared records from `shopbridge-core`.
//! - The facade is pure delegation: it selects a driver once at
//!   construction from [`StoreConfig`] and adds no behavior of its own.
//! - Errors bubble unwrapped: drivers never catch-and-hide remote
//!   failures, the facade never translates them.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopbridge_store::{Store, StoreConfig};
//!
//! let store = Store::new(&config)?;
//! let products = store.fetch_products(&FetchFilters::new()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod config;
mod driver;
mod error;
mod facade;
mod shopify;
mod woocommerce;

pub use config::{BackendKind, ShopifyConfig, StoreConfig, WooCommerceConfig};
pub use driver::{FieldMap, StoreDriver};
pub use error::StoreError;
pub use facade::Store;
pub use shopify::ShopifyDriver;
pub use woocommerce::WooCommerceDriver;
