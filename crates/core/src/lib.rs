//! Shopbridge Core - Shared record model.
//!
//! This crate provides the normalized data shapes exchanged between the
//! store driver layer and the gateway:
//!
//! - `records` - normalized product/order rows, mutation results, reports
//! - `filters` - backend-agnostic fetch filter map
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every
//! backend driver maps its platform's response shapes into these records so
//! the rest of the system never sees platform-specific JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filters;
pub mod records;

pub use filters::FetchFilters;
pub use records::{
    BestSellerReport, NewOrder, NewProduct, OperationResult, OrderRecord, ProductRecord,
};
