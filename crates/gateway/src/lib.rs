//! Shopbridge gateway - HTTP API and chat front for the store layer.
//!
//! The binary wires a [`shopbridge_store::Store`] (backend selected by
//! `STORE_BACKEND`) behind a small axum REST surface plus a `/chat`
//! endpoint that parses command phrases and falls back to a Gemini
//! completion for free text.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod chat;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::GatewayConfig;
pub use error::AppError;
pub use state::AppState;
