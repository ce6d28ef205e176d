//! Outbound service clients.

pub mod llm;
pub mod whatsapp;
