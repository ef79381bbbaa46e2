//! handlers/mod.rs
//! Endpoints HTTP.
pub mod health_handler;
pub mod webhook_handler;
