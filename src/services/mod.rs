//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod assignment_service;
pub mod lead_service;
pub mod webhook_service;
