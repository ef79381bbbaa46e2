//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod assignment_model;
pub mod lead_model;
pub mod payload_model;
pub mod webhook_model;
