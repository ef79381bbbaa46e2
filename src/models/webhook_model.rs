//! models/webhook_model.rs
//! Registro crudo de auditoría: el payload tal como llegó.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRecord {
    pub id: String,
    /// JSON serializado, tal como se guarda
    pub payload: String,
    pub received_at: DateTime<Utc>,
}
