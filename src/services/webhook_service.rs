//! services/webhook_service.rs
//! Registro de auditoría: guarda cada payload recibido, sin validarlo.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::webhook_model::WebhookRecord;

#[derive(Clone, Debug)]
pub struct WebhookService {
    db_pool: Pool<Sqlite>,
}

impl WebhookService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        WebhookService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }

    /// Guarda el payload tal cual con la hora de recepción.
    /// Acepta cualquier JSON (objeto, arreglo, escalar). Devuelve el id.
    pub async fn record(&self, payload: &serde_json::Value) -> Result<String> {
        let record = WebhookRecord {
            id: Uuid::new_v4().to_string(),
            payload: payload.to_string(),
            received_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO webhooks (id, payload, received_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&record.id)
        .bind(&record.payload)
        .bind(record.received_at.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar webhook")?;

        Ok(record.id)
    }
}
