//! tests/mod.rs
//! Utilidades compartidas por las pruebas.

mod parsing_tests;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use tempfile::TempDir;

use crate::db::setup_database;
use crate::logger::init_test_logger;
use crate::models::lead_model::{LeadCommon, LeadRecord};
use crate::models::webhook_model::WebhookRecord;
use crate::services::webhook_service::WebhookService;

/// Base en memoria con una sola conexión (cada conexión a
/// `sqlite::memory:` es una base distinta) y migraciones aplicadas.
pub async fn test_pool() -> Pool<Sqlite> {
    init_test_logger();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    WebhookService::new(pool.clone())
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    pool
}

/// Base en archivo con varias conexiones, para que los requests
/// concurrentes compitan de verdad en SQLite. El `TempDir` debe vivir
/// mientras se use el pool.
pub async fn shared_test_pool() -> (TempDir, Pool<Sqlite>) {
    init_test_logger();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("leads.db").display());
    let pool = setup_database(&url)
        .await
        .expect("Failed to open file-backed SQLite");

    WebhookService::new(pool.clone())
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    (dir, pool)
}

/// Payload como lo manda el CRM.
pub fn opportunity_payload(
    contact_id: &str,
    opportunity_id: &str,
    handler: &str,
    workers: &str,
    value: &str,
) -> Value {
    json!({
        "contact_id": contact_id,
        "id": opportunity_id,
        "first_name": "Jane",
        "last_name": "Doe",
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+15551234567",
        "address1": "12 Main St",
        "city": "Austin",
        "state": "TX",
        "country": "US",
        "timezone": "America/Chicago",
        "opportunity_name": "Kitchen remodel",
        "status": "open",
        "lead_value": "1000",
        "opportunity_source": "website",
        "source": "form",
        "pipleline_stage": "Quoted",
        "pipeline_name": "Sales",
        "Quote Link": "https://example.com/quote/1",
        "date_created": "2024-05-01T10:30:00Z",
        "customData": {
            "Handler": handler,
            "Workers Assigned": workers,
            "Value": value
        }
    })
}

pub async fn count_rows(pool: &Pool<Sqlite>, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

/// Filas de una oportunidad, handler primero.
pub async fn find_leads(
    pool: &Pool<Sqlite>,
    contact_id: &str,
    opportunity_id: &str,
) -> Vec<LeadRecord> {
    let rows = sqlx::query(
        r#"
        SELECT *
        FROM leads
        WHERE contact_id = ?1 AND opportunity_id = ?2
        ORDER BY CASE user_type WHEN 'handler' THEN 0 ELSE 1 END, rowid
        "#,
    )
    .bind(contact_id)
    .bind(opportunity_id)
    .fetch_all(pool)
    .await
    .expect("leads query failed");

    rows.iter().map(lead_from_row).collect()
}

fn lead_from_row(row: &SqliteRow) -> LeadRecord {
    let text = |column: &str| -> String { row.get(column) };
    let decimal = |column: &str| BigDecimal::from_str(&text(column)).unwrap();
    let timestamp = |column: &str| -> DateTime<Utc> { text(column).parse().unwrap() };

    LeadRecord {
        id: text("id"),
        common: LeadCommon {
            contact_id: text("contact_id"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            full_name: text("full_name"),
            email: text("email"),
            phone: text("phone"),
            address1: text("address1"),
            city: text("city"),
            state: text("state"),
            country: text("country"),
            timezone: text("timezone"),
            opportunity_id: text("opportunity_id"),
            opportunity_name: text("opportunity_name"),
            status: text("status"),
            lead_value: decimal("lead_value"),
            opportunity_source: text("opportunity_source"),
            source: text("source"),
            pipeline_stage: text("pipeline_stage"),
            pipeline_name: text("pipeline_name"),
            quote_link: row.get("quote_link"),
            value: text("value"),
            date_created: timestamp("date_created"),
        },
        user_name: text("user_name"),
        employee_price: decimal("employee_price"),
        user_type: text("user_type").parse().unwrap(),
        created_at: timestamp("created_at"),
        updated_at: timestamp("updated_at"),
    }
}

pub async fn fetch_webhook(pool: &Pool<Sqlite>, id: &str) -> WebhookRecord {
    let row = sqlx::query("SELECT id, payload, received_at FROM webhooks WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("webhook query failed");

    WebhookRecord {
        id: row.get("id"),
        payload: row.get("payload"),
        received_at: row.get::<String, _>("received_at").parse().unwrap(),
    }
}
