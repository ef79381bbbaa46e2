//! handlers/health_handler.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::{Pool, Sqlite};

use crate::db;

/// GET /health
pub async fn health_endpoint(db_pool: web::Data<Pool<Sqlite>>) -> HttpResponse {
    match db::ping(&db_pool).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Err(e) => {
            log::error!("Health check falló: {:#}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "error": "database unreachable"
            }))
        }
    }
}
