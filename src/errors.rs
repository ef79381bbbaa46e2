//! errors.rs
//! Errores tipados en la frontera HTTP y al decodificar el payload.

use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Fallos al convertir el JSON recibido en `OpportunityPayload`.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errores del endpoint que no pasan por el resultado de asignación.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("failed to record raw webhook: {0:#}")]
    Audit(anyhow::Error),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            WebhookError::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Cuerpo de respuesta. El detalle interno solo sale con `debug`.
    pub fn to_response(&self, debug: bool) -> HttpResponse {
        let body = match self {
            WebhookError::InvalidJson(_) => json!({ "error": "Invalid JSON" }),
            WebhookError::Audit(e) if debug => json!({
                "error": "Internal server error",
                "details": format!("{e:#}")
            }),
            WebhookError::Audit(_) => json!({ "error": "Internal server error" }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
