//! handlers/webhook_handler.rs
//! POST /webhook/ : registra el payload y reparte el valor de la oportunidad.

use actix_web::{web, HttpResponse};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::config::app_config::AppConfig;
use crate::errors::WebhookError;
use crate::models::assignment_model::AssignmentResult;
use crate::services::{assignment_service::AssignmentService, webhook_service::WebhookService};

/// Recibe el cuerpo crudo para poder responder 400 con nuestro propio
/// formato si el JSON viene mal.
pub async fn receive_webhook_endpoint(
    body: Bytes,
    config: web::Data<AppConfig>,
    webhook_service: web::Data<WebhookService>,
    assignment_service: web::Data<AssignmentService>,
) -> HttpResponse {
    match process_webhook(&body, &webhook_service, &assignment_service).await {
        Ok(result) => assignment_response(&result, config.debug),
        Err(e) => {
            match &e {
                WebhookError::InvalidJson(_) => log::warn!("Webhook rechazado: {}", e),
                WebhookError::Audit(_) => log::error!("Webhook no registrado: {}", e),
            }
            e.to_response(config.debug)
        }
    }
}

async fn process_webhook(
    body: &[u8],
    webhook_service: &WebhookService,
    assignment_service: &AssignmentService,
) -> Result<AssignmentResult, WebhookError> {
    let payload: Value = serde_json::from_slice(body).map_err(WebhookError::InvalidJson)?;

    let webhook_id = webhook_service
        .record(&payload)
        .await
        .map_err(WebhookError::Audit)?;
    log::info!("Webhook {} registrado ({} bytes)", webhook_id, body.len());

    let result = assignment_service.handle_employee_assigner(&payload).await;
    log::info!(
        "Webhook {} procesado: success={} registros={} duplicado={}",
        webhook_id,
        result.success,
        result.records_created.len(),
        result.duplicate
    );

    Ok(result)
}

/// Traduce el resultado a HTTP. Con `debug` apagado no se expone el error interno.
pub fn assignment_response(result: &AssignmentResult, debug: bool) -> HttpResponse {
    if result.success {
        let mut body = json!({
            "message": result.message,
            "records_created": result.records_created,
        });
        if !result.warnings.is_empty() {
            body["warnings"] = json!(result.warnings);
        }
        return HttpResponse::Ok().json(body);
    }

    let body = if debug {
        json!({
            "error": result.message,
            "details": result.error,
        })
    } else {
        json!({
            "error": "Internal server error",
            "message": result.message,
        })
    };
    HttpResponse::InternalServerError().json(body)
}
