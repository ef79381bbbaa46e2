//! app.rs
use crate::handlers::{health_handler, webhook_handler};
use actix_web::web;

/// Límite del cuerpo del webhook (el default de actix es 256 KiB).
const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_SIZE))
        .service(
            web::resource(["/webhook", "/webhook/"])
                .name("hcp_webhook")
                .route(web::post().to(webhook_handler::receive_webhook_endpoint)),
        )
        .route("/health", web::get().to(health_handler::health_endpoint));
}
