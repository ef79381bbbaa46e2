use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::assignment_service::AssignmentService;
use crate::services::lead_service::LeadService;
use crate::services::webhook_service::WebhookService;

mod app;
mod config;
mod db;
mod errors;
mod handlers;
mod logger;
mod models;
mod parsing;
mod services;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env();
    if config.debug {
        log::warn!("APP_DEBUG activo: las respuestas de error incluyen detalles internos");
    }

    let db_pool = db::setup_database(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("{e:#}")))?;

    // WebhookService también corre las migraciones
    let webhook_service = WebhookService::new(db_pool.clone());
    webhook_service
        .run_migrations()
        .await
        .map_err(|e| std::io::Error::other(format!("{e:#}")))?;

    let lead_service = LeadService::new(db_pool.clone());
    let assignment_service = AssignmentService::new(lead_service);

    log::info!("Levantando servidor en {}:{}", config.host, config.port);
    let bind_addr = (config.host.clone(), config.port);
    let workers = config.workers;
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(webhook_service.clone()))
            .app_data(web::Data::new(assignment_service.clone()))
            .configure(app::init_app)
    })
    .workers(workers)
    .bind(bind_addr)?
    .run()
    .await
}
