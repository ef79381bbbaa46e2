//! config/app_config.rs
//! Configuración global del servicio, leída del entorno (.env incluido).

use serde::{Deserialize, Serialize};

/// Configuración del servidor y de la base de datos.
/// Se inyecta en los handlers vía `web::Data<AppConfig>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Si está activo, las respuestas 500 incluyen el detalle del error
    pub debug: bool,
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "sqlite:data/leads.db".to_string(),
            debug: false,
            workers: 1,
        }
    }
}

impl AppConfig {
    /// Lee APP_HOST, APP_PORT, DATABASE_URL, APP_DEBUG y APP_WORKERS.
    /// Valores ausentes o inválidos caen al default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("APP_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("APP_PORT inválido ({raw}), usando {}", defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        let workers = match lookup("APP_WORKERS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("APP_WORKERS inválido ({raw}), usando {}", defaults.workers);
                    defaults.workers
                }
            },
            None => defaults.workers,
        };

        AppConfig {
            host: lookup("APP_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            database_url: lookup("DATABASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.database_url),
            debug: lookup("APP_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.debug),
            workers,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
