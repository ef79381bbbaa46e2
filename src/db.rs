//! db.rs
//! Conexión a SQLite con SQLx.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

/// Abre (o crea) la base indicada en `database_url`.
/// Para URLs de archivo también crea la carpeta contenedora.
pub async fn setup_database(database_url: &str) -> Result<Pool<Sqlite>> {
    if let Some(dir) = database_dir(database_url) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("No se pudo crear el directorio {}", dir.display()))?;
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("DATABASE_URL inválida: {database_url}"))?
        .create_if_missing(true);

    log::info!("Conectando a SQLite en {}", database_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("No se pudo conectar a la base de datos SQLite")?;

    Ok(db_pool)
}

/// Verifica que la base responda.
pub async fn ping(db_pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(db_pool)
        .await
        .context("La base de datos no responde")?;
    Ok(())
}

/// Carpeta del archivo SQLite, o `None` si es en memoria.
fn database_dir(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or_default();

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }

    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}
