//! logger.rs
//! Logger con env_logger. Las consultas de sqlx se registran en "info"
//! por defecto; las bajamos a "warn" salvo que RUST_LOG diga otra cosa.

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn init_logger() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}

/// Para tests: ignora el error si el logger ya fue inicializado.
#[cfg(test)]
pub fn init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}
