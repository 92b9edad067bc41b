use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen_addr: String,
    /// Value for the Access-Control-Allow-Origin header, omitted when unset
    #[serde(default)]
    pub cors_allow_origin: Option<String>,
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Path to the SQLite flights database
    pub path: String,
}

/// Load configuration from `config/flightranker.toml` (if present) with
/// `FLIGHTRANKER__SECTION__KEY` environment variables taking precedence.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_config(
        config::File::with_name("config/flightranker").required(false),
        config::Environment::with_prefix("FLIGHTRANKER").separator("__"),
    )
}

fn build_config<F, E>(file: F, env: E) -> anyhow::Result<AppConfig>
where
    F: config::Source + Send + Sync + 'static,
    E: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.listen_addr", "0.0.0.0:8080")?
        .set_default("server.request_timeout_secs", 10)?
        .set_default("database.path", "data/flights.db")?
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
