use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub client: ClientConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Upper bound for a single count/search round trip, in milliseconds.
    pub request_timeout_ms: u64,
    #[serde(default = "default_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,
    /// The cluster's `index.max_result_window`.
    #[serde(default = "default_max_result_window")]
    pub max_result_window: u64,
}

fn default_pool_idle_timeout_secs() -> u64 {
    90
}

fn default_max_result_window() -> u64 {
    10_000
}

#[derive(Debug, Default, Deserialize)]
pub struct PlannerConfig {
    /// Default fragment bound for scan-node splits. Unset means unbounded.
    pub max_parallelism: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("ES_STORAGE_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
