use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

/// Unit system selecting the display conversion
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Metric
    }
}

#[derive(Deserialize)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize)]
pub struct WidgetParameters {
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default = "default_wait_cls")]
    pub wait_cls: String,
    pub container_id: String,
}

fn default_wait_cls() -> String {
    "triple-spinner".to_string()
}

#[derive(Deserialize)]
pub struct ForecastParameters {
    pub url: String,
}

#[derive(Deserialize)]
pub struct StationParameters {
    pub url: String,
    pub id: Option<String>,
}

#[derive(Deserialize)]
pub struct Files {
    pub output_path: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub widget: WidgetParameters,
    pub forecast: ForecastParameters,
    pub stations: StationParameters,
    pub geo_ref: GeoRef,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| LoadConfigurationError::ReadError(format!("{}: {}", config_path, e.to_string())))?;
    let config: Config = toml::from_str(&toml)
        .map_err(|e| LoadConfigurationError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Error depicting errors that occur while loading configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
}
