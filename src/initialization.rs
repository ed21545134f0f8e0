use std::env;
use log::info;
use anyhow::Result;
use thiserror::Error;
use crate::config::{load_config, Config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_forecast::{Forecast, ForecastError};
use crate::manager_stations::{StationError, Stations};
use crate::renderer::{default_document, RenderError, Widget};

pub struct Mgr {
    pub forecast: Forecast,
    pub stations: Stations,
    pub widget: Widget,
}

/// Initializes and returns configuration and a Mgr struct holding the configured managers
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = args.iter()
        .find(|p| p.starts_with("--config="))
        .expect("config file argument should be present");
    let config_path = config_path
        .split_once('=')
        .expect("config file argument should be correct")
        .1;


    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;


    // Print version
    info!("starting betterweather widget version: {}", env!("CARGO_PKG_VERSION"));


    // Instantiate structs
    let forecast = Forecast::new(&config.forecast)?;
    let stations = Stations::new(&config.stations)?;
    let widget = Widget::new(default_document(&config.widget), &config.widget)?;

    let mgr = Mgr {
        forecast,
        stations,
        widget,
    };

    Ok((config, mgr))
}

/// Error depicting errors that occur while initializing the widget
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("ForecastSetupError: {0}")]
    ForecastSetupError(#[from] ForecastError),
    #[error("StationSetupError: {0}")]
    StationSetupError(#[from] StationError),
    #[error("WidgetSetupError: {0}")]
    WidgetSetupError(#[from] RenderError),
}
