use std::fs;
use log::{error, info};
use anyhow::Result;
use thiserror::Error;
use crate::config::Config;
use crate::initialization::Mgr;
use crate::models::ForecastPayload;

/// Runs one fetch and render pass
///
/// Resolves the target station, fetches its forecast and renders it into
/// the widget document. A failing fetch leaves the widget in its loading
/// state; the document is written in both cases.
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
pub fn run(config: &Config, mgr: &mut Mgr) -> Result<(), WorkerError> {
    match fetch_payload(config, mgr) {
        Ok(payload) => {
            mgr.widget.show(payload)
                .map_err(|e| WorkerError::RenderError(e.to_string()))?;
            info!("forecast rendered into container {}", config.widget.container_id);
        }
        Err(e) => {
            error!("forecast fetch failed, leaving widget in loading state: {}", e);
        }
    }

    save_document(&config.files.output_path, &mgr.widget.to_html())?;
    info!("widget document written to {}", config.files.output_path);

    Ok(())
}

/// Resolves the target station and fetches its forecast payload
///
/// The station is either pinned in the configuration or looked up as the
/// station nearest to the configured coordinates.
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
fn fetch_payload(config: &Config, mgr: &Mgr) -> Result<ForecastPayload> {
    let station = match &config.stations.id {
        Some(id) => {
            let station = mgr.stations.station_by_id(id)?;
            info!("using station {} ({})", station.id, station.name);
            station
        }
        None => {
            let station = mgr.stations.nearest_station(config.geo_ref.lat, config.geo_ref.long)?;
            info!("nearest station to {}, {} is {} ({})",
                config.geo_ref.lat, config.geo_ref.long, station.id, station.name);
            station
        }
    };

    let payload = mgr.forecast.fetch(&station.id)?;

    Ok(payload)
}

/// Writes the rendered document to disk
///
/// # Arguments
///
/// * 'path' - path of the output document
/// * 'html' - the serialized document
fn save_document(path: &str, html: &str) -> Result<(), WorkerError> {
    fs::write(path, html)
        .map_err(|e| WorkerError::SaveDocumentError(format!("{}: {}", path, e.to_string())))?;

    Ok(())
}

/// Error depicting errors that occur while running a widget pass
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("RenderError: {0}")]
    RenderError(String),
    #[error("SaveDocumentError: {0}")]
    SaveDocumentError(String),
}
