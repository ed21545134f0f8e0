use std::time::Duration;
use chrono::Utc;
use reqwest::blocking::Client;
use anyhow::Result;
use thiserror::Error;
use crate::config::ForecastParameters;
use crate::models::ForecastPayload;

/// Struct for managing weather forecast retrieval
pub struct Forecast {
    client: Client,
    url: String,
}

impl Forecast {
    /// Returns a forecast struct ready for fetching forecast payloads
    ///
    /// # Arguments
    ///
    /// * 'config' - forecast endpoint configuration
    pub fn new(config: &ForecastParameters) -> Result<Forecast, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Forecast {
            client,
            url: config.url.clone(),
        })
    }

    /// Retrieves the forecast payload for the given station
    ///
    /// The endpoint serves the forecast entry closest to the requested time,
    /// so the current time is passed along with the station id.
    ///
    /// # Arguments
    ///
    /// * 'station_id' - id of the station to fetch the forecast for
    pub fn fetch(&self, station_id: &str) -> Result<ForecastPayload, ForecastError> {
        let timestamp = Utc::now().timestamp().to_string();

        let response = self.client
            .get(&self.url)
            .query(&[("station", station_id), ("t", timestamp.as_str())])
            .send()?;

        if response.status().as_u16() != 200 {
            return Err(ForecastError::StatusError(response.status().as_u16()));
        }

        let json = response.text()?;

        let payload: ForecastPayload = serde_json::from_str(&json)
            .map_err(|e| ForecastError::ParseError(e.to_string()))?;

        Ok(payload)
    }
}

/// Error depicting errors that occur while fetching forecasts
///
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("StatusError: unexpected response status {0}")]
    StatusError(u16),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
