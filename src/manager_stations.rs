use std::time::Duration;
use reqwest::blocking::Client;
use anyhow::Result;
use thiserror::Error;
use crate::config::StationParameters;
use crate::models::StationRecord;

/// Mean earth radius in kilometers, used for great circle distances
const EARTH_RADIUS_KM: f64 = 6373.0;

/// Struct for managing the weather station catalog
pub struct Stations {
    client: Client,
    url: String,
}

impl Stations {
    /// Returns a stations struct ready for retrieving the station catalog
    ///
    /// # Arguments
    ///
    /// * 'config' - station catalog configuration
    pub fn new(config: &StationParameters) -> Result<Stations, StationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Stations {
            client,
            url: config.url.clone(),
        })
    }

    /// Retrieves and parses the station catalog
    ///
    /// The catalog is a fixed width text file with one station per line.
    /// Header and separator lines, as well as lines too short to hold a full
    /// record, are skipped.
    pub fn catalog(&self) -> Result<Vec<StationRecord>, StationError> {
        let response = self.client
            .get(&self.url)
            .send()?;

        if response.status().as_u16() != 200 {
            return Err(StationError::StatusError(response.status().as_u16()));
        }

        let text = response.text()?;

        let mut records: Vec<StationRecord> = Vec::new();
        for line in text.lines() {
            if let Some(record) = parse_station_line(line)? {
                records.push(record);
            }
        }

        if records.len() == 0 {
            Err(StationError::EmptyCatalogError)
        } else {
            Ok(records)
        }
    }

    /// Looks up a station by its id, ignoring case
    ///
    /// # Arguments
    ///
    /// * 'station_id' - the station id to look up
    pub fn station_by_id(&self, station_id: &str) -> Result<StationRecord, StationError> {
        let catalog = self.catalog()?;

        find_in(catalog, station_id)
            .ok_or_else(|| StationError::UnknownStationError(station_id.to_string()))
    }

    /// Finds the station closest to the given point
    ///
    /// # Arguments
    ///
    /// * 'latitude' - the latitude of the target point
    /// * 'longitude' - the longitude of the target point
    pub fn nearest_station(&self, latitude: f64, longitude: f64) -> Result<StationRecord, StationError> {
        let catalog = self.catalog()?;

        nearest_in(catalog, latitude, longitude).ok_or(StationError::EmptyCatalogError)
    }
}

/// Returns the station from the catalog with the given id, ignoring case
///
/// # Arguments
///
/// * 'catalog' - the station catalog to search
/// * 'station_id' - the station id to look up
fn find_in(catalog: Vec<StationRecord>, station_id: &str) -> Option<StationRecord> {
    catalog.into_iter()
        .find(|s| s.id.eq_ignore_ascii_case(station_id))
}

/// Returns the station from the catalog closest to the given point
///
/// # Arguments
///
/// * 'catalog' - the station catalog to search
/// * 'latitude' - the latitude of the target point
/// * 'longitude' - the longitude of the target point
fn nearest_in(catalog: Vec<StationRecord>, latitude: f64, longitude: f64) -> Option<StationRecord> {
    catalog.into_iter()
        .min_by(|a, b| {
            haversine(latitude, longitude, a.latitude, a.longitude)
                .total_cmp(&haversine(latitude, longitude, b.latitude, b.longitude))
        })
}

/// Calculates the great circle distance between two points in kilometers
///
/// # Arguments
///
/// * 'src_lat' - the latitude of the source point
/// * 'src_long' - the longitude of the source point
/// * 'dst_lat' - the latitude of the destination point
/// * 'dst_long' - the longitude of the destination point
fn haversine(src_lat: f64, src_long: f64, dst_lat: f64, dst_long: f64) -> f64 {
    let src_lat = src_lat.to_radians();
    let src_long = src_long.to_radians();
    let dst_lat = dst_lat.to_radians();
    let dst_long = dst_long.to_radians();

    let dlat = dst_lat - src_lat;
    let dlong = dst_long - src_long;

    let a = (dlat / 2.0).sin().powi(2) + src_lat.cos() * dst_lat.cos() * (dlong / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Parses one line of the station catalog
///
/// Returns None for header, separator and short lines.
///
/// # Arguments
///
/// * 'line' - the catalog line to parse
fn parse_station_line(line: &str) -> Result<Option<StationRecord>, StationError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() < 75 {
        return Ok(None);
    }

    let id_field = field(&chars, 12, 17);
    if id_field.trim() == "id" || id_field == "=====" {
        return Ok(None);
    }

    let icao = field(&chars, 18, 22);
    let icao = if icao == "----" { None } else { Some(icao) };

    let latitude = parse_coordinate(&field(&chars, 44, 50))?;
    let longitude = parse_coordinate(&field(&chars, 51, 58))?;
    let altitude = field(&chars, 59, 64).trim().parse::<i32>()
        .map_err(|e| StationError::ParseError(format!("altitude: {}", e.to_string())))?;

    Ok(Some(StationRecord {
        id: id_field.trim().to_string(),
        icao,
        name: field(&chars, 23, 43).trim().to_string(),
        latitude,
        longitude,
        altitude,
        kind: field(&chars, 72, 76),
    }))
}

/// Converts a degree.minute coordinate field to decimal degrees
///
/// # Arguments
///
/// * 'coordinate' - the coordinate field in degree.minute notation
fn parse_coordinate(coordinate: &str) -> Result<f64, StationError> {
    let (degrees, minutes) = coordinate.trim().split_once('.')
        .ok_or_else(|| StationError::ParseError(format!("coordinate without minutes: {}", coordinate)))?;

    let degrees = degrees.trim().parse::<f64>()
        .map_err(|e| StationError::ParseError(format!("coordinate degrees: {}", e.to_string())))?;
    let minutes = minutes.trim().parse::<f64>()
        .map_err(|e| StationError::ParseError(format!("coordinate minutes: {}", e.to_string())))?;

    Ok(degrees + minutes / 60.0)
}

/// Extracts a fixed width field, tolerating lines that end early
fn field(chars: &[char], start: usize, end: usize) -> String {
    chars[start.min(chars.len())..end.min(chars.len())].iter().collect()
}

/// Error depicting errors that occur while retrieving the station catalog
///
#[derive(Error, Debug)]
pub enum StationError {
    #[error("StatusError: unexpected response status {0}")]
    StatusError(u16),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("EmptyCatalogError: no stations found in catalog")]
    EmptyCatalogError,
    #[error("UnknownStationError: no station with id {0}")]
    UnknownStationError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
