use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use serde::Deserialize;

/// A raw scalar field value, either numeric or textual
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", format_number(*n)),
            Scalar::Text(t) => write!(f, "{}", t),
        }
    }
}

/// A measured field value carrying its source unit
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Measurement {
    pub unit: String,
    pub value: f64,
}

/// A single field of a forecast entry
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Measurement(Measurement),
    Scalar(Scalar),
}

/// One time step of weather data, keyed by meteorological field code
pub type ForecastEntry = BTreeMap<String, FieldValue>;

/// Station identity as carried in the forecast payload
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StationIdentity {
    pub id: Scalar,
    pub name: String,
}

/// A forecast payload as served by the forecast endpoint
///
/// The endpoint either serves a station block together with a list of
/// forecast entries, or a single entry with its fields at the top level.
#[derive(Deserialize, Debug)]
pub struct ForecastPayload {
    pub station: Option<StationIdentity>,
    pub forecasts: Option<Vec<ForecastEntry>>,
    #[serde(flatten)]
    pub fields: ForecastEntry,
}

impl ForecastPayload {
    /// Returns the forecast entries, treating a payload without a forecast
    /// list as a single entry
    pub fn into_entries(self) -> Vec<ForecastEntry> {
        match self.forecasts {
            Some(entries) => entries,
            None => vec![self.fields],
        }
    }
}

/// A single record from the station catalog
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub icao: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
    pub kind: String,
}

/// Formats a number without a trailing zero fraction
///
/// # Arguments
///
/// * 'value' - the number to format
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
