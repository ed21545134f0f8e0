/// Converts a temperature in Kelvin to whole degrees Celsius
///
/// # Arguments
///
/// * 'kelvin' - the temperature in Kelvin
pub fn to_celsius(kelvin: f64) -> i64 {
    (kelvin - 273.15).round() as i64
}

/// Converts a temperature in Kelvin to whole degrees Fahrenheit
///
/// # Arguments
///
/// * 'kelvin' - the temperature in Kelvin
pub fn to_fahrenheit(kelvin: f64) -> i64 {
    (kelvin * 9.0 / 5.0 - 459.67).round() as i64
}

/// Converts a wind speed in meters per second to whole kilometers per hour
///
/// # Arguments
///
/// * 'mps' - the wind speed in meters per second
pub fn to_kmph(mps: f64) -> i64 {
    (mps * 3.6).round() as i64
}

/// Converts a wind speed in meters per second to whole miles per hour
///
/// # Arguments
///
/// * 'mps' - the wind speed in meters per second
pub fn to_mph(mps: f64) -> i64 {
    (mps * 2.2367).round() as i64
}
