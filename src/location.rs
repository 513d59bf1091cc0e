use std::fmt;
use serde::Deserialize;

/// How a lookup addresses a place
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Returns the city name if this is a search by name
    pub fn city(&self) -> Option<&str> {
        match self {
            LocationQuery::City(c) => Some(c),
            LocationQuery::Coordinates { .. } => None,
        }
    }

    /// Returns the provider query parameters addressing this location
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::City(c) => vec![("q", c.clone())],
            LocationQuery::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LocationQuery::City(c) => write!(f, "{}", c),
            LocationQuery::Coordinates { lat, lon } => write!(f, "{:.4},{:.4}", lat, lon),
        }
    }
}

/// Query parameters accepted by the lookup endpoints
#[derive(Deserialize, Debug, Default)]
pub struct LocationParams {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub geo_error: Option<u16>,
}

/// Reasons a location could not be resolved from request parameters
#[derive(Debug, PartialEq)]
pub enum LocationError {
    Missing,
    InvalidCoordinates { lat: f64, lon: f64 },
    Geolocation(GeolocationFailure),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LocationError::Missing => write!(f, "LocationError::Missing"),
            LocationError::InvalidCoordinates { lat, lon } => {
                write!(f, "LocationError::InvalidCoordinates: {}, {}", lat, lon)
            }
            LocationError::Geolocation(g) => write!(f, "LocationError::Geolocation: {}", g.message()),
        }
    }
}

impl LocationParams {
    /// Resolves the location to look up.
    ///
    /// A non blank city wins over coordinates. A reported geolocation failure is only
    /// considered when no city was given.
    pub fn resolve(&self) -> Result<LocationQuery, LocationError> {
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return Ok(LocationQuery::City(city.to_string()));
        }

        if let Some(code) = self.geo_error {
            return Err(LocationError::Geolocation(GeolocationFailure::from_code(code)));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    Err(LocationError::InvalidCoordinates { lat, lon })
                } else {
                    Ok(LocationQuery::Coordinates { lat, lon })
                }
            }
            _ => Err(LocationError::Missing),
        }
    }
}

/// Failure reported by a client while acquiring the device position,
/// codes as used by the browser geolocation API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

impl GeolocationFailure {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationFailure::PermissionDenied,
            2 => GeolocationFailure::PositionUnavailable,
            3 => GeolocationFailure::Timeout,
            _ => GeolocationFailure::Unsupported,
        }
    }

    /// Message to show the user
    pub fn message(&self) -> &'static str {
        match self {
            GeolocationFailure::PermissionDenied => {
                "Location permission denied. Allow location access or search by city."
            }
            GeolocationFailure::PositionUnavailable => "Your location is currently unavailable. Try searching by city.",
            GeolocationFailure::Timeout => "Timed out while getting your location. Please try again.",
            GeolocationFailure::Unsupported => "Geolocation is not supported by your browser.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_wins_over_coordinates() {
        let params = LocationParams {
            city: Some("  Amman ".to_string()),
            lat: Some(1.0),
            lon: Some(2.0),
            geo_error: Some(1),
        };
        assert_eq!(params.resolve(), Ok(LocationQuery::City("Amman".to_string())));
    }

    #[test]
    fn test_coordinates() {
        let params = LocationParams { lat: Some(31.95), lon: Some(35.93), ..Default::default() };
        let query = params.resolve().unwrap();
        assert_eq!(query, LocationQuery::Coordinates { lat: 31.95, lon: 35.93 });
        assert_eq!(query.city(), None);
        assert_eq!(
            query.query_pairs(),
            vec![("lat", "31.95".to_string()), ("lon", "35.93".to_string())]
        );
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(LocationParams::default().resolve(), Err(LocationError::Missing));

        let blank = LocationParams { city: Some("   ".to_string()), ..Default::default() };
        assert_eq!(blank.resolve(), Err(LocationError::Missing));

        let half = LocationParams { lat: Some(10.0), ..Default::default() };
        assert_eq!(half.resolve(), Err(LocationError::Missing));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let params = LocationParams { lat: Some(91.0), lon: Some(0.0), ..Default::default() };
        assert_eq!(params.resolve(), Err(LocationError::InvalidCoordinates { lat: 91.0, lon: 0.0 }));
    }

    #[test]
    fn test_geolocation_failures_are_distinct() {
        let messages: Vec<&str> = (1..=4).map(|c| GeolocationFailure::from_code(c).message()).collect();
        assert!(messages[0].contains("permission denied"));
        assert!(messages[1].contains("unavailable"));
        assert!(messages[2].contains("Timed out"));
        assert!(messages[3].contains("not supported"));

        let params = LocationParams { geo_error: Some(3), ..Default::default() };
        assert_eq!(params.resolve(), Err(LocationError::Geolocation(GeolocationFailure::Timeout)));
    }
}
