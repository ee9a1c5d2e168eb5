use std::fmt;

use thiserror::Error;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A coordinate value that cannot be turned into a valid position.
///
/// The keyword search provider transmits coordinates as decimal strings, so a
/// bad record would otherwise parse into NaN and silently wreck the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed coordinate: {field} = {value:?}")]
pub struct MalformedCoordinate {
    pub field: &'static str,
    pub value: String,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, MalformedCoordinate> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(MalformedCoordinate {
                field: "latitude",
                value: latitude.to_string(),
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(MalformedCoordinate {
                field: "longitude",
                value: longitude.to_string(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a position from the decimal strings used on the wire.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, MalformedCoordinate> {
        let latitude = parse_degrees("latitude", latitude)?;
        let longitude = parse_degrees("longitude", longitude)?;
        Self::new(latitude, longitude)
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, MalformedCoordinate> {
    match value.trim().parse::<f64>() {
        Ok(degrees) if degrees.is_finite() => Ok(degrees),
        _ => Err(MalformedCoordinate {
            field,
            value: value.to_string(),
        }),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[test]
fn parse_wire_strings() {
    let coordinate = Coordinate::parse("37.5665", "126.9780").unwrap();
    assert_eq!(coordinate.latitude, 37.5665);
    assert_eq!(coordinate.longitude, 126.9780);
}

#[test]
fn reject_non_numeric_latitude() {
    let error = Coordinate::parse("not-a-number", "126.9780").unwrap_err();
    assert_eq!(error.field, "latitude");
    assert_eq!(error.value, "not-a-number");
}

#[test]
fn reject_nan_longitude() {
    assert!(Coordinate::parse("37.5665", "NaN").is_err());
    assert!(Coordinate::new(37.5665, f64::NAN).is_err());
}

#[test]
fn reject_out_of_range() {
    assert!(Coordinate::new(91.0, 0.0).is_err());
    assert!(Coordinate::new(0.0, -180.5).is_err());
    assert!(Coordinate::new(-90.0, 180.0).is_ok());
}
