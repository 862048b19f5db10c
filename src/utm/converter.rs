use crate::domain::{GeoLocation, validate};
use crate::utm::zone::{ZONE_COUNT, central_meridian, zone_number};
use crate::utm::{Ellipsoid, Hemisphere, LatitudeBand, NumberFormat, TransverseMercator, UtmError};
use std::fmt::Display;

pub const SCALE_FACTOR: f64 = 0.9996;
pub const FALSE_EASTING: f64 = 500_000.0;
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Display form of a UTM position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UtmCoordinate {
    /// Zone number followed by the latitude band letter, e.g. "23K". The letter is absent outside the bands.
    pub zone: String,
    pub easting: String,
    pub northing: String,
    pub central_meridian: String,
}

impl UtmCoordinate {
    /// Plain text suitable for sharing, e.g. "23K 333288m E 7394588m N".
    pub fn share_text(&self) -> String {
        format!("{} {} {}", self.zone, self.easting, self.northing)
    }
}

impl Display for UtmCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.share_text())
    }
}

/// Numeric UTM position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmPosition {
    pub zone: u8,
    pub band: Option<LatitudeBand>,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
    /// In degrees.
    pub central_meridian: f64,
}

impl UtmPosition {
    pub fn zone_designator(&self) -> String {
        match self.band {
            Some(band) => format!("{}{}", self.zone, band),
            None => self.zone.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmConverter {
    projection: TransverseMercator,
    number_format: NumberFormat,
}

impl UtmConverter {
    pub fn new(ellipsoid: Ellipsoid, number_format: NumberFormat) -> Self {
        UtmConverter {
            projection: TransverseMercator::new(ellipsoid, SCALE_FACTOR),
            number_format,
        }
    }

    pub fn convert(&self, latitude: f64, longitude: f64) -> Result<UtmCoordinate, UtmError> {
        let position = self.position(latitude, longitude)?;

        Ok(UtmCoordinate {
            zone: position.zone_designator(),
            easting: self.number_format.meters(position.easting, "m E"),
            northing: self.number_format.meters(position.northing, "m N"),
            central_meridian: format!("{:?}°", position.central_meridian),
        })
    }

    pub fn convert_location(&self, location: &GeoLocation) -> Result<UtmCoordinate, UtmError> {
        self.convert(location.latitude, location.longitude)
    }

    pub fn position(&self, latitude: f64, longitude: f64) -> Result<UtmPosition, UtmError> {
        validate(latitude, longitude)?;

        let zone = zone_number(longitude);
        let central_meridian = central_meridian(zone);
        let hemisphere = Hemisphere::of(latitude);

        let (x, y) = self.projection.forward(latitude, wrap_degrees(longitude - central_meridian));
        let false_northing = match hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        };

        Ok(UtmPosition {
            zone,
            band: LatitudeBand::of(latitude),
            hemisphere,
            easting: x + FALSE_EASTING,
            northing: y + false_northing,
            central_meridian,
        })
    }

    /// Inverse projection. The band is ignored, the hemisphere decides the false northing.
    pub fn to_geodetic(&self, position: &UtmPosition) -> Result<GeoLocation, UtmError> {
        if position.zone == 0 || position.zone > ZONE_COUNT {
            return Err(UtmError::InvalidZone(position.zone));
        }

        if !position.easting.is_finite() || !position.northing.is_finite() {
            return Err(UtmError::InvalidPosition {
                easting: position.easting,
                northing: position.northing,
            });
        }

        let false_northing = match position.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        };

        let (latitude, delta_longitude) = self
            .projection
            .inverse(position.easting - FALSE_EASTING, position.northing - false_northing);
        let longitude = wrap_degrees(central_meridian(position.zone) + delta_longitude);

        Ok(GeoLocation::new(latitude, longitude, 0.0)?)
    }
}

impl Default for UtmConverter {
    fn default() -> Self {
        UtmConverter::new(Ellipsoid::WGS84, NumberFormat::plain())
    }
}

/// Converts a position with the WGS84 ellipsoid and plain number formatting.
pub fn convert(latitude: f64, longitude: f64) -> Result<UtmCoordinate, UtmError> {
    UtmConverter::default().convert(latitude, longitude)
}

/// Wraps an angle into [-180, 180].
fn wrap_degrees(degrees: f64) -> f64 {
    if degrees > 180.0 {
        degrees - 360.0
    } else if degrees < -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}
