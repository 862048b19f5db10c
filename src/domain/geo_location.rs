use thiserror::Error;

/// A validated geodetic position in decimal degrees on the WGS84 datum.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64, // In meters
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self, InvalidCoordinate> {
        validate(latitude, longitude)?;
        Ok(GeoLocation {
            latitude,
            longitude,
            altitude,
        })
    }
}

/// Fails when either angle is not finite or lies outside its range. NaN fails both range checks.
pub fn validate(latitude: f64, longitude: f64) -> Result<(), InvalidCoordinate> {
    if !(latitude >= -90.0 && latitude <= 90.0) {
        return Err(InvalidCoordinate::Latitude(latitude));
    }

    if !(longitude >= -180.0 && longitude <= 180.0) {
        return Err(InvalidCoordinate::Longitude(longitude));
    }

    Ok(())
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidCoordinate {
    #[error("invalid location latitude: {0}, must be between -90 and 90")]
    Latitude(f64),
    #[error("invalid location longitude: {0}, must be between -180 and 180")]
    Longitude(f64),
}
