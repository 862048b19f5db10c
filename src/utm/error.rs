use crate::domain::InvalidCoordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtmError {
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
    #[error("invalid UTM zone {0}, must be between 1 and 60")]
    InvalidZone(u8),
    #[error("invalid UTM position: easting {easting}, northing {northing}")]
    InvalidPosition { easting: f64, northing: f64 },
}
