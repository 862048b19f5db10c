use crate::domain::{GeoLocation, LocationFix};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmarked position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u32,
    pub title: Option<String>,
    pub date: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub accuracy: f32,
}

impl Place {
    pub fn from_fix(id: u32, title: Option<String>, fix: &LocationFix) -> Self {
        Place {
            id,
            title,
            date: fix.time,
            latitude: fix.location.latitude,
            longitude: fix.location.longitude,
            altitude: fix.location.altitude,
            accuracy: fix.accuracy,
        }
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        }
    }
}
