use crate::domain::GeoLocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single position report from a location provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    #[serde(flatten)]
    pub location: GeoLocation,
    /// Horizontal accuracy radius in meters.
    #[serde(default)]
    pub accuracy: f32,
    #[serde(default = "default_provider")]
    pub provider: String,
    pub time: DateTime<Utc>,
}

fn default_provider() -> String {
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_a_flattened_fix() {
        let fix: LocationFix = serde_json::from_str(
            r#"{"latitude": -23.5505, "longitude": -46.6333, "altitude_m": 760.0, "accuracy": 4.5, "provider": "gps", "time": "2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(
            fix,
            LocationFix {
                location: GeoLocation {
                    latitude: -23.5505,
                    longitude: -46.6333,
                    altitude: 760.0,
                },
                accuracy: 4.5,
                provider: "gps".to_string(),
                time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn provider_and_accuracy_are_optional() {
        let fix: LocationFix = serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0, "time": "2024-05-01T12:00:00Z"}"#).unwrap();

        assert_eq!(fix.provider, "unknown");
        assert_eq!(fix.accuracy, 0.0);
    }

    #[test]
    fn rejects_a_fix_with_an_invalid_location() {
        let result = serde_json::from_str::<LocationFix>(r#"{"latitude": 100.0, "longitude": 2.0, "time": "2024-05-01T12:00:00Z"}"#);

        assert!(result.is_err());
    }
}
