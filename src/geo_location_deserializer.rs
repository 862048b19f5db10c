use crate::domain::GeoLocation;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<'de> Deserialize<'de> for GeoLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
            #[serde(default)]
            altitude_m: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        GeoLocation::new(inner.latitude, inner.longitude, inner.altitude_m).map_err(Error::custom)
    }
}

impl Serialize for GeoLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Inner {
            latitude: f64,
            longitude: f64,
            altitude_m: f64,
        }

        Inner {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude_m: self.altitude,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_a_valid_location() {
        let location: GeoLocation = serde_json::from_str(r#"{"latitude": 51.8615899, "longitude": 4.3580323, "altitude_m": 2.5}"#).unwrap();

        assert_eq!(
            location,
            GeoLocation {
                latitude: 51.8615899,
                longitude: 4.3580323,
                altitude: 2.5,
            }
        );
    }

    #[test]
    fn altitude_defaults_to_sea_level() {
        let location: GeoLocation = serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();

        assert_eq!(location.altitude, 0.0);
    }

    #[test]
    fn rejects_an_out_of_range_latitude() {
        let error = serde_json::from_str::<GeoLocation>(r#"{"latitude": 95.0, "longitude": 4.0}"#).unwrap_err();

        assert!(error.to_string().starts_with("invalid location latitude: 95"), "{}", error);
    }

    #[test]
    fn rejects_an_out_of_range_longitude() {
        let error = serde_json::from_str::<GeoLocation>(r#"{"latitude": 5.0, "longitude": -200.0}"#).unwrap_err();

        assert!(error.to_string().starts_with("invalid location longitude: -200"), "{}", error);
    }

    #[test]
    fn serializes_altitude_in_meters() {
        let json = serde_json::to_string(&GeoLocation::new(1.5, 2.5, 3.0).unwrap()).unwrap();

        assert_eq!(json, r#"{"latitude":1.5,"longitude":2.5,"altitude_m":3.0}"#);
    }
}
