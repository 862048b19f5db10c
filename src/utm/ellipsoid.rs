use serde::Deserialize;

/// Reference ellipsoid, defined by its semi-major axis and flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    pub semi_major_axis: f64,
    pub flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_223_563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_222_101,
    };

    /// First eccentricity.
    pub fn eccentricity(&self) -> f64 {
        (self.flattening * (2.0 - self.flattening)).sqrt()
    }

    /// Third flattening, the expansion parameter of the Krüger series.
    pub fn third_flattening(&self) -> f64 {
        self.flattening / (2.0 - self.flattening)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}

/// Configuration name of a supported ellipsoid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsoidName {
    #[default]
    Wgs84,
    Grs80,
}

impl From<EllipsoidName> for Ellipsoid {
    fn from(name: EllipsoidName) -> Self {
        match name {
            EllipsoidName::Wgs84 => Ellipsoid::WGS84,
            EllipsoidName::Grs80 => Ellipsoid::GRS80,
        }
    }
}
