use std::fmt::Display;

pub const ZONE_WIDTH: f64 = 6.0;
pub const ZONE_COUNT: u8 = 60;

/// Returns the longitudinal zone (1..=60) containing `longitude`.
///
/// Zones are half open on their eastern edge, so a longitude on a boundary belongs to the zone east of it.
/// The antimeridian at +180 wraps around to zone 1.
pub fn zone_number(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / ZONE_WIDTH).floor() as i64 + 1;
    match zone {
        z if z > ZONE_COUNT as i64 => 1,
        z if z < 1 => 1,
        z => z as u8,
    }
}

/// Longitude of the meridian running through the middle of `zone`, in degrees.
pub fn central_meridian(zone: u8) -> f64 {
    zone as f64 * ZONE_WIDTH - 183.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn of(latitude: f64) -> Self {
        if latitude < 0.0 { Hemisphere::South } else { Hemisphere::North }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hemisphere::North => write!(f, "N"),
            Hemisphere::South => write!(f, "S"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-180.0, 1)]
    #[case(-174.0001, 1)]
    #[case(-174.0, 2)]
    #[case(-173.999, 2)]
    #[case(-46.6333, 23)]
    #[case(0.0, 31)]
    #[case(2.2945, 31)]
    #[case(10.0, 32)]
    #[case(179.999, 60)]
    #[case(180.0, 1)]
    fn zone_number_of_longitude(#[case] longitude: f64, #[case] expected: u8) {
        assert_eq!(zone_number(longitude), expected);
    }

    #[rstest]
    #[case(1, -177.0)]
    #[case(23, -45.0)]
    #[case(31, 3.0)]
    #[case(60, 177.0)]
    fn central_meridian_of_zone(#[case] zone: u8, #[case] expected: f64) {
        assert_eq!(central_meridian(zone), expected);
    }

    #[test]
    fn the_equator_belongs_to_the_northern_hemisphere() {
        assert_eq!(Hemisphere::of(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::of(-0.0001), Hemisphere::South);
    }
}
