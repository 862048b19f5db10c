use std::fmt::Display;

/// Latitude band of the grid zone designator. Bands are 8° tall from 80°S, except X which spans 72°N to 84°N.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LatitudeBand {
    C,
    D,
    E,
    F,
    G,
    H,
    J,
    K,
    L,
    M,
    N,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
}

const BANDS: [LatitudeBand; 20] = {
    use LatitudeBand::*;
    [C, D, E, F, G, H, J, K, L, M, N, P, Q, R, S, T, U, V, W, X]
};

pub const SOUTHERN_LIMIT: f64 = -80.0;
pub const NORTHERN_LIMIT: f64 = 84.0;
const BAND_HEIGHT: f64 = 8.0;

impl LatitudeBand {
    /// Returns the band containing `latitude`, or `None` outside [-80, 84).
    pub fn of(latitude: f64) -> Option<Self> {
        if !(latitude >= SOUTHERN_LIMIT && latitude < NORTHERN_LIMIT) {
            return None;
        }

        let index = ((latitude - SOUTHERN_LIMIT) / BAND_HEIGHT).floor() as usize;
        Some(BANDS[index.min(BANDS.len() - 1)])
    }

    pub fn letter(&self) -> char {
        match self {
            LatitudeBand::C => 'C',
            LatitudeBand::D => 'D',
            LatitudeBand::E => 'E',
            LatitudeBand::F => 'F',
            LatitudeBand::G => 'G',
            LatitudeBand::H => 'H',
            LatitudeBand::J => 'J',
            LatitudeBand::K => 'K',
            LatitudeBand::L => 'L',
            LatitudeBand::M => 'M',
            LatitudeBand::N => 'N',
            LatitudeBand::P => 'P',
            LatitudeBand::Q => 'Q',
            LatitudeBand::R => 'R',
            LatitudeBand::S => 'S',
            LatitudeBand::T => 'T',
            LatitudeBand::U => 'U',
            LatitudeBand::V => 'V',
            LatitudeBand::W => 'W',
            LatitudeBand::X => 'X',
        }
    }

    /// Southern edge of the band in degrees, inclusive.
    pub fn southern_edge(&self) -> f64 {
        SOUTHERN_LIMIT + (*self as usize) as f64 * BAND_HEIGHT
    }
}

impl Display for LatitudeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
