mod band;
mod converter;
mod ellipsoid;
mod error;
mod format;
mod projection;
pub mod zone;

pub use band::LatitudeBand;
pub use converter::{UtmConverter, UtmCoordinate, UtmPosition, convert};
pub use ellipsoid::{Ellipsoid, EllipsoidName};
pub use error::UtmError;
pub use format::NumberFormat;
pub use projection::TransverseMercator;
pub use zone::Hemisphere;
