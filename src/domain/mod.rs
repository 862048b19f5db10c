pub mod events;
mod geo_location;
mod location_fix;
mod place;
mod pong;

pub use geo_location::{GeoLocation, InvalidCoordinate, validate};
pub use location_fix::LocationFix;
pub use place::Place;
pub use pong::Pong;
