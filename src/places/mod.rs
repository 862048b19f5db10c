mod repository;

pub use repository::{PlaceError, PlaceRepository};
