pub mod app_config;
pub mod backend;
pub mod domain;
mod geo_location_deserializer;
pub mod location;
pub mod places;
pub mod tracker;
pub mod utm;
