mod replay;
mod service;
mod source;
mod store;

pub use replay::ReplaySource;
pub use service::LocationService;
pub use source::{LocationSource, SourceError};
pub use store::LocationStore;
