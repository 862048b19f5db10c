mod client;
mod ping;

pub use client::{BackendError, new_client};
pub use ping::ping;
