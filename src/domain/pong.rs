use serde::Deserialize;

/// Health check answer of the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Pong {
    pub result: String,
    pub success: String,
}
