use crate::domain::events::LocationEvent;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

/// A provider of location fixes. Sources are started once per binding and must stop emitting after `stop`.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Starts emitting events into `tx`. Returns once the source is running.
    async fn start(&mut self, tx: Sender<LocationEvent>) -> Result<(), SourceError>;

    /// Stops emitting and releases the underlying provider. Stopping a stopped source does nothing.
    async fn stop(&mut self);
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("location source '{0}' is already running")]
    AlreadyStarted(String),
    #[error("cannot open '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
}
