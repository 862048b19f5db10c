use crate::domain::LocationFix;
use crate::location::{LocationSource, LocationStore, SourceError};
use tokio::sync::mpsc;
use tokio::sync::watch::Receiver;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

/// Binds a location source to a store. Fixes flow from the source into the store, which replays the latest one
/// to every subscriber until the service is stopped.
#[derive(Debug)]
pub struct LocationService {
    source: Box<dyn LocationSource>,
    buffer_size: usize,
    binding: Option<Binding>,
}

#[derive(Debug)]
struct Binding {
    notifier: Receiver<Option<LocationFix>>,
    store: JoinHandle<()>,
}

impl LocationService {
    pub fn new(source: Box<dyn LocationSource>, buffer_size: usize) -> Self {
        LocationService {
            source,
            buffer_size,
            binding: None,
        }
    }

    /// Starts the store and the source. Starting a running service returns a new subscription.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn start(&mut self) -> Result<Receiver<Option<LocationFix>>, SourceError> {
        if let Some(binding) = &self.binding {
            return Ok(binding.notifier.clone());
        }

        let (tx, rx) = mpsc::channel(self.buffer_size);
        let store = LocationStore::new(rx);
        let notifier = store.notifier();

        // When the source fails to start it drops `tx`, which ends the store
        let store = tokio::spawn(store.listen());
        self.source.start(tx).await?;

        info!("🛰️ Bound location source '{}'", self.source.name());
        self.binding = Some(Binding {
            notifier: notifier.clone(),
            store,
        });

        Ok(notifier)
    }

    /// Returns a subscription to the latest fix, `None` while the service is stopped.
    pub fn subscribe(&self) -> Option<Receiver<Option<LocationFix>>> {
        self.binding.as_ref().map(|binding| binding.notifier.clone())
    }

    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn stop(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };

        self.source.stop().await;
        // The store ends once the source has dropped its sender
        let _ = binding.store.await;
        info!("🛰️ Unbound location source '{}'", self.source.name());
    }
}
