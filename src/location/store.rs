use crate::domain::LocationFix;
use crate::domain::events::LocationEvent;
use std::collections::BTreeSet;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

/// Keeps the latest fix and replays it to every subscriber. Intermediate fixes are conflated.
#[derive(Debug)]
pub struct LocationStore {
    rx: Receiver<LocationEvent>,
    providers: BTreeSet<String>,
    notifier_tx: WatchSender<Option<LocationFix>>,
    notifier_rx: WatchReceiver<Option<LocationFix>>,
}

impl LocationStore {
    pub fn new(rx: Receiver<LocationEvent>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel::<Option<LocationFix>>(None);

        LocationStore {
            rx,
            providers: BTreeSet::new(),
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<Option<LocationFix>> {
        self.notifier_rx.clone()
    }

    /// Consumes events until every sender is gone. Subscribers observe the channel closing afterwards.
    #[instrument(skip(self))]
    pub async fn listen(mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            match event {
                LocationEvent::Fix(fix) => {
                    debug!(provider = %fix.provider, "🔵 Updated location to {}, {}", fix.location.latitude, fix.location.longitude);
                    self.notifier_tx.send_replace(Some(fix));
                }
                LocationEvent::ProviderEnabled(provider) => {
                    info!("🟢 Location provider '{}' enabled", provider);
                    self.providers.insert(provider);
                }
                LocationEvent::ProviderDisabled(provider) => {
                    if !self.providers.remove(&provider) {
                        warn!("⚠️ Received disabled event for unknown provider '{}'", provider);
                        continue;
                    }
                    info!("🔴 Location provider '{}' disabled, {} remaining", provider, self.providers.len());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoLocation;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use test_log::test;
    use tokio::sync::mpsc;

    fn fix(latitude: f64, longitude: f64) -> LocationFix {
        LocationFix {
            location: GeoLocation::new(latitude, longitude, 0.0).unwrap(),
            accuracy: 5.0,
            provider: "gps".to_string(),
            time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test(tokio::test)]
    async fn late_subscribers_receive_the_latest_fix() {
        let (tx, rx) = mpsc::channel(4);
        let store = LocationStore::new(rx);
        let early = store.notifier();
        let handle = tokio::spawn(store.listen());

        tx.send(LocationEvent::Fix(fix(1.0, 1.0))).await.unwrap();
        tx.send(LocationEvent::Fix(fix(2.0, 2.0))).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let late = early.clone();
        assert_eq!(*early.borrow(), Some(fix(2.0, 2.0)));
        assert_eq!(*late.borrow(), Some(fix(2.0, 2.0)));
    }

    #[test(tokio::test)]
    async fn subscribers_start_without_a_fix() {
        let (_tx, rx) = mpsc::channel(1);
        let store = LocationStore::new(rx);

        assert_eq!(*store.notifier().borrow(), None);
    }

    #[test(tokio::test)]
    async fn provider_events_do_not_change_the_fix() {
        let (tx, rx) = mpsc::channel(4);
        let store = LocationStore::new(rx);
        let mut notifier = store.notifier();
        let handle = tokio::spawn(store.listen());

        tx.send(LocationEvent::ProviderEnabled("gps".to_string())).await.unwrap();
        tx.send(LocationEvent::ProviderDisabled("network".to_string())).await.unwrap();
        tx.send(LocationEvent::ProviderDisabled("gps".to_string())).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        assert!(!notifier.has_changed().unwrap_or(false));
        assert_eq!(*notifier.borrow_and_update(), None);
    }

    #[test(tokio::test)]
    async fn subscribers_see_the_channel_close_when_the_store_ends() {
        let (tx, rx) = mpsc::channel(1);
        let store = LocationStore::new(rx);
        let mut notifier = store.notifier();
        let handle = tokio::spawn(store.listen());

        drop(tx);
        handle.await.unwrap();

        assert!(notifier.changed().await.is_err());
    }
}
