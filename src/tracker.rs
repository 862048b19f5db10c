use crate::domain::LocationFix;
use crate::utm::{UtmConverter, UtmCoordinate};
use tokio::sync::watch::{Receiver, Sender};
use tracing::{debug, instrument, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum UtmState {
    Loading,
    Success { fix: LocationFix, utm: UtmCoordinate },
    /// The location feed ended without a single fix.
    Empty,
    Error(String),
}

impl UtmState {
    pub fn share_text(&self) -> Option<String> {
        match self {
            UtmState::Success { utm, .. } => Some(utm.share_text()),
            _ => None,
        }
    }
}

/// Publishes the UTM state of every fix observed on `rx` until the location feed closes.
#[instrument(skip_all)]
pub async fn track(mut rx: Receiver<Option<LocationFix>>, converter: UtmConverter, tx: Sender<UtmState>) {
    let current = rx.borrow_and_update().clone();
    if let Some(fix) = current {
        tx.send_replace(state_of(&converter, fix));
    }

    while rx.changed().await.is_ok() {
        let Some(fix) = rx.borrow_and_update().clone() else {
            continue;
        };
        tx.send_replace(state_of(&converter, fix));
    }

    if matches!(*tx.borrow(), UtmState::Loading) {
        warn!("⚠️ Location feed ended without a fix");
        tx.send_replace(UtmState::Empty);
    }
}

fn state_of(converter: &UtmConverter, fix: LocationFix) -> UtmState {
    match converter.convert_location(&fix.location) {
        Ok(utm) => {
            debug!("📍 {}", utm);
            UtmState::Success { fix, utm }
        }
        Err(e) => {
            warn!("⚠️ Could not convert fix: {}", e);
            UtmState::Error(e.to_string())
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
    use tokio::sync::watch;

    fn fix(location: GeoLocation) -> LocationFix {
        LocationFix {
            location,
            accuracy: 3.0,
            provider: "gps".to_string(),
            time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test(tokio::test)]
    async fn publishes_the_utm_coordinate_of_each_fix() {
        let (fix_tx, fix_rx) = watch::channel(None);
        let (state_tx, mut state_rx) = watch::channel(UtmState::Loading);
        let handle = tokio::spawn(track(fix_rx, UtmConverter::default(), state_tx));

        assert_eq!(*state_rx.borrow(), UtmState::Loading);

        let sao_paulo = fix(GeoLocation::new(-23.5505, -46.6333, 760.0).unwrap());
        fix_tx.send(Some(sao_paulo.clone())).unwrap();
        state_rx.changed().await.unwrap();

        let state = state_rx.borrow_and_update().clone();
        assert_eq!(state.share_text(), Some("23K 333288m E 7394588m N".to_string()));
        match state {
            UtmState::Success { fix, utm } => {
                assert_eq!(fix, sao_paulo);
                assert_eq!(utm.central_meridian, "-45.0°");
            }
            other => panic!("expected success, found {:?}", other),
        }

        drop(fix_tx);
        handle.await.unwrap();
        assert!(matches!(*state_rx.borrow(), UtmState::Success { .. }));
    }

    #[test(tokio::test)]
    async fn converts_a_fix_that_is_already_present() {
        let (_fix_tx, fix_rx) = watch::channel(Some(fix(GeoLocation::new(50.0, 10.0, 0.0).unwrap())));
        let (state_tx, mut state_rx) = watch::channel(UtmState::Loading);
        tokio::spawn(track(fix_rx, UtmConverter::default(), state_tx));

        state_rx.changed().await.unwrap();

        assert_eq!(state_rx.borrow().share_text(), Some("32U 571666m E 5539110m N".to_string()));
    }

    #[test(tokio::test)]
    async fn reports_empty_when_the_feed_ends_without_a_fix() {
        let (fix_tx, fix_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(UtmState::Loading);

        drop(fix_tx);
        track(fix_rx, UtmConverter::default(), state_tx).await;

        assert_eq!(*state_rx.borrow(), UtmState::Empty);
    }

    #[test(tokio::test)]
    async fn reports_an_error_for_an_unconvertible_fix() {
        // Bypasses validation, as a misbehaving source could
        let invalid = fix(GeoLocation {
            latitude: f64::NAN,
            longitude: 0.0,
            altitude: 0.0,
        });
        let (_fix_tx, fix_rx) = watch::channel(Some(invalid));
        let (state_tx, mut state_rx) = watch::channel(UtmState::Loading);
        tokio::spawn(track(fix_rx, UtmConverter::default(), state_tx));

        state_rx.changed().await.unwrap();

        let state = state_rx.borrow().clone();
        assert!(matches!(state, UtmState::Error(ref message) if message.starts_with("invalid location latitude")), "{:?}", state);
        assert_eq!(state.share_text(), None);
    }
}
