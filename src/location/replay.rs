use crate::domain::LocationFix;
use crate::domain::events::LocationEvent;
use crate::location::{LocationSource, SourceError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, instrument, warn};

/// Replays recorded fixes from a JSON lines file, one fix per `interval`.
#[derive(Debug)]
pub struct ReplaySource {
    name: String,
    path: PathBuf,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl ReplaySource {
    pub fn new(path: impl AsRef<Path>, interval: Duration) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("replay:{}", path.file_name().and_then(|s| s.to_str()).unwrap_or("unknown"));

        ReplaySource {
            name,
            path,
            interval,
            task: None,
        }
    }
}

#[async_trait]
impl LocationSource for ReplaySource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(source = %self.name))]
    async fn start(&mut self, tx: Sender<LocationEvent>) -> Result<(), SourceError> {
        if self.task.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(SourceError::AlreadyStarted(self.name.clone()));
        }

        let file = File::open(&self.path).await.map_err(|e| SourceError::Io {
            source: e,
            path: self.path.clone(),
        })?;

        info!("▶️ Replaying fixes from '{}'...", self.path.display());
        let name = self.name.clone();
        let interval = self.interval;
        self.task = Some(tokio::spawn(async move {
            replay(file, name, interval, tx).await;
        }));

        Ok(())
    }

    async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            join(&self.name, task).await;
            info!(source = %self.name, "⏹️ Stopped location source");
        }
    }
}

/// Waits for an aborted replay task. Returns whether it had panicked.
async fn join(name: &str, task: JoinHandle<()>) -> bool {
    match task.await {
        Err(e) if e.is_panic() => {
            warn!(source = %name, "⚠️ Replay task panicked: {}", e);
            true
        }
        _ => false,
    }
}

async fn replay(file: File, name: String, interval: Duration, tx: Sender<LocationEvent>) {
    if tx.send(LocationEvent::ProviderEnabled(name.clone())).await.is_err() {
        return;
    }

    let mut lines = LinesStream::new(BufReader::new(file).lines());
    let mut replayed = 0;
    let mut first = true;
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(source = %name, "⚠️ Unable to read fix: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let fix = match serde_json::from_str::<LocationFix>(&line) {
            Ok(fix) => fix,
            Err(e) => {
                warn!(source = %name, "⚠️ Skipping invalid fix: {}", e);
                continue;
            }
        };

        if !first {
            sleep(interval).await;
        }
        first = false;

        debug!(source = %name, "🛰️ Replaying fix {:?}", fix);
        if tx.send(LocationEvent::Fix(fix)).await.is_err() {
            return;
        }
        replayed += 1;
    }

    info!(source = %name, "▶️ Replaying fixes... OK, {} replayed", replayed);
    let _ = tx.send(LocationEvent::ProviderDisabled(name)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;
    use tokio::sync::mpsc;

    fn fixes_path() -> PathBuf {
        PathBuf::from(format!("{}/tests/resources/fixes.jsonl", env!("CARGO_MANIFEST_DIR")))
    }

    #[test(tokio::test)]
    async fn replays_valid_fixes_between_provider_events() -> Result<(), SourceError> {
        let (tx, mut rx) = mpsc::channel(16);
        let mut source = ReplaySource::new(fixes_path(), Duration::from_millis(1));

        source.start(tx).await?;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 5);
        assert_eq!(events[0], LocationEvent::ProviderEnabled("replay:fixes.jsonl".to_string()));
        assert_eq!(events[4], LocationEvent::ProviderDisabled("replay:fixes.jsonl".to_string()));

        let providers = events[1..4]
            .iter()
            .map(|event| match event {
                LocationEvent::Fix(fix) => fix.provider.as_str(),
                other => panic!("expected a fix, found {:?}", other),
            })
            .collect::<Vec<_>>();
        assert_eq!(providers, vec!["gps", "gps", "network"]);

        Ok(())
    }

    #[test(tokio::test)]
    async fn start_fails_for_a_missing_file() {
        let (tx, _rx) = mpsc::channel(1);
        let mut source = ReplaySource::new("does/not/exist.jsonl", Duration::from_millis(1));

        let result = source.start(tx).await;

        assert!(matches!(result, Err(SourceError::Io { .. })));
    }

    #[test(tokio::test)]
    async fn start_fails_while_running() -> Result<(), SourceError> {
        let (tx, _rx) = mpsc::channel(1);
        let mut source = ReplaySource::new(fixes_path(), Duration::from_secs(60));

        source.start(tx.clone()).await?;
        let result = source.start(tx).await;

        assert!(matches!(result, Err(SourceError::AlreadyStarted(_))));
        source.stop().await;

        Ok(())
    }

    #[test(tokio::test)]
    async fn stop_ends_the_replay() -> Result<(), SourceError> {
        let (tx, mut rx) = mpsc::channel(16);
        let mut source = ReplaySource::new(fixes_path(), Duration::from_secs(60));

        source.start(tx).await?;
        assert!(matches!(rx.recv().await, Some(LocationEvent::ProviderEnabled(_))));
        assert!(matches!(rx.recv().await, Some(LocationEvent::Fix(_))));

        source.stop().await;

        // The aborted task drops its sender, closing the channel
        assert_eq!(rx.recv().await, None);

        Ok(())
    }

    #[test(tokio::test)]
    async fn join_reports_a_panicked_replay() {
        let task: JoinHandle<()> = tokio::spawn(async { panic!("corrupt replay state") });

        assert!(join("replay:fixes.jsonl", task).await);
    }

    #[test(tokio::test)]
    async fn join_ignores_a_cancelled_replay() {
        let task = tokio::spawn(sleep(Duration::from_secs(60)));
        task.abort();

        assert!(!join("replay:fixes.jsonl", task).await);
    }
}
