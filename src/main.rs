use gridfix::app_config::AppConfig;
use gridfix::backend;
use gridfix::location::{LocationService, ReplaySource};
use gridfix::places::PlaceRepository;
use gridfix::tracker::{UtmState, track};
use tokio::sync::watch;
use tokio::task;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    if let Some(backend_config) = config.backend() {
        let client = backend::new_client()?;
        if let Err(e) = backend::ping(&client, backend_config).await {
            warn!("⚠️ Backend unreachable, continuing offline: {}", e);
        }
    }

    let places = PlaceRepository::open(config.places().file()).await?;
    info!("✅  Loaded places");

    let source = ReplaySource::new(config.location().fixes_file(), config.location().interval());
    let mut service = LocationService::new(Box::new(source), config.core().buffer_size());
    let fix_rx = service.start().await?;
    info!("✅  Started location service");

    let (state_tx, mut state_rx) = watch::channel(UtmState::Loading);
    let tracker = task::spawn(track(fix_rx, config.utm().converter(), state_tx));
    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    let mut bookmark_pending = config.places().bookmark_first_fix();
    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }

                let state = state_rx.borrow_and_update().clone();
                match state {
                    UtmState::Success { fix, utm } => {
                        info!(provider = %fix.provider, accuracy = fix.accuracy, "📍 {} (central meridian {})", utm.share_text(), utm.central_meridian);
                        if bookmark_pending {
                            places.bookmark("First fix", &fix).await;
                            bookmark_pending = false;
                        }
                    }
                    UtmState::Empty => warn!("⚠️ No location fix received"),
                    UtmState::Error(e) => warn!("⚠️ {}", e),
                    UtmState::Loading => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Interrupted");
                break;
            }
        }
    }

    service.stop().await;
    tracker.await?;
    info!("👋 {} stopped", env!("CARGO_PKG_NAME"));

    Ok(())
}
