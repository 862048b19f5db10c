use crate::domain::{LocationFix, Place};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Place bookmarks persisted as a single JSON document. Every mutation rewrites the file.
#[derive(Debug)]
pub struct PlaceRepository {
    path: PathBuf,
    state: RwLock<PlaceFile>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct PlaceFile {
    /// Ids are never handed out twice, even after the highest one is deleted.
    next_id: u32,
    places: Vec<Place>,
}

impl PlaceRepository {
    /// Loads the places stored at `path`. A missing file is an empty repository.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PlaceError> {
        let path = path.as_ref().to_path_buf();
        info!("📁 Loading places...");

        let mut state = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<PlaceFile>(&content).map_err(|e| PlaceError::Parse {
                source: e,
                path: path.clone(),
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => PlaceFile::default(),
            Err(e) => return Err(PlaceError::Io { source: e, path }),
        };
        state.places.sort_by_key(|place| place.id);
        // A stored id of u32::MAX leaves nothing to hand out, so create fails from then on
        let highest = state.places.last().map_or(0, |place| place.id);
        state.next_id = state.next_id.max(highest.saturating_add(1)).max(1);

        info!("📁 Loading places... OK, {} loaded", state.places.len());
        Ok(PlaceRepository {
            path,
            state: RwLock::new(state),
        })
    }

    /// All places ordered by id.
    pub async fn find(&self) -> Vec<Place> {
        self.state.read().await.places.clone()
    }

    pub async fn find_by_id(&self, id: u32) -> Option<Place> {
        self.state.read().await.places.iter().find(|place| place.id == id).cloned()
    }

    /// Bookmarks `fix` under a newly assigned id.
    #[instrument(skip(self, fix))]
    pub async fn create(&self, title: Option<String>, fix: &LocationFix) -> Result<Place, PlaceError> {
        let mut state = self.state.write().await;

        let mut next = state.clone();
        let place = Place::from_fix(next.next_id, title, fix);
        next.next_id = id_after(place.id)?;
        next.places.push(place.clone());
        self.persist(&next).await?;
        *state = next;

        info!(id = place.id, "📌 Created place '{}'", place.title.as_deref().unwrap_or("untitled"));
        Ok(place)
    }

    /// Like `create`, but a failure is logged instead of returned.
    pub async fn bookmark(&self, title: &str, fix: &LocationFix) -> Option<Place> {
        match self.create(Some(title.to_string()), fix).await {
            Ok(place) => Some(place),
            Err(e) => {
                warn!("⚠️ Unable to bookmark '{}': {}", title, e);
                None
            }
        }
    }

    /// Inserts `place` or replaces the place with the same id.
    #[instrument(skip_all, fields(id = place.id))]
    pub async fn upsert(&self, place: Place) -> Result<(), PlaceError> {
        let mut state = self.state.write().await;

        let mut next = state.clone();
        next.next_id = next.next_id.max(id_after(place.id)?);
        match next.places.iter_mut().find(|existing| existing.id == place.id) {
            Some(existing) => *existing = place,
            None => {
                next.places.push(place);
                next.places.sort_by_key(|place| place.id);
            }
        }
        self.persist(&next).await?;
        *state = next;

        debug!("📌 Upserted place");
        Ok(())
    }

    /// Returns whether a place was deleted.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: u32) -> Result<bool, PlaceError> {
        let mut state = self.state.write().await;

        let mut next = state.clone();
        next.places.retain(|place| place.id != id);
        if next.places.len() == state.places.len() {
            return Ok(false);
        }
        self.persist(&next).await?;
        *state = next;

        info!("🗑️ Deleted place {}", id);
        Ok(true)
    }

    /// Writes `state` next to the places file first, then swaps it in.
    async fn persist(&self, state: &PlaceFile) -> Result<(), PlaceError> {
        let json = serde_json::to_string_pretty(state).map_err(|e| PlaceError::Parse {
            source: e,
            path: self.path.clone(),
        })?;

        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, json).await.map_err(|e| PlaceError::Io {
            source: e,
            path: staged.clone(),
        })?;
        fs::rename(&staged, &self.path).await.map_err(|e| PlaceError::Io {
            source: e,
            path: self.path.clone(),
        })
    }
}

fn id_after(id: u32) -> Result<u32, PlaceError> {
    id.checked_add(1).ok_or(PlaceError::IdsExhausted)
}

#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("cannot access '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("invalid places file '{}': {}", path.display(), source)]
    Parse { source: serde_json::Error, path: PathBuf },
    #[error("no place ids left to assign")]
    IdsExhausted,
}
