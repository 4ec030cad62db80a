//! Roster store
//!
//! Two backends behind one interface: a file-backed store for normal
//! operation and an embedded in-memory store for tests and demo data.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::DateTime;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use roster_core::RosterData;

use crate::error::{StoreError, StoreResult};
use crate::normalize::normalize_roster_json;

/// Roster persistence handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RosterStore {
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    FileBacked {
        roster_path: PathBuf,
        snapshots_dir: PathBuf,
    },
    Embedded(Arc<RwLock<RosterData>>),
}

impl RosterStore {
    /// A store persisting to `roster_path`, with historical snapshots
    /// under `snapshots_dir`.
    pub fn file_backed(roster_path: impl Into<PathBuf>, snapshots_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::FileBacked {
                roster_path: roster_path.into(),
                snapshots_dir: snapshots_dir.into(),
            },
        }
    }

    /// An in-memory store seeded with `initial`. Snapshots are no-ops.
    pub fn embedded(initial: RosterData) -> Self {
        Self {
            backend: Backend::Embedded(Arc::new(RwLock::new(initial))),
        }
    }

    /// Load the current roster.
    ///
    /// A missing roster file yields an empty legacy roster rather than an
    /// error, so a fresh deployment starts usable.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<RosterData> {
        match &self.backend {
            Backend::FileBacked { roster_path, .. } => {
                let json = match fs::read_to_string(roster_path).await {
                    Ok(json) => json,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        warn!(path = %roster_path.display(), "roster file missing, starting empty");
                        return Ok(RosterData::legacy(Vec::new()));
                    }
                    Err(e) => return Err(StoreError::io(roster_path, e)),
                };
                normalize_roster_json(&json)
            }
            Backend::Embedded(data) => Ok(data.read().await.clone()),
        }
    }

    /// Persist the roster, replacing the previous file atomically.
    #[instrument(skip_all, fields(members = data.member_count(), last_updated = data.last_updated))]
    pub async fn save(&self, data: &RosterData) -> StoreResult<()> {
        match &self.backend {
            Backend::FileBacked { roster_path, .. } => {
                write_atomic(roster_path, data).await?;
                info!(path = %roster_path.display(), "roster saved");
                Ok(())
            }
            Backend::Embedded(slot) => {
                *slot.write().await = data.clone();
                Ok(())
            }
        }
    }

    /// Archive a superseded roster before it is overwritten.
    ///
    /// The snapshot is named after the roster's own `lastUpdated` timestamp
    /// and is write-once: an existing snapshot for the same timestamp is
    /// left untouched. Rosters without a timestamp are not archived.
    /// Returns the snapshot file name when one was written.
    #[instrument(skip_all, fields(last_updated = old.last_updated))]
    pub async fn snapshot(&self, old: &RosterData) -> StoreResult<Option<String>> {
        let Backend::FileBacked { snapshots_dir, .. } = &self.backend else {
            return Ok(None);
        };
        if old.last_updated <= 0 {
            return Ok(None);
        }

        let name = format!("{}.json", snapshot_name(old.last_updated));
        let path = snapshots_dir.join(&name);
        if fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?
        {
            return Ok(None);
        }

        fs::create_dir_all(snapshots_dir)
            .await
            .map_err(|e| StoreError::io(snapshots_dir, e))?;
        let json = serde_json::to_vec_pretty(old)?;
        fs::write(&path, json)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        info!(snapshot = %name, "saved historical snapshot");
        Ok(Some(name))
    }

    /// List historical snapshot file names, newest first.
    #[instrument(skip(self))]
    pub async fn list_snapshots(&self) -> StoreResult<Vec<String>> {
        let Backend::FileBacked { snapshots_dir, .. } = &self.backend else {
            return Ok(Vec::new());
        };

        let mut entries = match fs::read_dir(snapshots_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(snapshots_dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(snapshots_dir, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }
}

/// Read the addon's SavedVariables export file.
#[instrument]
pub async fn read_export(path: &Path) -> StoreResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io(path, e))
}

/// Snapshot base name for a roster timestamp: UTC `YYYY-MM-DD_HHMMSS`.
#[must_use]
pub fn snapshot_name(last_updated: i64) -> String {
    DateTime::from_timestamp(last_updated, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d_%H%M%S")
        .to_string()
}

async fn write_atomic(path: &Path, data: &RosterData) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    // Write to a sibling temp file, then rename over the target so readers
    // never observe a half-written roster.
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(data)?;
    fs::write(&tmp, json)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    Ok(())
}
