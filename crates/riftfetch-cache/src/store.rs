//! Match file store.

use riftfetch_core::{CacheError, MatchId, MatchRecord};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::debug;

use crate::validate::{validate_payload, ValidationMode};

/// Outcome of reading one cache entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A structurally valid record.
    Hit(MatchRecord),
    /// No file for this id.
    Missing,
    /// A file exists but cannot be used.
    Corrupt(String),
}

/// Result of checking every entry in the cache directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheScan {
    pub valid: Vec<MatchId>,
    pub corrupt: Vec<(MatchId, String)>,
}

/// On-disk match store.
#[derive(Debug)]
pub struct MatchStore {
    dir: PathBuf,
    mode: ValidationMode,
    tmp_seq: AtomicU64,
}

impl MatchStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: ValidationMode::default(),
            tmp_seq: AtomicU64::new(0),
        }
    }

    /// Set validation mode.
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn validation(&self) -> ValidationMode {
        self.mode
    }

    /// File path for a match id.
    pub fn path_for(&self, match_id: &MatchId) -> PathBuf {
        self.dir.join(match_id.file_name())
    }

    /// Read and validate one entry.
    pub async fn lookup(&self, match_id: &MatchId) -> CacheLookup {
        let path = self.path_for(match_id);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return CacheLookup::Missing,
            Err(e) => return CacheLookup::Corrupt(format!("unreadable: {}", e)),
        };

        let value: Value = match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(e) => return CacheLookup::Corrupt(format!("invalid JSON: {}", e)),
        };

        if let Err(reason) = validate_payload(&value, self.mode) {
            return CacheLookup::Corrupt(reason);
        }

        match MatchRecord::from_value(value) {
            Ok(record) => CacheLookup::Hit(record),
            Err(e) => CacheLookup::Corrupt(format!("unexpected field type: {}", e)),
        }
    }

    /// Read one entry; absent and invalid entries both yield `None`.
    pub async fn get(&self, match_id: &MatchId) -> Option<MatchRecord> {
        match self.lookup(match_id).await {
            CacheLookup::Hit(record) => Some(record),
            CacheLookup::Missing | CacheLookup::Corrupt(_) => None,
        }
    }

    /// Write an entry, replacing whatever was there.
    ///
    /// Records that [`lookup`](Self::lookup) would reject under the store's
    /// validation mode are refused with [`CacheError::InvalidPayload`]. The
    /// payload goes to a temporary file first and is renamed into place, so
    /// readers never see a half-written entry.
    pub async fn put(
        &self,
        match_id: &MatchId,
        record: &MatchRecord,
    ) -> Result<PathBuf, CacheError> {
        let value = serde_json::to_value(record)?;
        validate_payload(&value, self.mode).map_err(CacheError::InvalidPayload)?;
        let json = serde_json::to_vec_pretty(&value)?;

        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(match_id);
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(
            "{}.{}.{}.tmp",
            match_id.file_name(),
            std::process::id(),
            seq
        ));

        let written = match fs::write(&tmp, &json).await {
            Ok(()) => fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("Saved match data to {}", path.display());
        Ok(path)
    }

    /// All ids with an entry file, sorted. A missing directory is an empty cache.
    pub async fn list_ids(&self) -> Result<Vec<MatchId>, CacheError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(id) = MatchId::new(stem) {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Number of valid entries the player took part in.
    pub async fn count_for_player(&self, puuid: &str) -> Result<usize, CacheError> {
        let mut count = 0;
        for id in self.list_ids().await? {
            if let CacheLookup::Hit(record) = self.lookup(&id).await {
                if record.has_participant(puuid) {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    /// Validate every entry.
    pub async fn scan(&self) -> Result<CacheScan, CacheError> {
        let mut scan = CacheScan::default();
        for id in self.list_ids().await? {
            match self.lookup(&id).await {
                CacheLookup::Hit(_) => scan.valid.push(id),
                CacheLookup::Corrupt(reason) => scan.corrupt.push((id, reason)),
                // Removed between listing and reading.
                CacheLookup::Missing => {}
            }
        }
        Ok(scan)
    }
}
