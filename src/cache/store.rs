use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::score::ScoreRecord;
use crate::types::Fingerprint;

/// Bumped only when the on-disk layout changes incompatibly. Additive
/// fields rely on serde defaults instead and do not bump this.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not determine a per-user cache directory")]
    NoCacheDir,
    #[error("cache write failed: {0}")]
    Write(#[from] std::io::Error),
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk shape. Unknown fields are ignored and missing ones default, so
/// older files stay loadable as the record format grows.
#[derive(Debug, Deserialize)]
struct CacheFile {
    #[serde(default)]
    entries: BTreeMap<Fingerprint, ScoreRecord>,
}

#[derive(Serialize)]
struct CacheFileView<'a> {
    schema: u32,
    entries: &'a BTreeMap<Fingerprint, ScoreRecord>,
}

#[derive(Debug)]
struct Inner {
    entries: BTreeMap<Fingerprint, ScoreRecord>,
    dirty: bool,
}

/// Persistent fingerprint → [`ScoreRecord`] store.
///
/// The cache is the sole cross-run cost-avoidance mechanism: a fingerprint
/// whose record is cached never triggers another model call unless the file
/// is deleted or the entry content changed. `put` is in-memory only;
/// `flush` performs the single durable write for a batch.
///
/// Reads take a shared lock and run freely in parallel; `put` and `flush`
/// serialize behind the write lock.
#[derive(Debug)]
pub struct ResultCache {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl ResultCache {
    /// The well-known per-user location used when the host does not inject
    /// its own path.
    pub fn default_path() -> Result<PathBuf, CacheError> {
        let base = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .ok_or(CacheError::NoCacheDir)?;

        Ok(base.join("craaper").join("analysis_cache.json"))
    }

    /// Read the persisted cache. An absent file yields an empty cache; an
    /// unreadable or corrupt one is logged and reset to empty — running
    /// without prior results is always preferable to aborting analysis.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);

        ResultCache {
            path,
            inner: RwLock::new(Inner {
                entries,
                dirty: false,
            }),
        }
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<ScoreRecord> {
        self.inner.read().entries.get(fingerprint).cloned()
    }

    /// Insert or overwrite in memory. Not yet persisted; call [`flush`].
    ///
    /// [`flush`]: ResultCache::flush
    pub fn put(&self, fingerprint: Fingerprint, record: ScoreRecord) {
        let mut inner = self.inner.write();
        inner.entries.insert(fingerprint, record);
        inner.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Serialize the whole map to a sibling temp file, fsync, then rename
    /// over the destination, holding the write lock for the duration of the
    /// write. After a successful flush, a subsequent [`load`] reproduces the
    /// exact fingerprint → record set. No-op when nothing changed.
    ///
    /// [`load`]: ResultCache::load
    pub fn flush(&self) -> Result<(), CacheError> {
        let mut inner = self.inner.write();
        if !inner.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let view = CacheFileView {
            schema: SCHEMA_VERSION,
            entries: &inner.entries,
        };

        let temp_path = self.path.with_extension("json.tmp");
        let file = fs::File::create(&temp_path)?;
        serde_json::to_writer_pretty(&file, &view)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        inner.dirty = false;
        debug!(
            path = %self.path.display(),
            entries = inner.entries.len(),
            "cache flushed"
        );
        Ok(())
    }
}

fn read_entries(path: &Path) -> BTreeMap<Fingerprint, ScoreRecord> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "cache file unreadable, running without prior results"
            );
            return BTreeMap::new();
        }
    };

    let file: CacheFile = match serde_json::from_slice(&bytes) {
        Ok(file) => file,
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "cache file corrupt, resetting to empty"
            );
            return BTreeMap::new();
        }
    };

    let mut entries = file.entries;
    // A record that lost criteria to truncation or hand-editing cannot
    // produce a total; drop it and re-judge rather than fail the load.
    entries.retain(|fingerprint, record| {
        let complete = record.is_complete();
        if !complete {
            warn!(
                fingerprint = fingerprint.as_str(),
                "dropping incomplete cached record"
            );
        }
        complete
    });
    entries
}
