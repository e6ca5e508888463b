//! On-disk snapshot storage.
//!
//! A snapshot is kept as two files: the payload at the configured path and
//! a JSON sidecar (`<path>.meta.json`) with the creation time, size and
//! SHA-256 of the payload. Both are replaced with the write-to-temp-then-rename
//! pattern, so readers see either the old file or the new one, never a
//! partial write. When two writers interleave, the payload and sidecar may
//! come from different runs; the digest check turns that into a cache miss.

use anyhow::{bail, Context};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::snapshot::{Snapshot, SnapshotMetadata, CACHE_FORMAT_VERSION};
use super::validation::{validate, ValidationResult};
use crate::error::CacheWriteError;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temp files older than this are leftovers of a writer that died mid-write.
const STALE_TEMP_AGE: Duration = Duration::from_secs(60 * 60);

/// Storage for the single inventory snapshot.
pub struct CacheStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    /// Create a store for the payload at `path`, using wall-clock time.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Create a store with an explicit time source.
    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Path of the payload file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar metadata file.
    pub fn metadata_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".meta.json");
        PathBuf::from(name)
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Read the stored snapshot.
    ///
    /// Returns `None` on a cold cache and on any unreadable, corrupt or
    /// mismatched artifact.
    pub fn load(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("Ignoring unusable inventory cache at {:?}: {:#}", self.path, e);
                None
            }
        }
    }

    fn try_load(&self) -> anyhow::Result<Option<Snapshot>> {
        let meta_path = self.metadata_path();
        let json = match fs::read_to_string(&meta_path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {:?}", meta_path)),
        };

        let metadata: SnapshotMetadata =
            serde_json::from_str(&json).with_context(|| format!("parsing {:?}", meta_path))?;
        if metadata.format != CACHE_FORMAT_VERSION {
            bail!("unsupported cache format {}", metadata.format);
        }

        let data = fs::read(&self.path).with_context(|| format!("reading {:?}", self.path))?;
        if !metadata.matches(&data) {
            bail!("payload does not match its metadata");
        }

        Ok(Some(Snapshot::new(data, metadata.created_at)))
    }

    /// Classify a loaded snapshot against `ttl_seconds`.
    pub fn validate(&self, snapshot: &Snapshot, ttl_seconds: u64) -> ValidationResult {
        validate(snapshot, ttl_seconds, self.now())
    }

    /// Whether `snapshot` was loaded and is younger than `ttl_seconds`.
    ///
    /// Always false when `ttl_seconds` is zero.
    pub fn is_valid(&self, snapshot: Option<&Snapshot>, ttl_seconds: u64) -> bool {
        snapshot.is_some_and(|s| self.validate(s, ttl_seconds).is_fresh())
    }

    /// Persist `snapshot`, replacing whatever was stored.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CacheWriteError> {
        self.ensure_dir()?;
        self.sweep_stale_temps();

        write_atomic(&self.path, snapshot.data())?;

        let meta_path = self.metadata_path();
        let json = serde_json::to_vec_pretty(&SnapshotMetadata::describe(snapshot)).map_err(
            |e| CacheWriteError {
                path: meta_path.clone(),
                source: std::io::Error::other(e),
            },
        )?;
        write_atomic(&meta_path, &json)?;

        debug!(
            "Saved inventory snapshot ({} bytes) to {:?}",
            snapshot.data().len(),
            self.path
        );
        Ok(())
    }

    /// Remove the stored snapshot. Returns whether anything was removed.
    pub fn clear(&self) -> std::io::Result<bool> {
        let mut removed = false;
        for path in [self.metadata_path(), self.path.clone()] {
            match fs::remove_file(&path) {
                Ok(()) => removed = true,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }

    /// Delete abandoned temp files next to the cache. Best effort.
    fn sweep_stale_temps(&self) {
        let (Some(dir), Some(name)) = (self.path.parent(), self.path.file_name()) else {
            return;
        };
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        let prefix = format!(".{}.", name.to_string_lossy());
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if !file_name.starts_with(&prefix) || !file_name.ends_with(".tmp") {
                continue;
            }
            let stale = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| SystemTime::now().duration_since(modified).ok())
                .is_some_and(|age| age > STALE_TEMP_AGE);
            if stale {
                match fs::remove_file(entry.path()) {
                    Ok(()) => debug!("Removed stale temp file {:?}", entry.path()),
                    Err(e) => debug!("Could not remove {:?}: {}", entry.path(), e),
                }
            }
        }
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<(), CacheWriteError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| CacheWriteError {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheWriteError> {
    let temp_path = temp_path_for(path);
    let err = |source| CacheWriteError {
        path: path.to_path_buf(),
        source,
    };

    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err(e));
    }
    Ok(())
}

/// Temp names are unique per process and per write, so concurrent writers
/// never share one.
fn temp_path_for(path: &Path) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.{}.tmp", std::process::id(), seq));
    path.with_file_name(name)
}
