//! On-disk cache of raw feed responses.
//!
//! One file per (location, format) pair. Freshness is judged from the file's
//! modification time; nothing is locked, so concurrent runs simply race and
//! the last write wins.

use chrono::{DateTime, Utc};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::config::{Config, ResponseFormat};

const PROGRAM: &str = "yweather";

/// Subdirectory used when present, so the file need not be hidden.
const MENU_SUBDIR: &str = "openbox";

/// Base directory: explicit `XDG_CACHE_HOME`, else `~/.cache` if it exists,
/// else the home directory itself.
pub fn base_dir(xdg_cache_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = xdg_cache_home.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    let home = home.unwrap_or_else(|| PathBuf::from("."));
    let dot_cache = home.join(".cache");
    if dot_cache.is_dir() { dot_cache } else { home }
}

/// Full cache file path inside `base`.
pub fn cache_file_in(base: &Path, location: &str, format: ResponseFormat) -> PathBuf {
    let name = format!("{PROGRAM}.{location}.{format}.cache");
    let subdir = base.join(MENU_SUBDIR);
    if subdir.is_dir() {
        subdir.join(name)
    } else {
        base.join(format!(".{name}"))
    }
}

/// True while the entry is strictly younger than `ttl`.
pub fn is_fresh(modified: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => now.signed_duration_since(modified) < ttl,
        // A TTL too large for chrono never expires.
        Err(_) => true,
    }
}

#[derive(Debug, Clone)]
pub struct CacheGate {
    path: PathBuf,
    ttl: Duration,
}

impl CacheGate {
    pub fn new(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }

    /// Gate for `config`, resolving the directory from the environment
    /// unless the config overrides it.
    pub fn for_config(config: &Config) -> Self {
        let base = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => base_dir(
                env::var_os("XDG_CACHE_HOME").map(PathBuf::from),
                env::var_os("HOME").map(PathBuf::from),
            ),
        };
        Self::new(
            cache_file_in(&base, &config.location, config.format),
            config.cache_ttl,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached bytes if the entry exists and is fresh. Any I/O problem is
    /// treated as a miss.
    pub fn read_fresh(&self) -> Option<Vec<u8>> {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        if !is_fresh(DateTime::<Utc>::from(modified), Utc::now(), self.ttl) {
            tracing::debug!(path = %self.path.display(), "cache entry expired");
            return None;
        }
        match fs::read(&self.path) {
            Ok(bytes) => {
                tracing::debug!(path = %self.path.display(), "cache hit");
                Some(bytes)
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "cache unreadable");
                None
            }
        }
    }

    /// Best-effort overwrite of the entry.
    pub fn store(&self, bytes: &[u8]) {
        if let Err(e) = fs::write(&self.path, bytes) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write cache");
        }
    }
}
