//! Fingerprint-cached data manager for the dashboard runtime.
//!
//! Wraps [`analyze_duty`] with a cache keyed by the input fileset
//! fingerprint. Callers use [`DataManager::get_data`] to obtain a
//! fresh-or-cached [`AnalysisResult`]; the manager re-checks the
//! fingerprint on every call (cheap metadata stats) and recomputes only
//! when a file actually changed. There is no retry logic: the analysis
//! is a stateless batch computation and errors propagate to the caller.

use std::path::PathBuf;

use duty_core::error::Result;
use duty_data::analysis::{analyze_duty, AnalysisResult};

use crate::fingerprint::FilesetFingerprint;

/// Fingerprint-keyed cache around the full analysis pipeline.
///
/// # Example
/// ```no_run
/// use std::path::PathBuf;
/// use duty_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new(vec![PathBuf::from("duty_log.csv")], "UTC");
/// let result = mgr.get_data(false).unwrap();
/// println!("events: {}", result.metadata.events_processed);
/// ```
pub struct DataManager {
    /// Input duty-log files, in load order.
    paths: Vec<PathBuf>,
    /// Timezone applied to offset-bearing timestamps.
    timezone: String,
    /// Cached result together with the fingerprint it was computed from.
    cache: Option<(FilesetFingerprint, AnalysisResult)>,
}

impl DataManager {
    /// Create a manager over the given input files.
    pub fn new(paths: Vec<PathBuf>, timezone: impl Into<String>) -> Self {
        Self {
            paths,
            timezone: timezone.into(),
            cache: None,
        }
    }

    /// The input files this manager analyses.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Return analysis data, using the cache while the input fileset is
    /// unchanged.
    ///
    /// When `force_refresh` is `true` the cache is bypassed and the
    /// analysis always reruns. Any load or stat failure propagates;
    /// stale data is never silently substituted.
    pub fn get_data(&mut self, force_refresh: bool) -> Result<&AnalysisResult> {
        let fingerprint = FilesetFingerprint::capture(&self.paths)?;

        let cache_valid = !force_refresh
            && self
                .cache
                .as_ref()
                .map(|(cached_fp, _)| *cached_fp == fingerprint)
                .unwrap_or(false);

        if cache_valid {
            tracing::debug!("returning cached analysis result");
        } else {
            let result = analyze_duty(&self.paths, &self.timezone)?;
            tracing::debug!(
                events = result.metadata.events_processed,
                sessions = result.metadata.sessions_built,
                "analysis cache refreshed"
            );
            self.cache = Some((fingerprint, result));
        }

        Ok(&self.cache.as_ref().unwrap().1)
    }

    /// Discard the cache, forcing the next [`DataManager::get_data`] call
    /// to recompute.
    pub fn invalidate(&mut self) {
        self.cache = None;
        tracing::debug!("cache invalidated");
    }

    /// `true` when a cached result is currently held.
    pub fn has_cached_data(&self) -> bool {
        self.cache.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
