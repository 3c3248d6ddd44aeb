//! Best-effort removal of old spilled extracts

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Delete `*.txt` files in `dir` last modified more than `max_age` ago.
///
/// Failures are logged and skipped. Returns the number of files removed.
pub fn sweep_stale_extracts(dir: &Path, max_age: Duration) -> usize {
    let Some(dir_str) = dir.to_str() else {
        tracing::warn!(dir = %dir.display(), "Spill directory is not valid UTF-8, skipping cleanup");
        return 0;
    };
    let pattern = format!("{}/*.txt", glob::Pattern::escape(dir_str));

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid cleanup pattern");
            return 0;
        }
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot inspect spilled file");
                continue;
            }
        };

        let modified = match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read file age");
                continue;
            }
        };

        let age = now.duration_since(modified).unwrap_or_default();
        if age <= max_age {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Cleaned up old extract");
                removed += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Error cleaning up old extract");
            }
        }
    }

    removed
}
