//! Duty-log file discovery and loading.
//!
//! Reads swipe records from headerless CSV files with the fixed column
//! order (id, name, status, timestamp) and converts them into
//! [`DutyEvent`] structs for downstream processing.

use std::path::{Path, PathBuf};

use duty_core::error::{DutyError, Result};
use duty_core::models::{DutyEvent, DutyStatus};
use duty_core::time_utils::TimestampParser;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_duty_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load and parse duty-log files into [`DutyEvent`] objects.
///
/// Files are read in the order given (callers pass filename-sorted
/// lists) and their rows concatenated; no deduplication is performed
/// across files, and the input row order is preserved so that
/// equal-timestamp ties stay stable.
///
/// Validation is strict: any row with a bad id, status, or timestamp
/// fails the whole load with an error naming the file and line, and a
/// missing file fails before any of its rows are considered.
pub fn load_duty_events(paths: &[PathBuf], parser: &TimestampParser) -> Result<Vec<DutyEvent>> {
    let mut events: Vec<DutyEvent> = Vec::new();

    for path in paths {
        load_single_file(path, parser, &mut events)?;
    }

    debug!(
        "Loaded {} duty events from {} files",
        events.len(),
        paths.len()
    );

    Ok(events)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse one duty-log file, appending its rows to `events`.
fn load_single_file(
    path: &Path,
    parser: &TimestampParser,
    events: &mut Vec<DutyEvent>,
) -> Result<()> {
    let file = std::fs::File::open(path).map_err(|source| DutyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    // flexible() so that short/long rows reach our own column check
    // instead of surfacing as an opaque csv-layer error.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut rows_read = 0u64;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 4 {
            return Err(DutyError::ColumnCount {
                path: path.to_path_buf(),
                line,
                found: record.len(),
            });
        }

        let id = record[0].parse::<u64>().map_err(|_| DutyError::IdParse {
            path: path.to_path_buf(),
            line,
            value: record[0].to_string(),
        })?;

        let status = DutyStatus::parse(&record[2]).ok_or_else(|| DutyError::StatusParse {
            path: path.to_path_buf(),
            line,
            value: record[2].to_string(),
        })?;

        let timestamp = parser
            .parse(&record[3])
            .ok_or_else(|| DutyError::TimestampParse {
                path: path.to_path_buf(),
                line,
                value: record[3].to_string(),
            })?;

        events.push(DutyEvent {
            id,
            name: record[1].to_string(),
            status,
            timestamp,
        });
        rows_read += 1;
    }

    debug!("File {}: {} rows", path.display(), rows_read);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
