use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Dutyboard.
#[derive(Error, Debug)]
pub enum DutyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row's timestamp string did not match any recognised format.
    #[error("{path}:{line}: invalid timestamp \"{value}\"")]
    TimestampParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A row's status column is not one of the two recognised values.
    #[error("{path}:{line}: unrecognised duty status \"{value}\"")]
    StatusParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A row's id column is not an unsigned integer.
    #[error("{path}:{line}: invalid record id \"{value}\"")]
    IdParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A row does not carry the expected four columns.
    #[error("{path}:{line}: expected 4 columns, found {found}")]
    ColumnCount {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    /// The expected data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No duty-log CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for CSV-layer errors that do not map to a row variant.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dutyboard crates.
pub type Result<T> = std::result::Result<T, DutyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DutyError::FileRead {
            path: PathBuf::from("/some/duty_log.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/duty_log.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = DutyError::TimestampParse {
            path: PathBuf::from("log.csv"),
            line: 7,
            value: "not-a-timestamp".to_string(),
        };
        assert_eq!(err.to_string(), "log.csv:7: invalid timestamp \"not-a-timestamp\"");
    }

    #[test]
    fn test_error_display_status_parse() {
        let err = DutyError::StatusParse {
            path: PathBuf::from("log.csv"),
            line: 3,
            value: "OnDuty".to_string(),
        };
        assert_eq!(err.to_string(), "log.csv:3: unrecognised duty status \"OnDuty\"");
    }

    #[test]
    fn test_error_display_id_parse() {
        let err = DutyError::IdParse {
            path: PathBuf::from("log.csv"),
            line: 12,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "log.csv:12: invalid record id \"abc\"");
    }

    #[test]
    fn test_error_display_column_count() {
        let err = DutyError::ColumnCount {
            path: PathBuf::from("log.csv"),
            line: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "log.csv:2: expected 4 columns, found 3");
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = DutyError::DataPathNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data path not found: /missing/dir");
    }

    #[test]
    fn test_error_display_no_data_files() {
        let err = DutyError::NoDataFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DutyError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
