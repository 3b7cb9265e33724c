use std::path::PathBuf;

use duty_core::error::{DutyError, Result};
use duty_core::settings::Settings;
use duty_data::reader::find_duty_files;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.dutyboard/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.dutyboard/`
/// - `~/.dutyboard/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let board_dir = home.join(".dutyboard");
    std::fs::create_dir_all(&board_dir)?;
    std::fs::create_dir_all(board_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    // Map Python-style log-level names to tracing level names.
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Input discovery ────────────────────────────────────────────────────────────

/// Resolve the duty-log files to analyse.
///
/// Explicit positional files win and are sorted by file name so that
/// multi-file inputs concatenate in a predictable order. Otherwise the
/// `--data-path` directory (or the current directory) is scanned for
/// `.csv` files; a missing directory or an empty scan is an error.
pub fn resolve_input_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    if !settings.files.is_empty() {
        let mut files = settings.files.clone();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        return Ok(files);
    }

    let dir = settings
        .data_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    if !dir.exists() {
        return Err(DutyError::DataPathNotFound(dir));
    }

    let files = find_duty_files(&dir);
    if files.is_empty() {
        return Err(DutyError::NoDataFiles(dir));
    }

    Ok(files)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use std::io::Write;
    use tempfile::TempDir;

    fn settings_from(args: &[&str]) -> Settings {
        Settings::parse_from(args)
    }

    fn write_csv(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "1,Alice,DutyOn,2024-01-01 08:00:00").unwrap();
        path
    }

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let board_dir = tmp.path().join(".dutyboard");
        assert!(board_dir.is_dir(), ".dutyboard dir must exist");
        assert!(board_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_resolve_input_files ──────────────────────────────────────────────

    #[test]
    fn test_explicit_files_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        let b = write_csv(tmp.path(), "b.csv");
        let a = write_csv(tmp.path(), "a.csv");

        let settings = settings_from(&[
            "dutyboard",
            b.to_str().unwrap(),
            a.to_str().unwrap(),
        ]);
        let files = resolve_input_files(&settings).unwrap();

        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_data_path_discovery() {
        let tmp = TempDir::new().unwrap();
        write_csv(tmp.path(), "log.csv");

        let settings = settings_from(&["dutyboard", "--data-path", tmp.path().to_str().unwrap()]);
        let files = resolve_input_files(&settings).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_data_path_errors() {
        let settings = settings_from(&["dutyboard", "--data-path", "/missing/dutyboard-test-dir"]);
        let err = resolve_input_files(&settings).unwrap_err();
        assert!(matches!(err, DutyError::DataPathNotFound(_)));
    }

    #[test]
    fn test_empty_data_path_errors() {
        let tmp = TempDir::new().unwrap();

        let settings = settings_from(&["dutyboard", "--data-path", tmp.path().to_str().unwrap()]);
        let err = resolve_input_files(&settings).unwrap_err();
        assert!(matches!(err, DutyError::NoDataFiles(_)));
    }
}
