mod bootstrap;

use anyhow::Result;
use duty_core::settings::Settings;
use duty_data::reports;
use duty_runtime::data_manager::DataManager;
use duty_ui::app::{App, ViewMode};
use duty_ui::html;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Dutyboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Timezone: {}",
        settings.view,
        settings.theme,
        settings.timezone
    );

    let files = bootstrap::resolve_input_files(&settings)?;
    tracing::info!("Analyzing {} duty-log file(s)", files.len());

    let mut manager = DataManager::new(files, settings.timezone.clone());

    // Export modes write their artifacts and exit without opening the TUI.
    let mut exported = false;

    if let Some(dir) = &settings.report_dir {
        let analysis = manager.get_data(false)?;
        let written = reports::write_all_reports(dir, analysis)?;
        for path in &written {
            println!("Created {}", path.display());
        }
        exported = true;
    }

    if let Some(path) = &settings.html {
        // Served from the fingerprint cache when the reports above already ran.
        let analysis = manager.get_data(false)?;
        html::write_dashboard(path, analysis)?;
        println!("Created {}", path.display());
        exported = true;
    }

    if exported {
        return Ok(());
    }

    let app = App::new(
        &settings.theme,
        ViewMode::from_name(&settings.view),
        settings.employee.clone(),
    );
    app.run(&mut manager)?;

    Ok(())
}
