//! Main application state and TUI event loop for Dutyboard.
//!
//! [`App`] owns the theme, the active view and the schedule-view
//! selection, and drives the synchronous dashboard event loop on top of
//! a [`DataManager`]. The manager re-checks the input fileset
//! fingerprint on every tick, so edits to the duty logs show up on the
//! next redraw without restarting.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use duty_core::models::DayPresence;
use duty_data::analysis::AnalysisResult;
use duty_runtime::data_manager::DataManager;

use crate::activity_view;
use crate::schedule_view;
use crate::table_view::{self, DailyTotals, EmployeeTotals, HoursTotals};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Per-date activity table.
    Daily,
    /// Per-employee totals table.
    Employees,
    /// Per-employee work-hour statistics table.
    Hours,
    /// Single-employee schedule with N/A gaps.
    Schedule,
    /// Hour / weekday histograms.
    Activity,
}

impl ViewMode {
    /// Resolve a `--view` CLI string. Unknown names fall back to Daily.
    pub fn from_name(name: &str) -> Self {
        match name {
            "employees" => Self::Employees,
            "hours" => Self::Hours,
            "schedule" => Self::Schedule,
            "activity" => Self::Activity,
            _ => Self::Daily,
        }
    }

    /// The next view in Tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Employees,
            Self::Employees => Self::Hours,
            Self::Hours => Self::Schedule,
            Self::Schedule => Self::Activity,
            Self::Activity => Self::Daily,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Dutyboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Index into the employee list for the schedule view.
    pub selected_employee: usize,
    /// Employee requested via `--employee`, consumed on first render.
    preferred_employee: Option<String>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, view_mode: ViewMode, employee: Option<String>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            selected_employee: 0,
            preferred_employee: employee,
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard event loop until `q` / Ctrl+C.
    ///
    /// Key bindings: Tab cycles views, `1`–`5` jump directly, Up/Down
    /// switch the employee in the schedule view, `r` forces a data
    /// refresh through the manager.
    pub fn run(mut self, manager: &mut DataManager) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);
        let mut force_refresh = false;

        let result = loop {
            // Fingerprint-checked fetch: cheap when nothing changed.
            let data = match manager.get_data(force_refresh) {
                Ok(data) => data,
                Err(e) => break Err(io::Error::other(e)),
            };
            force_refresh = false;

            terminal.draw(|frame| self.render(frame, data))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Tab => self.view_mode = self.view_mode.next(),
                        KeyCode::Char('1') => self.view_mode = ViewMode::Daily,
                        KeyCode::Char('2') => self.view_mode = ViewMode::Employees,
                        KeyCode::Char('3') => self.view_mode = ViewMode::Hours,
                        KeyCode::Char('4') => self.view_mode = ViewMode::Schedule,
                        KeyCode::Char('5') => self.view_mode = ViewMode::Activity,
                        KeyCode::Char('r') | KeyCode::Char('R') => force_refresh = true,
                        KeyCode::Up => self.select_previous_employee(),
                        KeyCode::Down => self.select_next_employee(),
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Selection helpers ─────────────────────────────────────────────────────

    fn select_previous_employee(&mut self) {
        if self.view_mode == ViewMode::Schedule {
            self.selected_employee = self.selected_employee.saturating_sub(1);
        }
    }

    fn select_next_employee(&mut self) {
        if self.view_mode == ViewMode::Schedule {
            // Clamped against the employee count during render.
            self.selected_employee = self.selected_employee.saturating_add(1);
        }
    }

    /// Resolve `--employee` into an index and clamp the selection to the
    /// current employee list.
    fn resolve_selection(&mut self, data: &AnalysisResult) {
        if let Some(name) = self.preferred_employee.take() {
            if let Some(idx) = data.employees.iter().position(|e| e.name == name) {
                self.selected_employee = idx;
            }
        }
        if !data.employees.is_empty() {
            self.selected_employee = self.selected_employee.min(data.employees.len() - 1);
        } else {
            self.selected_employee = 0;
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current view into `frame`.
    fn render(&mut self, frame: &mut Frame, data: &AnalysisResult) {
        let area = frame.area();

        if data.events.is_empty() {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        }

        self.resolve_selection(data);

        match self.view_mode {
            ViewMode::Daily => {
                let totals = DailyTotals::from_rows(&data.daily);
                table_view::render_daily_view(frame, area, &data.daily, &totals, &self.theme);
            }
            ViewMode::Employees => {
                let totals = EmployeeTotals::from_rows(&data.employees);
                table_view::render_employee_view(
                    frame,
                    area,
                    &data.employees,
                    &totals,
                    &self.theme,
                );
            }
            ViewMode::Hours => {
                let totals = HoursTotals::from_rows(&data.employee_hours);
                table_view::render_hours_view(
                    frame,
                    area,
                    &data.employee_hours,
                    &totals,
                    &self.theme,
                );
            }
            ViewMode::Schedule => {
                let employee = &data.employees[self.selected_employee].name;
                let days: Vec<&DayPresence> = data
                    .presence
                    .iter()
                    .filter(|p| &p.name == employee)
                    .collect();
                schedule_view::render_schedule_view(
                    frame,
                    area,
                    employee,
                    &days,
                    (self.selected_employee + 1, data.employees.len()),
                    &self.theme,
                );
            }
            ViewMode::Activity => {
                activity_view::render_activity_view(
                    frame,
                    area,
                    &data.hourly,
                    &data.weekday,
                    &self.theme,
                );
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
