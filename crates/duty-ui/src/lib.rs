//! Presentation layer for Dutyboard.
//!
//! Provides themes, the interactive terminal dashboard (aggregate
//! tables, per-employee schedule, activity histograms) and the static
//! HTML dashboard writer. Strictly read-only over analysis output.

pub mod activity_view;
pub mod app;
pub mod html;
pub mod schedule_view;
pub mod table_view;
pub mod themes;
