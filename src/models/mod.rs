// src/models/mod.rs

//! Domain models for the slot watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod calendar;
mod config;
mod report;

// Re-export all public types
pub use calendar::{CalendarEntry, Status, normalize_token};
pub use config::{AlertConfig, Config, HttpConfig, MonthTarget, ScheduleConfig, TargetConfig};
pub use report::{MonthReport, RunResult, StatusCounts, month_name};
