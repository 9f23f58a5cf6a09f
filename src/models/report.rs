// src/models/report.rs

//! Per-month aggregation results and the outcome of one check run.

use chrono::{DateTime, Local, Month};
use serde::Serialize;

use super::calendar::{CalendarEntry, Status};

/// Number of scanned days per status. All four statuses are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub booked_closed: usize,
    pub no_service: usize,
    pub not_opened: usize,
    pub open: usize,
}

impl StatusCounts {
    /// Count for a single status.
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::BookedClosed => self.booked_closed,
            Status::NoService => self.no_service,
            Status::NotOpened => self.not_opened,
            Status::Open => self.open,
        }
    }

    /// Record one more day with the given status.
    pub fn increment(&mut self, status: Status) {
        match status {
            Status::BookedClosed => self.booked_closed += 1,
            Status::NoService => self.no_service += 1,
            Status::NotOpened => self.not_opened += 1,
            Status::Open => self.open += 1,
        }
    }

    /// Total number of counted days.
    pub fn total(&self) -> usize {
        Status::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Aggregated availability for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    /// Month number (1-12)
    pub month: u32,

    /// Four-digit year
    pub year: i32,

    /// English month name, e.g. "September"
    pub month_name: String,

    /// Days per status
    pub status_counts: StatusCounts,

    /// Open days in scan order, duplicates kept
    pub open_days: Vec<u32>,

    /// Fetch failure cause; counts are all zero when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MonthReport {
    /// Report with zero scanned entries.
    pub fn empty(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            month_name: month_name(month),
            status_counts: StatusCounts::default(),
            open_days: Vec::new(),
            error: None,
        }
    }

    /// Report for a month whose page could not be fetched.
    pub fn failed(month: u32, year: i32, cause: impl Into<String>) -> Self {
        Self {
            error: Some(cause.into()),
            ..Self::empty(month, year)
        }
    }

    /// Aggregate classified entries in scan order.
    pub fn from_entries<'a>(
        month: u32,
        year: i32,
        entries: impl IntoIterator<Item = &'a CalendarEntry>,
    ) -> Self {
        let mut report = Self::empty(month, year);
        for entry in entries {
            report.record(entry);
        }
        report
    }

    /// Add a single classified entry.
    pub fn record(&mut self, entry: &CalendarEntry) {
        if entry.is_open() {
            if let Some(day) = entry.day {
                self.open_days.push(day);
            }
        }
        self.status_counts.increment(entry.status);
    }

    /// Whether the page for this month failed to load.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether any bookable day was found.
    pub fn has_open_days(&self) -> bool {
        !self.open_days.is_empty()
    }
}

/// Outcome of one pass over all configured months.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// One report per configured month, in configuration order
    pub reports: Vec<MonthReport>,

    /// True if any report lists at least one open day
    pub any_open_found: bool,

    /// When the pass finished
    pub checked_at: DateTime<Local>,
}

impl RunResult {
    pub fn new(reports: Vec<MonthReport>) -> Self {
        let any_open_found = reports.iter().any(MonthReport::has_open_days);
        Self {
            reports,
            any_open_found,
            checked_at: Local::now(),
        }
    }

    /// Reports that list open days.
    pub fn open_reports(&self) -> impl Iterator<Item = &MonthReport> {
        self.reports.iter().filter(|r| r.has_open_days())
    }

    /// Number of months whose fetch failed.
    pub fn error_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_error()).count()
    }
}

/// English name for a month number, or the number itself when out of range.
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}
