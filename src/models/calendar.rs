// src/models/calendar.rs

//! Calendar day cells and their availability status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Availability of a single calendar day, inferred from its class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    /// Red: every slot already taken
    BookedClosed,
    /// Red: no service offered that day
    NoService,
    /// Grey: booking has not opened yet
    NotOpened,
    /// Green: bookable
    Open,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 4] = [
        Status::BookedClosed,
        Status::NoService,
        Status::NotOpened,
        Status::Open,
    ];

    /// Column header used in the summary table.
    pub fn label(&self) -> &'static str {
        match self {
            Status::BookedClosed => "RED-Booked",
            Status::NoService => "RED-NoService",
            Status::NotOpened => "Grey-NotOpened",
            Status::Open => "Green-Open",
        }
    }

    /// Classify a class token.
    ///
    /// Rules are checked in order and the first match wins, since one
    /// token may carry several class identifiers at once:
    ///
    /// 1. contains `a_full` → [`Status::BookedClosed`]
    /// 2. empty or `end` → [`Status::NoService`]
    /// 3. contains `a_disable` → [`Status::NotOpened`]
    /// 4. anything else → [`Status::Open`]
    ///
    /// The token is whitespace-normalized first, so `" end "` and `"end"`
    /// are the same token.
    pub fn from_class_token(token: &str) -> Self {
        let token = normalize_token(token);

        if token.contains("a_full") {
            Status::BookedClosed
        } else if token.is_empty() || token == "end" {
            Status::NoService
        } else if token.contains("a_disable") {
            Status::NotOpened
        } else {
            Status::Open
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn normalize_token(token: &str) -> String {
    token.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One clickable day cell scanned from a month page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    /// Day of month, when the link carries one
    pub day: Option<u32>,

    /// Normalized class token of the status indicator
    pub class_token: String,

    /// Status derived from `class_token`
    pub status: Status,
}

impl CalendarEntry {
    /// Build an entry and classify it.
    pub fn new(day: Option<u32>, class_token: impl AsRef<str>) -> Self {
        let class_token = normalize_token(class_token.as_ref());
        let status = Status::from_class_token(&class_token);
        Self {
            day,
            class_token,
            status,
        }
    }

    /// Whether this day is bookable.
    pub fn is_open(&self) -> bool {
        self.status == Status::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_wins_over_disable() {
        assert_eq!(
            Status::from_class_token("a_disable a_full"),
            Status::BookedClosed
        );
        assert_eq!(
            Status::from_class_token("a_full a_disable"),
            Status::BookedClosed
        );
    }

    #[test]
    fn test_no_service_tokens() {
        for token in ["", " ", "end", " end ", "\tend\n"] {
            assert_eq!(Status::from_class_token(token), Status::NoService, "{token:?}");
        }
    }

    #[test]
    fn test_end_with_other_classes_is_not_no_service() {
        assert_eq!(Status::from_class_token("end a_disable"), Status::NotOpened);
        assert_eq!(Status::from_class_token("end today"), Status::Open);
    }

    #[test]
    fn test_disable_and_open() {
        assert_eq!(Status::from_class_token("a_disable"), Status::NotOpened);
        assert_eq!(Status::from_class_token("a_avail"), Status::Open);
    }

    #[test]
    fn test_entry_normalizes_token() {
        let entry = CalendarEntry::new(Some(3), "  a_disable   end ");
        assert_eq!(entry.class_token, "a_disable end");
        assert_eq!(entry.status, Status::NotOpened);
        assert!(!entry.is_open());
    }

    #[test]
    fn test_labels_in_display_order() {
        let labels: Vec<_> = Status::ALL.iter().map(Status::label).collect();
        assert_eq!(
            labels,
            ["RED-Booked", "RED-NoService", "Grey-NotOpened", "Green-Open"]
        );
    }
}
