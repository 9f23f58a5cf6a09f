//! Service layer for the slot watcher.
//!
//! This module contains the business logic for:
//! - Calendar classification (`CalendarClassifier`)
//! - Month page fetching (`MonthFetcher`, `HttpFetcher`)
//! - Terminal reporting (`Reporter`)
//! - Operator alerts (`Alerter`)

mod alerter;
mod classifier;
mod fetcher;
mod reporter;

pub use alerter::{
    Acknowledger, AlertOutcome, Alerter, CommandPlayer, NoopAcknowledger, Playback, SoundPlayer,
    TerminalAcknowledger,
};
pub use classifier::CalendarClassifier;
pub use fetcher::{HttpFetcher, MonthFetcher};
pub use reporter::{Reporter, render_table};
