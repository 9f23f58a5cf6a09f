// src/lib.rs

//! Appointment slot watcher library.
//!
//! Fetches month pages of an appointment calendar, classifies each day by
//! its status colour and raises an alert when a bookable day shows up.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
