// src/services/reporter.rs

//! Text rendering of a check run.
//!
//! Output is a grid table with one row per month, followed by deep links
//! and day lists for months that have open slots.

use std::io::{self, Write};

use crate::models::{MonthReport, RunResult, Status, TargetConfig};
use crate::utils::url::deep_link;

const ERROR_MARKER: &str = "Error";

/// Renders [`RunResult`]s for the terminal.
pub struct Reporter {
    target: TargetConfig,
}

impl Reporter {
    pub fn new(target: TargetConfig) -> Self {
        Self { target }
    }

    /// Write the table and the open-slot section.
    pub fn render(&self, result: &RunResult, out: &mut impl Write) -> io::Result<()> {
        out.write_all(render_table(&result.reports).as_bytes())?;
        writeln!(
            out,
            "Last checked: {}",
            result.checked_at.format("%Y-%m-%d %H:%M:%S")
        )?;

        if !result.any_open_found {
            writeln!(out, "\nNo green slots found.")?;
            return Ok(());
        }

        writeln!(out, "\nGreen slot available! Please check the embassy website.")?;
        writeln!(out, "\nGreen slots found:")?;
        for report in result.open_reports() {
            match deep_link(&self.target, report.month, report.year) {
                Ok(link) => writeln!(out, "Month: {}, Link: {}", report.month_name, link)?,
                Err(e) => log::warn!("Cannot build link for {}: {}", report.month_name, e),
            }
        }
        for report in result.open_reports() {
            writeln!(
                out,
                "Month: {}, Dates: {}",
                report.month_name,
                join_days(&report.open_days)
            )?;
        }
        Ok(())
    }
}

/// Render month reports as a grid table.
pub fn render_table(reports: &[MonthReport]) -> String {
    let headers: Vec<String> = std::iter::once("Month")
        .chain(Status::ALL.iter().map(Status::label))
        .map(String::from)
        .collect();
    let rows: Vec<Vec<String>> = reports.iter().map(table_row).collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut table = String::new();
    table.push_str(&border(&widths, '-'));
    table.push_str(&line(&headers, &widths));
    table.push_str(&border(&widths, '='));
    for row in &rows {
        table.push_str(&line(row, &widths));
        table.push_str(&border(&widths, '-'));
    }
    table
}

fn table_row(report: &MonthReport) -> Vec<String> {
    let mut row = vec![report.month_name.clone()];
    row.extend(Status::ALL.iter().map(|status| {
        if report.is_error() {
            ERROR_MARKER.to_string()
        } else {
            report.status_counts.get(*status).to_string()
        }
    }));
    row
}

fn border(widths: &[usize], fill: char) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.extend(std::iter::repeat_n(fill, w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, (cell, &w)) in cells.iter().zip(widths).enumerate() {
        // Month names left, counts right.
        if i == 0 {
            s.push_str(&format!(" {cell:<w$} |"));
        } else {
            s.push_str(&format!(" {cell:>w$} |"));
        }
    }
    s.push('\n');
    s
}

fn join_days(days: &[u32]) -> String {
    days.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
