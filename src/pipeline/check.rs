// src/pipeline/check.rs

//! Single check pass over all configured months.

use crate::models::{MonthReport, MonthTarget, RunResult};
use crate::services::{CalendarClassifier, MonthFetcher};

/// Fetch and classify each month in order.
///
/// A month that fails to load is reported with an error marker; the
/// remaining months are still checked.
pub async fn run_check(
    months: &[MonthTarget],
    fetcher: &dyn MonthFetcher,
    classifier: &CalendarClassifier,
) -> RunResult {
    let mut reports = Vec::with_capacity(months.len());

    for target in months {
        let report = match fetcher.fetch_month(target.month, target.year).await {
            Ok(html) => classifier.classify(target.month, target.year, &html),
            Err(error) => {
                log::warn!("{}", error);
                MonthReport::failed(target.month, target.year, error.to_string())
            }
        };
        reports.push(report);
    }

    let result = RunResult::new(reports);
    log::info!(
        "Checked {} months: {} failed, open slots: {}",
        result.reports.len(),
        result.error_count(),
        if result.any_open_found { "yes" } else { "no" }
    );
    result
}
