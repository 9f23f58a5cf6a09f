// src/services/classifier.rs

//! Calendar page classifier.
//!
//! Turns a month's appointment page into a [`MonthReport`]. The page lists
//! days inside `ul.dates` containers; each day is an `<a>` whose `href`
//! carries `date=<day>` and which wraps an `<li>` status indicator. The
//! indicator's class list tells whether the day is booked, closed, not yet
//! opened, or bookable.
//!
//! Classification never fails: a malformed cell is skipped and a page
//! without any `ul.dates` yields an all-zero report.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CalendarEntry, MonthReport};

const CONTAINER_SELECTOR: &str = "ul.dates";
const INDICATOR_SELECTOR: &str = "li";
const LINK_SELECTOR: &str = "a[href]";
const PLACEHOLDER_MARKER: &str = "date=0";
const DAY_PATTERN: &str = r"date=(\d+)";
const MAX_DAY: u32 = 31;

/// Parsed day reference of a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayRef {
    /// `date=<n>` with 1 <= n <= 31
    Day(u32),
    /// No `date=` in the link
    Absent,
    /// Link contains `date=0`, or the day is out of range
    Invalid,
}

/// Service that classifies calendar markup.
pub struct CalendarClassifier {
    container_sel: Selector,
    indicator_sel: Selector,
    link_sel: Selector,
    day_re: Regex,
}

impl CalendarClassifier {
    /// Create a classifier for the calendar layout.
    pub fn new() -> Result<Self> {
        Ok(Self {
            container_sel: Self::parse_selector(CONTAINER_SELECTOR)?,
            indicator_sel: Self::parse_selector(INDICATOR_SELECTOR)?,
            link_sel: Self::parse_selector(LINK_SELECTOR)?,
            day_re: Regex::new(DAY_PATTERN)
                .map_err(|e| AppError::config(format!("invalid day pattern: {e}")))?,
        })
    }

    /// Classify one month's page and aggregate the result.
    pub fn classify(&self, month: u32, year: i32, html: &str) -> MonthReport {
        let entries = self.extract_entries(html);
        let report = MonthReport::from_entries(month, year, &entries);
        log::debug!(
            "Classified {}/{}: {} entries, {} open",
            month,
            year,
            report.status_counts.total(),
            report.open_days.len()
        );
        report
    }

    /// Scan every retained calendar cell in document order.
    pub fn extract_entries(&self, html: &str) -> Vec<CalendarEntry> {
        let document = Html::parse_document(html);

        document
            .select(&self.container_sel)
            .flat_map(|list| self.cells(list))
            .filter_map(|(href, indicator)| self.parse_entry(href, indicator))
            .collect()
    }

    /// Pair each day link with its status indicator, in document order.
    ///
    /// The link normally wraps the indicator. When a page leaves `</li>`
    /// unclosed, the HTML parser moves the link inside the `li` instead, so
    /// a `li` outside any link takes the first `a[href]` it contains.
    fn cells<'a>(&self, list: ElementRef<'a>) -> Vec<(&'a str, ElementRef<'a>)> {
        list.descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| match el.value().name() {
                "a" => {
                    let href = el.value().attr("href").unwrap_or("");
                    let indicator = el.select(&self.indicator_sel).next();
                    if indicator.is_none() {
                        log::debug!("Skipping calendar cell without indicator: {:?}", href);
                    }
                    indicator.map(|li| (href, li))
                }
                "li" if !Self::inside_link(el, list) => el
                    .select(&self.link_sel)
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .map(|href| (href, el)),
                _ => None,
            })
            .collect()
    }

    fn inside_link(el: ElementRef<'_>, list: ElementRef<'_>) -> bool {
        el.ancestors()
            .take_while(|node| node.id() != list.id())
            .filter_map(ElementRef::wrap)
            .any(|e| e.value().name() == "a")
    }

    fn parse_entry(&self, href: &str, indicator: ElementRef<'_>) -> Option<CalendarEntry> {
        let day = match self.parse_day(href) {
            DayRef::Day(day) => Some(day),
            DayRef::Absent => None,
            DayRef::Invalid => {
                log::debug!("Skipping calendar cell with href {:?}", href);
                return None;
            }
        };

        let token = indicator.value().classes().collect::<Vec<_>>().join(" ");
        Some(CalendarEntry::new(day, token))
    }

    fn parse_day(&self, href: &str) -> DayRef {
        // Placeholder cells; also catches zero-padded days such as `date=05`.
        if href.contains(PLACEHOLDER_MARKER) {
            return DayRef::Invalid;
        }

        let Some(caps) = self.day_re.captures(href) else {
            return DayRef::Absent;
        };

        // Digit runs too long for u32 are out of range as well.
        match caps[1].parse::<u32>() {
            Ok(day) if (1..=MAX_DAY).contains(&day) => DayRef::Day(day),
            _ => DayRef::Invalid,
        }
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Status, StatusCounts};

    fn page(cells: &str) -> String {
        format!(
            r#"<html><body>
                <div class="calendar">
                  <ul class="days"><li>Mon</li><li>Tue</li></ul>
                  <ul class="dates">{cells}</ul>
                </div>
              </body></html>"#
        )
    }

    fn cell(href: &str, class: &str) -> String {
        format!(r#"<a href="{href}"><li class="{class}">x</li></a>"#)
    }

    fn classifier() -> CalendarClassifier {
        CalendarClassifier::new().unwrap()
    }

    #[test]
    fn test_four_statuses() {
        let html = page(&[
            cell("appointment.php?date=5", "a_full"),
            cell("appointment.php?date=6", ""),
            cell("appointment.php?date=7", "a_disable"),
            cell("appointment.php?date=8", "a_avail"),
        ]
        .concat());

        let report = classifier().classify(9, 2025, &html);
        assert_eq!(
            report.status_counts,
            StatusCounts {
                booked_closed: 1,
                no_service: 1,
                not_opened: 1,
                open: 1,
            }
        );
        assert_eq!(report.open_days, vec![8]);
        assert_eq!(report.month_name, "September");
        assert!(!report.is_error());
    }

    #[test]
    fn test_placeholder_and_overflow_days_are_skipped() {
        let html = page(&[
            cell("?date=0", "a_avail"),
            cell("?date=32", "a_avail"),
            cell("?date=99999999999999999999", "a_avail"),
            cell("?date=31", "a_avail"),
        ]
        .concat());

        let report = classifier().classify(10, 2025, &html);
        assert_eq!(report.status_counts.total(), 1);
        assert_eq!(report.open_days, vec![31]);
    }

    #[test]
    fn test_cell_without_day_is_counted() {
        let html = page(&[cell("#", "a_avail"), cell("#", "a_full")].concat());

        let entries = classifier().extract_entries(&html);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.day.is_none()));

        let report = classifier().classify(10, 2025, &html);
        assert_eq!(report.status_counts.open, 1);
        assert!(report.open_days.is_empty());
    }

    #[test]
    fn test_cell_without_indicator_is_skipped() {
        let html = page(&[
            r#"<a href="?date=3">3</a>"#.to_string(),
            cell("?date=4", "a_disable"),
        ]
        .concat());

        let entries = classifier().extract_entries(&html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].day, Some(4));
        assert_eq!(entries[0].status, Status::NotOpened);
    }

    #[test]
    fn test_missing_class_attribute_is_no_service() {
        let html = page(r#"<a href="?date=2"><li>2</li></a>"#);
        let entries = classifier().extract_entries(&html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].class_token, "");
        assert_eq!(entries[0].status, Status::NoService);
    }

    #[test]
    fn test_multiple_classes_keep_precedence() {
        let html = page(&[
            cell("?date=1", "a_disable a_full"),
            cell("?date=2", " end "),
            cell("?date=3", "a_disable today"),
        ]
        .concat());

        let statuses: Vec<_> = classifier()
            .extract_entries(&html)
            .into_iter()
            .map(|e| e.status)
            .collect();
        assert_eq!(
            statuses,
            vec![Status::BookedClosed, Status::NoService, Status::NotOpened]
        );
    }

    #[test]
    fn test_duplicate_open_days_are_kept_in_scan_order() {
        let html = page(&[
            cell("?date=12", "a_avail"),
            cell("?date=3", "a_avail"),
            cell("?date=12", "a_avail"),
        ]
        .concat());

        let report = classifier().classify(11, 2025, &html);
        assert_eq!(report.open_days, vec![12, 3, 12]);
        assert_eq!(report.open_days.len(), report.status_counts.open);
    }

    #[test]
    fn test_links_outside_dates_list_are_ignored() {
        let html = format!(
            r#"<ul class="nav">{}</ul>{}"#,
            cell("?date=4", "a_avail"),
            page(&cell("?date=5", "a_full"))
        );

        let report = classifier().classify(12, 2025, &html);
        assert_eq!(report.status_counts.total(), 1);
        assert_eq!(report.status_counts.booked_closed, 1);
    }

    #[test]
    fn test_several_dates_lists_are_combined() {
        let html = format!(
            "{}{}",
            page(&cell("?date=1", "a_avail")),
            page(&cell("?date=2", "a_avail"))
        );
        let report = classifier().classify(8, 2025, &html);
        assert_eq!(report.open_days, vec![1, 2]);
    }

    #[test]
    fn test_unclosed_indicator_cells_are_counted() {
        let html = r#"<ul class="dates"><a href="?date=1"><li class="a_full">1</a><a href="?date=2"><li class="a_avail">2</a></ul>"#;

        let entries = classifier().extract_entries(html);
        let cells: Vec<_> = entries.iter().map(|e| (e.day, e.status)).collect();
        assert_eq!(
            cells,
            vec![(Some(1), Status::BookedClosed), (Some(2), Status::Open)]
        );

        let report = classifier().classify(9, 2025, html);
        assert_eq!(report.open_days, vec![2]);
    }

    #[test]
    fn test_plain_list_items_without_link_are_ignored() {
        let html = page(&format!(r#"<li class="a_avail">9</li>{}"#, cell("?date=10", "a_avail")));
        let report = classifier().classify(9, 2025, &html);
        assert_eq!(report.status_counts.total(), 1);
        assert_eq!(report.open_days, vec![10]);
    }

    #[test]
    fn test_any_link_containing_date_zero_is_skipped() {
        let html = page(&[
            cell("?date=05", "a_avail"),
            cell("?update=0&amp;date=7", "a_avail"),
            cell("?date=10", "a_avail"),
            cell("?date=20", "a_avail"),
        ]
        .concat());

        let report = classifier().classify(10, 2025, &html);
        assert_eq!(report.status_counts.total(), 2);
        assert_eq!(report.open_days, vec![10, 20]);
    }

    #[test]
    fn test_page_without_calendar_yields_zero_counts() {
        for html in ["", "<html><body><p>Maintenance</p></body></html>", "<ul class=\"dates\"><a"] {
            let report = classifier().classify(8, 2025, html);
            assert_eq!(report.status_counts.total(), 0);
            assert!(report.open_days.is_empty());
            assert!(!report.is_error());
        }
    }
}
