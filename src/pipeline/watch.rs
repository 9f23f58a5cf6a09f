// src/pipeline/watch.rs

//! Refresh loop: check, report, alert, count down, repeat.

use std::io::Write;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::error::Result;
use crate::models::{Config, RunResult};
use crate::services::{Alerter, CalendarClassifier, MonthFetcher, Reporter};

use super::check::run_check;

/// Drives the check loop and owns its collaborators.
pub struct Watcher<W: Write> {
    config: Config,
    fetcher: Box<dyn MonthFetcher>,
    classifier: CalendarClassifier,
    reporter: Reporter,
    alerter: Alerter,
    out: W,
}

impl<W: Write> Watcher<W> {
    pub fn new(
        config: Config,
        fetcher: Box<dyn MonthFetcher>,
        alerter: Alerter,
        out: W,
    ) -> Result<Self> {
        let reporter = Reporter::new(config.target.clone());
        Ok(Self {
            config,
            fetcher,
            classifier: CalendarClassifier::new()?,
            reporter,
            alerter,
            out,
        })
    }

    /// Run forever. Only terminal I/O errors end the loop.
    pub async fn run(&mut self) -> Result<()> {
        let interval = Duration::from_secs(self.config.schedule.interval_secs);
        loop {
            self.tick().await?;
            self.countdown(interval).await?;
        }
    }

    /// One iteration without the wait: check, redraw, alert if needed.
    pub async fn tick(&mut self) -> Result<RunResult> {
        let result = run_check(&self.config.months, self.fetcher.as_ref(), &self.classifier).await;

        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.reporter.render(&result, &mut self.out)?;
        self.out.flush()?;

        if result.any_open_found {
            let (alerter, out) = (&self.alerter, &mut self.out);
            let outcome = tokio::task::block_in_place(|| alerter.alert(out));
            log::debug!("Alert finished: {:?}", outcome);
        }
        Ok(result)
    }

    async fn countdown(&mut self, interval: Duration) -> Result<()> {
        writeln!(self.out, "\nNext refresh in:")?;
        for remaining in (1..=interval.as_secs()).rev() {
            write!(self.out, "\r{}", format_countdown(remaining))?;
            self.out.flush()?;
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Output sink, mainly for inspection in tests.
    pub fn output(&self) -> &W {
        &self.out
    }
}

/// `MM:SS` for a number of seconds.
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::MonthTarget;
    use crate::services::{CommandPlayer, NoopAcknowledger};

    struct OpenDayFetcher;

    #[async_trait]
    impl MonthFetcher for OpenDayFetcher {
        async fn fetch_month(&self, month: u32, year: i32) -> Result<String> {
            if month == 9 {
                return Err(AppError::fetch(month, year, "HTTP status 503"));
            }
            Ok(r#"<ul class="dates"><a href="?date=14"><li class="a_avail">14</li></a></ul>"#.into())
        }
    }

    fn watcher() -> Watcher<Vec<u8>> {
        let mut config = Config::default();
        config.months = vec![MonthTarget::new(8, 2025), MonthTarget::new(9, 2025)];

        let alerter = Alerter::new(
            "no-such-dir/alert.mp3",
            Box::new(CommandPlayer::new(config.alert.player.clone())),
            Box::new(NoopAcknowledger),
        );
        Watcher::new(config, Box::new(OpenDayFetcher), alerter, Vec::new()).unwrap()
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(9), "00:09");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_tick_reports_and_alerts_without_blocking() {
        let mut watcher = watcher();

        let result = watcher.tick().await.unwrap();
        assert!(result.any_open_found);
        assert!(result.reports[1].is_error());

        let output = String::from_utf8_lossy(watcher.output()).into_owned();
        assert!(output.starts_with("\x1b[2J\x1b[1;1H"));
        assert!(output.contains("| August "));
        assert!(output.contains("Error"));
        assert!(output.contains("Month: August, Dates: 14"));
        assert!(output.contains("Alert sound file not found."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_every_second() {
        let mut watcher = watcher();
        let started = tokio::time::Instant::now();

        watcher.countdown(Duration::from_secs(2)).await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(2));
        let output = String::from_utf8_lossy(watcher.output()).into_owned();
        assert_eq!(output, "\nNext refresh in:\n\r00:02\r00:01\n");
    }
}
