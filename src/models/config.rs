//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Calendar page location and fixed query parameters
    #[serde(default)]
    pub target: TargetConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Refresh loop settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Audible alert settings
    #[serde(default)]
    pub alert: AlertConfig,

    /// Months to poll, in display order
    #[serde(default = "defaults::months")]
    pub months: Vec<MonthTarget>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.target.base_url)
            .map_err(|e| AppError::validation(format!("target.base_url is invalid: {e}")))?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.schedule.interval_secs == 0 {
            return Err(AppError::validation("schedule.interval_secs must be > 0"));
        }
        if self.alert.player.is_empty() {
            return Err(AppError::validation("alert.player is empty"));
        }
        if self.months.is_empty() {
            return Err(AppError::validation("No months defined"));
        }
        if let Some(bad) = self.months.iter().find(|m| !(1..=12).contains(&m.month)) {
            return Err(AppError::validation(format!(
                "month {} is outside 1-12",
                bad.month
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            http: HttpConfig::default(),
            schedule: ScheduleConfig::default(),
            alert: AlertConfig::default(),
            months: defaults::months(),
        }
    }
}

/// Calendar page location and the query parameters every request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Appointment page URL without query
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// `apttype` query parameter
    #[serde(default = "defaults::apt_type")]
    pub apt_type: String,

    /// `locationid` query parameter
    #[serde(default = "defaults::location_id")]
    pub location_id: String,

    /// `serviceid` query parameter
    #[serde(default = "defaults::service_id")]
    pub service_id: String,

    /// Fragment appended to deep links
    #[serde(default = "defaults::link_anchor")]
    pub link_anchor: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            apt_type: defaults::apt_type(),
            location_id: defaults::location_id(),
            service_id: defaults::service_id(),
            link_anchor: defaults::link_anchor(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Refresh loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between two checks
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
        }
    }
}

/// Audible alert settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Sound file played on loop while an alert is pending
    #[serde(default = "defaults::sound_path")]
    pub sound_path: String,

    /// Player program and arguments; `{path}` is replaced by `sound_path`
    #[serde(default = "defaults::player")]
    pub player: Vec<String>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            sound_path: defaults::sound_path(),
            player: defaults::player(),
        }
    }
}

/// A month to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTarget {
    /// Month number (1-12)
    pub month: u32,

    /// Four-digit year
    #[serde(default = "defaults::year")]
    pub year: i32,
}

impl MonthTarget {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }
}

mod defaults {
    use super::MonthTarget;

    // Target defaults
    pub fn base_url() -> String {
        "https://www.indianembassynetherlands.gov.in/apt/appointment.php".into()
    }
    pub fn apt_type() -> String {
        "Submission".into()
    }
    pub fn location_id() -> String {
        "2".into()
    }
    pub fn service_id() -> String {
        "2".into()
    }
    pub fn link_anchor() -> String {
        "dw".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; slot-watch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        20
    }

    // Schedule defaults
    pub fn interval() -> u64 {
        300
    }

    // Alert defaults
    pub fn sound_path() -> String {
        "alert.mp3".into()
    }
    pub fn player() -> Vec<String> {
        ["mpg123", "--quiet", "--loop", "-1", "{path}"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // Month defaults
    pub fn year() -> i32 {
        2025
    }
    pub fn months() -> Vec<MonthTarget> {
        (8..=12).map(|m| MonthTarget::new(m, year())).collect()
    }
}
