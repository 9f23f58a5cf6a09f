// src/services/fetcher.rs

//! Month page fetcher.
//!
//! Fetches the appointment page for a single month. Failures are returned
//! as [`AppError::Fetch`] so the caller can mark the month and move on.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{Config, TargetConfig};
use crate::utils::{http, url::month_url};

/// Source of month calendar pages.
#[async_trait]
pub trait MonthFetcher: Send + Sync {
    /// Fetch the raw markup for `month`/`year`.
    async fn fetch_month(&self, month: u32, year: i32) -> Result<String>;
}

/// Fetcher backed by the live appointment site.
pub struct HttpFetcher {
    client: Client,
    target: TargetConfig,
}

impl HttpFetcher {
    /// Create a fetcher from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        Ok(Self::with_client(client, config.target.clone()))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, target: TargetConfig) -> Self {
        Self { client, target }
    }
}

#[async_trait]
impl MonthFetcher for HttpFetcher {
    async fn fetch_month(&self, month: u32, year: i32) -> Result<String> {
        let url = month_url(&self.target, month, year)?;
        log::info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(month, year, e))?;

        response
            .text()
            .await
            .map_err(|e| AppError::fetch(month, year, e))
    }
}
