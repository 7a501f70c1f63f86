use crate::config::PageSpeedConfig;
use crate::error::UpstreamFailure;
use crate::models::{PageSpeedResponse, Strategy};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// One-strategy calls against the PageSpeed Insights `runPagespeed` endpoint.
#[derive(Clone)]
pub struct PageSpeedClient {
    http: Client,
    config: PageSpeedConfig,
}

impl PageSpeedClient {
    pub fn new(http: Client, config: PageSpeedConfig) -> Self {
        Self { http, config }
    }

    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories = BASE_CATEGORIES.to_vec();
        if self.config.include_pwa {
            categories.push("pwa");
        }
        categories
    }

    /// Runs one strategy, retrying transient failures up to `max_retries`
    /// extra attempts.
    pub async fn run(
        &self,
        api_key: &str,
        url: &str,
        strategy: Strategy,
    ) -> Result<PageSpeedResponse, UpstreamFailure> {
        let mut attempt: u32 = 0;
        loop {
            match self.attempt(api_key, url, strategy).await {
                Ok(report) => return Ok(report),
                Err(failure) if failure.is_transient() && attempt < self.config.max_retries => {
                    let delay = backoff_delay(&self.config, &failure, attempt);
                    warn!(
                        %url,
                        %strategy,
                        attempt = attempt + 1,
                        error = %failure,
                        delay_ms = delay.as_millis() as u64,
                        "pagespeed attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(UpstreamFailure::Status(429)) => return Err(UpstreamFailure::RateLimited),
                Err(failure) => return Err(failure),
            }
        }
    }

    async fn attempt(
        &self,
        api_key: &str,
        url: &str,
        strategy: Strategy,
    ) -> Result<PageSpeedResponse, UpstreamFailure> {
        let mut query: Vec<(&str, &str)> = vec![
            ("url", url),
            ("key", api_key),
            ("strategy", strategy.as_str()),
        ];
        query.extend(self.categories().into_iter().map(|c| ("category", c)));

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&query)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(%url, %strategy, bytes = body.len(), "pagespeed response received");
        serde_json::from_slice::<PageSpeedResponse>(&body)
            .map_err(|_| UpstreamFailure::InvalidResponse)
    }
}

/// Exponential backoff; rate limits back off from their own, longer base.
pub fn backoff_delay(config: &PageSpeedConfig, failure: &UpstreamFailure, attempt: u32) -> Duration {
    let base = match failure {
        UpstreamFailure::Status(429) | UpstreamFailure::RateLimited => config.rate_limit_backoff,
        _ => config.retry_backoff,
    };
    base.saturating_mul(2u32.saturating_pow(attempt))
}
