use crate::config::PageSpeedConfig;
use crate::error::{AuditError, UpstreamFailure};
use crate::models::{AuditResult, CategoryScoreSet, Strategy};
use crate::services::site_audit_service::compute::score_set;
use crate::services::site_audit_service::pagespeed::PageSpeedClient;
use crate::utils::normalize_url;
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Hooks fired as an audit reaches its milestones.
pub trait AuditObserver: Send + Sync {
    fn requests_started(&self) {}
    fn strategy_scored(&self, _strategy: Strategy) {}
}

impl AuditObserver for () {}

/// A validated audit target, paired with the credential it will run under.
#[derive(Clone)]
pub struct AuditRequest {
    pub url: String,
    api_key: String,
}

impl fmt::Debug for AuditRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditRequest")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AuditService {
    client: PageSpeedClient,
    config: PageSpeedConfig,
}

impl AuditService {
    pub fn new(http: Client, config: PageSpeedConfig) -> Self {
        Self {
            client: PageSpeedClient::new(http, config.clone()),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Normalizes `raw_url` and checks the credential. Nothing leaves the
    /// process before both pass.
    pub fn prepare(&self, raw_url: &str) -> Result<AuditRequest, AuditError> {
        let url = normalize_url(raw_url)?;
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| AuditError::Config("API key not configured".to_string()))?;
        Ok(AuditRequest { url, api_key })
    }

    /// Runs mobile and desktop concurrently. Either failing fails the whole
    /// audit; no partial result is ever returned.
    pub async fn run(
        &self,
        request: &AuditRequest,
        observer: &dyn AuditObserver,
    ) -> Result<AuditResult, AuditError> {
        let url = request.url.as_str();
        let started = Instant::now();
        info!(%url, "starting pagespeed analysis");
        observer.requests_started();

        let both = async {
            futures::try_join!(
                self.run_strategy(request, Strategy::Mobile, observer),
                self.run_strategy(request, Strategy::Desktop, observer),
            )
        };
        let (mobile, desktop) = tokio::time::timeout(self.config.total_timeout, both)
            .await
            .map_err(|_| UpstreamFailure::Timeout)??;

        info!(
            %url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pagespeed analysis completed"
        );

        Ok(AuditResult {
            url: url.to_string(),
            mobile,
            desktop,
            analyzed_at: Utc::now().to_rfc3339(),
        })
    }

    async fn run_strategy(
        &self,
        request: &AuditRequest,
        strategy: Strategy,
        observer: &dyn AuditObserver,
    ) -> Result<CategoryScoreSet, UpstreamFailure> {
        let report = self
            .client
            .run(&request.api_key, &request.url, strategy)
            .await?;
        let scores = score_set(&report, self.config.include_pwa)?;
        observer.strategy_scored(strategy);
        Ok(scores)
    }
}
