//! # Rate Source
//!
//! Fetches the current SYP/USD rate from a remote feed.
//!
//! ## Provider Payload
//! ```text
//! GET {endpoint}
//! {
//!   "date": "2026-10-17",
//!   "usd": { "eur": 0.86, "syp": 14750.0, ... }
//! }                          └── the only value read
//! ```

use std::time::Duration;

use async_trait::async_trait;
use lira_core::validation::validate_rate;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::RatesConfig;
use crate::error::{RateError, RateResult};

/// Anything that can produce a fresh rate.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the current rate in old pounds per dollar.
    ///
    /// Returns `RateError::MissingRate` when the provider answered but
    /// carried no usable value.
    async fn fetch_rate(&self) -> RateResult<f64>;
}

#[derive(Debug, Deserialize)]
struct ProviderPayload {
    #[serde(default)]
    usd: Option<UsdRates>,
}

#[derive(Debug, Deserialize)]
struct UsdRates {
    #[serde(default)]
    syp: Option<f64>,
}

/// Extracts `usd.syp` from a provider body.
///
/// Zero, negative and missing values are all `MissingRate`.
pub fn parse_payload(body: &str) -> RateResult<f64> {
    let payload: ProviderPayload = serde_json::from_str(body)?;
    let rate = payload
        .usd
        .and_then(|usd| usd.syp)
        .ok_or(RateError::MissingRate)?;
    validate_rate(rate).map_err(|_| RateError::MissingRate)
}

/// HTTP feed client.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRateSource {
    /// Creates a client for `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> RateResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &RatesConfig) -> RateResult<Self> {
        Self::new(config.endpoint_url()?, config.timeout())
    }

    /// Feed URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rate(&self) -> RateResult<f64> {
        debug!(endpoint = %self.endpoint, "Fetching SYP/USD rate");
        let body = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_payload(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        let body = r#"{"date":"2026-10-17","usd":{"eur":0.86,"syp":14750.25}}"#;
        assert_eq!(parse_payload(body).unwrap(), 14_750.25);
    }

    #[test]
    fn test_parse_payload_without_rate() {
        assert!(matches!(
            parse_payload(r#"{"usd":{"eur":0.86}}"#),
            Err(RateError::MissingRate)
        ));
        assert!(matches!(parse_payload("{}"), Err(RateError::MissingRate)));
        assert!(matches!(
            parse_payload(r#"{"usd":{"syp":0}}"#),
            Err(RateError::MissingRate)
        ));
        assert!(matches!(
            parse_payload(r#"{"usd":{"syp":-14750.0}}"#),
            Err(RateError::MissingRate)
        ));
    }

    #[test]
    fn test_parse_payload_garbage() {
        assert!(matches!(
            parse_payload("<html>"),
            Err(RateError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let source = HttpRateSource::from_config(&RatesConfig::default()).unwrap();
        assert_eq!(source.endpoint().host_str(), Some("cdn.jsdelivr.net"));

        let mut config = RatesConfig::default();
        config.source.endpoint = "::".to_string();
        assert!(HttpRateSource::from_config(&config).is_err());
    }
}
