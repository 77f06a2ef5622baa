use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use super::util::with_retry;
use crate::core::config::ProviderConfig;
use crate::core::currency::{CurrencyRateProvider, RateTable};

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client for the v6 "latest rates" endpoint of exchangerate-api.com.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
    retries: usize,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ExchangeRateApiProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retries: config.retries,
            client,
        })
    }

    fn latest_url(&self, base: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("No API key configured for exchangerate-api.com"))?;
        Ok(format!("{}/v6/{}/latest/{}", self.base_url, api_key, base))
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

impl LatestRatesResponse {
    fn into_rate_table(self, base: &str) -> Result<RateTable> {
        if self.result.as_deref() == Some("error") {
            bail!(
                "API error: {} for base currency: {}",
                self.error_type.as_deref().unwrap_or("unknown"),
                base
            );
        }

        let rates = self
            .conversion_rates
            .ok_or_else(|| anyhow!("No conversion rates found for base currency: {}", base))?;

        Ok(RateTable {
            base: self.base_code.unwrap_or_else(|| base.to_string()),
            updated_at: self
                .time_last_update_unix
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            rates,
        })
    }
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn latest_rates(&self, base: &str) -> Result<RateTable> {
        let url = self.latest_url(base)?;
        debug!("Requesting latest rates for {}", base);

        // The URL carries the API key, so it is stripped from every reqwest error.
        let send = || async {
            self.client
                .get(&url)
                .send()
                .await
                .map_err(reqwest::Error::without_url)
        };
        let response = with_retry(send, self.retries, RETRY_DELAY)
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read response body for {base}"))?;

        if !status.is_success() {
            let error_type = serde_json::from_str::<LatestRatesResponse>(&text)
                .ok()
                .and_then(|r| r.error_type);
            return Err(match error_type {
                Some(kind) => {
                    anyhow!("HTTP error: {} ({}) for base currency: {}", status, kind, base)
                }
                None => anyhow!("HTTP error: {} for base currency: {}", status, base),
            });
        }

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        let table = data.into_rate_table(base)?;
        debug!(count = table.rates.len(), updated_at = ?table.updated_at, "Received rates");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    fn provider_for(server: &MockServer) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(&ProviderConfig {
            base_url: server.uri(),
            api_key: Some(API_KEY.to_string()),
            timeout_secs: 5,
            retries: 0,
        })
        .unwrap()
    }

    async fn mount(server: &MockServer, base: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/v6/{API_KEY}/latest/{base}")))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "result": "success",
            "time_last_update_unix": 1760745601,
            "base_code": "USD",
            "conversion_rates": {
                "USD": 1,
                "NPR": 140.25,
                "EUR": 0.8561
            }
        }"#;
        mount(
            &mock_server,
            "USD",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let provider = provider_for(&mock_server);
        let table = provider.latest_rates("USD").await.unwrap();
        assert_eq!(table.base, "USD");
        assert_eq!(table.rates.len(), 3);
        assert_eq!(table.updated_at, Utc.timestamp_opt(1760745601, 0).single());

        let rate = provider
            .get_rate("USD", "EUR")
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, 0.8561);
    }

    #[tokio::test]
    async fn test_missing_target_currency() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "USD",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"result": "success", "conversion_rates": {"EUR": 0.9}}"#),
        )
        .await;

        let result = provider_for(&mock_server).get_rate("USD", "JPY").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No conversion rate for JPY in USD rates"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "USD",
            ResponseTemplate::new(403)
                .set_body_string(r#"{"result": "error", "error-type": "invalid-key"}"#),
        )
        .await;

        let result = provider_for(&mock_server).latest_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 403 Forbidden (invalid-key) for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_error_result_with_ok_status() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "NPR",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"result": "error", "error-type": "unsupported-code"}"#),
        )
        .await;

        let result = provider_for(&mock_server).latest_rates("NPR").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "API error: unsupported-code for base currency: NPR"
        );
    }

    #[tokio::test]
    async fn test_server_error_response() {
        let mock_server = MockServer::start().await;
        mount(&mock_server, "USD", ResponseTemplate::new(500)).await;

        let result = provider_for(&mock_server).latest_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "USD",
            ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
        )
        .await;

        let result = provider_for(&mock_server).latest_rates("USD").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for USD")
        );
    }

    #[tokio::test]
    async fn test_missing_conversion_rates() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "USD",
            ResponseTemplate::new(200).set_body_string(r#"{"result": "success"}"#),
        )
        .await;

        let result = provider_for(&mock_server).latest_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No conversion rates found for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_connection_error_hides_api_key() {
        let provider = ExchangeRateApiProvider::new(&ProviderConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("SECRET-KEY-123".to_string()),
            timeout_secs: 5,
            retries: 0,
        })
        .unwrap();

        let err = provider.latest_rates("USD").await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Request error:"), "{message}");
        assert!(message.ends_with("for base currency: USD"), "{message}");
        assert!(!message.contains("SECRET-KEY-123"), "{message}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = ExchangeRateApiProvider::new(&ProviderConfig {
            base_url: mock_server.uri(),
            ..ProviderConfig::default()
        })
        .unwrap();
        let result = provider.latest_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No API key configured for exchangerate-api.com"
        );
    }
}
