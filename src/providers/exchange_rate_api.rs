use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::rates::{ExchangeRateTable, RateProvider, REFERENCE_CURRENCY};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ExchangeRateApiProvider implementation for RateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "RateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<ExchangeRateTable> {
        let url = format!(
            "{}/v6/{}/latest/{}",
            self.base_url, self.api_key, REFERENCE_CURRENCY
        );
        debug!(
            "Requesting exchange rates from {}/v6/<key>/latest/{}",
            self.base_url, REFERENCE_CURRENCY
        );

        let client = reqwest::Client::builder()
            .user_agent("tienda/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                anyhow!("Request error: {} for base currency: {}", e, REFERENCE_CURRENCY)
            })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from exchange rate provider",
                response.status()
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse exchange rate response: {}", e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Exchange rate provider returned result: {}",
                data.result
            ));
        }

        Ok(ExchangeRateTable::new(data.conversion_rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(api_key: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v6/{api_key}/latest/{REFERENCE_CURRENCY}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "result": "success",
            "conversion_rates": {
                "USD": 1,
                "EUR": 0.92,
                "INR": 83.12
            }
        }"#;

        let mock_server = create_mock_server(
            "test-key",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key");
        let table = provider.fetch_rates().await.unwrap();

        assert_eq!(table.rate_for("USD"), Some(1.0));
        assert_eq!(table.rate_for("EUR"), Some(0.92));
        assert_eq!(table.rate_for("INR"), Some(83.12));
        assert_eq!(table.rate_for("XYZ"), None);
    }

    #[tokio::test]
    async fn test_non_success_result_is_an_error() {
        let mock_response = r#"{
            "result": "error",
            "error-type": "invalid-key"
        }"#;

        let mock_server = create_mock_server(
            "test-key",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.fetch_rates().await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Exchange rate provider returned result: error"
        );
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server("test-key", ResponseTemplate::new(500)).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.fetch_rates().await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error from exchange rate provider"
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        // Port 1 has no listener, so the request fails at transport level.
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:1", "test-key");
        let result = provider.fetch_rates().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Request error:"));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"result": ["not", "a", "string"]}"#;

        let mock_server = create_mock_server(
            "test-key",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.fetch_rates().await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse exchange rate response")
        );
    }
}
