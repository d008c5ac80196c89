use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::{RateResolver, normalize_currency};

/// Resolves conversions against a `/convert?from=&to=&amount=` rate service.
pub struct HttpRateResolver {
    base_url: String,
    timeout: Duration,
}

impl HttpRateResolver {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        HttpRateResolver {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Option<f64>,
}

#[async_trait]
impl RateResolver for HttpRateResolver {
    #[instrument(name = "RateResolve", skip(self))]
    async fn resolve(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let from = normalize_currency(Some(from));
        let to = normalize_currency(Some(to));
        if from == to {
            return Ok(amount);
        }

        let amount_param = amount.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/convert", self.base_url),
            &[
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("amount", amount_param.as_str()),
            ],
        )?;
        debug!("Requesting conversion from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fintrack/0.1")
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}{}", e, from, to))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}{}",
                response.status(),
                from,
                to
            ));
        }

        let text = response.text().await?;
        let data: ConvertResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}{}: {}", from, to, e))?;

        data.result
            .ok_or_else(|| anyhow!("No conversion result for currency pair: {}{}", from, to))
    }
}
