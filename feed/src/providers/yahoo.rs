//! Yahoo Finance chart provider
//!
//! This module implements the MarketDataProvider trait against the public
//! `v8/finance/chart` endpoint. The endpoint needs no credentials; responses
//! arrive as parallel arrays of epoch timestamps and nullable OHLCV values.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::bars::{BarRequest, ProviderId, RawBar, RawTimestamp};
use crate::error::{FeedError, FeedResult};
use crate::providers::{MarketDataProvider, ProviderConfig};
use crate::ratelimit::RateLimiter;

/// Default base endpoint for the chart API
pub const DEFAULT_ENDPOINT: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart adapter
pub struct YahooChartProvider {
    config: ProviderConfig,
    client: Client,
    base: Url,
    limiter: RateLimiter,
}

impl YahooChartProvider {
    /// Create a new chart provider
    pub fn new(config: ProviderConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FeedError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        let base = Url::parse(&config.endpoint)?;
        let limiter = config.rate_limit.build(config.provider_id.clone());

        Ok(Self {
            config,
            client,
            base,
            limiter,
        })
    }

    /// Create a provider against the public endpoint with default settings
    pub fn with_defaults() -> FeedResult<Self> {
        Self::new(ProviderConfig::yahoo_default())
    }

    /// Build the chart URL for a bar request
    fn chart_url(&self, request: &BarRequest) -> FeedResult<Url> {
        let mut url = self
            .base
            .join(&format!("v8/finance/chart/{}", request.instrument.as_str()))?;
        url.query_pairs_mut()
            .append_pair("period1", &request.from.timestamp().to_string())
            .append_pair("period2", &request.to.timestamp().to_string())
            .append_pair("interval", request.interval.label())
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    /// Map a non-success response body to a feed error
    ///
    /// The chart API wraps error details in its envelope even on non-2xx
    /// statuses, so the body is parsed before falling back to the raw text.
    fn payload_error(&self, body: &str, status: &str) -> FeedError {
        if let Ok(envelope) = serde_json::from_str::<ChartResponse>(body) {
            if let Some(error) = envelope.chart.error {
                return FeedError::ProviderError {
                    provider: self.config.provider_id.to_string(),
                    message: error.description,
                    code: Some(error.code),
                };
            }
        }
        let detail: String = body.chars().take(200).collect();
        FeedError::ProviderError {
            provider: self.config.provider_id.to_string(),
            message: format!("Chart request failed: {}", detail),
            code: Some(status.to_string()),
        }
    }

    /// Convert a chart result block to raw bars
    ///
    /// Null slots in the OHLCV arrays are carried through as `None`; rows are
    /// not validated here.
    fn convert_chart(data: ChartData) -> FeedResult<Vec<RawBar>> {
        if data.timestamp.is_empty() {
            return Ok(Vec::new());
        }

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::InvalidResponse("chart quote block missing".to_string()))?;

        let mut bars = Vec::with_capacity(data.timestamp.len());
        for (i, ts) in data.timestamp.iter().enumerate() {
            bars.push(RawBar {
                timestamp: RawTimestamp::Epoch(*ts),
                open: value_at(&quote.open, i),
                high: value_at(&quote.high, i),
                low: value_at(&quote.low, i),
                close: value_at(&quote.close, i),
                volume: value_at(&quote.volume, i),
            });
        }

        Ok(bars)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    fn provider_id(&self) -> ProviderId {
        self.config.provider_id.clone()
    }

    async fn fetch_bars(&mut self, request: &BarRequest) -> FeedResult<Vec<RawBar>> {
        self.limiter.check().await?;

        let url = self.chart_url(request)?;
        debug!(
            "requesting {} bars for {} from {}",
            request.interval, request.instrument, url
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(self.payload_error(&body, status.as_str()));
        }

        let envelope: ChartResponse = serde_json::from_str(&body)?;
        if let Some(error) = envelope.chart.error {
            return Err(FeedError::ProviderError {
                provider: self.config.provider_id.to_string(),
                message: error.description,
                code: Some(error.code),
            });
        }

        let results = envelope.chart.result.unwrap_or_default();
        let data = match results.into_iter().next() {
            Some(data) => data,
            // No result block and no error: the explicit empty-result case
            None => return Ok(Vec::new()),
        };

        let bars = Self::convert_chart(data)?;
        debug!("{} returned {} raw rows", self.config.provider_id, bars.len());
        Ok(bars)
    }

    async fn health_check(&mut self) -> FeedResult<bool> {
        // Reachability check only; capped well below the request timeout
        let ping = self.client.get(self.base.clone()).send();
        match tokio::time::timeout(Duration::from_secs(5), ping).await {
            Ok(Ok(response)) => Ok(!response.status().is_server_error()),
            Ok(Err(_)) | Err(_) => Ok(false),
        }
    }
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

// Chart API response types

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartData>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
