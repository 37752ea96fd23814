use common::{DetailsQuery, DetailsResponse, InvestmentPrediction, InvestmentRequest};
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

/// Failures talking to the detail table and budget predictor service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the remote analytics service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the product detail table for a filter selection.
    #[instrument(skip(self))]
    pub async fn get_details(&self, query: &DetailsQuery) -> Result<DetailsResponse, RemoteError> {
        let details: DetailsResponse = self.post_json("get_details", query).await?;
        debug!("Received {} product rows", details.len());
        Ok(details)
    }

    /// Asks the predictor for the budget split of a month.
    #[instrument(skip(self))]
    pub async fn predict_investment(
        &self,
        request: &InvestmentRequest,
    ) -> Result<InvestmentPrediction, RemoteError> {
        self.post_json("calculate_month_investment", request).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| {
                error!("Request to {} failed: {}", url, source);
                RemoteError::Request {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} responded with status {}", url, status);
            return Err(RemoteError::Status { url, status });
        }

        response.json().await.map_err(|source| {
            error!("Failed to decode response from {}: {}", url, source);
            RemoteError::Decode { url, source }
        })
    }
}
