//! reqwest-backed [`NodeProbe`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};

use crate::domain::Endpoint;
use crate::ports::{NodeProbe, ProbeError, ProbeResult};

/// HTTP probe with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Build a probe whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ProbeError::Request(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get(&self, url: &str) -> ProbeResult {
        let response = self.client.get(url).send().await.map_err(map_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout
            } else {
                ProbeError::Body(e.to_string())
            }
        })
    }
}

#[async_trait]
impl NodeProbe for HttpProbe {
    async fn probe(&self, endpoint: &Endpoint, path: &str) -> ProbeResult {
        self.get(&endpoint.url(path)).await
    }

    async fn fetch(&self, url: &str) -> ProbeResult {
        self.get(url).await
    }
}

fn map_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout
    } else if err.is_connect() {
        ProbeError::Connect(err.to_string())
    } else {
        ProbeError::Request(err.to_string())
    }
}
