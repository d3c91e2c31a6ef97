use std::time::Duration;

use pathfinder_engine::{decode_recommendation, read_body_capped, ErrorBody, RecommendRequest};
use pathfinder_logging::pf_warn;
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("no recommender is configured")]
    Unavailable,
    #[error("recommender failed: {0}")]
    Upstream(String),
}

/// Computes the learning path. The algorithm lives outside this server.
#[async_trait::async_trait]
pub trait Recommender: Send + Sync {
    /// `request` has already been validated against the catalog.
    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<String>, RecommendError>;
}

/// Default when no recommender is configured: every request is answered with 503.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRecommender;

#[async_trait::async_trait]
impl Recommender for UnavailableRecommender {
    async fn recommend(&self, _request: &RecommendRequest) -> Result<Vec<String>, RecommendError> {
        Err(RecommendError::Unavailable)
    }
}

/// Cap on any upstream response body, error bodies included.
pub const UPSTREAM_MAX_BYTES: u64 = 1024 * 1024;

/// Forwards the request body unchanged to an external recommendation service.
#[derive(Debug, Clone)]
pub struct UpstreamRecommender {
    url: reqwest::Url,
    client: reqwest::Client,
    max_bytes: u64,
}

impl UpstreamRecommender {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RecommendError> {
        let url = reqwest::Url::parse(url)
            .map_err(|err| RecommendError::Upstream(format!("invalid url {url}: {err}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RecommendError::Upstream(err.to_string()))?;
        Ok(Self {
            url,
            client,
            max_bytes: UPSTREAM_MAX_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl Recommender for UpstreamRecommender {
    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<String>, RecommendError> {
        let body =
            serde_json::to_vec(request).map_err(|err| RecommendError::Upstream(err.to_string()))?;
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| RecommendError::Upstream(err.to_string()))?;

        let status = response.status();
        let body = read_body_capped(response, self.max_bytes).await;
        if !status.is_success() {
            let detail = body
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
                .map(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            pf_warn!("upstream recommender returned {}: {}", status, detail);
            return Err(RecommendError::Upstream(detail));
        }
        let bytes = body.map_err(|err| RecommendError::Upstream(err.to_string()))?;
        decode_recommendation(&bytes).map_err(|err| RecommendError::Upstream(err.to_string()))
    }
}
