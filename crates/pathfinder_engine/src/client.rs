use std::time::Duration;

use futures_util::StreamExt;
use pathfinder_logging::{pf_debug, pf_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::decode::{decode_catalog, decode_recommendation};
use crate::{
    ApiError, CatalogEntry, ErrorBody, FailureKind, RecommendRequest, CATALOG_PATH,
    RECOMMEND_PATH,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL including the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Deadline for the whole request, body included.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch and validate the full concept catalog.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError>;

    /// Ask for an ordered learning path from `known_concepts` to `target_concept`.
    async fn get_recommendations(
        &self,
        known_concepts: &[String],
        target_concept: &str,
    ) -> Result<Vec<String>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let joined = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{joined}: {err}")))
    }

    /// Send the request and collect the body of a 2xx response. Bodies of every
    /// status, error responses included, are bounded by `max_bytes`.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_error_detail(response, self.settings.max_bytes).await;
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail.unwrap_or_else(|| status.to_string()),
            ));
        }
        read_body_capped(response, self.settings.max_bytes).await
    }
}

/// Collect a response body, failing with `FailureKind::TooLarge` once it exceeds `max_bytes`.
pub async fn read_body_capped(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, ApiError> {
    let too_large = |actual: u64| {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    };

    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let url = self.endpoint(CATALOG_PATH)?;
        pf_debug!("GET {}", url);
        let body = self
            .execute(self.client.get(url).header(ACCEPT, "application/json"))
            .await?;
        let entries =
            decode_catalog(&body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        pf_debug!("catalog decoded: {} concepts", entries.len());
        Ok(entries)
    }

    async fn get_recommendations(
        &self,
        known_concepts: &[String],
        target_concept: &str,
    ) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(RECOMMEND_PATH)?;
        let payload = RecommendRequest {
            known_concepts: known_concepts.to_vec(),
            target_concept: target_concept.to_string(),
        };
        let json = serde_json::to_vec(&payload)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        pf_debug!(
            "POST {} known={} target={:?}",
            url,
            known_concepts.len(),
            target_concept
        );
        let body = self
            .execute(
                self.client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .header(ACCEPT, "application/json")
                    .body(json),
            )
            .await?;
        decode_recommendation(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Pull the `{ "error": .. }` message out of a failed response, if there is one.
async fn read_error_detail(response: reqwest::Response, max_bytes: u64) -> Option<String> {
    let bytes = match read_body_capped(response, max_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            pf_warn!("error response body dropped: {}", err);
            return None;
        }
    };
    match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => Some(body.error),
        Err(_) => {
            pf_warn!("error response without json body ({} bytes)", bytes.len());
            None
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
