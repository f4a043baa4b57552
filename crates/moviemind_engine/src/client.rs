use std::time::Duration;

use futures_util::StreamExt;
use moviemind_logging::{mind_debug, mind_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::types::{RecommendRequest, RecommendResponse, WireHistoryRecord};
use crate::{ApiError, FailureKind, HistoryRecord, Recommendation};

const RECOMMEND_PATH: &str = "recommend";
const HISTORY_PATH: &str = "history";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl ApiSettings {
    /// Settings for `base_url` with the default timeouts and a 1 MiB body cap.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 1024 * 1024,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// HTTP contract of the recommendation service.
#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// `POST /recommend` with the already trimmed preference text.
    async fn recommend(&self, preference: &str) -> Result<Vec<Recommendation>, ApiError>;

    /// `GET /history`, in the order the service returns it.
    async fn history(&self) -> Result<Vec<HistoryRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RecommendationApi for ReqwestApi {
    async fn recommend(&self, preference: &str) -> Result<Vec<Recommendation>, ApiError> {
        let url = self.settings.endpoint(RECOMMEND_PATH)?;
        let body = serde_json::to_vec(&RecommendRequest { preference })
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;

        let parsed: RecommendResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))?;
        mind_info!(
            "Recommend returned {} items preference_len={}",
            parsed.recommendations.len(),
            preference.len()
        );
        Ok(parsed.recommendations)
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        let url = self.settings.endpoint(HISTORY_PATH)?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;

        let wire: Vec<WireHistoryRecord> = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))?;
        let records = wire
            .into_iter()
            .map(HistoryRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        mind_debug!("History returned {} records", records.len());
        Ok(records)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
