use crate::core::connection::LazyHandle;
use crate::domain::model::{ApiResponse, Job, Property};
use crate::domain::ports::ListingSource;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 透過刊登網站的 JSON API 讀取資料 (`/api/properties`, `/api/jobs`)
pub struct HttpListingSource {
    base_url: Url,
    timeout: Duration,
    client: LazyHandle<Client>,
}

impl HttpListingSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| GeoError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(GeoError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url,
            timeout,
            client: LazyHandle::new(),
        })
    }

    /// 釋放 HTTP client；之後的請求會重新建立
    pub async fn shutdown(&self) -> bool {
        self.client.teardown().await
    }

    pub async fn is_connected(&self) -> bool {
        self.client.is_initialized().await
    }

    async fn client(&self) -> Result<Arc<Client>> {
        let timeout = self.timeout;
        self.client
            .get_or_try_init(|| async move {
                let client = Client::builder().timeout(timeout).build()?;
                Ok::<_, GeoError>(client)
            })
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>> {
        let url = self.endpoint(segments);
        tracing::debug!("Making API request to: {}", url);

        let client = self.client().await?;
        let response = client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = match response.json::<ApiResponse<serde_json::Value>>().await {
                Ok(body) => body.message.unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(GeoError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ApiResponse<T> = response.json().await?;
        if !body.success {
            return Err(GeoError::UpstreamError {
                status: status.as_u16(),
                message: body.message.unwrap_or_else(|| "request was not successful".to_string()),
            });
        }

        Ok(body.data)
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        self.fetch(&["properties", id]).await
    }

    async fn get_job(&self, id: &str) -> Result<Option<Job>> {
        self.fetch(&["jobs", id]).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.fetch(&["properties"]).await?.unwrap_or_default())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.fetch(&["jobs"]).await?.unwrap_or_default())
    }
}
