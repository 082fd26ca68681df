use crate::adapters::memory::InMemoryListingSource;
use crate::domain::model::{Job, Property};
use crate::domain::ports::{ListingSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 從 JSON 檔案載入的刊登資料：`{"properties": [...], "jobs": [...]}`
#[derive(Debug, Clone)]
pub struct JsonFileListingSource {
    inner: InMemoryListingSource,
}

impl JsonFileListingSource {
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::debug!("Loading listings from {}", path);
        let data = storage.read_file(path).await?;
        let source = Self::from_slice(&data)?;
        tracing::info!(
            "📁 Loaded {} properties and {} jobs from {}",
            source.inner.properties.len(),
            source.inner.jobs.len(),
            path
        );
        Ok(source)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let inner: InMemoryListingSource = serde_json::from_slice(data)?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ListingSource for JsonFileListingSource {
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        self.inner.get_property(id).await
    }

    async fn get_job(&self, id: &str) -> Result<Option<Job>> {
        self.inner.get_job(id).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        self.inner.list_properties().await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.inner.list_jobs().await
    }
}
