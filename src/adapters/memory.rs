use crate::domain::model::{Job, Property};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 記憶體中的刊登資料，保留插入順序 (排序時距離相同者依此順序)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryListingSource {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl InMemoryListingSource {
    pub fn new(properties: Vec<Property>, jobs: Vec<Job>) -> Self {
        Self { properties, jobs }
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }
}

#[async_trait]
impl ListingSource for InMemoryListingSource {
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn get_job(&self, id: &str) -> Result<Option<Job>> {
        Ok(self.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.clone())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.clone())
    }
}
