use crate::domain::model::{CommuteParams, Job, Property};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn commute_params(&self) -> &CommuteParams;
    fn nearest_limit(&self) -> usize;
}

/// 外部刊登資料來源。查無資料時回傳 `Ok(None)`，由呼叫端決定是否轉為 `EntityNotFound`。
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn get_property(&self, id: &str) -> Result<Option<Property>>;
    async fn get_job(&self, id: &str) -> Result<Option<Job>>;
    async fn list_properties(&self) -> Result<Vec<Property>>;
    async fn list_jobs(&self) -> Result<Vec<Job>>;
}
