use crate::core::commute::estimate_commute;
use crate::core::geo::{haversine_distance_km, rank_nearest, round_to, DEFAULT_NEAREST_LIMIT};
use crate::domain::model::{CommuteParams, CommuteReport, GeoPoint, Locatable, NearbyListing};
use crate::domain::ports::{ConfigProvider, ListingSource};
use crate::utils::error::{GeoError, Result};
use std::collections::HashMap;

/// 已驗證的通勤查詢 (`property_id` 與 `job_id` 皆不可為空)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommuteQuery {
    pub property_id: String,
    pub job_id: String,
}

impl CommuteQuery {
    pub fn new(property_id: impl Into<String>, job_id: impl Into<String>) -> Result<Self> {
        let property_id = property_id.into().trim().to_string();
        let job_id = job_id.into().trim().to_string();

        if property_id.is_empty() || job_id.is_empty() {
            return Err(GeoError::invalid_input("property_id and job_id are required"));
        }

        Ok(Self {
            property_id,
            job_id,
        })
    }

    /// 由未型別化的查詢參數建立
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let property_id = params.get("property_id").cloned().unwrap_or_default();
        let job_id = params.get("job_id").cloned().unwrap_or_default();
        Self::new(property_id, job_id)
    }
}

/// 取得物件座標；缺少位置或座標不合法時回傳 `InvalidCoordinate`
pub fn require_point<T: Locatable>(entity: &T) -> Result<GeoPoint> {
    let point = entity.geo_point().ok_or_else(|| {
        GeoError::invalid_coordinate(format!(
            "location data missing for {} {}",
            T::KIND,
            entity.id()
        ))
    })?;
    point.check()?;
    Ok(point)
}

/// 依距離排序刊登物件並轉為列表顯示格式 (距離取一位小數)
pub fn rank_listings<T: Locatable>(
    origin: &GeoPoint,
    listings: &[T],
    limit: usize,
) -> Result<Vec<NearbyListing>> {
    let candidates = listings
        .iter()
        .map(|listing| (listing, listing.geo_point()));

    let ranked = rank_nearest(origin, candidates, limit)?;

    Ok(ranked
        .into_iter()
        .map(|entry| NearbyListing {
            id: entry.id.id().to_string(),
            title: entry.id.title().to_string(),
            address: entry.id.address().to_string(),
            distance_km: round_to(entry.distance_km, 1),
        })
        .collect())
}

pub struct CommuteService<S: ListingSource> {
    source: S,
    params: CommuteParams,
    nearest_limit: usize,
}

impl<S: ListingSource> CommuteService<S> {
    pub fn new(source: S, params: CommuteParams) -> Self {
        Self {
            source,
            params,
            nearest_limit: DEFAULT_NEAREST_LIMIT,
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self {
            source,
            params: config.commute_params().clone(),
            nearest_limit: config.nearest_limit(),
        }
    }

    pub fn with_nearest_limit(mut self, limit: usize) -> Self {
        self.nearest_limit = limit;
        self
    }

    pub fn params(&self) -> &CommuteParams {
        &self.params
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 計算房屋與職缺之間的通勤估算
    pub async fn compare(&self, query: &CommuteQuery) -> Result<CommuteReport> {
        tracing::debug!(
            "Comparing property {} with job {}",
            query.property_id,
            query.job_id
        );

        let (property, job) = tokio::try_join!(
            self.source.get_property(&query.property_id),
            self.source.get_job(&query.job_id)
        )?;

        let property = property.ok_or_else(|| GeoError::not_found("property", &query.property_id))?;
        let job = job.ok_or_else(|| GeoError::not_found("job", &query.job_id))?;

        let property_point = require_point(&property)?;
        let job_point = require_point(&job)?;

        let distance_km = haversine_distance_km(&property_point, &job_point)?;
        let estimate = estimate_commute(distance_km, &self.params)?;

        tracing::info!(
            "🚗 {} -> {}: {:.2} km, {} min, score {:.1}",
            property.title,
            job.title,
            estimate.distance_km,
            estimate.estimated_time_minutes,
            estimate.commute_score
        );

        Ok(CommuteReport::new(property.title, job.title, estimate))
    }

    /// 離指定房屋最近的職缺
    pub async fn nearest_jobs(&self, property_id: &str, limit: Option<usize>) -> Result<Vec<NearbyListing>> {
        let property = self
            .source
            .get_property(property_id)
            .await?
            .ok_or_else(|| GeoError::not_found("property", property_id))?;
        let origin = require_point(&property)?;

        let jobs = self.source.list_jobs().await?;
        tracing::debug!("Ranking {} jobs around property {}", jobs.len(), property_id);

        rank_listings(&origin, &jobs, limit.unwrap_or(self.nearest_limit))
    }

    /// 離指定職缺最近的房屋
    pub async fn nearest_properties(&self, job_id: &str, limit: Option<usize>) -> Result<Vec<NearbyListing>> {
        let job = self
            .source
            .get_job(job_id)
            .await?
            .ok_or_else(|| GeoError::not_found("job", job_id))?;
        let origin = require_point(&job)?;

        let properties = self.source.list_properties().await?;
        tracing::debug!("Ranking {} properties around job {}", properties.len(), job_id);

        rank_listings(&origin, &properties, limit.unwrap_or(self.nearest_limit))
    }
}
