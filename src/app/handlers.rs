use crate::core::service::{CommuteQuery, CommuteService};
use crate::domain::model::{ApiResponse, CommuteReport, NearbyListing};
use crate::domain::ports::ListingSource;
use crate::utils::error::{GeoError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// 與傳輸層無關的回應：狀態碼加上 `{success, data | message}`
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse<T> {
    pub status: u16,
    pub body: ApiResponse<T>,
}

impl<T: Serialize> HandlerResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.body)?)
    }
}

fn respond<T>(result: Result<T>) -> HandlerResponse<T> {
    match result {
        Ok(data) => HandlerResponse {
            status: 200,
            body: ApiResponse::ok(data),
        },
        Err(e) => {
            let status = e.status_code();
            if status >= 500 {
                tracing::error!("❌ Request failed: {}", e);
            } else {
                tracing::warn!("Request rejected ({}): {}", status, e);
            }
            HandlerResponse {
                status,
                body: ApiResponse::failure(e.user_friendly_message()),
            }
        }
    }
}

/// 失敗的請求：保留原始錯誤，並附上 `{success: false, message}` 內容
#[derive(Debug)]
pub struct FailedRequest {
    pub error: GeoError,
    pub body: Option<String>,
}

impl From<GeoError> for FailedRequest {
    fn from(error: GeoError) -> Self {
        Self { error, body: None }
    }
}

async fn commute_result<S: ListingSource>(
    service: &CommuteService<S>,
    params: &HashMap<String, String>,
) -> Result<CommuteReport> {
    let query = CommuteQuery::from_params(params)?;
    service.compare(&query).await
}

/// `GET /commute?property_id=&job_id=`
pub async fn commute_handler<S: ListingSource>(
    service: &CommuteService<S>,
    params: &HashMap<String, String>,
) -> HandlerResponse<CommuteReport> {
    respond(commute_result(service, params).await)
}

/// `GET /commute` 的 JSON 內容。失敗時由呼叫端依錯誤決定結束方式
pub async fn commute_json<S: ListingSource>(
    service: &CommuteService<S>,
    params: &HashMap<String, String>,
) -> std::result::Result<String, FailedRequest> {
    match commute_result(service, params).await {
        Ok(report) => Ok(serde_json::to_string_pretty(&ApiResponse::ok(report)).map_err(GeoError::from)?),
        Err(error) => {
            let body = serde_json::to_string_pretty(&ApiResponse::<CommuteReport>::failure(
                error.user_friendly_message(),
            ))
            .ok();
            Err(FailedRequest { error, body })
        }
    }
}

pub async fn nearest_jobs_handler<S: ListingSource>(
    service: &CommuteService<S>,
    property_id: &str,
    limit: Option<usize>,
) -> HandlerResponse<Vec<NearbyListing>> {
    respond(service.nearest_jobs(property_id, limit).await)
}

pub async fn nearest_properties_handler<S: ListingSource>(
    service: &CommuteService<S>,
    job_id: &str,
    limit: Option<usize>,
) -> HandlerResponse<Vec<NearbyListing>> {
    respond(service.nearest_properties(job_id, limit).await)
}
