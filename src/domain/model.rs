use crate::utils::error::{GeoError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 經緯度座標 (度)。順序與 GeoJSON 相同：先經度、後緯度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// 建立並驗證座標
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let point = Self { lon, lat };
        point.check()?;
        Ok(point)
    }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::invalid_coordinate(format!(
                "{} is out of range (longitude must be in [-180, 180], latitude in [-90, 90])",
                self
            )))
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// 儲存格式：`{"type": "Point", "coordinates": [lon, lat]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default = "Location::point_type")]
    pub r#type: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Location {
    fn point_type() -> String {
        "Point".to_string()
    }

    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            r#type: Self::point_type(),
            coordinates: vec![point.lon, point.lat],
        }
    }

    /// 座標不足兩個時視為沒有位置
    pub fn point(&self) -> Option<GeoPoint> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some(GeoPoint {
                lon: *lon,
                lat: *lat,
            }),
            _ => None,
        }
    }
}

/// 可以被定位的刊登物件 (房屋或職缺)
pub trait Locatable {
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn address(&self) -> &str;
    fn location(&self) -> Option<&Location>;

    fn geo_point(&self) -> Option<GeoPoint> {
        self.location().and_then(Location::point)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Locatable for Property {
    const KIND: &'static str = "property";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl Locatable for Job {
    const KIND: &'static str = "job";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

/// 排序結果，距離為原始值 (未四捨五入)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<Id> {
    pub id: Id,
    pub distance_km: f64,
}

/// 通勤估算參數。預設值：時速 30 km/h、每公里 0.70、每月 22 個工作日、
/// 每年 12 個月、來回 2 趟、分鐘權重 0.1。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommuteParams {
    pub average_speed_kmh: f64,
    pub cost_per_km: f64,
    pub working_days_per_month: u32,
    pub months_per_year: u32,
    pub round_trip_factor: f64,
    pub score_time_weight: f64,
}

impl Default for CommuteParams {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            cost_per_km: 0.70,
            working_days_per_month: 22,
            months_per_year: 12,
            round_trip_factor: 2.0,
            score_time_weight: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteEstimate {
    pub distance_km: f64,
    pub estimated_time_minutes: u64,
    pub commute_score: f64,
    pub annual_savings: f64,
    pub annual_time_savings: u64,
}

/// `GET /commute` 回應中的 `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteReport {
    pub property_title: String,
    pub job_title: String,
    pub distance_km: f64,
    pub estimated_time_minutes: u64,
    pub commute_score: f64,
    pub annual_savings: f64,
    pub annual_time_savings: u64,
}

impl CommuteReport {
    pub fn new(property_title: String, job_title: String, estimate: CommuteEstimate) -> Self {
        Self {
            property_title,
            job_title,
            distance_km: estimate.distance_km,
            estimated_time_minutes: estimate.estimated_time_minutes,
            commute_score: estimate.commute_score,
            annual_savings: estimate.annual_savings,
            annual_time_savings: estimate.annual_time_savings,
        }
    }
}

/// 列表頁面上的鄰近物件，距離取一位小數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyListing {
    pub id: String,
    pub title: String,
    pub address: String,
    pub distance_km: f64,
}

/// API 回應外層格式：`{success, data}` 或 `{success: false, message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_point_order() {
        let location = Location {
            r#type: "Point".to_string(),
            coordinates: vec![-46.6333, -23.5505],
        };
        let point = location.point().unwrap();
        assert_eq!(point.lon, -46.6333);
        assert_eq!(point.lat, -23.5505);
    }

    #[test]
    fn test_location_without_coordinates() {
        let location: Location = serde_json::from_str(r#"{"type": "Point"}"#).unwrap();
        assert!(location.point().is_none());

        let short = Location {
            r#type: "Point".to_string(),
            coordinates: vec![10.0],
        };
        assert!(short.point().is_none());
    }

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(-43.1729, -22.9068).is_ok());
        assert!(GeoPoint::new(0.0, 95.0).is_err());
        assert!(GeoPoint::new(181.0, 0.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_deserialize_property_document() {
        let json = r#"{
            "_id": "p1",
            "title": "Apartamento Centro",
            "description": "2 quartos",
            "address": "Rua A, 100",
            "location": {"type": "Point", "coordinates": [-46.6333, -23.5505]},
            "price": 2500,
            "bedrooms": 2,
            "bathrooms": 1,
            "area": 65.5,
            "userId": "u1",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.id, "p1");
        assert_eq!(property.user_id.as_deref(), Some("u1"));
        assert!(property.created_at.is_some());
        assert_eq!(
            property.geo_point(),
            Some(GeoPoint {
                lon: -46.6333,
                lat: -23.5505
            })
        );
    }

    #[test]
    fn test_deserialize_job_without_location() {
        let json = r#"{"_id": "j1", "title": "Dev", "company": "ACME", "salaryRange": "5k-7k"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.salary_range.as_deref(), Some("5k-7k"));
        assert!(job.geo_point().is_none());
    }
}
