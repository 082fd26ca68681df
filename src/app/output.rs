use crate::domain::model::{CommuteEstimate, CommuteReport, GeoPoint, NearbyListing};
use crate::utils::error::{GeoError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistanceOutput {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: f64,
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| GeoError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_distance(output: &DistanceOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["from_lon", "from_lat", "to_lon", "to_lat", "distance_km"])?;
            writer.write_record([
                output.from.lon.to_string(),
                output.from.lat.to_string(),
                output.to.lon.to_string(),
                output.to.lat.to_string(),
                format!("{:.2}", output.distance_km),
            ])?;
            let bytes = writer
                .into_inner()
                .map_err(|e| GeoError::IoError(e.into_error()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Text => Ok(format!(
            "Distance {} -> {}: {:.2} km",
            output.from, output.to, output.distance_km
        )),
    }
}

pub fn render_estimate(estimate: &CommuteEstimate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(estimate)?),
        OutputFormat::Csv => to_csv(std::slice::from_ref(estimate)),
        OutputFormat::Text => Ok(format!(
            "Distance: {:.2} km\nEstimated time: {} min\nCommute score: {:.1}\nAnnual savings: {:.2}\nAnnual time savings: {} h",
            estimate.distance_km,
            estimate.estimated_time_minutes,
            estimate.commute_score,
            estimate.annual_savings,
            estimate.annual_time_savings
        )),
    }
}

pub fn render_report(report: &CommuteReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => to_csv(std::slice::from_ref(report)),
        OutputFormat::Text => Ok(format!(
            "{} -> {}\nDistance: {:.2} km\nEstimated time: {} min\nCommute score: {:.1}\nAnnual savings: {:.2}\nAnnual time savings: {} h",
            report.property_title,
            report.job_title,
            report.distance_km,
            report.estimated_time_minutes,
            report.commute_score,
            report.annual_savings,
            report.annual_time_savings
        )),
    }
}

pub fn render_nearby(listings: &[NearbyListing], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(listings)?),
        OutputFormat::Csv => to_csv(listings),
        OutputFormat::Text => {
            if listings.is_empty() {
                return Ok("No listings with location data found".to_string());
            }
            Ok(listings
                .iter()
                .enumerate()
                .map(|(i, l)| format!("{}. {} ({}) - {:.1} km", i + 1, l.title, l.address, l.distance_km))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings() -> Vec<NearbyListing> {
        vec![
            NearbyListing {
                id: "j1".to_string(),
                title: "Dev".to_string(),
                address: "Av. Paulista, 1000".to_string(),
                distance_km: 1.2,
            },
            NearbyListing {
                id: "j2".to_string(),
                title: "QA".to_string(),
                address: "Rua B".to_string(),
                distance_km: 3.4,
            },
        ]
    }

    #[test]
    fn test_render_nearby_csv() {
        let csv = render_nearby(&listings(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,title,address,distance_km");
        assert_eq!(lines[1], "j1,Dev,\"Av. Paulista, 1000\",1.2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_nearby_text() {
        let text = render_nearby(&listings(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("1. Dev (Av. Paulista, 1000) - 1.2 km"));
        assert_eq!(
            render_nearby(&[], OutputFormat::Text).unwrap(),
            "No listings with location data found"
        );
    }

    #[test]
    fn test_render_report_json() {
        let report = CommuteReport {
            property_title: "Casa".to_string(),
            job_title: "Dev".to_string(),
            distance_km: 30.0,
            estimated_time_minutes: 60,
            commute_score: 36.0,
            annual_savings: 11088.0,
            annual_time_savings: 528,
        };
        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["estimated_time_minutes"], 60);
        assert_eq!(value["annual_time_savings"], 528);
    }

    #[test]
    fn test_render_distance_text() {
        let output = DistanceOutput {
            from: GeoPoint { lon: 0.0, lat: 0.0 },
            to: GeoPoint { lon: 1.0, lat: 0.0 },
            distance_km: 111.19492664455873,
        };
        assert_eq!(
            render_distance(&output, OutputFormat::Text).unwrap(),
            "Distance (0, 0) -> (1, 0): 111.19 km"
        );
    }
}
