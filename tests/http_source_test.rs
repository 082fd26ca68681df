use anyhow::Result;
use geo_commute::core::ListingSource;
use geo_commute::{CommuteParams, CommuteQuery, CommuteService, GeoError, HttpListingSource};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn source_for(server: &MockServer) -> HttpListingSource {
    HttpListingSource::new(&server.base_url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_single_listings() -> Result<()> {
    let server = MockServer::start_async().await;

    let property_mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/properties/p1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "data": {
                    "_id": "p1",
                    "title": "Apartamento Centro",
                    "address": "Rua A, 100",
                    "location": {"type": "Point", "coordinates": [-46.6333, -23.5505]},
                    "price": 2500,
                    "bedrooms": 2
                }
            }));
    }).await;

    let job_mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/jobs/j1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "data": {
                    "_id": "j1",
                    "title": "Desenvolvedor",
                    "company": "ACME",
                    "location": {"type": "Point", "coordinates": [-46.6560, -23.5614]}
                }
            }));
    }).await;

    let service = CommuteService::new(source_for(&server), CommuteParams::default());
    let report = service.compare(&CommuteQuery::new("p1", "j1")?).await?;

    property_mock.assert_async().await;
    job_mock.assert_async().await;
    assert_eq!(report.property_title, "Apartamento Centro");
    assert_eq!(report.job_title, "Desenvolvedor");
    assert_eq!(report.estimated_time_minutes, 5);
    Ok(())
}

#[tokio::test]
async fn test_not_found_maps_to_none() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/jobs/missing");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": false, "message": "Vaga não encontrada"}));
    }).await;

    let source = source_for(&server);
    assert!(source.get_job("missing").await?.is_none());
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_list_jobs_for_ranking() -> Result<()> {
    let server = MockServer::start_async().await;

    server.mock_async(|when, then| {
        when.method(GET).path("/api/properties/p1");
        then.status(200).json_body(json!({
            "success": true,
            "data": {
                "_id": "p1",
                "title": "Apartamento Centro",
                "location": {"type": "Point", "coordinates": [-46.6333, -23.5505]}
            }
        }));
    }).await;

    let list_mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(200).json_body(json!({
            "success": true,
            "data": [
                {"_id": "far", "title": "Campinas", "location": {"type": "Point", "coordinates": [-47.0608, -22.9056]}},
                {"_id": "none", "title": "Remoto"},
                {"_id": "near", "title": "Paulista", "location": {"type": "Point", "coordinates": [-46.6560, -23.5614]}}
            ]
        }));
    }).await;

    let service = CommuteService::new(source_for(&server), CommuteParams::default());
    let nearest = service.nearest_jobs("p1", None).await?;

    list_mock.assert_async().await;
    let ids: Vec<&str> = nearest.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "far"]);
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure() -> Result<()> {
    let server = MockServer::start_async().await;

    server.mock_async(|when, then| {
        when.method(GET).path("/api/properties");
        then.status(500)
            .json_body(json!({"success": false, "message": "Erro interno"}));
    }).await;

    server.mock_async(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(200)
            .json_body(json!({"success": false, "message": "Método não permitido"}));
    }).await;

    let source = source_for(&server);

    match source.list_properties().await {
        Err(GeoError::UpstreamError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Erro interno");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }

    let err = source.list_jobs().await.unwrap_err();
    assert!(matches!(err, GeoError::UpstreamError { status: 200, .. }));
    assert_eq!(err.status_code(), 500);
    Ok(())
}

#[tokio::test]
async fn test_client_is_rebuilt_after_shutdown() -> Result<()> {
    let server = MockServer::start_async().await;

    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/properties");
        then.status(200).json_body(json!({"success": true, "data": []}));
    }).await;

    let source = source_for(&server);
    assert!(!source.is_connected().await);

    assert!(source.list_properties().await?.is_empty());
    assert!(source.is_connected().await);

    assert!(source.shutdown().await);
    assert!(!source.is_connected().await);

    assert!(source.list_properties().await?.is_empty());
    mock.assert_hits_async(2).await;
    Ok(())
}
