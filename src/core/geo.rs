use crate::domain::model::{GeoPoint, RankedEntry};
use crate::utils::error::Result;

/// 地球平均半徑 (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 列表頁預設顯示的鄰近物件數量
pub const DEFAULT_NEAREST_LIMIT: usize = 5;

/// Haversine 大圓距離 (km)。任一點超出範圍時回傳 `InvalidCoordinate`。
pub fn haversine_distance_km(a: &GeoPoint, b: &GeoPoint) -> Result<f64> {
    a.check()?;
    b.check()?;

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // 近對蹠點時捨入誤差可能讓 h 略大於 1
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}

/// 依距離由近到遠排序並截斷至 `limit` 筆。
///
/// 沒有位置的候選者會被排除；座標不合法的候選者同樣無法計算距離，一併排除。
/// 距離相同時保留原始順序 (`sort_by` 為穩定排序)。
pub fn rank_nearest<Id, I>(origin: &GeoPoint, candidates: I, limit: usize) -> Result<Vec<RankedEntry<Id>>>
where
    I: IntoIterator<Item = (Id, Option<GeoPoint>)>,
{
    origin.check()?;

    let mut ranked: Vec<RankedEntry<Id>> = candidates
        .into_iter()
        .filter_map(|(id, point)| {
            let point = point?;
            haversine_distance_km(origin, &point)
                .ok()
                .map(|distance_km| RankedEntry { id, distance_km })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);

    Ok(ranked)
}

/// 四捨五入到指定小數位數
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GeoError;

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint { lon, lat }
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = point(-46.6333, -23.5505);
        assert_eq!(haversine_distance_km(&p, &p).unwrap(), 0.0);
    }

    #[test]
    fn test_sao_paulo_to_rio() {
        let sao_paulo = point(-46.6333, -23.5505);
        let rio = point(-43.1729, -22.9068);
        let distance = haversine_distance_km(&sao_paulo, &rio).unwrap();
        assert!(distance > 357.0 && distance < 361.0, "got {}", distance);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let result = haversine_distance_km(&point(0.0, 95.0), &point(0.0, 0.0));
        assert!(matches!(result, Err(GeoError::InvalidCoordinate { .. })));

        let result = haversine_distance_km(&point(0.0, 0.0), &point(-180.5, 0.0));
        assert!(matches!(result, Err(GeoError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_rank_nearest_sorts_and_truncates() {
        let origin = point(-46.6333, -23.5505);
        let candidates = vec![
            ("far", Some(point(-46.5, -23.4))),
            ("missing", None),
            ("near", Some(point(-46.6, -23.55))),
            ("mid", Some(point(-46.7, -23.6))),
        ];

        let ranked = rank_nearest(&origin, candidates, 2).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert!(ranked[0].distance_km <= ranked[1].distance_km);
    }

    #[test]
    fn test_rank_nearest_keeps_input_order_on_ties() {
        let origin = point(0.0, 0.0);
        let same = Some(point(1.0, 1.0));
        let candidates = vec![(1, same), (2, same), (3, Some(point(0.5, 0.5))), (4, same)];

        let ranked = rank_nearest(&origin, candidates, 5).unwrap();
        let ids: Vec<i32> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_rank_nearest_skips_invalid_candidates_but_rejects_invalid_origin() {
        let candidates = vec![("bad", Some(point(200.0, 0.0))), ("ok", Some(point(1.0, 0.0)))];
        let ranked = rank_nearest(&point(0.0, 0.0), candidates.clone(), 5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "ok");

        assert!(rank_nearest(&point(0.0, -91.0), candidates, 5).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(360.74882, 1), 360.7);
        assert_eq!(round_to(360.74882, 2), 360.75);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_to_half_way_values() {
        // 以 f64 乘積判斷，0.5 遠離零進位
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(-0.25, 1), -0.3);
        // 0.35 * 10 剛好是 3.5，進位為 0.4 (不是十進位精確值的 0.3)
        assert_eq!(round_to(0.35, 1), 0.4);
        // 1.005 * 100 = 100.49999999999999，捨去
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_antipodal_distance_is_half_circumference() {
        let a = point(-179.0, -82.0);
        let b = point(1.0, 82.0);
        let distance = haversine_distance_km(&a, &b).unwrap();
        assert!(distance.is_finite());
        assert!((distance - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-2, "got {}", distance);
    }
}
