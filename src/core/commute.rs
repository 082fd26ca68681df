use crate::core::geo::round_to;
use crate::domain::model::{CommuteEstimate, CommuteParams};
use crate::utils::error::{GeoError, Result};

const MINUTES_PER_HOUR: f64 = 60.0;

impl CommuteParams {
    /// 參數檢查：時速必須為正，其餘不可為負或非有限值
    pub fn check(&self) -> Result<()> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(GeoError::invalid_input(format!(
                "average_speed_kmh must be greater than 0, got {}",
                self.average_speed_kmh
            )));
        }

        for (name, value) in [
            ("cost_per_km", self.cost_per_km),
            ("round_trip_factor", self.round_trip_factor),
            ("score_time_weight", self.score_time_weight),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GeoError::invalid_input(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// 由距離推算通勤時間、分數與年度節省。
///
/// `commute_score` 使用已四捨五入的分鐘數計算，年度時間節省亦同。
pub fn estimate_commute(distance_km: f64, params: &CommuteParams) -> Result<CommuteEstimate> {
    if !(distance_km.is_finite() && distance_km >= 0.0) {
        return Err(GeoError::invalid_input(format!(
            "distance_km must be a non-negative number, got {}",
            distance_km
        )));
    }
    params.check()?;

    let estimated_time_minutes =
        (distance_km / params.average_speed_kmh * MINUTES_PER_HOUR).round();

    let commute_score =
        round_to(distance_km + estimated_time_minutes * params.score_time_weight, 1);

    let annual_savings = round_to(
        distance_km
            * params.round_trip_factor
            * params.cost_per_km
            * params.working_days_per_month as f64
            * params.months_per_year as f64,
        2,
    );

    let annual_time_savings = (estimated_time_minutes
        * params.round_trip_factor
        * params.working_days_per_month as f64
        * params.months_per_year as f64
        / MINUTES_PER_HOUR)
        .round();

    Ok(CommuteEstimate {
        distance_km: round_to(distance_km, 2),
        estimated_time_minutes: estimated_time_minutes as u64,
        commute_score,
        annual_savings,
        annual_time_savings: annual_time_savings as u64,
    })
}
