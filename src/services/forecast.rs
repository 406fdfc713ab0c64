use crate::artifacts::{FeatureRow, LabelSet, PowerModel};
use crate::config::PricingConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ApplianceSummary, BarPoint, ChartData, DailySummary, ForecastRequest, ForecastResponse,
    ForecastTotals, LinePoint, PieSlice, Recommendations,
};
use crate::services::tariff;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

pub const MAX_FORECAST_DAYS: u32 = 31;
pub const MAX_DURATION_HOURS: u32 = 24;

/// One hour of one appliance's forecast, with the derived columns.
#[derive(Debug, Clone)]
struct HourlyForecast {
    ts: NaiveDateTime,
    energy_kwh: f64,
    cost: f64,
    co2_kg: f64,
}

#[derive(Clone)]
pub struct ForecastService {
    model: Arc<dyn PowerModel>,
    appliances: Arc<LabelSet>,
    pricing: PricingConfig,
}

impl ForecastService {
    pub fn new(model: Arc<dyn PowerModel>, appliances: Arc<LabelSet>, pricing: PricingConfig) -> Self {
        Self {
            model,
            appliances,
            pricing,
        }
    }

    /// Appliance names the encoder knows, in id order.
    pub fn appliances(&self) -> Vec<String> {
        self.appliances.labels().to_vec()
    }

    pub fn run(&self, request: ForecastRequest) -> Result<ForecastResponse> {
        self.validate(&request)?;

        let schedule = hourly_schedule(request.start_date, request.days);
        let mut rows: Vec<HourlyForecast> = Vec::with_capacity(schedule.len() * request.appliances.len());
        let mut summaries: Vec<ApplianceSummary> = Vec::with_capacity(request.appliances.len());

        for appliance in &request.appliances {
            // Checked during validation; the map here keeps the invariant local.
            let device_id = self.appliances.index_of(appliance).ok_or_else(|| {
                AppError::Validation(format!("Unknown appliance: {}", appliance))
            })? as i64;

            let features: Vec<FeatureRow> = schedule
                .iter()
                .map(|ts| FeatureRow {
                    hour: ts.hour(),
                    day: ts.day(),
                    weekday: ts.weekday().num_days_from_monday(),
                    device_id,
                })
                .collect();

            let watts = self.model.predict_watts(&features)?;

            let mut summary = ApplianceSummary {
                appliance: appliance.clone(),
                energy_kwh: 0.0,
                cost: 0.0,
                co2_kg: 0.0,
            };

            for (ts, watts) in schedule.iter().zip(watts) {
                let energy_kwh = tariff::energy_kwh(watts, request.duration_hours);
                let cost = tariff::cost(&self.pricing, energy_kwh, ts.hour());
                let co2_kg = tariff::co2_kg(&self.pricing, energy_kwh);

                summary.energy_kwh += energy_kwh;
                summary.cost += cost;
                summary.co2_kg += co2_kg;

                rows.push(HourlyForecast {
                    ts: *ts,
                    energy_kwh,
                    cost,
                    co2_kg,
                });
            }

            summaries.push(summary);
        }

        let daily = daily_summaries(&rows);
        let totals = grand_totals(&summaries);
        let recommendations = build_recommendations(&summaries, &daily)?;
        let charts = build_charts(&summaries, &daily);
        let narrative = build_narrative(request.days, &totals, &recommendations);

        info!(
            appliances = summaries.len(),
            days = request.days,
            total_cost = totals.cost,
            "Forecast complete"
        );

        Ok(ForecastResponse {
            days: request.days,
            duration_hours: request.duration_hours,
            start_date: request.start_date,
            summaries,
            daily,
            totals,
            recommendations,
            charts,
            narrative,
        })
    }

    fn validate(&self, request: &ForecastRequest) -> Result<()> {
        if request.appliances.is_empty() {
            return Err(AppError::Validation(
                "Select at least one appliance".to_string(),
            ));
        }

        for appliance in &request.appliances {
            if self.appliances.index_of(appliance).is_none() {
                return Err(AppError::Validation(format!(
                    "Unknown appliance: {}",
                    appliance
                )));
            }
        }

        if request.days == 0 || request.days > MAX_FORECAST_DAYS {
            return Err(AppError::Validation(format!(
                "Days must be between 1 and {}",
                MAX_FORECAST_DAYS
            )));
        }

        if request.duration_hours == 0 || request.duration_hours > MAX_DURATION_HOURS {
            return Err(AppError::Validation(format!(
                "Usage hours per day must be between 1 and {}",
                MAX_DURATION_HOURS
            )));
        }

        Ok(())
    }
}

/// `24 * days` hourly timestamps, starting at midnight on the start date.
fn hourly_schedule(start_date: NaiveDate, days: u32) -> Vec<NaiveDateTime> {
    let start = start_date.and_time(NaiveTime::MIN);
    (0..days as i64 * 24)
        .map(|h| start + Duration::hours(h))
        .collect()
}

/// Per-calendar-day totals across all selected appliances, chronological.
fn daily_summaries(rows: &[HourlyForecast]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for row in rows {
        let date = row.ts.date();
        let entry = days.entry(date).or_insert_with(|| DailySummary {
            date,
            energy_kwh: 0.0,
            cost: 0.0,
            co2_kg: 0.0,
        });
        entry.energy_kwh += row.energy_kwh;
        entry.cost += row.cost;
        entry.co2_kg += row.co2_kg;
    }

    days.into_values().collect()
}

fn grand_totals(summaries: &[ApplianceSummary]) -> ForecastTotals {
    let energy_kwh = summaries.iter().map(|s| s.energy_kwh).sum();
    let cost = summaries.iter().map(|s| s.cost).sum();
    let co2_kg: f64 = summaries.iter().map(|s| s.co2_kg).sum();

    ForecastTotals {
        energy_kwh,
        cost,
        co2_kg,
        equivalent_km: co2_kg * tariff::KM_PER_KG_CO2,
    }
}

/// Best/worst day by total cost and the top cost/CO2 appliances. Ties go to
/// the first occurrence.
fn build_recommendations(
    summaries: &[ApplianceSummary],
    daily: &[DailySummary],
) -> Result<Recommendations> {
    let (Some(first_day), Some(first_summary)) = (daily.first(), summaries.first()) else {
        return Err(AppError::Validation("Forecast window is empty".to_string()));
    };

    let mut best_day = first_day;
    let mut worst_day = first_day;
    for day in &daily[1..] {
        if day.cost < best_day.cost {
            best_day = day;
        }
        if day.cost > worst_day.cost {
            worst_day = day;
        }
    }

    let mut top_cost = first_summary;
    let mut top_co2 = first_summary;
    for summary in &summaries[1..] {
        if summary.cost > top_cost.cost {
            top_cost = summary;
        }
        if summary.co2_kg > top_co2.co2_kg {
            top_co2 = summary;
        }
    }

    Ok(Recommendations {
        best_day: best_day.date,
        best_day_cost: best_day.cost,
        worst_day: worst_day.date,
        worst_day_cost: worst_day.cost,
        top_cost_appliance: top_cost.appliance.clone(),
        top_cost: top_cost.cost,
        top_co2_appliance: top_co2.appliance.clone(),
        top_co2_kg: top_co2.co2_kg,
    })
}

fn build_charts(summaries: &[ApplianceSummary], daily: &[DailySummary]) -> ChartData {
    let total_cost: f64 = summaries.iter().map(|s| s.cost).sum();

    let cost_share = summaries
        .iter()
        .map(|s| PieSlice {
            label: s.appliance.clone(),
            value: s.cost,
            share_pct: if total_cost > 0.0 {
                s.cost / total_cost * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let co2_by_appliance = summaries
        .iter()
        .map(|s| BarPoint {
            label: s.appliance.clone(),
            value: s.co2_kg,
        })
        .collect();

    let daily_cost = daily
        .iter()
        .map(|d| LinePoint {
            date: d.date,
            value: d.cost,
        })
        .collect();

    ChartData {
        cost_share,
        co2_by_appliance,
        daily_cost,
    }
}

fn build_narrative(days: u32, totals: &ForecastTotals, rec: &Recommendations) -> Vec<String> {
    vec![
        format!("Total across all appliances for {} days:", days),
        format!("Energy: {:.1} kWh", totals.energy_kwh),
        format!("Cost: ${:.2}", totals.cost),
        format!("Emissions: {:.1} kg CO2", totals.co2_kg),
        format!(
            "That's like driving ~{:.0} km in a petrol car.",
            totals.equivalent_km
        ),
        format!(
            "Best day to run energy-heavy appliances: {} (~${:.2})",
            rec.best_day, rec.best_day_cost
        ),
        format!(
            "Avoid heavy use on: {} (~${:.2})",
            rec.worst_day, rec.worst_day_cost
        ),
        format!(
            "Biggest cost driver: {} (~${:.2})",
            rec.top_cost_appliance, rec.top_cost
        ),
        format!(
            "Highest carbon impact: {} (~{:.1} kg CO2)",
            rec.top_co2_appliance, rec.top_co2_kg
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPowerModel {
        watts: f64,
    }

    impl PowerModel for FixedPowerModel {
        fn predict_watts(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
            Ok(vec![self.watts; rows.len()])
        }
    }

    fn service(watts: f64) -> ForecastService {
        let appliances = Arc::new(LabelSet::parse("Fridge\nWasher\nHeater\n").unwrap());
        ForecastService::new(
            Arc::new(FixedPowerModel { watts }),
            appliances,
            PricingConfig::default(),
        )
    }

    fn request() -> ForecastRequest {
        ForecastRequest {
            appliances: vec!["Fridge".to_string()],
            days: 7,
            duration_hours: 3,
            start_date: NaiveDate::from_ymd_opt(2022, 9, 24).unwrap(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_appliance_list() {
        let service = service(100.0);
        let request = ForecastRequest {
            appliances: vec![],
            ..request()
        };

        assert!(service.run(request).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_appliance() {
        let service = service(100.0);
        let request = ForecastRequest {
            appliances: vec!["Toaster".to_string()],
            ..request()
        };

        let err = service.run(request).unwrap_err();
        assert!(err.to_string().contains("Toaster"));
    }

    #[test]
    fn test_validate_rejects_zero_days() {
        let service = service(100.0);
        let request = ForecastRequest {
            days: 0,
            ..request()
        };

        assert!(service.run(request).is_err());
    }

    #[test]
    fn test_validate_rejects_days_over_max() {
        let service = service(100.0);
        let request = ForecastRequest {
            days: MAX_FORECAST_DAYS + 1,
            ..request()
        };

        assert!(service.run(request).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let service = service(100.0);
        let request = ForecastRequest {
            duration_hours: 0,
            ..request()
        };

        assert!(service.run(request).is_err());
    }

    #[test]
    fn test_hourly_schedule_covers_whole_horizon() {
        let start = NaiveDate::from_ymd_opt(2022, 9, 24).unwrap();
        let schedule = hourly_schedule(start, 3);

        assert_eq!(schedule.len(), 72);
        assert_eq!(schedule[0], start.and_time(NaiveTime::MIN));
        assert_eq!(schedule[23].hour(), 23);
        assert_eq!(schedule[24].date(), start.succ_opt().unwrap());
        assert_eq!(schedule.last().unwrap().hour(), 23);
    }

    #[test]
    fn test_daily_summary_groups_by_calendar_date() {
        let service = service(1000.0);
        let response = service.run(request()).unwrap();

        assert_eq!(response.daily.len(), 7);
        assert_eq!(
            response.daily[0].date,
            NaiveDate::from_ymd_opt(2022, 9, 24).unwrap()
        );
        assert_eq!(
            response.daily[6].date,
            NaiveDate::from_ymd_opt(2022, 9, 30).unwrap()
        );
    }

    // 1000 W, 3 h/day: every hourly row is 3.0 kWh. A day has 8 night hours
    // (22, 23 and 0-5) and 16 day hours, so the daily cost is
    // 3 * (8 * 0.09 + 16 * 0.15) = 9.36.
    #[test]
    fn test_fixed_watts_daily_cost() {
        let service = service(1000.0);
        let response = service.run(request()).unwrap();

        for day in &response.daily {
            assert!((day.cost - 9.36).abs() < 1e-9, "day cost {}", day.cost);
            assert!((day.energy_kwh - 72.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_summary_equals_sum_of_daily_rows() {
        let service = service(250.0);
        let response = service.run(request()).unwrap();

        let summary = &response.summaries[0];
        let daily_energy: f64 = response.daily.iter().map(|d| d.energy_kwh).sum();
        let daily_cost: f64 = response.daily.iter().map(|d| d.cost).sum();
        let daily_co2: f64 = response.daily.iter().map(|d| d.co2_kg).sum();

        assert!((summary.energy_kwh - daily_energy).abs() < 1e-9);
        assert!((summary.cost - daily_cost).abs() < 1e-9);
        assert!((summary.co2_kg - daily_co2).abs() < 1e-9);
    }

    #[test]
    fn test_best_day_ties_resolve_to_first_date() {
        let service = service(1000.0);
        let response = service.run(request()).unwrap();

        // Flat prediction: every day costs the same, so both extremes land
        // on the first date of the window.
        assert_eq!(response.recommendations.best_day, response.start_date);
        assert_eq!(response.recommendations.worst_day, response.start_date);
    }

    #[test]
    fn test_equivalent_km_heuristic() {
        let service = service(1000.0);
        let response = service.run(request()).unwrap();

        assert!(
            (response.totals.equivalent_km - response.totals.co2_kg * 4.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_cost_share_sums_to_100_pct() {
        let service = service(500.0);
        let request = ForecastRequest {
            appliances: vec!["Fridge".to_string(), "Heater".to_string()],
            ..request()
        };
        let response = service.run(request).unwrap();

        let total_pct: f64 = response.charts.cost_share.iter().map(|s| s.share_pct).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_narrative_mentions_recommendations() {
        let service = service(1000.0);
        let response = service.run(request()).unwrap();

        let text = response.narrative.join("\n");
        assert!(text.contains("Best day to run energy-heavy appliances"));
        assert!(text.contains("Biggest cost driver: Fridge"));
    }
}
