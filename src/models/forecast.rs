use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Appliance names to forecast; each must exist in the appliance label
    /// file the regression model was trained with.
    pub appliances: Vec<String>,
    /// Forecast horizon in days.
    pub days: u32,
    /// Average usage hours per day.
    pub duration_hours: u32,
    /// First day of the forecast window.
    pub start_date: NaiveDate,
}

/// Summed energy, cost and emissions for one appliance over the whole window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceSummary {
    pub appliance: String,
    pub energy_kwh: f64,
    pub cost: f64,
    pub co2_kg: f64,
}

/// Totals for one calendar day across all selected appliances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub energy_kwh: f64,
    pub cost: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastTotals {
    pub energy_kwh: f64,
    pub cost: f64,
    pub co2_kg: f64,
    /// Kilometres of petrol-car driving with roughly the same emissions.
    pub equivalent_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub best_day: NaiveDate,
    pub best_day_cost: f64,
    pub worst_day: NaiveDate,
    pub worst_day_cost: f64,
    pub top_cost_appliance: String,
    pub top_cost: f64,
    pub top_co2_appliance: String,
    pub top_co2_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ready-to-render series for the dashboard charts: cost share pie,
/// CO2-per-appliance bars and the daily system cost line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub cost_share: Vec<PieSlice>,
    pub co2_by_appliance: Vec<BarPoint>,
    pub daily_cost: Vec<LinePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub days: u32,
    pub duration_hours: u32,
    pub start_date: NaiveDate,
    pub summaries: Vec<ApplianceSummary>,
    pub daily: Vec<DailySummary>,
    pub totals: ForecastTotals,
    pub recommendations: Recommendations,
    pub charts: ChartData,
    pub narrative: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceListResponse {
    pub appliances: Vec<String>,
    pub total: usize,
}
