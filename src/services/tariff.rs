//! Tariff bucketing and unit-conversion arithmetic for the forecast.

use crate::config::PricingConfig;

/// Night tariff window: from 22:00 up to, but excluding, 06:00.
pub const NIGHT_START_HOUR: u32 = 22;
pub const NIGHT_END_HOUR: u32 = 6;

/// Heuristic: 1 kg of CO2 is roughly 4 km of petrol-car driving.
pub const KM_PER_KG_CO2: f64 = 4.0;

pub fn tariff_rate(pricing: &PricingConfig, hour: u32) -> f64 {
    if hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR {
        pricing.night_rate
    } else {
        pricing.day_rate
    }
}

pub fn energy_kwh(watts: f64, duration_hours: u32) -> f64 {
    watts * duration_hours as f64 / 1000.0
}

pub fn cost(pricing: &PricingConfig, energy_kwh: f64, hour: u32) -> f64 {
    energy_kwh * tariff_rate(pricing, hour)
}

pub fn co2_kg(pricing: &PricingConfig, energy_kwh: f64) -> f64 {
    energy_kwh * pricing.co2_factor
}
