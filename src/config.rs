use serde::Deserialize;
use std::env;

pub const DEFAULT_DAY_RATE: f64 = 0.15;
pub const DEFAULT_NIGHT_RATE: f64 = 0.09;
pub const DEFAULT_CO2_FACTOR: f64 = 0.475;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    pub classifier_model_path: String,
    pub classifier_labels_path: String,
    pub power_model_path: String,
    pub appliance_labels_path: String,
    pub onnx_threads: usize,
}

/// Tariff rates in $/kWh and grid emission intensity in kg CO2/kWh.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub day_rate: f64,
    pub night_rate: f64,
    pub co2_factor: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            day_rate: DEFAULT_DAY_RATE,
            night_rate: DEFAULT_NIGHT_RATE,
            co2_factor: DEFAULT_CO2_FACTOR,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let classifier_model_path = env::var("CLASSIFIER_MODEL_PATH")
            .unwrap_or_else(|_| "models/classifier.onnx".to_string());

        let classifier_labels_path =
            env::var("CLASSIFIER_LABELS_PATH").unwrap_or_else(|_| "models/labels.txt".to_string());

        let power_model_path = env::var("POWER_MODEL_PATH")
            .unwrap_or_else(|_| "models/power_regressor.onnx".to_string());

        let appliance_labels_path = env::var("APPLIANCE_LABELS_PATH")
            .unwrap_or_else(|_| "models/appliances.txt".to_string());

        let onnx_threads = env::var("ONNX_THREADS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let day_rate = env::var("TARIFF_DAY_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_DAY_RATE);

        let night_rate = env::var("TARIFF_NIGHT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_NIGHT_RATE);

        let co2_factor = env::var("CO2_FACTOR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CO2_FACTOR);

        Ok(Config {
            server: ServerConfig { host, port },
            artifacts: ArtifactConfig {
                classifier_model_path,
                classifier_labels_path,
                power_model_path,
                appliance_labels_path,
                onnx_threads,
            },
            pricing: PricingConfig {
                day_rate,
                night_rate,
                co2_factor,
            },
        })
    }
}
