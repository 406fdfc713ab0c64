//! Power draw regression model.

use crate::artifacts::onnx;
use crate::error::{AppError, Result};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Hourly feature vector fed to the power model. Field order matches the
/// model's training columns: hour, day of month, weekday, encoded device id.
/// `weekday` counts from Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRow {
    pub hour: u32,
    pub day: u32,
    pub weekday: u32,
    pub device_id: i64,
}

/// Predicts the power draw in watts for each feature row.
pub trait PowerModel: Send + Sync {
    fn predict_watts(&self, rows: &[FeatureRow]) -> Result<Vec<f64>>;
}

pub struct OnnxPowerRegressor {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxPowerRegressor {
    pub fn load(path: impl AsRef<Path>, threads: usize) -> Result<Self> {
        let session = onnx::load_session(path.as_ref(), threads)?;
        let input_name = onnx::input_name(&session, "float_input");
        let output_name = onnx::output_name(&session, "variable");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl PowerModel for OnnxPowerRegressor {
    fn predict_watts(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut data = Vec::with_capacity(rows.len() * 4);
        for row in rows {
            data.extend_from_slice(&[
                row.hour as f32,
                row.day as f32,
                row.weekday as f32,
                row.device_id as f32,
            ]);
        }

        let shape = vec![rows.len() as i64, 4_i64];
        let input = Tensor::from_array((shape, data))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AppError::Artifact("regressor session lock poisoned".to_string()))?;

        let outputs = session.run(ort::inputs![&self.input_name => input])?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            AppError::Artifact(format!("regressor output {} missing", self.output_name))
        })?;
        let (_shape, predictions) = output.try_extract_tensor::<f32>()?;

        if predictions.len() != rows.len() {
            return Err(AppError::Artifact(format!(
                "regressor returned {} predictions for {} rows",
                predictions.len(),
                rows.len()
            )));
        }

        debug!(rows = rows.len(), "Power regression inference complete");

        Ok(predictions.iter().map(|&w| w as f64).collect())
    }
}
