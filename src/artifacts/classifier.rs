//! Image classification model.

use crate::artifacts::onnx;
use crate::error::{AppError, Result};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Class-probability model over a fixed-size RGB image.
pub trait ImageModel: Send + Sync {
    /// Run the classifier on an NHWC `[1, H, W, 3]` pixel tensor and return
    /// the class probability vector. The index of the maximum element is the
    /// predicted class.
    fn predict(&self, pixels: Array4<f32>) -> Result<Vec<f32>>;
}

/// ONNX-backed image classifier. The session needs `&mut` to run, so it is
/// guarded by a mutex and shared behind `Arc`.
pub struct OnnxImageClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxImageClassifier {
    pub fn load(path: impl AsRef<Path>, threads: usize) -> Result<Self> {
        let session = onnx::load_session(path.as_ref(), threads)?;
        let input_name = onnx::input_name(&session, "input");
        let output_name = onnx::output_name(&session, "output");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl ImageModel for OnnxImageClassifier {
    fn predict(&self, pixels: Array4<f32>) -> Result<Vec<f32>> {
        let shape: Vec<i64> = pixels.shape().iter().map(|&d| d as i64).collect();
        let (data, _) = pixels.into_raw_vec_and_offset();
        let input = Tensor::from_array((shape, data))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AppError::Artifact("classifier session lock poisoned".to_string()))?;

        let outputs = session.run(ort::inputs![&self.input_name => input])?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            AppError::Artifact(format!("classifier output {} missing", self.output_name))
        })?;
        let (_shape, probabilities) = output.try_extract_tensor::<f32>()?;

        debug!(classes = probabilities.len(), "Classifier inference complete");

        Ok(probabilities.to_vec())
    }
}
