use crate::artifacts::{ImageModel, LabelSet};
use crate::error::{AppError, Result};
use crate::models::ClassifyResponse;
use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use std::sync::Arc;
use tracing::info;

/// Input side length the classifier was trained with.
pub const INPUT_SIZE: u32 = 64;

#[derive(Clone)]
pub struct ClassifyService {
    model: Arc<dyn ImageModel>,
    labels: Arc<LabelSet>,
}

impl ClassifyService {
    pub fn new(model: Arc<dyn ImageModel>, labels: Arc<LabelSet>) -> Self {
        Self { model, labels }
    }

    /// Classifier labels, in class-index order.
    pub fn labels(&self) -> Vec<String> {
        self.labels.labels().to_vec()
    }

    pub fn classify(&self, bytes: &[u8]) -> Result<ClassifyResponse> {
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded image is empty".to_string()));
        }

        let image = image::load_from_memory(bytes)
            .map_err(|e| AppError::Validation(format!("Could not decode image: {}", e)))?;

        let pixels = to_input_tensor(&image);
        let probabilities = self.model.predict(pixels)?;

        let (class_index, confidence) = argmax(&probabilities).ok_or_else(|| {
            AppError::Artifact("classifier returned an empty probability vector".to_string())
        })?;

        let label = self.labels.get(class_index).ok_or_else(|| {
            AppError::Artifact(format!(
                "class index {} has no label ({} labels loaded)",
                class_index,
                self.labels.len()
            ))
        })?;

        info!(label, class_index, confidence, "Image classified");

        Ok(ClassifyResponse {
            label: label.to_string(),
            class_index,
            confidence,
        })
    }
}

/// Resize to the training size and lay the RGB pixels out as an NHWC tensor
/// of raw 0-255 floats, matching the classifier's training input.
fn to_input_tensor(image: &DynamicImage) -> Array4<f32> {
    let resized = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, size, size, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, y as usize, x as usize, channel]] = pixel[channel] as f32;
        }
    }
    tensor
}

/// Index and value of the largest element; ties keep the first occurrence.
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .enumerate()
        .fold(None, |best, (index, &value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((index, value)),
        })
}
