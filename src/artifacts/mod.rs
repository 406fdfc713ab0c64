pub mod classifier;
pub mod labels;
pub mod onnx;
pub mod regressor;

pub use classifier::{ImageModel, OnnxImageClassifier};
pub use labels::LabelSet;
pub use regressor::{FeatureRow, OnnxPowerRegressor, PowerModel};
