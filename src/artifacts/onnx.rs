//! ONNX Runtime session loading.

use crate::error::Result;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Initialize the ONNX Runtime environment. Call once at startup, before
/// any session is created.
pub fn init_runtime() -> Result<()> {
    ort::init().commit()?;
    Ok(())
}

pub fn load_session(path: &Path, threads: usize) -> Result<Session> {
    info!(path = %path.display(), threads, "Loading ONNX model");

    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(threads)?
        .commit_from_file(path)?;

    Ok(session)
}

/// First declared input name, falling back when the model carries none.
pub fn input_name(session: &Session, fallback: &str) -> String {
    session
        .inputs
        .first()
        .map(|i| i.name.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// First declared output name, falling back when the model carries none.
pub fn output_name(session: &Session, fallback: &str) -> String {
    session
        .outputs
        .first()
        .map(|o| o.name.clone())
        .unwrap_or_else(|| fallback.to_string())
}
