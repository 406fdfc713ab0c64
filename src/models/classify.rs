use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub label: String,
    pub class_index: usize,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelListResponse {
    pub labels: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    pub name: String,
    pub images_per_category: u32,
}

/// Dataset description backing the recognizer's about page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub title: String,
    pub description: String,
    pub fruits: Vec<String>,
    pub vegetables: Vec<String>,
    pub splits: Vec<DatasetSplit>,
}
