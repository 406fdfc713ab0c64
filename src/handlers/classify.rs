use axum::{
    extract::{Multipart, State},
    response::Json,
};

use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::models::{AboutResponse, ClassifyResponse, DatasetSplit, LabelListResponse};

/// Classify an uploaded image. The first multipart field is taken as the
/// image payload.
pub async fn classify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {}", e)))?
        .ok_or_else(|| AppError::Validation("Request contains no image field".to_string()))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read upload: {}", e)))?;

    let response = state.classify.classify(&data)?;
    Ok(Json(response))
}

pub async fn list_labels(State(state): State<AppState>) -> Json<LabelListResponse> {
    let labels = state.classify.labels();
    let total = labels.len();
    Json(LabelListResponse { labels, total })
}

pub async fn about() -> Json<AboutResponse> {
    let fruits = [
        "Banana",
        "Apple",
        "Pear",
        "Grapes",
        "Orange",
        "Kiwi",
        "Watermelon",
        "Pomegranate",
        "Pineapple",
        "Mango",
    ];
    let vegetables = [
        "Cucumber",
        "Carrot",
        "Capsicum",
        "Onion",
        "Potato",
        "Lemon",
        "Tomato",
        "Radish",
        "Beetroot",
        "Cabbage",
        "Lettuce",
        "Spinach",
        "Soybean",
        "Cauliflower",
        "Bell Pepper",
        "Chilli Pepper",
        "Turnip",
        "Corn",
        "Sweetcorn",
        "Sweet Potato",
        "Paprika",
        "Jalapeno",
        "Ginger",
        "Garlic",
        "Peas",
        "Eggplant",
    ];

    Json(AboutResponse {
        title: "Fruits & Vegetable Recognition".to_string(),
        description: "The dataset contains images of fruits and vegetables, organized into \
                      train, test and validation folders."
            .to_string(),
        fruits: fruits.iter().map(|s| s.to_string()).collect(),
        vegetables: vegetables.iter().map(|s| s.to_string()).collect(),
        splits: vec![
            DatasetSplit {
                name: "train".to_string(),
                images_per_category: 100,
            },
            DatasetSplit {
                name: "test".to_string(),
                images_per_category: 10,
            },
            DatasetSplit {
                name: "validation".to_string(),
                images_per_category: 10,
            },
        ],
    })
}
