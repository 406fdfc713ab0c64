pub mod classify;
pub mod forecast;
pub mod health;

use crate::services::{ClassifyService, ForecastService};

#[derive(Clone)]
pub struct AppState {
    pub classify: ClassifyService,
    pub forecast: ForecastService,
}
