pub mod classify;
pub mod forecast;
pub mod tariff;

pub use classify::ClassifyService;
pub use forecast::ForecastService;
