pub mod classify;
pub mod forecast;

pub use classify::*;
pub use forecast::*;
