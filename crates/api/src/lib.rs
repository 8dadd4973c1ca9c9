pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::{AppState, router};
