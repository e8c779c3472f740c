//! # server
//!
//! HTTP boundary for the campaign analytics engine. Requests are validated
//! once here, then handed to the pure core on tokio's blocking pool.

pub mod auth;
pub mod config;
pub mod error;
pub mod health;
pub mod requests;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use requests::{Analytics, RequestError};
pub use routes::app;
pub use state::AppState;
