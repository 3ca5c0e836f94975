//! COVID-19 dashboard for Portugal
//!
//! Small web server rendering national, regional and municipality pages
//! from three public upstream APIs.
//!
//! - `upstream/`: HTTP client and payload schemas for the upstream APIs
//! - `concelhos`: municipality list preparation (casing, dates, jump anchors)
//! - `national`: regional and age breakdowns of the national report
//! - `utils/`: date, text and number helpers
//! - `web/`: askama page handlers
//! - `api_server`: application state, router and error mapping

pub mod api_server;
pub mod concelhos;
pub mod config;
pub mod national;
pub mod upstream;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use api_server::{create_router, AppError, AppState};
pub use concelhos::{annotate, AnchorPolicy, Municipality};
pub use config::Config;
pub use upstream::{UpstreamClient, UpstreamError};
