//! Upstream data sources
//!
//! - National aggregator: latest national report (totals, per-region, per-age)
//! - Worldwide statistics: country-level figures, today's or yesterday's
//! - ArcGIS feature service: per-municipality figures

pub mod client;
pub mod error;
pub mod models;

pub use client::{Endpoints, UpstreamClient};
pub use error::UpstreamError;
pub use models::{CountryStats, MunicipalityRecord, NationalReport};
