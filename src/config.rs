//! Server configuration from environment variables
//!
//! Every setting has a default so the server runs with no environment at
//! all. Values that are set but unparseable are startup errors.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use chrono_tz::Tz;

use crate::concelhos::AnchorPolicy;
use crate::upstream::Endpoints;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub static_dir: PathBuf,
    pub endpoints: Endpoints,
    pub upstream_timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for upstream calls
    pub use_system_proxy: bool,
    /// Timezone the national report dates are written in
    pub report_timezone: Tz,
    pub anchor_policy: AnchorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 9090,
            static_dir: PathBuf::from("static"),
            endpoints: Endpoints::default(),
            upstream_timeout: Duration::from_secs(10),
            use_system_proxy: true,
            report_timezone: chrono_tz::Europe::Lisbon,
            anchor_policy: AnchorPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let endpoints = Endpoints {
            last_update: var_or("LAST_UPDATE_URL", defaults.endpoints.last_update),
            country_stats: var_or("COUNTRY_STATS_URL", defaults.endpoints.country_stats),
            municipalities: var_or("MUNICIPALITIES_URL", defaults.endpoints.municipalities),
        };

        let anchor_policy = match env::var("ANCHOR_EXCEPTIONS") {
            Ok(raw) => AnchorPolicy::new(parse_exceptions(&raw)),
            Err(_) => AnchorPolicy::default(),
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            endpoints,
            upstream_timeout: Duration::from_secs(parse_var(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )?),
            use_system_proxy: parse_var("UPSTREAM_USE_PROXY", defaults.use_system_proxy)?,
            report_timezone: parse_timezone("REPORT_TIMEZONE", defaults.report_timezone)?,
            anchor_policy,
        })
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  STATIC_DIR: {}", self.static_dir.display());
        tracing::info!("  LAST_UPDATE_URL: {}", self.endpoints.last_update);
        tracing::info!("  COUNTRY_STATS_URL: {}", self.endpoints.country_stats);
        tracing::info!("  MUNICIPALITIES_URL: {}", self.endpoints.municipalities);
        tracing::info!("  UPSTREAM_TIMEOUT_SECS: {}", self.upstream_timeout.as_secs());
        tracing::info!("  UPSTREAM_USE_PROXY: {}", self.use_system_proxy);
        tracing::info!("  REPORT_TIMEZONE: {}", self.report_timezone);
        tracing::info!("  ANCHOR_EXCEPTIONS: {:?}", self.anchor_policy.exceptions());
    }
}

fn var_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::debug!("{} not set, using default: {}", key, default);
        default
    })
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Invalid {} value {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// IANA timezone name, e.g. `Europe/Lisbon`
fn parse_timezone(key: &str, default: Tz) -> anyhow::Result<Tz> {
    match env::var(key) {
        Ok(name) => name
            .trim()
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid {} value {:?}: {}", key, name, e)),
        Err(_) => Ok(default),
    }
}

/// `;`-separated display names; blank entries are dropped
fn parse_exceptions(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
