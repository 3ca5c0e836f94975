//! HTTP client for the three upstream APIs
//!
//! Every fetch is a single request bounded by the client timeout. The
//! client is built once and shared read-only between requests.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::UpstreamError;
use super::models::{CountryStats, FeatureCollection, MunicipalityRecord, NationalReport};
use crate::utils::{parse_report_date, should_use_yesterday};

/// Columns requested from the municipality feature service
const MUNICIPALITY_FIELDS: &str =
    "Concelho,ConfirmadosAcumulado_Conc,ConfirmadosNovos_Conc,Recuperados_Conc,Data_Conc";

/// Upstream URLs
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub last_update: String,
    pub country_stats: String,
    pub municipalities: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            last_update: "https://covid19-api.vost.pt/Requests/get_last_update".to_string(),
            country_stats: "https://disease.sh/v3/covid-19/countries/portugal".to_string(),
            municipalities: "https://services.arcgis.com/CCZiGSEQbAxxFVh3/ArcGIS/rest/services/COVID_Concelhos_ConcelhosDetalhes/FeatureServer/0/query".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    endpoints: Endpoints,
}

impl UpstreamClient {
    /// `use_system_proxy: false` ignores `HTTP_PROXY` and friends
    pub fn new(
        endpoints: Endpoints,
        timeout: Duration,
        use_system_proxy: bool,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if !use_system_proxy {
            builder = builder.no_proxy();
        }

        let http = builder.build()?;

        Ok(Self { http, endpoints })
    }

    /// Latest national report
    pub async fn fetch_last_update(&self) -> Result<NationalReport, UpstreamError> {
        let url = &self.endpoints.last_update;
        let body = self.send(url, self.http.get(url)).await?;
        decode(url, &body)
    }

    /// Country statistics, optionally the previous day's
    pub async fn fetch_country_stats(&self, yesterday: bool) -> Result<CountryStats, UpstreamError> {
        let url = &self.endpoints.country_stats;
        let mut request = self.http.get(url);
        if yesterday {
            request = request.query(&[("yesterday", "true")]);
        }

        let body = self.send(url, request).await?;
        decode(url, &body)
    }

    /// Country statistics matching the day of the national report
    ///
    /// Returns the stats and whether yesterday's numbers were used. A report
    /// date that cannot be read falls back to today's numbers.
    pub async fn fetch_country_stats_for(
        &self,
        report: &NationalReport,
        today: NaiveDate,
    ) -> Result<(CountryStats, bool), UpstreamError> {
        let yesterday = match parse_report_date(&report.data) {
            Some(report_date) => should_use_yesterday(today, report_date),
            None => {
                tracing::warn!("Unreadable report date {:?}, using today's country stats", report.data);
                false
            }
        };

        let stats = self.fetch_country_stats(yesterday).await?;
        Ok((stats, yesterday))
    }

    /// Municipality rows, in the order the feature service returns them
    pub async fn fetch_municipalities(&self) -> Result<Vec<MunicipalityRecord>, UpstreamError> {
        let url = &self.endpoints.municipalities;
        let request = self.http.post(url).form(&[
            ("f", "json"),
            ("where", "1=1"),
            ("outFields", MUNICIPALITY_FIELDS),
            ("returnGeometry", "false"),
        ]);

        let body = self.send(url, request).await?;
        let collection: FeatureCollection = decode(url, &body)?;

        if let Some(error) = collection.error {
            return Err(UpstreamError::Service {
                url: url.clone(),
                code: error.code,
                message: error.message,
            });
        }

        Ok(collection
            .features
            .into_iter()
            .map(|feature| feature.attributes)
            .collect())
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Vec<u8>, UpstreamError> {
        let start = Instant::now();
        let transport = |source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        tracing::debug!("Fetched {} ({} bytes) in {:?}", url, body.len(), start.elapsed());

        Ok(body.to_vec())
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, UpstreamError> {
    serde_json::from_slice(body).map_err(|source| UpstreamError::Decode {
        url: url.to_string(),
        source,
    })
}
