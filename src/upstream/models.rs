//! Upstream payload schemas
//!
//! Field names follow the upstream JSON. Every upstream may send `null` for
//! a number it has no value for; those decode as zero (or an empty string).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default instead of failing
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// National aggregator (last update)
// ============================================================================

/// Latest national report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NationalReport {
    /// Report date, `DD-MM-YYYY`
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
    /// Date the figures refer to, `DD-MM-YYYY HH:MM`
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_dados: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmados: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmados_novos: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recuperados: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub obitos: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ativos: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internados: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internados_uci: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lab: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suspeitos: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vigilancia: f64,
    /// Per-region and per-age columns (`confirmados_arsnorte`, `obitos_0_9_f`, ...)
    #[serde(flatten)]
    pub breakdown: BTreeMap<String, serde_json::Value>,
}

impl NationalReport {
    /// Numeric breakdown column, zero when absent or null
    pub fn breakdown_value(&self, key: &str) -> f64 {
        self.breakdown
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0)
    }
}

// ============================================================================
// Worldwide statistics (country)
// ============================================================================

/// Country statistics from the worldwide API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continent: String,
    /// Unix milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_recovered: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub one_case_per_people: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub one_death_per_people: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub one_test_per_people: i64,
}

// ============================================================================
// ArcGIS feature service (municipalities)
// ============================================================================

/// Raw municipality attributes, as reported
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MunicipalityRecord {
    #[serde(rename = "Concelho", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Unix milliseconds, sometimes truncated
    #[serde(rename = "Data_Conc", default, deserialize_with = "null_as_default")]
    pub report_date_raw: i64,
    #[serde(rename = "ConfirmadosAcumulado_Conc", default, deserialize_with = "null_as_default")]
    pub cumulative_confirmed: i64,
    #[serde(rename = "ConfirmadosNovos_Conc", default, deserialize_with = "null_as_default")]
    pub new_confirmed: i64,
    #[serde(rename = "Recuperados_Conc", default, deserialize_with = "null_as_default")]
    pub recovered: i64,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub attributes: MunicipalityRecord,
}

/// Error object ArcGIS returns with a 200 status
#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_report_nulls() {
        let json = r#"{
            "data": "19-10-2020",
            "data_dados": "18-10-2020 24:00",
            "confirmados": 101860.0,
            "confirmados_novos": 1949.0,
            "recuperados": null,
            "obitos": 2198,
            "confirmados_arsnorte": 42870.0,
            "obitos_80_plus_f": null
        }"#;

        let report: NationalReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.data, "19-10-2020");
        assert_eq!(report.confirmados, 101860.0);
        assert_eq!(report.recuperados, 0.0);
        assert_eq!(report.obitos, 2198.0);
        assert_eq!(report.internados_uci, 0.0);
        assert_eq!(report.breakdown_value("confirmados_arsnorte"), 42870.0);
        assert_eq!(report.breakdown_value("obitos_80_plus_f"), 0.0);
        assert_eq!(report.breakdown_value("missing"), 0.0);
    }

    #[test]
    fn test_country_stats() {
        let json = r#"{
            "updated": 1603116391230,
            "country": "Portugal",
            "cases": 103736,
            "todayCases": 1876,
            "deaths": 2198,
            "todayDeaths": null,
            "casesPerOneMillion": 10179.5,
            "continent": "Europe"
        }"#;

        let stats: CountryStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.country, "Portugal");
        assert_eq!(stats.updated, 1603116391230);
        assert_eq!(stats.today_cases, 1876);
        assert_eq!(stats.today_deaths, 0);
        assert_eq!(stats.cases_per_one_million, 10179.5);
        assert_eq!(stats.population, 0);
    }

    #[test]
    fn test_feature_collection() {
        let json = r#"{
            "objectIdFieldName": "OBJECTID",
            "features": [
                {"attributes": {"Concelho": "ÁGUEDA", "Data_Conc": 1603065600000,
                    "ConfirmadosAcumulado_Conc": 312, "ConfirmadosNovos_Conc": 4}},
                {"attributes": {"Concelho": "ALCOBAÇA", "Data_Conc": null,
                    "ConfirmadosAcumulado_Conc": null, "ConfirmadosNovos_Conc": 0,
                    "Recuperados_Conc": 17}}
            ]
        }"#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        assert!(collection.error.is_none());
        assert_eq!(collection.features.len(), 2);

        let first = &collection.features[0].attributes;
        assert_eq!(first.name, "ÁGUEDA");
        assert_eq!(first.report_date_raw, 1603065600000);
        assert_eq!(first.cumulative_confirmed, 312);
        assert_eq!(first.recovered, 0);

        let second = &collection.features[1].attributes;
        assert_eq!(second.report_date_raw, 0);
        assert_eq!(second.cumulative_confirmed, 0);
        assert_eq!(second.recovered, 17);
    }

    #[test]
    fn test_feature_collection_service_error() {
        let json = r#"{"error": {"code": 400, "message": "Invalid or missing input parameters.", "details": []}}"#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        assert!(collection.features.is_empty());
        let error = collection.error.unwrap();
        assert_eq!(error.code, 400);
        assert_eq!(error.message, "Invalid or missing input parameters.");
    }
}
