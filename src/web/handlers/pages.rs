// Page handlers for HTML rendering with Askama
//
// Each handler fetches what its page needs, one upstream call after the
// other, and renders the result. Upstream failures never render a partial
// page.

use askama::Template;
use axum::{extract::State, response::Html};

use crate::api_server::{AppError, AppState};
use crate::concelhos::{self, JumpLink, Municipality};
use crate::national::{self, AgeBracketRow, RegionRow, SexRow, SymptomRow};
use crate::upstream::{CountryStats, NationalReport};
use crate::utils::ts_to_date;

mod filters {
    use std::borrow::Borrow;
    use std::fmt::Display;

    /// Count with grouped thousands
    pub fn count<T: Display>(value: T) -> ::askama::Result<String> {
        Ok(crate::utils::group_thousands(&value.to_string()))
    }

    /// Ratio with one decimal place
    pub fn ratio<T: Borrow<f64>>(value: T) -> ::askama::Result<String> {
        Ok(crate::utils::group_thousands(&format!("{:.1}", value.borrow())))
    }

    /// Fraction shown as a percentage with one decimal place
    pub fn percent<T: Borrow<f64>>(value: T) -> ::askama::Result<String> {
        Ok(format!("{:.1}%", value.borrow() * 100.0))
    }
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

// ============================================================================
// National Overview
// ============================================================================

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub report: NationalReport,
    pub country: CountryStats,
    pub country_updated: String,
    /// Country stats are the previous day's
    pub yesterday: bool,
    pub age_brackets: Vec<AgeBracketRow>,
    pub sexes: Vec<SexRow>,
    pub symptoms: Vec<SymptomRow>,
}

pub async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let report = state.upstream.fetch_last_update().await?;
    let (country, yesterday) = state
        .upstream
        .fetch_country_stats_for(&report, state.today())
        .await?;

    let template = IndexTemplate {
        title: "COVID-19 em Portugal".to_string(),
        country_updated: ts_to_date(country.updated),
        age_brackets: national::age_bracket_rows(&report),
        sexes: national::sex_rows(&report),
        symptoms: national::symptom_rows(&report),
        report,
        country,
        yesterday,
    };
    render(&template)
}

// ============================================================================
// Regional Breakdown
// ============================================================================

#[derive(Template)]
#[template(path = "pages/regional.html")]
pub struct RegionalTemplate {
    pub title: String,
    pub report: NationalReport,
    pub regions: Vec<RegionRow>,
}

pub async fn regional_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let report = state.upstream.fetch_last_update().await?;

    let template = RegionalTemplate {
        title: "Dados por região".to_string(),
        regions: national::region_rows(&report),
        report,
    };
    render(&template)
}

// ============================================================================
// Municipality List
// ============================================================================

#[derive(Template)]
#[template(path = "pages/concelho.html")]
pub struct ConcelhoTemplate {
    pub title: String,
    pub report: NationalReport,
    pub municipalities: Vec<Municipality>,
    pub jump_links: Vec<JumpLink>,
}

pub async fn concelho_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let report = state.upstream.fetch_last_update().await?;
    let records = state.upstream.fetch_municipalities().await?;

    let municipalities = concelhos::annotate(records, &state.config.anchor_policy);
    tracing::debug!("Prepared {} municipalities", municipalities.len());

    let template = ConcelhoTemplate {
        title: "Dados por concelho".to_string(),
        jump_links: concelhos::jump_links(&municipalities),
        report,
        municipalities,
    };
    render(&template)
}
