//! Regional, age, sex and symptom breakdowns of the national report

use serde::Serialize;

use crate::upstream::NationalReport;

/// Column suffix and display name of each health region (ARS)
const REGIONS: [(&str, &str); 8] = [
    ("arsnorte", "Norte"),
    ("arscentro", "Centro"),
    ("arslvt", "Lisboa e Vale do Tejo"),
    ("arsalentejo", "Alentejo"),
    ("arsalgarve", "Algarve"),
    ("acores", "Açores"),
    ("madeira", "Madeira"),
    ("estrangeiro", "Estrangeiro"),
];

/// Column infix and display label of each age bracket
const AGE_BRACKETS: [(&str, &str); 9] = [
    ("0_9", "0-9"),
    ("10_19", "10-19"),
    ("20_29", "20-29"),
    ("30_39", "30-39"),
    ("40_49", "40-49"),
    ("50_59", "50-59"),
    ("60_69", "60-69"),
    ("70_79", "70-79"),
    ("80_plus", "80+"),
];

/// Column suffix and display label of each reported symptom
const SYMPTOMS: [(&str, &str); 6] = [
    ("tosse", "Tosse"),
    ("febre", "Febre"),
    ("dificuldade_respiratoria", "Dificuldade respiratória"),
    ("cefaleia", "Cefaleia"),
    ("dores_musculares", "Dores musculares"),
    ("fraqueza_generalizada", "Fraqueza generalizada"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRow {
    pub name: &'static str,
    pub confirmed: f64,
    pub deaths: f64,
    pub recovered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBracketRow {
    pub label: &'static str,
    pub confirmed_f: f64,
    pub confirmed_m: f64,
    pub deaths_f: f64,
    pub deaths_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexRow {
    pub label: &'static str,
    pub confirmed: f64,
    pub deaths: f64,
}

/// Share of confirmed cases reporting a symptom, as a fraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomRow {
    pub label: &'static str,
    pub share: f64,
}

pub fn region_rows(report: &NationalReport) -> Vec<RegionRow> {
    REGIONS
        .iter()
        .map(|&(suffix, name)| RegionRow {
            name,
            confirmed: report.breakdown_value(&format!("confirmados_{}", suffix)),
            deaths: report.breakdown_value(&format!("obitos_{}", suffix)),
            recovered: report.breakdown_value(&format!("recuperados_{}", suffix)),
        })
        .collect()
}

pub fn age_bracket_rows(report: &NationalReport) -> Vec<AgeBracketRow> {
    AGE_BRACKETS
        .iter()
        .map(|&(infix, label)| AgeBracketRow {
            label,
            confirmed_f: report.breakdown_value(&format!("confirmados_{}_f", infix)),
            confirmed_m: report.breakdown_value(&format!("confirmados_{}_m", infix)),
            deaths_f: report.breakdown_value(&format!("obitos_{}_f", infix)),
            deaths_m: report.breakdown_value(&format!("obitos_{}_m", infix)),
        })
        .collect()
}

pub fn sex_rows(report: &NationalReport) -> Vec<SexRow> {
    [("f", "Mulheres"), ("m", "Homens")]
        .into_iter()
        .map(|(suffix, label)| SexRow {
            label,
            confirmed: report.breakdown_value(&format!("confirmados_{}", suffix)),
            deaths: report.breakdown_value(&format!("obitos_{}", suffix)),
        })
        .collect()
}

pub fn symptom_rows(report: &NationalReport) -> Vec<SymptomRow> {
    SYMPTOMS
        .iter()
        .map(|&(suffix, label)| SymptomRow {
            label,
            share: report.breakdown_value(&format!("sintomas_{}", suffix)),
        })
        .collect()
}
