//! Municipality (concelho) list preparation
//!
//! Turns the raw feature-service rows into display rows: title-cased names,
//! readable dates, and jump-list anchors on the first municipality of each
//! starting letter.
//!
//! Anchors are computed in a single pass that compares each name with the
//! letter of the previous anchor, so the input must already be in display
//! order. Nothing here sorts.

use serde::Serialize;

use crate::upstream::MunicipalityRecord;
use crate::utils::{first_letter, title_case, ts_to_date};

/// The feature service lists this municipality out of alphabetical order
pub const DEFAULT_ANCHOR_EXCEPTION: &str = "Vila Da Praia Da Vitória";

/// Prefix of every anchor id
const ANCHOR_PREFIX: &str = "concelho-";

/// Display names that never open a letter group
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPolicy {
    exceptions: Vec<String>,
}

impl AnchorPolicy {
    pub fn new<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exceptions: exceptions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    fn is_exception(&self, display_name: &str) -> bool {
        self.exceptions.iter().any(|name| name == display_name)
    }
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_ANCHOR_EXCEPTION])
    }
}

/// A municipality ready for the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Municipality {
    pub display_name: String,
    /// `YYYY-MM-DD`, or the "no information" sentinel
    pub parsed_date: String,
    pub cumulative_confirmed: i64,
    pub new_confirmed: i64,
    pub recovered: i64,
    pub is_anchor: bool,
    /// Set only on anchors
    pub anchor_id: Option<String>,
}

/// Entry of the alphabetical jump list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpLink {
    pub letter: String,
    pub anchor_id: String,
}

pub fn anchor_id(letter: char) -> String {
    format!("{}{}", ANCHOR_PREFIX, letter)
}

/// Annotate municipalities in upstream order
pub fn annotate(records: Vec<MunicipalityRecord>, policy: &AnchorPolicy) -> Vec<Municipality> {
    let capacity = records.len();

    let (municipalities, _) = records.into_iter().fold(
        (Vec::with_capacity(capacity), None::<char>),
        |(mut out, current_letter), record| {
            let display_name = title_case(&record.name);

            let letter = if policy.is_exception(&display_name) {
                None
            } else {
                first_letter(&display_name).filter(|letter| Some(*letter) != current_letter)
            };

            out.push(Municipality {
                parsed_date: ts_to_date(record.report_date_raw),
                cumulative_confirmed: record.cumulative_confirmed,
                new_confirmed: record.new_confirmed,
                recovered: record.recovered,
                is_anchor: letter.is_some(),
                anchor_id: letter.map(anchor_id),
                display_name,
            });

            (out, letter.or(current_letter))
        },
    );

    municipalities
}

/// Jump-list entries, one per anchor, in page order
pub fn jump_links(municipalities: &[Municipality]) -> Vec<JumpLink> {
    municipalities
        .iter()
        .filter_map(|m| {
            let id = m.anchor_id.as_ref()?;
            Some(JumpLink {
                letter: id.trim_start_matches(ANCHOR_PREFIX).to_string(),
                anchor_id: id.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> MunicipalityRecord {
        MunicipalityRecord {
            name: name.to_string(),
            report_date_raw: 1603065600000,
            ..Default::default()
        }
    }

    fn records(names: &[&str]) -> Vec<MunicipalityRecord> {
        names.iter().map(|n| record(n)).collect()
    }

    fn anchors(municipalities: &[Municipality]) -> Vec<(&str, &str)> {
        municipalities
            .iter()
            .filter(|m| m.is_anchor)
            .map(|m| (m.display_name.as_str(), m.anchor_id.as_deref().unwrap()))
            .collect()
    }

    #[test]
    fn test_anchors_with_exception() {
        let input = records(&[
            "ÁGUEDA",
            "Albergaria-A-Velha",
            "Alcobaça",
            "Vila Da Praia Da Vitória",
            "Vila Nova De Gaia",
        ]);

        let out = annotate(input, &AnchorPolicy::default());

        assert_eq!(
            anchors(&out),
            vec![("Águeda", "concelho-A"), ("Vila Nova De Gaia", "concelho-V")]
        );
        assert!(!out[3].is_anchor);
        assert_eq!(out[3].anchor_id, None);
    }

    #[test]
    fn test_exception_does_not_move_current_letter() {
        // Out of order upstream: the exception sits among the "S" names
        let input = records(&["SINTRA", "VILA DA PRAIA DA VITÓRIA", "SOURE", "VISEU"]);

        let out = annotate(input, &AnchorPolicy::default());

        assert_eq!(
            anchors(&out),
            vec![("Sintra", "concelho-S"), ("Viseu", "concelho-V")]
        );
    }

    #[test]
    fn test_display_fields() {
        let mut raw = record("VILA NOVA DE GAIA");
        raw.cumulative_confirmed = 5120;
        raw.new_confirmed = 87;
        raw.recovered = 3900;

        let out = annotate(vec![raw, record("ÉVORA")], &AnchorPolicy::default());

        assert_eq!(out[0].display_name, "Vila Nova De Gaia");
        assert_eq!(out[0].parsed_date, "2020-10-19");
        assert_eq!(out[0].cumulative_confirmed, 5120);
        assert_eq!(out[0].new_confirmed, 87);
        assert_eq!(out[0].recovered, 3900);
        assert_eq!(out[1].display_name, "Évora");
        assert_eq!(out[1].anchor_id.as_deref(), Some("concelho-E"));
    }

    #[test]
    fn test_short_timestamp_uses_sentinel() {
        let mut raw = record("PORTO");
        raw.report_date_raw = 16030;

        let out = annotate(vec![raw], &AnchorPolicy::default());
        assert_eq!(out[0].parsed_date, crate::utils::NO_INFORMATION);
    }

    #[test]
    fn test_accented_letter_joins_plain_group() {
        let out = annotate(records(&["ÉVORA", "ELVAS", "ÓBIDOS", "OLHÃO"]), &AnchorPolicy::default());

        assert_eq!(
            anchors(&out),
            vec![("Évora", "concelho-E"), ("Óbidos", "concelho-O")]
        );
    }

    #[test]
    fn test_order_dependent() {
        let ordered = annotate(records(&["AMADORA", "BRAGA", "BEJA"]), &AnchorPolicy::default());
        let shuffled = annotate(records(&["BRAGA", "AMADORA", "BEJA"]), &AnchorPolicy::default());

        assert_eq!(
            anchors(&ordered),
            vec![("Amadora", "concelho-A"), ("Braga", "concelho-B")]
        );
        // Beja opens a second "B" group once Amadora sits between the Bs
        assert_eq!(
            anchors(&shuffled),
            vec![("Braga", "concelho-B"), ("Amadora", "concelho-A"), ("Beja", "concelho-B")]
        );
    }

    #[test]
    fn test_empty_names_and_empty_input() {
        assert!(annotate(Vec::new(), &AnchorPolicy::default()).is_empty());

        let out = annotate(records(&["", "AVEIRO"]), &AnchorPolicy::default());
        assert!(!out[0].is_anchor);
        assert_eq!(out[1].anchor_id.as_deref(), Some("concelho-A"));
    }

    #[test]
    fn test_leading_punctuation_in_names() {
        let out = annotate(
            records(&[" PORTO", "(X) ABC", "...", "PÓVOA DE VARZIM"]),
            &AnchorPolicy::default(),
        );

        assert_eq!(out[0].anchor_id.as_deref(), Some("concelho-P"));
        assert_eq!(out[1].anchor_id.as_deref(), Some("concelho-X"));
        assert!(!out[2].is_anchor);
        assert_eq!(out[3].anchor_id.as_deref(), Some("concelho-P"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = AnchorPolicy::new(["Amadora"]);
        let out = annotate(records(&["AMADORA", "AVEIRO"]), &policy);
        assert_eq!(anchors(&out), vec![("Aveiro", "concelho-A")]);

        let none = AnchorPolicy::new(Vec::<String>::new());
        let out = annotate(records(&["VILA DA PRAIA DA VITÓRIA"]), &none);
        assert_eq!(anchors(&out), vec![("Vila Da Praia Da Vitória", "concelho-V")]);
    }

    #[test]
    fn test_jump_links() {
        let out = annotate(records(&["ÁGUEDA", "ALCOBAÇA", "BRAGA"]), &AnchorPolicy::default());

        assert_eq!(
            jump_links(&out),
            vec![
                JumpLink { letter: "A".to_string(), anchor_id: "concelho-A".to_string() },
                JumpLink { letter: "B".to_string(), anchor_id: "concelho-B".to_string() },
            ]
        );
    }
}
