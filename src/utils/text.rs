//! Name casing and accent handling for municipality names

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Remove diacritics, leaving base letters and case untouched
///
/// "Águeda" -> "Agueda", "Alcobaça" -> "Alcobaca"
pub fn strip_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Title-case a name: first letter of every word upper, the rest lower
///
/// A word starts after any character that is not alphanumeric or `_`, so
/// "ALBERGARIA-A-VELHA" becomes "Albergaria-A-Velha".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}

/// First alphanumeric character of the accent-stripped name
///
/// Leading spaces or punctuation are skipped; a name without any letter or
/// digit has no anchor letter.
pub fn first_letter(name: &str) -> Option<char> {
    strip_accents(name).chars().find(|c| c.is_alphanumeric())
}
