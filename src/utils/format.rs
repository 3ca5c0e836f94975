//! Number formatting for page counters

/// Separator between digit groups (Portuguese style)
const GROUP_SEPARATOR: char = ' ';

/// Insert a separator every three digits of the integral part
///
/// Works on the already formatted value so it applies to integers and
/// floats alike: "1234567" -> "1 234 567", "-12345.5" -> "-12 345.5".
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integral, fraction) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    if !integral.chars().all(|c| c.is_ascii_digit()) {
        return formatted.to_string();
    }

    let mut grouped = String::with_capacity(formatted.len() + integral.len() / 3);
    for (i, c) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, fraction)
}
