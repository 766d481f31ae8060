//! Country naming and flag rendering for result display
//!
//! The backend reports headquarters as ISO 3166-1 alpha-3 codes (new schema)
//! or as free-text country names (legacy schema); alternatives may carry
//! either. These helpers turn both into something readable.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Flag shown when nothing better can be determined
pub const EU_FLAG: &str = "\u{1F1EA}\u{1F1FA}";

lazy_static! {
    /// ISO alpha-3 code -> (alpha-2 code, display name)
    static ref ALPHA3: HashMap<&'static str, (&'static str, &'static str)> = [
        ("AUT", "AT", "Austria"),
        ("BEL", "BE", "Belgium"),
        ("BGR", "BG", "Bulgaria"),
        ("HRV", "HR", "Croatia"),
        ("CYP", "CY", "Cyprus"),
        ("CZE", "CZ", "Czech Republic"),
        ("DNK", "DK", "Denmark"),
        ("EST", "EE", "Estonia"),
        ("FIN", "FI", "Finland"),
        ("FRA", "FR", "France"),
        ("DEU", "DE", "Germany"),
        ("GRC", "GR", "Greece"),
        ("HUN", "HU", "Hungary"),
        ("IRL", "IE", "Ireland"),
        ("ITA", "IT", "Italy"),
        ("LVA", "LV", "Latvia"),
        ("LTU", "LT", "Lithuania"),
        ("LUX", "LU", "Luxembourg"),
        ("MLT", "MT", "Malta"),
        ("NLD", "NL", "Netherlands"),
        ("POL", "PL", "Poland"),
        ("PRT", "PT", "Portugal"),
        ("ROU", "RO", "Romania"),
        ("SVK", "SK", "Slovakia"),
        ("SVN", "SI", "Slovenia"),
        ("ESP", "ES", "Spain"),
        ("SWE", "SE", "Sweden"),
        ("GBR", "GB", "United Kingdom"),
        ("UKR", "UA", "Ukraine"),
        ("CHE", "CH", "Switzerland"),
        ("NOR", "NO", "Norway"),
        ("ISL", "IS", "Iceland"),
        ("LIE", "LI", "Liechtenstein"),
        ("USA", "US", "United States"),
        ("CAN", "CA", "Canada"),
        ("JPN", "JP", "Japan"),
        ("CHN", "CN", "China"),
        ("RUS", "RU", "Russia"),
        ("KOR", "KR", "South Korea"),
        ("IND", "IN", "India"),
        ("BRA", "BR", "Brazil"),
        ("AUS", "AU", "Australia"),
        ("NZL", "NZ", "New Zealand"),
        ("MEX", "MX", "Mexico"),
        ("ZAF", "ZA", "South Africa"),
        ("TUR", "TR", "Turkey"),
        ("ISR", "IL", "Israel"),
        ("ARE", "AE", "United Arab Emirates"),
        ("ARG", "AR", "Argentina"),
        ("SGP", "SG", "Singapore"),
        ("MYS", "MY", "Malaysia"),
        ("IDN", "ID", "Indonesia"),
        ("THA", "TH", "Thailand"),
        ("VNM", "VN", "Vietnam"),
        ("PAK", "PK", "Pakistan"),
    ]
    .into_iter()
    .map(|(alpha3, alpha2, name)| (alpha3, (alpha2, name)))
    .collect();

    /// Lower-case country name (and common short forms) -> alpha-2 code
    static ref NAMES: Vec<(&'static str, &'static str)> = {
        let mut names: Vec<(&'static str, &'static str)> = ALPHA3
            .values()
            .map(|&(alpha2, name)| (name, alpha2))
            .collect();
        names.extend([
            ("Czechia", "CZ"),
            ("UK", "GB"),
            ("USA", "US"),
            ("Korea", "KR"),
        ]);
        // Longest names first so "South Korea" wins over "Korea"
        names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
        names
    };
}

/// Display name for an ISO alpha-3 code
///
/// # Example
/// ```
/// use buyeuropean::utils::country::country_name_from_code;
///
/// assert_eq!(country_name_from_code("DEU"), Some("Germany"));
/// assert_eq!(country_name_from_code("XXX"), None);
/// ```
pub fn country_name_from_code(code: &str) -> Option<&'static str> {
    ALPHA3.get(code.trim()).map(|&(_, name)| name)
}

/// "Germany (DEU)" when the code is known, the raw value otherwise
pub fn describe_country(code_or_name: &str) -> String {
    match country_name_from_code(code_or_name) {
        Some(name) => format!("{} ({})", name, code_or_name.trim()),
        None => code_or_name.to_string(),
    }
}

/// Flag emoji plus alpha-2 code, e.g. "🇫🇷 FR"
///
/// The country code is preferred (alpha-3 or alpha-2); otherwise the name is
/// matched case-insensitively, exactly or as a substring in either direction.
/// Falls back to the EU flag.
pub fn flag_emoji(country_name: &str, country_code: &str) -> String {
    let country_name = country_name.trim();
    let country_code = country_code.trim();

    if country_name.is_empty() && country_code.is_empty() {
        return EU_FLAG.to_string();
    }

    let alpha2 = alpha2_from_code(country_code).or_else(|| alpha2_from_name(country_name));

    match alpha2 {
        Some(alpha2) => format!("{} {}", regional_indicator_flag(&alpha2), alpha2),
        None => format!("{} EU", EU_FLAG),
    }
}

fn alpha2_from_code(code: &str) -> Option<String> {
    let upper = code.to_ascii_uppercase();
    match upper.len() {
        3 => ALPHA3.get(upper.as_str()).map(|&(alpha2, _)| alpha2.to_string()),
        2 if upper.chars().all(|c| c.is_ascii_alphabetic()) && upper != "XX" => Some(upper),
        _ => None,
    }
}

const SHORT_NAME_MAX: usize = 3;

fn alpha2_from_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_lowercase();

    if let Some((_, alpha2)) = NAMES.iter().find(|(known, _)| known.to_lowercase() == lower) {
        return Some(alpha2.to_string());
    }

    // Short forms ("UK", "USA") only ever match exactly
    if lower.chars().count() <= SHORT_NAME_MAX {
        return None;
    }
    NAMES
        .iter()
        .filter(|(known, _)| known.chars().count() > SHORT_NAME_MAX)
        .find(|(known, _)| {
            let known = known.to_lowercase();
            lower.contains(&known) || known.contains(&lower)
        })
        .map(|(_, alpha2)| alpha2.to_string())
}

/// Two regional indicator symbols spelling the alpha-2 code
fn regional_indicator_flag(alpha2: &str) -> String {
    alpha2
        .chars()
        .filter_map(|c| char::from_u32(c.to_ascii_uppercase() as u32 + 0x1F1A5))
        .collect()
}
