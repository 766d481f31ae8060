//! Analysis result types
//!
//! The backend has evolved its response schema over time: headquarters moved
//! from `identified_headquarters` to `identified_company_headquarters`, the
//! suggestion list moved from `potential_alternatives` to `alternatives` with a
//! different entry shape, and older deployments emit `european` instead of
//! `european_country`. All of that is resolved here, once, at deserialisation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Verdict on a company's geopolitical alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    EuropeanCountry,
    EuropeanAlly,
    EuropeanSceptic,
    EuropeanAdversary,
    Neutral,
    /// Any value the client does not recognise, kept verbatim
    Unknown(String),
}

impl Classification {
    /// Wire value of this classification
    pub fn as_str(&self) -> &str {
        match self {
            Classification::EuropeanCountry => "european_country",
            Classification::EuropeanAlly => "european_ally",
            Classification::EuropeanSceptic => "european_sceptic",
            Classification::EuropeanAdversary => "european_adversary",
            Classification::Neutral => "neutral",
            Classification::Unknown(raw) => raw,
        }
    }

    /// Display label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Classification::EuropeanCountry => "European",
            Classification::EuropeanAlly => "European Ally",
            Classification::EuropeanSceptic => "European Sceptic",
            Classification::EuropeanAdversary => "European Adversary",
            Classification::Neutral => "Neutral",
            Classification::Unknown(_) => "Unknown",
        }
    }
}

impl From<String> for Classification {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            // `european` is the legacy spelling of `european_country`
            "european_country" | "european" => Classification::EuropeanCountry,
            "european_ally" => Classification::EuropeanAlly,
            "european_sceptic" => Classification::EuropeanSceptic,
            "european_adversary" => Classification::EuropeanAdversary,
            "neutral" => Classification::Neutral,
            _ => Classification::Unknown(raw),
        }
    }
}

impl From<&str> for Classification {
    fn from(raw: &str) -> Self {
        Classification::from(raw.to_string())
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.as_str().to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested substitute, in either of the two schema versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alternative {
    /// Entries from the `alternatives` list
    Current(CurrentAlternative),
    /// Entries from the `potential_alternatives` list
    Legacy(LegacyAlternative),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAlternative {
    pub name: String,
    /// Free text, usually "by Company (Country)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAlternative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Alternative {
    pub fn name(&self) -> &str {
        match self {
            Alternative::Current(alt) => &alt.name,
            Alternative::Legacy(alt) => alt.product_name.as_deref().unwrap_or("Unknown"),
        }
    }

    /// Company behind the alternative
    ///
    /// New-shape entries only carry the company inside free text, so it is
    /// recovered from `by` ("by Acme (France)") or, failing that, from the
    /// first "by X (" fragment of `information`.
    pub fn company(&self) -> Option<String> {
        match self {
            Alternative::Current(alt) => alt
                .by
                .as_deref()
                .map(company_from_by)
                .filter(|company| !company.is_empty())
                .or_else(|| alt.information.as_deref().and_then(company_from_information)),
            Alternative::Legacy(alt) => alt.company.clone(),
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            Alternative::Current(alt) => alt.country.as_deref(),
            Alternative::Legacy(alt) => alt.country.as_deref(),
        }
    }

    /// Only new-shape entries carry a country code
    pub fn country_code(&self) -> Option<&str> {
        match self {
            Alternative::Current(alt) => alt.country_code.as_deref(),
            Alternative::Legacy(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Alternative::Current(alt) => alt.information.as_deref(),
            Alternative::Legacy(alt) => alt.description.as_deref(),
        }
    }

    fn normalise(self) -> Self {
        match self {
            Alternative::Current(mut alt) => {
                alt.name = title_case(&alt.name);
                Alternative::Current(alt)
            }
            legacy => legacy,
        }
    }
}

fn company_from_by(by: &str) -> String {
    let company = by.trim().strip_prefix("by ").unwrap_or(by.trim());
    match company.rfind(" (") {
        Some(idx) if company.ends_with(')') => company[..idx].trim().to_string(),
        _ => company.trim().to_string(),
    }
}

fn company_from_information(information: &str) -> Option<String> {
    let (_, rest) = information.split_once("by ")?;
    let (company, _) = rest.split_once(" (")?;
    let company = company.trim();
    (!company.is_empty()).then(|| company.to_string())
}

/// Title-case a name: a letter is uppercased when it follows a non-letter
/// and lowercased otherwise, so "fritz-kola" becomes "Fritz-Kola" and
/// "LEGO city" becomes "Lego City"
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut after_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(ch);
            after_letter = false;
        }
    }
    out
}

/// Token accounting reported by the backend, informational only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none() && self.total_tokens.is_none()
    }
}

/// Explicit correlation handle for feedback on a specific analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnalysisHandle {
    id: Option<String>,
}

impl AnalysisHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Handle for an analysis the backend did not identify
    pub fn none() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Normalised analysis result
///
/// Serialises back to a flat mapping using the current field names; keys the
/// client does not model are carried through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnalysisResult")]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_company_headquarters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_parent_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_parent_company_headquarters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_or_animal_or_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_alternative_thinking: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
    #[serde(flatten)]
    pub token_usage: TokenUsage,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn product_name(&self) -> &str {
        self.identified_product_name.as_deref().unwrap_or("Unknown")
    }

    pub fn company(&self) -> &str {
        self.identified_company.as_deref().unwrap_or("Unknown")
    }

    /// Headquarters code or name, whichever schema version supplied it
    pub fn headquarters(&self) -> Option<&str> {
        self.identified_company_headquarters.as_deref()
    }

    /// Parent company, only when it differs from the identified company
    pub fn distinct_parent_company(&self) -> Option<&str> {
        self.ultimate_parent_company
            .as_deref()
            .filter(|parent| !parent.is_empty() && Some(*parent) != self.identified_company.as_deref())
    }

    /// Subject type detected by the backend, `product` unless stated otherwise
    pub fn subject_type(&self) -> &str {
        self.product_or_animal_or_human
            .as_deref()
            .unwrap_or("product")
    }

    pub fn handle(&self) -> AnalysisHandle {
        AnalysisHandle {
            id: self.id.clone(),
        }
    }
}

/// Wire shape accepted from the backend, covering every schema version
///
/// A field of an unexpected type is dropped rather than failing the whole
/// result.
#[derive(Debug, Deserialize)]
struct RawAnalysisResult {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    identified_product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    identified_company: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    identified_company_headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    identified_headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    ultimate_parent_company: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    ultimate_parent_company_headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    classification: Option<Classification>,
    #[serde(default, deserialize_with = "lenient")]
    product_or_animal_or_human: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    identification_rationale: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    potential_alternative_thinking: Option<String>,
    #[serde(default, deserialize_with = "lenient_alternatives")]
    alternatives: Option<Vec<Alternative>>,
    #[serde(default, deserialize_with = "lenient_alternatives")]
    potential_alternatives: Option<Vec<Alternative>>,
    #[serde(default, deserialize_with = "lenient_count")]
    input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    total_tokens: Option<u64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Any value that does not convert to `T` becomes `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Counters arrive as numbers, occasionally as numeric strings
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Keep the entries matching either alternative shape, skip the rest
fn lenient_alternatives<'de, D>(deserializer: D) -> Result<Option<Vec<Alternative>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(Some(
            entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

impl From<RawAnalysisResult> for AnalysisResult {
    fn from(raw: RawAnalysisResult) -> Self {
        let id = raw.id.and_then(|value| match value {
            Value::String(id) => Some(id),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        });

        let alternatives = raw
            .alternatives
            .or(raw.potential_alternatives)
            .unwrap_or_default()
            .into_iter()
            .map(Alternative::normalise)
            .collect();

        AnalysisResult {
            id,
            identified_product_name: raw.identified_product_name,
            identified_company: raw.identified_company,
            identified_company_headquarters: raw
                .identified_company_headquarters
                .or(raw.identified_headquarters),
            ultimate_parent_company: raw.ultimate_parent_company,
            ultimate_parent_company_headquarters: raw.ultimate_parent_company_headquarters,
            classification: raw.classification,
            product_or_animal_or_human: raw.product_or_animal_or_human,
            identification_rationale: raw.identification_rationale,
            potential_alternative_thinking: raw.potential_alternative_thinking,
            alternatives,
            token_usage: TokenUsage {
                input_tokens: raw.input_tokens,
                output_tokens: raw.output_tokens,
                total_tokens: raw.total_tokens,
            },
            extra: raw.extra,
        }
    }
}
