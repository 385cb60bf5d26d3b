use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::CoreError;

/// Categorical business type. `Unknown` is represented as `None` on the
/// record and serialized as `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompanyType {
    AuthorizedDealership,
    IndependentMechanic,
    LocalRepairShop,
}

impl CompanyType {
    pub const ALL: [CompanyType; 3] = [
        CompanyType::AuthorizedDealership,
        CompanyType::IndependentMechanic,
        CompanyType::LocalRepairShop,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompanyType::AuthorizedDealership => "Authorized Dealership",
            CompanyType::IndependentMechanic => "Independent Mechanic",
            CompanyType::LocalRepairShop => "Local Repair Shop",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompanyType {
    type Err = CoreError;

    /// Accepts the spaced labels written to snapshots as well as the
    /// `PascalCase` variant names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "authorizeddealership" => Ok(CompanyType::AuthorizedDealership),
            "independentmechanic" => Ok(CompanyType::IndependentMechanic),
            "localrepairshop" => Ok(CompanyType::LocalRepairShop),
            _ => Err(CoreError::InvalidVariant {
                kind: "company type",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a field was sourced directly or heuristically inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "Low"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}

/// Derived per-record quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityFlag {
    Low,
    Medium,
    High,
}

impl QualityFlag {
    /// Half-open bins: `[0, 50)` Low, `[50, 80)` Medium, `[80, 100]` High.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=49 => QualityFlag::Low,
            50..=79 => QualityFlag::Medium,
            _ => QualityFlag::High,
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityFlag::Low => write!(f, "Low"),
            QualityFlag::Medium => write!(f, "Medium"),
            QualityFlag::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One business, created from a single search hit and enriched in place by
/// each pipeline stage.
///
/// Field names on disk are camelCase. Aliases accept the key names used by
/// older snapshot files (`placeId`, `companyName`, `userRatingsTotal`,
/// `searchTerm`, `area`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    #[serde(alias = "placeId")]
    pub external_id: String,
    #[serde(alias = "companyName")]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Location,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_f64"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        alias = "userRatingsTotal",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_u32"
    )]
    pub rating_count: Option<u32>,
    /// Provider category tags, e.g. `car_repair`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    #[serde(default, with = "crate::unknown")]
    pub company_type: Option<CompanyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_type_confidence: Option<Confidence>,

    #[serde(default, with = "crate::unknown")]
    pub repair_costs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_costs_confidence: Option<Confidence>,
    #[serde(default, with = "crate::unknown")]
    pub repair_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_frequency_confidence: Option<Confidence>,
    #[serde(default, with = "crate::unknown")]
    pub damage_types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_types_confidence: Option<Confidence>,

    #[serde(default, with = "crate::unknown")]
    pub phone_number: Option<String>,
    #[serde(default, with = "crate::unknown")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_flag: Option<QualityFlag>,

    #[serde(default, alias = "searchTerm")]
    pub source_search_term: String,
    #[serde(default, alias = "area")]
    pub source_area: String,
}

impl BusinessRecord {
    /// A record with every optional field at `Unknown`.
    #[must_use]
    pub fn new(external_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Older snapshots wrote `"N/A"` for a missing rating.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) if n.is_finite() && n >= 0.0 => Some(n as u32),
        Some(NumberOrText::Text(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
