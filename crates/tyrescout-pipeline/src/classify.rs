//! Heuristic company-type inference.
//!
//! Sources are tried in order (name, page text, provider tags) and the first
//! hit wins. Records that already have a type are left alone.

use tyrescout_core::{BusinessRecord, CompanyType, Confidence};

/// Keyword families checked in this order; the first family with any
/// substring match wins.
const KEYWORD_FAMILIES: [(CompanyType, &[&str]); 3] = [
    (
        CompanyType::AuthorizedDealership,
        &["dealer", "dealership", "authorized", "official"],
    ),
    (
        CompanyType::IndependentMechanic,
        &["mechanic", "technician", "specialist", "expert"],
    ),
    (
        CompanyType::LocalRepairShop,
        &["repair", "service", "shop", "center", "centre"],
    ),
];

const DEALER_TAG: &str = "car_dealer";
const REPAIR_TAG: &str = "car_repair";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub company_type: CompanyType,
    pub confidence: Confidence,
}

/// Case-insensitive keyword match against the families above.
#[must_use]
pub fn type_from_keywords(text: &str) -> Option<CompanyType> {
    let lowered = text.to_lowercase();
    KEYWORD_FAMILIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(company_type, _)| *company_type)
}

#[must_use]
pub fn type_from_tags(tags: &[String]) -> Option<CompanyType> {
    if tags.iter().any(|t| t == DEALER_TAG) {
        Some(CompanyType::AuthorizedDealership)
    } else if tags.iter().any(|t| t == REPAIR_TAG) {
        Some(CompanyType::LocalRepairShop)
    } else {
        None
    }
}

/// Infers a type from the record's name, then `page_text`, then its tags.
#[must_use]
pub fn classify(record: &BusinessRecord, page_text: Option<&str>) -> Option<Classification> {
    let inferred = |company_type, confidence| Classification {
        company_type,
        confidence,
    };

    type_from_keywords(&record.name)
        .map(|t| inferred(t, Confidence::Medium))
        .or_else(|| {
            page_text
                .and_then(type_from_keywords)
                .map(|t| inferred(t, Confidence::Medium))
        })
        .or_else(|| type_from_tags(&record.types).map(|t| inferred(t, Confidence::High)))
}

/// Sets `company_type` when it is unknown and a heuristic matches.
///
/// Returns `true` if the record changed.
pub fn classify_record(record: &mut BusinessRecord, page_text: Option<&str>) -> bool {
    if record.company_type.is_some() {
        return false;
    }
    match classify(record, page_text) {
        Some(c) => {
            record.company_type = Some(c.company_type);
            record.company_type_confidence = Some(c.confidence);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
