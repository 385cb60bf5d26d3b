//! Per-record cleanup: whitespace, capitalization, phone format, URL scheme.
//!
//! Every function here is idempotent.

use tyrescout_core::BusinessRecord;

/// Cleans one record in place.
///
/// Display fields (`name`, `address`, free-text fields) get collapsed
/// whitespace and an upper-case first letter. Identifiers, the website and
/// provenance strings are only trimmed. A free-text field that is blank after
/// cleaning becomes unknown.
pub fn normalize_record(record: &mut BusinessRecord) {
    record.external_id = record.external_id.trim().to_owned();
    record.name = clean_display(&record.name);
    record.address = clean_display(&record.address);

    for field in [
        &mut record.repair_costs,
        &mut record.repair_frequency,
        &mut record.damage_types,
    ] {
        *field = field
            .as_deref()
            .map(clean_display)
            .filter(|s| !s.is_empty());
    }

    record.phone_number = record
        .phone_number
        .as_deref()
        .map(|raw| normalize_phone(raw).unwrap_or_else(|| collapse_whitespace(raw)))
        .filter(|s| !s.is_empty());
    record.website = record.website.as_deref().and_then(normalize_website);

    record.types.retain(|t| !t.trim().is_empty());
    record.source_search_term = collapse_whitespace(&record.source_search_term);
    record.source_area = collapse_whitespace(&record.source_area);
}

/// Formats a South African number as `+27 XX XXX XXXX`.
///
/// Accepts the national form (`0` + 9 digits), the bare 9-digit subscriber
/// form, the international form (`27` + 9 digits) and the international form
/// written with the trunk zero, as in `+27 (0)82 123 4567`. Any other digit
/// count returns `None` so the caller can keep the original text.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 if digits.starts_with('0') => &digits[1..],
        9 if !digits.starts_with('0') => &digits[..],
        11 if digits.starts_with("27") => &digits[2..],
        12 if digits.starts_with("270") => &digits[3..],
        _ => return None,
    };
    Some(format!(
        "+27 {} {} {}",
        &national[..2],
        &national[2..5],
        &national[5..]
    ))
}

/// Trims `raw` and prefixes `https://` when no http(s) scheme is present.
#[must_use]
pub fn normalize_website(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_owned())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_display(s: &str) -> String {
    capitalize_first(&collapse_whitespace(s))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
