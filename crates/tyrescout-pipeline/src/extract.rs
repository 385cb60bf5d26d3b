//! Regex extraction of repair facts from website text.

use std::sync::LazyLock;

use regex::Regex;
use tyrescout_core::BusinessRecord;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid extraction regex"))
        .collect()
}

static COST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?:cost|price|rate|fee|charge)\s+(?:for|of|to)\s+(?:tractor|agricultural|farm)\s+(?:tyre|tire)\s+(?:repair|service)",
        r"(?:tractor|agricultural|farm)\s+(?:tyre|tire)\s+(?:repair|service)\s+(?:cost|price|rate|fee|charge)",
        r"(?:repair|service)\s+(?:cost|price|rate|fee|charge)\s+(?:for|of)\s+(?:tractor|agricultural|farm)\s+(?:tyre|tire)",
        r"(?:from|starting at|as low as|only)\s+R\s*\d{1,3}(?:[\s,.]\d{3})*(?:[.,]\d{2})?",
    ])
});

static FREQUENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?:frequency|often|regular|periodic|interval)\s+(?:of|for)\s+(?:tractor|agricultural|farm)\s+(?:tyre|tire)\s+(?:repair|service|maintenance)",
        r"(?:tractor|agricultural|farm)\s+(?:tyre|tire)\s+(?:typically|usually|normally|generally)\s+(?:need|require|undergo)\s+(?:repair|service|maintenance)",
        r"(?:lifespan|lifetime|durability)\s+(?:of|for)\s+(?:tractor|agricultural|farm)\s+(?:tyre|tire)",
        r"(?:every|per)\s+\d+\s+(?:month|year|season|km|kilometer|hour|day)",
    ])
});

static DAMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?:common|typical|frequent)\s+(?:type|kind|form)\s+(?:of|for)\s+(?:damage|puncture|issue|problem)\s+(?:to|with|in)\s+(?:tractor|agricultural|farm)\s+(?:tyre|tire)",
        r"(?:tractor|agricultural|farm)\s+(?:tyre|tire)\s+(?:damage|puncture|issue|problem)\s+(?:often|frequently|commonly|typically|usually)\s+(?:include|involve|consist of)",
        r"(?:repair|fix|patch|service)\s+(?:for|of)\s+(?:puncture|cut|tear|leak|sidewall|tread|valve)",
        r"(?:puncture|cut|tear|leak|sidewall|tread|valve)\s+(?:repair|service|damage)",
    ])
});

static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+27|27|0)[\s-]*(?:\d{2}|\(\d{2}\))[\s-]*\d{3}[\s-]*\d{4}")
        .expect("valid regex")
});

/// Fields found in one page of text. `None` means no pattern matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub repair_costs: Option<String>,
    pub repair_frequency: Option<String>,
    pub damage_types: Option<String>,
    pub phone_number: Option<String>,
}

/// Finds the first pattern that matches anywhere in `text`, then returns the
/// first sentence that pattern matches on its own.
///
/// Only the first matching pattern is considered. If its match spans a
/// sentence break, no later pattern is tried and the result is `None`.
#[must_use]
pub fn extract_field(text: &str, patterns: &[Regex]) -> Option<String> {
    let pattern = patterns.iter().find(|p| p.is_match(text))?;
    SENTENCE_BREAK_RE
        .split(text)
        .find(|sentence| pattern.is_match(sentence))
        .map(|sentence| sentence.trim().to_owned())
}

/// First South African phone number in `text`, verbatim but trimmed.
#[must_use]
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_owned())
}

#[must_use]
pub fn extract_all(text: &str) -> Extracted {
    Extracted {
        repair_costs: extract_field(text, &COST_PATTERNS),
        repair_frequency: extract_field(text, &FREQUENCY_PATTERNS),
        damage_types: extract_field(text, &DAMAGE_PATTERNS),
        phone_number: extract_phone(text),
    }
}

/// Fills unknown fields of `record` from `text`. Known values are kept.
///
/// Returns the number of fields that were filled.
pub fn apply_extraction(record: &mut BusinessRecord, text: &str) -> usize {
    let found = extract_all(text);
    let mut filled = 0;
    for (slot, value) in [
        (&mut record.repair_costs, found.repair_costs),
        (&mut record.repair_frequency, found.repair_frequency),
        (&mut record.damage_types, found.damage_types),
        (&mut record.phone_number, found.phone_number),
    ] {
        if slot.is_none() && value.is_some() {
            *slot = value;
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
