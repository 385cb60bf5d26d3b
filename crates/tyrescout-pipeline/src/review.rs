//! Review stage: statistics, optional placeholder defaults, cleanup, scoring.

use tyrescout_core::{BusinessRecord, CompanyType, Confidence};

use crate::normalize::normalize_record;
use crate::quality::score_records;
use crate::report::DatasetReport;

pub const DEFAULT_COMPANY_TYPE: CompanyType = CompanyType::LocalRepairShop;
pub const DEFAULT_REPAIR_COSTS: &str = "Varies by type and size of tractor tyre";
pub const DEFAULT_REPAIR_FREQUENCY: &str = "Depends on usage, terrain, and tyre quality";
pub const DEFAULT_DAMAGE_TYPES: &str = "Punctures, sidewall damage, tread wear, valve issues";

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// Statistics of the records as they entered the review.
    pub before: DatasetReport,
    /// Records that received at least one placeholder.
    pub defaults_applied: usize,
    pub flagged_low: usize,
}

/// Fills every unknown researched field with its placeholder at `Low`
/// confidence. Contact fields are never invented.
///
/// Returns `true` if anything was filled.
pub fn apply_defaults(record: &mut BusinessRecord) -> bool {
    let mut changed = false;

    if record.company_type.is_none() {
        record.company_type = Some(DEFAULT_COMPANY_TYPE);
        record.company_type_confidence = Some(Confidence::Low);
        changed = true;
    }

    for (value, confidence, placeholder) in [
        (
            &mut record.repair_costs,
            &mut record.repair_costs_confidence,
            DEFAULT_REPAIR_COSTS,
        ),
        (
            &mut record.repair_frequency,
            &mut record.repair_frequency_confidence,
            DEFAULT_REPAIR_FREQUENCY,
        ),
        (
            &mut record.damage_types,
            &mut record.damage_types_confidence,
            DEFAULT_DAMAGE_TYPES,
        ),
    ] {
        if value.is_none() {
            *value = Some(placeholder.to_owned());
            *confidence = Some(Confidence::Low);
            changed = true;
        }
    }

    changed
}

/// Runs the review over `records` in place.
pub fn review_records(records: &mut [BusinessRecord], with_defaults: bool) -> ReviewOutcome {
    let before = DatasetReport::from_records(records);
    tracing::info!(
        total = before.total,
        quality = %before.quality,
        "reviewing records"
    );

    let mut defaults_applied = 0;
    for record in records.iter_mut() {
        if with_defaults && apply_defaults(record) {
            defaults_applied += 1;
        }
        normalize_record(record);
    }

    let flagged_low = score_records(records);
    tracing::info!(defaults_applied, flagged_low, "review complete");

    ReviewOutcome {
        before,
        defaults_applied,
        flagged_low,
    }
}
