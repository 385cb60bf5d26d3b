//! Weighted completeness score per record and across a dataset.
//!
//! A record's score is a pure function of which of its six scored fields are
//! known, so rescoring is idempotent.

use std::fmt;

use tyrescout_core::{BusinessRecord, QualityFlag};

// ---------------------------------------------------------------------------
// Weight constants (must sum to exactly 100)
// ---------------------------------------------------------------------------

pub const W_COMPANY_TYPE: u8 = 20;
pub const W_REPAIR_COSTS: u8 = 20;
pub const W_REPAIR_FREQUENCY: u8 = 20;
pub const W_DAMAGE_TYPES: u8 = 20;
pub const W_PHONE: u8 = 10;
pub const W_WEBSITE: u8 = 10;

const _: () = assert!(
    W_COMPANY_TYPE + W_REPAIR_COSTS + W_REPAIR_FREQUENCY + W_DAMAGE_TYPES + W_PHONE + W_WEBSITE
        == 100,
    "quality weights must sum to exactly 100"
);

/// 0-100 score for `record`. Does not read or write the stored score.
#[must_use]
pub fn quality_score(record: &BusinessRecord) -> u8 {
    [
        (record.company_type.is_some(), W_COMPANY_TYPE),
        (record.repair_costs.is_some(), W_REPAIR_COSTS),
        (record.repair_frequency.is_some(), W_REPAIR_FREQUENCY),
        (record.damage_types.is_some(), W_DAMAGE_TYPES),
        (record.phone_number.is_some(), W_PHONE),
        (record.website.is_some(), W_WEBSITE),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, weight)| weight)
    .sum()
}

/// Stores the score and flag on `record` and returns the score.
pub fn score_record(record: &mut BusinessRecord) -> u8 {
    let score = quality_score(record);
    record.quality_score = Some(score);
    record.quality_flag = Some(QualityFlag::from_score(score));
    score
}

/// Scores every record and returns how many were flagged `Low`.
pub fn score_records(records: &mut [BusinessRecord]) -> usize {
    records
        .iter_mut()
        .map(score_record)
        .filter(|score| QualityFlag::from_score(*score) == QualityFlag::Low)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Assessment {
    /// Buckets a 0.0-1.0 quality ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.8 {
            Assessment::Excellent
        } else if ratio >= 0.6 {
            Assessment::Good
        } else if ratio >= 0.4 {
            Assessment::Fair
        } else {
            Assessment::Poor
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assessment::Excellent => write!(f, "Excellent"),
            Assessment::Good => write!(f, "Good"),
            Assessment::Fair => write!(f, "Fair"),
            Assessment::Poor => write!(f, "Poor"),
        }
    }
}

/// Mean record score divided by 100. An empty dataset has quality 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetQuality {
    ratio: f64,
}

impl DatasetQuality {
    #[must_use]
    pub fn from_records(records: &[BusinessRecord]) -> Self {
        if records.is_empty() {
            return Self { ratio: 0.0 };
        }
        let total: u64 = records.iter().map(|r| u64::from(quality_score(r))).sum();
        #[allow(clippy::cast_precision_loss)]
        let ratio = total as f64 / (records.len() as f64 * 100.0);
        Self { ratio }
    }

    #[must_use]
    pub fn ratio(self) -> f64 {
        self.ratio
    }

    #[must_use]
    pub fn percent(self) -> f64 {
        self.ratio * 100.0
    }

    #[must_use]
    pub fn assessment(self) -> Assessment {
        Assessment::from_ratio(self.ratio)
    }
}

impl fmt::Display for DatasetQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}
