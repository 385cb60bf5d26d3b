//! Missing-information statistics and the dataset validation report.

use std::fmt;

use tyrescout_core::{BusinessRecord, CompanyType, UNKNOWN};

use crate::quality::DatasetQuality;

/// A field above this share of missing records gets a recommendation.
const RECOMMEND_MISSING_SHARE: f64 = 0.3;

/// The six scored fields, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CompanyType,
    RepairCosts,
    RepairFrequency,
    DamageTypes,
    PhoneNumber,
    Website,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CompanyType,
        Field::RepairCosts,
        Field::RepairFrequency,
        Field::DamageTypes,
        Field::PhoneNumber,
        Field::Website,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::CompanyType => "Company Type",
            Field::RepairCosts => "Repair Costs",
            Field::RepairFrequency => "Repair Frequency",
            Field::DamageTypes => "Damage Types",
            Field::PhoneNumber => "Phone Number",
            Field::Website => "Website",
        }
    }

    #[must_use]
    pub fn is_missing(self, record: &BusinessRecord) -> bool {
        match self {
            Field::CompanyType => record.company_type.is_none(),
            Field::RepairCosts => record.repair_costs.is_none(),
            Field::RepairFrequency => record.repair_frequency.is_none(),
            Field::DamageTypes => record.damage_types.is_none(),
            Field::PhoneNumber => record.phone_number.is_none(),
            Field::Website => record.website.is_none(),
        }
    }

    /// Contact fields come straight from the provider, so only the
    /// researched fields carry a recommendation.
    #[must_use]
    pub fn recommendation(self) -> Option<&'static str> {
        match self {
            Field::CompanyType => Some("Focus on identifying company types for more businesses"),
            Field::RepairCosts => Some("Gather more information about repair costs"),
            Field::RepairFrequency => Some("Collect more data on repair frequency"),
            Field::DamageTypes => Some("Research more about types of damages handled"),
            Field::PhoneNumber | Field::Website => None,
        }
    }
}

/// Counts over one snapshot. Built once, printed by the review and validate
/// commands.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub total: usize,
    /// Missing count per field, in [`Field::ALL`] order.
    pub missing: Vec<(Field, usize)>,
    /// Record count per company type label, `Unknown` last. Zero counts are
    /// omitted.
    pub type_breakdown: Vec<(&'static str, usize)>,
    pub quality: DatasetQuality,
}

impl DatasetReport {
    #[must_use]
    pub fn from_records(records: &[BusinessRecord]) -> Self {
        let missing = Field::ALL
            .iter()
            .map(|&field| {
                let count = records.iter().filter(|r| field.is_missing(r)).count();
                (field, count)
            })
            .collect();

        let mut type_breakdown: Vec<(&'static str, usize)> = CompanyType::ALL
            .iter()
            .map(|&t| {
                let count = records.iter().filter(|r| r.company_type == Some(t)).count();
                (t.label(), count)
            })
            .collect();
        let unknown = records.iter().filter(|r| r.company_type.is_none()).count();
        type_breakdown.push((UNKNOWN, unknown));
        type_breakdown.retain(|(_, count)| *count > 0);

        Self {
            total: records.len(),
            missing,
            type_breakdown,
            quality: DatasetQuality::from_records(records),
        }
    }

    #[must_use]
    pub fn missing_count(&self, field: Field) -> usize {
        self.missing
            .iter()
            .find(|(f, _)| *f == field)
            .map_or(0, |(_, count)| *count)
    }

    /// Share of records, as a percentage. Zero when the dataset is empty.
    #[must_use]
    pub fn percent_of_total(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = count as f64 / self.total as f64 * 100.0;
        pct
    }

    #[must_use]
    pub fn recommendations(&self) -> Vec<&'static str> {
        #[allow(clippy::cast_precision_loss)]
        let threshold = self.total as f64 * RECOMMEND_MISSING_SHARE;
        self.missing
            .iter()
            .filter(|(_, count)| {
                #[allow(clippy::cast_precision_loss)]
                let count = *count as f64;
                count > threshold
            })
            .filter_map(|(field, _)| field.recommendation())
            .collect()
    }

    /// Writes the missing-information and type-breakdown sections.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write_statistics(&self, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(f, "Total companies: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "MISSING INFORMATION:")?;
        for (field, count) in &self.missing {
            writeln!(
                f,
                "- {}: {} ({:.1}%)",
                field.label(),
                count,
                self.percent_of_total(*count)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "COMPANY TYPE BREAKDOWN:")?;
        for (label, count) in &self.type_breakdown {
            writeln!(
                f,
                "- {label}: {count} ({:.1}%)",
                self.percent_of_total(*count)
            )?;
        }
        Ok(())
    }
}

/// The full validation report.
impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DATA VALIDATION RESULTS:")?;
        writeln!(f)?;
        self.write_statistics(f)?;
        writeln!(f)?;
        writeln!(f, "OVERALL DATA QUALITY:")?;
        writeln!(f, "Quality Score: {}", self.quality)?;
        writeln!(f, "Assessment: {}", self.quality.assessment())?;
        writeln!(f)?;
        writeln!(f, "RECOMMENDATIONS:")?;
        let recommendations = self.recommendations();
        if recommendations.is_empty() {
            writeln!(f, "- None")?;
        }
        for line in recommendations {
            writeln!(f, "- {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<BusinessRecord> {
        let mut a = BusinessRecord::new("A", "Boland Tyres");
        a.company_type = Some(CompanyType::LocalRepairShop);
        a.repair_costs = Some("From R350".into());
        a.repair_frequency = Some("Every season".into());
        a.damage_types = Some("Punctures".into());
        a.phone_number = Some("+27 21 872 1234".into());
        a.website = Some("https://boland.co.za".into());

        let mut b = BusinessRecord::new("B", "Agri Wheel");
        b.company_type = Some(CompanyType::LocalRepairShop);
        b.website = Some("https://agriwheel.co.za".into());

        let c = BusinessRecord::new("C", "Karoo Farm Supplies");
        vec![a, b, c]
    }

    #[test]
    fn counts_missing_fields() {
        let report = DatasetReport::from_records(&records());
        assert_eq!(report.total, 3);
        assert_eq!(report.missing_count(Field::CompanyType), 1);
        assert_eq!(report.missing_count(Field::RepairCosts), 2);
        assert_eq!(report.missing_count(Field::Website), 1);
        assert_eq!(report.missing_count(Field::PhoneNumber), 2);
    }

    #[test]
    fn type_breakdown_omits_empty_types_and_puts_unknown_last() {
        let report = DatasetReport::from_records(&records());
        assert_eq!(
            report.type_breakdown,
            vec![("Local Repair Shop", 2), ("Unknown", 1)]
        );
    }

    #[test]
    fn recommendations_only_above_thirty_percent() {
        let report = DatasetReport::from_records(&records());
        // Company type is missing in 1/3 (33%) and the researched fields in 2/3.
        assert_eq!(
            report.recommendations(),
            vec![
                "Focus on identifying company types for more businesses",
                "Gather more information about repair costs",
                "Collect more data on repair frequency",
                "Research more about types of damages handled",
            ]
        );

        let all = records();
        assert!(DatasetReport::from_records(&all[..1])
            .recommendations()
            .is_empty());
    }

    #[test]
    fn renders_validation_report() {
        let text = DatasetReport::from_records(&records()).to_string();
        assert!(text.contains("Total companies: 3"));
        assert!(text.contains("- Repair Costs: 2 (66.7%)"));
        assert!(text.contains("- Local Repair Shop: 2 (66.7%)"));
        // (100 + 30 + 0) / 300
        assert!(text.contains("Quality Score: 43.3%"));
        assert!(text.contains("Assessment: Fair"));
        assert!(text.contains("- Gather more information about repair costs"));
    }

    #[test]
    fn empty_dataset_report_does_not_divide_by_zero() {
        let report = DatasetReport::from_records(&[]);
        let text = report.to_string();
        assert!(text.contains("- Company Type: 0 (0.0%)"));
        assert!(text.contains("Quality Score: 0.0%"));
        assert!(text.contains("Assessment: Poor"));
        assert!(text.contains("- None"));
    }
}
