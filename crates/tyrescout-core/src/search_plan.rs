use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder substituted with the area name in each query template.
pub const AREA_PLACEHOLDER: &str = "{area}";

/// Which areas to search and which query templates to run in each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPlan {
    /// Region hint passed to the places provider (ccTLD, e.g. `za`).
    #[serde(default = "default_region")]
    pub region: String,
    pub areas: Vec<String>,
    pub templates: Vec<String>,
}

fn default_region() -> String {
    "za".to_string()
}

impl SearchPlan {
    /// Expand every template for one area, in template order.
    #[must_use]
    pub fn queries_for(&self, area: &str) -> Vec<String> {
        self.templates
            .iter()
            .map(|t| t.replace(AREA_PLACEHOLDER, area))
            .collect()
    }

    /// Replace the configured areas (e.g. from the command line) and revalidate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the resulting plan is invalid.
    pub fn with_areas(mut self, areas: Vec<String>) -> Result<Self, ConfigError> {
        self.areas = areas
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the region is blank, no areas or
    /// templates are listed, an area repeats (case-insensitively), or a
    /// template lacks the `{area}` placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region must be non-empty".to_string(),
            ));
        }
        if self.areas.is_empty() {
            return Err(ConfigError::Validation(
                "at least one search area is required".to_string(),
            ));
        }
        if self.templates.is_empty() {
            return Err(ConfigError::Validation(
                "at least one query template is required".to_string(),
            ));
        }

        let mut seen_areas = HashSet::new();
        for area in &self.areas {
            if area.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "area names must be non-empty".to_string(),
                ));
            }
            if !seen_areas.insert(area.trim().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate search area: '{area}'"
                )));
            }
        }

        for template in &self.templates {
            if !template.contains(AREA_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "template '{template}' is missing the {AREA_PLACEHOLDER} placeholder"
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate the search plan from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_search_plan(path: &Path) -> Result<SearchPlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SearchPlanIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let plan: SearchPlan = serde_yaml::from_str(&content)?;
    plan.validate()?;
    Ok(plan)
}

#[cfg(test)]
#[path = "search_plan_test.rs"]
mod tests;
