use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe_analysis::entities::OverallSafety;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct IngredientConcern {
    pub ingredient: String,
    /// Names of the household members affected, as they appear in the profile.
    pub affected_members: Vec<String>,
    pub reason: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientSafetyReport {
    pub overall_safety: OverallSafety,
    pub concerns: Vec<IngredientConcern>,
    pub safe_for_all: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanResult {
    pub product_name: String,
    pub extracted_ingredients: Vec<String>,
    pub report: IngredientSafetyReport,
}
