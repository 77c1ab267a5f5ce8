use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::family::entities::FamilyProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Safe,
    NeedsAdaptation,
    NotRecommended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverallSafety {
    Safe,
    Caution,
    Unsafe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Adaptation {
    #[serde(default)]
    pub modifications: Vec<String>,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    #[serde(default)]
    pub preparation_changes: Vec<String>,
}

impl Adaptation {
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
            && self.substitutions.is_empty()
            && self.preparation_changes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberVerdict {
    pub member_id: Uuid,
    pub member_name: String,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    pub concerns: Vec<String>,
    pub adaptations: Option<Adaptation>,
    pub nutritional_notes: Option<String>,
}

/// A validated analysis: exactly one verdict per analysed member, in profile order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeAnalysis {
    pub dish_name: String,
    pub base_description: String,
    pub overall_safety: OverallSafety,
    pub member_verdicts: Vec<MemberVerdict>,
    pub general_tips: Vec<String>,
}

/// One analysis request against a snapshot of the caller's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeAnalysisRequest {
    pub recipe_text: String,
    pub profile: FamilyProfile,
    pub member_ids: Option<Vec<Uuid>>,
}
