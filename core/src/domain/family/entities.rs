use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberRole {
    Adult,
    Child,
    Baby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    Diabetes,
    HighUricAcid,
    Hypertension,
    HeartDisease,
    KidneyDisease,
    Celiac,
    LactoseIntolerance,
    PeanutAllergy,
}

impl ConditionType {
    pub const ALL: [ConditionType; 8] = [
        ConditionType::Diabetes,
        ConditionType::HighUricAcid,
        ConditionType::Hypertension,
        ConditionType::HeartDisease,
        ConditionType::KidneyDisease,
        ConditionType::Celiac,
        ConditionType::LactoseIntolerance,
        ConditionType::PeanutAllergy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConditionType::Diabetes => "Diabetes",
            ConditionType::HighUricAcid => "High Uric Acid",
            ConditionType::Hypertension => "Hypertension",
            ConditionType::HeartDisease => "Heart Disease",
            ConditionType::KidneyDisease => "Kidney Disease",
            ConditionType::Celiac => "Celiac (Gluten-Free)",
            ConditionType::LactoseIntolerance => "Lactose Intolerance",
            ConditionType::PeanutAllergy => "Peanut Allergy",
        }
    }

    pub fn guideline(&self) -> &'static str {
        match self {
            ConditionType::Diabetes => {
                "low glycemic index, portion control, complex carbohydrates over simple sugars"
            }
            ConditionType::HighUricAcid => {
                "avoid high-purine foods such as organ meats, anchovies, sardines, shellfish, excessive red meat and beer"
            }
            ConditionType::Hypertension => {
                "limit sodium to under 1500mg per day, avoid processed foods, prefer herbs and spices over salt"
            }
            ConditionType::HeartDisease => {
                "low saturated fat, no trans fats, limit dietary cholesterol"
            }
            ConditionType::KidneyDisease => "monitor potassium, phosphorus and protein intake",
            ConditionType::Celiac => {
                "absolutely no wheat, barley, rye or cross-contaminated ingredients"
            }
            ConditionType::LactoseIntolerance => {
                "avoid dairy or use lactose-free alternatives"
            }
            ConditionType::PeanutAllergy => {
                "absolutely no peanuts or peanut products, watch for cross-contamination"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthCondition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub enabled: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FamilyMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub conditions: Vec<HealthCondition>,
    pub custom_restrictions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FamilyMemberConfig {
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub conditions: Vec<HealthCondition>,
    pub custom_restrictions: Vec<String>,
}

impl FamilyMember {
    pub fn new(config: FamilyMemberConfig) -> Result<Self, CoreError> {
        ensure_unique_conditions(&config.conditions)?;
        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            name: config.name,
            avatar: config.avatar,
            role: config.role,
            conditions: config.conditions,
            custom_restrictions: config.custom_restrictions,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn replace(
        &mut self,
        name: String,
        avatar: String,
        role: MemberRole,
        conditions: Vec<HealthCondition>,
        custom_restrictions: Vec<String>,
    ) -> Result<(), CoreError> {
        ensure_unique_conditions(&conditions)?;
        let (now, _) = generate_timestamp();

        self.name = name;
        self.avatar = avatar;
        self.role = role;
        self.conditions = conditions;
        self.custom_restrictions = custom_restrictions;
        self.updated_at = now;
        Ok(())
    }

    /// Enabled conditions in canonical order, independent of how they were entered.
    pub fn enabled_conditions(&self) -> Vec<&HealthCondition> {
        let mut enabled: Vec<&HealthCondition> =
            self.conditions.iter().filter(|c| c.enabled).collect();
        enabled.sort_by_key(|c| {
            ConditionType::ALL
                .iter()
                .position(|t| *t == c.condition_type)
        });
        enabled
    }
}

/// A user's household, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct FamilyProfile {
    pub members: Vec<FamilyMember>,
}

impl FamilyProfile {
    pub fn new(members: Vec<FamilyMember>) -> Self {
        Self { members }
    }

    pub fn find(&self, member_id: Uuid) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub fn ensure_unique_conditions(conditions: &[HealthCondition]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for condition in conditions {
        if !seen.insert(condition.condition_type) {
            return Err(CoreError::Invalid(format!(
                "condition {} listed more than once",
                condition.condition_type.label()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(condition_type: ConditionType, enabled: bool) -> HealthCondition {
        HealthCondition {
            condition_type,
            enabled,
            notes: None,
        }
    }

    fn config(conditions: Vec<HealthCondition>) -> FamilyMemberConfig {
        FamilyMemberConfig {
            user_id: Uuid::new_v4(),
            name: "Mia".to_string(),
            avatar: "👧".to_string(),
            role: MemberRole::Child,
            conditions,
            custom_restrictions: vec![],
        }
    }

    #[test]
    fn test_duplicate_condition_types_are_rejected() {
        let result = FamilyMember::new(config(vec![
            condition(ConditionType::Diabetes, true),
            condition(ConditionType::Diabetes, false),
        ]));

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_enabled_conditions_are_filtered_and_ordered() {
        let member = FamilyMember::new(config(vec![
            condition(ConditionType::PeanutAllergy, true),
            condition(ConditionType::Hypertension, false),
            condition(ConditionType::Diabetes, true),
        ]))
        .unwrap();

        let types: Vec<ConditionType> = member
            .enabled_conditions()
            .iter()
            .map(|c| c.condition_type)
            .collect();

        assert_eq!(
            types,
            vec![ConditionType::Diabetes, ConditionType::PeanutAllergy]
        );
    }

    #[test]
    fn test_condition_wire_format() {
        let json = serde_json::json!({"type": "HIGH_URIC_ACID", "enabled": true});
        let parsed: HealthCondition = serde_json::from_value(json).unwrap();

        assert_eq!(parsed.condition_type, ConditionType::HighUricAcid);
        assert_eq!(parsed.notes, None);
        assert!(serde_json::from_value::<HealthCondition>(
            serde_json::json!({"type": "GOUT", "enabled": true})
        )
        .is_err());
    }
}
