use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        family::entities::{FamilyMember, MemberRole},
    },
    entity::family_members,
    infrastructure::db::json::{from_json, to_json},
};

pub fn role_to_column(role: MemberRole) -> Result<String, CoreError> {
    match to_json(&role, "role")? {
        serde_json::Value::String(role) => Ok(role),
        _ => Err(CoreError::InternalServerError),
    }
}

impl TryFrom<family_members::Model> for FamilyMember {
    type Error = CoreError;

    fn try_from(model: family_members::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            avatar: model.avatar,
            role: from_json(serde_json::Value::String(model.role), "role")?,
            conditions: from_json(model.conditions, "conditions")?,
            custom_restrictions: from_json(model.custom_restrictions, "custom_restrictions")?,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::family::entities::ConditionType;

    #[test]
    fn test_model_with_conditions_maps_to_member() {
        let now = Utc::now().fixed_offset();
        let model = family_members::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Grandpa".to_string(),
            avatar: "👴".to_string(),
            role: "Adult".to_string(),
            conditions: json!([{"type": "DIABETES", "enabled": true, "notes": "type 2"}]),
            custom_restrictions: json!(["no mushrooms"]),
            created_at: now,
            updated_at: now,
        };

        let member = FamilyMember::try_from(model).unwrap();

        assert_eq!(member.role, MemberRole::Adult);
        assert_eq!(member.conditions[0].condition_type, ConditionType::Diabetes);
        assert_eq!(member.custom_restrictions, vec!["no mushrooms".to_string()]);
    }

    #[test]
    fn test_role_round_trips_through_column() {
        let column = role_to_column(MemberRole::Baby).unwrap();
        let role: MemberRole = from_json(serde_json::Value::String(column), "role").unwrap();

        assert_eq!(role, MemberRole::Baby);
    }
}
