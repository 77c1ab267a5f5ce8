use mealadapt_core::domain::family::entities::{HealthCondition, MemberRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn default_avatar() -> String {
    "👤".to_string()
}

fn validate_restrictions(restrictions: &[String]) -> Result<(), ValidationError> {
    if restrictions.iter().any(|r| r.trim().is_empty()) {
        return Err(ValidationError::new("blank_restriction")
            .with_message("custom restrictions cannot be blank".into()));
    }
    Ok(())
}

/// Body of both member creation and full member replacement.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct MemberRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default = "default_avatar")]
    #[validate(length(max = 16, message = "avatar must be at most 16 characters"))]
    pub avatar: String,
    pub role: MemberRole,
    #[serde(default)]
    pub conditions: Vec<HealthCondition>,
    #[serde(default)]
    #[validate(custom(function = "validate_restrictions"))]
    pub custom_restrictions: Vec<String>,
}

/// Body of the whole-household replacement.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProfileRequest {
    #[validate(length(max = 20, message = "a household has at most 20 members"), nested)]
    pub members: Vec<MemberRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let request: MemberRequest =
            serde_json::from_value(serde_json::json!({"name": "Leo", "role": "Baby"})).unwrap();

        assert_eq!(request.avatar, "👤");
        assert!(request.conditions.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_restriction_is_rejected() {
        let request: MemberRequest = serde_json::from_value(serde_json::json!({
            "name": "Leo",
            "role": "Child",
            "custom_restrictions": ["no shellfish", "  "]
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_role_fails_to_parse() {
        let parsed = serde_json::from_value::<MemberRequest>(
            serde_json::json!({"name": "Leo", "role": "Teen"}),
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn test_profile_validates_every_member() {
        let request: ProfileRequest = serde_json::from_value(serde_json::json!({
            "members": [
                {"name": "Ana", "role": "Adult"},
                {"name": "", "role": "Child"}
            ]
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }
}
