use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMeRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current_password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_short_password_and_bad_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            name: "Ana".to_string(),
            password: "12345".to_string(),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_accepts_valid_payload() {
        let request = RegisterRequest {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            password: "secret1".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_me_fields_are_optional() {
        let request: UpdateMeRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.validate().is_ok());

        let request = UpdateMeRequest {
            email: Some("ana@".to_string()),
            ..UpdateMeRequest::default()
        };
        assert!(request.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn test_new_password_needs_six_characters() {
        let request = ChangePasswordRequest {
            current_password: "secret1".to_string(),
            new_password: "short".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("new_password"));
    }
}
