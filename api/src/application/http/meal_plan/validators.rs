use chrono::NaiveDate;
use mealadapt_core::domain::meal_plan::entities::{MAX_SERVINGS, MealType};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GetWeekParams {
    /// Any day of the wanted week; the current week when omitted.
    #[schema(example = "2026-10-12")]
    pub week: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddMealRequest {
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = MAX_SERVINGS, message = "servings must be between 1 and 50"))]
    pub servings: u32,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMealRequest {
    pub recipe_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
    #[validate(range(min = 1, max = MAX_SERVINGS, message = "servings must be between 1 and 50"))]
    pub servings: Option<u32>,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateShoppingFromPlanRequest {
    #[validate(length(min = 1, max = 200, message = "list_name must be between 1 and 200 characters"))]
    pub list_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_meal_defaults_to_one_serving() {
        let request: AddMealRequest = serde_json::from_value(serde_json::json!({
            "recipe_id": Uuid::new_v4(),
            "date": "2026-10-14",
            "meal_type": "dinner"
        }))
        .unwrap();

        assert_eq!(request.servings, 1);
        assert_eq!(request.meal_type, MealType::Dinner);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_servings_out_of_range_are_rejected() {
        let request = UpdateMealRequest {
            servings: Some(0),
            ..UpdateMealRequest::default()
        };

        assert!(request.validate().unwrap_err().field_errors().contains_key("servings"));
    }

    #[test]
    fn test_unknown_meal_type_fails_to_parse() {
        let parsed = serde_json::from_value::<AddMealRequest>(serde_json::json!({
            "recipe_id": Uuid::new_v4(),
            "date": "2026-10-14",
            "meal_type": "brunch"
        }));

        assert!(parsed.is_err());
    }
}
