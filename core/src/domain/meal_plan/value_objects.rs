use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::meal_plan::entities::MealType;

pub struct AddMealInput {
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub servings: u32,
    pub notes: Option<String>,
}

/// `None` fields keep their current value.
#[derive(Default)]
pub struct UpdateMealInput {
    pub meal_id: Uuid,
    pub recipe_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
    pub servings: Option<u32>,
    pub notes: Option<String>,
}

pub struct GenerateShoppingFromPlanInput {
    pub plan_id: Uuid,
    pub list_name: String,
}
