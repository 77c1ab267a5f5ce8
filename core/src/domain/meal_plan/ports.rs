use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{MealPlan, PlannedMeal},
        value_objects::{AddMealInput, GenerateShoppingFromPlanInput, UpdateMealInput},
    },
    shopping::entities::ShoppingList,
};

/// Storage for weekly plans. Meals come back without their recipe snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait MealPlanRepository: Send + Sync {
    /// Returns the stored plan for `plan.user_id` and `plan.week_start`,
    /// inserting `plan` first when that week has none.
    fn get_or_create_plan(
        &self,
        plan: MealPlan,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn get_plan(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<MealPlan>, CoreError>> + Send;

    fn add_meal(
        &self,
        meal: PlannedMeal,
    ) -> impl Future<Output = Result<PlannedMeal, CoreError>> + Send;

    /// Only returns the meal when its plan belongs to `user_id`.
    fn get_meal(
        &self,
        meal_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<PlannedMeal>, CoreError>> + Send;

    fn update_meal(
        &self,
        meal: PlannedMeal,
    ) -> impl Future<Output = Result<PlannedMeal, CoreError>> + Send;

    fn delete_meal(&self, meal_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanService: Send + Sync {
    /// The plan for the week containing `week`, today when `None`. Created
    /// empty on first access.
    fn get_week(
        &self,
        identity: Identity,
        week: Option<NaiveDate>,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn add_meal(
        &self,
        identity: Identity,
        input: AddMealInput,
    ) -> impl Future<Output = Result<PlannedMeal, CoreError>> + Send;

    fn update_meal(
        &self,
        identity: Identity,
        input: UpdateMealInput,
    ) -> impl Future<Output = Result<PlannedMeal, CoreError>> + Send;

    fn remove_meal(
        &self,
        identity: Identity,
        meal_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Builds a shopping list from every recipe planned in the week.
    fn generate_shopping(
        &self,
        identity: Identity,
        input: GenerateShoppingFromPlanInput,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;
}
