use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::ports::FamilyMemberRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::ports::{LLMClient, RateLimiter},
    meal_plan::{
        entities::{MealPlan, PlannedMeal, PlannedMealConfig, validate_servings, week_start_of},
        ports::{MealPlanRepository, MealPlanService},
        value_objects::{AddMealInput, GenerateShoppingFromPlanInput, UpdateMealInput},
    },
    pantry::ports::PantryRepository,
    saved_recipe::{entities::SavedRecipe, ports::SavedRecipeRepository},
    shopping::{
        entities::ShoppingList,
        ports::{ShoppingListRepository, ShoppingService},
        value_objects::GenerateShoppingListInput,
    },
    user::ports::UserRepository,
};

/// Copies dish name and stored analysis from each meal's saved recipe.
fn attach_recipes(meals: &mut [PlannedMeal], recipes: &[SavedRecipe]) {
    for meal in meals {
        let recipe = recipes.iter().find(|r| r.id == meal.recipe_id);
        meal.dish_name = recipe.map(|r| r.dish_name.clone());
        meal.analysis = recipe.and_then(|r| r.analysis.clone());
    }
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL>
where
    U: UserRepository,
    RT: RefreshTokenRepository,
    H: HasherRepository,
    TK: TokenCodec,
    F: FamilyMemberRepository,
    SR: SavedRecipeRepository,
    SH: ShoppingListRepository,
    MP: MealPlanRepository,
    P: PantryRepository,
    PC: ProductCatalog,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    RL: RateLimiter,
{
    async fn owned_recipe(&self, recipe_id: Uuid, user_id: Uuid) -> Result<SavedRecipe, CoreError> {
        self.saved_recipe_repository
            .get_recipe(recipe_id, user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn with_recipe(&self, mut meal: PlannedMeal, user_id: Uuid) -> Result<PlannedMeal, CoreError> {
        let recipes = self
            .saved_recipe_repository
            .get_recipes_by_ids(user_id, vec![meal.recipe_id])
            .await?;
        attach_recipes(std::slice::from_mut(&mut meal), &recipes);
        Ok(meal)
    }
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> MealPlanService
    for Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL>
where
    U: UserRepository,
    RT: RefreshTokenRepository,
    H: HasherRepository,
    TK: TokenCodec,
    F: FamilyMemberRepository,
    SR: SavedRecipeRepository,
    SH: ShoppingListRepository,
    MP: MealPlanRepository,
    P: PantryRepository,
    PC: ProductCatalog,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    RL: RateLimiter,
{
    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_week(
        &self,
        identity: Identity,
        week: Option<chrono::NaiveDate>,
    ) -> Result<MealPlan, CoreError> {
        let day = week.unwrap_or_else(|| Utc::now().date_naive());
        let mut plan = self
            .meal_plan_repository
            .get_or_create_plan(MealPlan::new(identity.id(), day))
            .await?;

        let recipes = self
            .saved_recipe_repository
            .get_recipes_by_ids(identity.id(), plan.recipe_ids())
            .await?;
        attach_recipes(&mut plan.meals, &recipes);
        plan.sort_meals();

        Ok(plan)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), recipe_id = %input.recipe_id))]
    async fn add_meal(
        &self,
        identity: Identity,
        input: AddMealInput,
    ) -> Result<PlannedMeal, CoreError> {
        let recipe = self.owned_recipe(input.recipe_id, identity.id()).await?;
        let plan = self
            .meal_plan_repository
            .get_or_create_plan(MealPlan::new(identity.id(), input.date))
            .await?;

        let meal = PlannedMeal::new(PlannedMealConfig {
            plan_id: plan.id,
            recipe_id: recipe.id,
            date: input.date,
            meal_type: input.meal_type,
            servings: input.servings,
            notes: input.notes,
        })?;

        let mut meal = self.meal_plan_repository.add_meal(meal).await?;
        attach_recipes(std::slice::from_mut(&mut meal), &[recipe]);
        info!(meal_id = %meal.id, plan_id = %plan.id, "Meal planned");

        Ok(meal)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), meal_id = %input.meal_id))]
    async fn update_meal(
        &self,
        identity: Identity,
        input: UpdateMealInput,
    ) -> Result<PlannedMeal, CoreError> {
        let mut meal = self
            .meal_plan_repository
            .get_meal(input.meal_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        if let Some(recipe_id) = input.recipe_id {
            meal.recipe_id = self.owned_recipe(recipe_id, identity.id()).await?.id;
        }
        if let Some(date) = input.date {
            // A meal moved to another week belongs to that week's plan.
            if week_start_of(date) != week_start_of(meal.date) {
                let plan = self
                    .meal_plan_repository
                    .get_or_create_plan(MealPlan::new(identity.id(), date))
                    .await?;
                meal.plan_id = plan.id;
            }
            meal.date = date;
        }
        if let Some(meal_type) = input.meal_type {
            meal.meal_type = meal_type;
        }
        if let Some(servings) = input.servings {
            meal.servings = validate_servings(servings)?;
        }
        if let Some(notes) = input.notes {
            meal.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }

        let meal = self.meal_plan_repository.update_meal(meal).await?;
        self.with_recipe(meal, identity.id()).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), meal_id = %meal_id))]
    async fn remove_meal(&self, identity: Identity, meal_id: Uuid) -> Result<(), CoreError> {
        let meal = self
            .meal_plan_repository
            .get_meal(meal_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        self.meal_plan_repository.delete_meal(meal.id).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), plan_id = %input.plan_id))]
    async fn generate_shopping(
        &self,
        identity: Identity,
        input: GenerateShoppingFromPlanInput,
    ) -> Result<ShoppingList, CoreError> {
        let plan = self
            .meal_plan_repository
            .get_plan(input.plan_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        let recipe_ids = plan.recipe_ids();
        if recipe_ids.is_empty() {
            return Err(CoreError::Invalid("no recipes in this meal plan".to_string()));
        }

        self.generate_list(
            identity,
            GenerateShoppingListInput {
                name: input.list_name,
                recipe_ids,
            },
        )
        .await
    }
}
