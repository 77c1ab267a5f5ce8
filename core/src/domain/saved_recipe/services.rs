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
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    saved_recipe::{
        entities::{SavedRecipe, SavedRecipeConfig},
        ports::{SavedRecipeRepository, SavedRecipeService},
        value_objects::{GetSavedRecipesFilter, SaveRecipeInput, UpdateSavedRecipeInput},
    },
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

const DEFAULT_PAGE_SIZE: usize = 50;

/// Applies the tag filter then the offset/limit window. Returns the page and
/// the number of recipes matching before paging.
fn select_page(recipes: Vec<SavedRecipe>, filter: &GetSavedRecipesFilter) -> (Vec<SavedRecipe>, usize) {
    let matching: Vec<SavedRecipe> = match filter.tag.as_deref() {
        Some(tag) if !tag.trim().is_empty() => {
            recipes.into_iter().filter(|r| r.has_tag(tag)).collect()
        }
        _ => recipes,
    };

    let total = matching.len();
    let offset = filter.offset.unwrap_or(0) as usize;
    let limit = filter.limit.map_or(DEFAULT_PAGE_SIZE, |l| l as usize);

    let page = matching.into_iter().skip(offset).take(limit).collect();
    (page, total)
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> SavedRecipeService
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
    async fn save_recipe(
        &self,
        identity: Identity,
        input: SaveRecipeInput,
    ) -> Result<SavedRecipe, CoreError> {
        if input.dish_name.trim().is_empty() {
            return Err(CoreError::Invalid("dish name must not be empty".to_string()));
        }

        let recipe = SavedRecipe::new(SavedRecipeConfig {
            user_id: identity.id(),
            dish_name: input.dish_name.trim().to_string(),
            recipe_text: input.recipe_text,
            analysis: input.analysis,
            notes: input.notes,
            tags: input.tags,
        });

        let recipe = self.saved_recipe_repository.create_recipe(recipe).await?;
        info!(recipe_id = %recipe.id, "Recipe saved");

        Ok(recipe)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_saved_recipes(
        &self,
        identity: Identity,
        filter: GetSavedRecipesFilter,
    ) -> Result<(Vec<SavedRecipe>, usize), CoreError> {
        let recipes = self
            .saved_recipe_repository
            .get_recipes_by_user(identity.id(), filter.favorites_only)
            .await?;

        Ok(select_page(recipes, &filter))
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_saved_recipe(
        &self,
        identity: Identity,
        recipe_id: Uuid,
    ) -> Result<SavedRecipe, CoreError> {
        self.saved_recipe_repository
            .get_recipe(recipe_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn update_saved_recipe(
        &self,
        identity: Identity,
        input: UpdateSavedRecipeInput,
    ) -> Result<SavedRecipe, CoreError> {
        let mut recipe = self
            .saved_recipe_repository
            .get_recipe(input.recipe_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        recipe.update(input.is_favorite, input.notes, input.tags);

        self.saved_recipe_repository.update_recipe(recipe).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn delete_saved_recipe(&self, identity: Identity, recipe_id: Uuid) -> Result<(), CoreError> {
        self.saved_recipe_repository
            .get_recipe(recipe_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        self.saved_recipe_repository
            .delete_recipe(recipe_id, identity.id())
            .await
    }
}
