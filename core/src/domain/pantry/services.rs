use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::{entities::FamilyMember, ports::FamilyMemberRepository, services::load_profile},
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::{
        entities::ModelRequest,
        invoker::ModelInvoker,
        ports::{LLMClient, RateLimiter},
        rate_limit::EndpointClass,
    },
    meal_plan::ports::MealPlanRepository,
    pantry::{
        entities::{PantryItem, RecipeSuggestions},
        ports::{PantryRepository, PantryService},
        validator::validate_recipe_suggestions,
        value_objects::{AddPantryItemInput, SuggestRecipesInput},
    },
    prompt::builder::build_recipe_suggestion_prompt,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

pub async fn run_recipe_suggestions<L, RL>(
    invoker: &ModelInvoker<L, RL>,
    user_id: Uuid,
    ingredients: &[String],
    members: &[&FamilyMember],
) -> Result<RecipeSuggestions, CoreError>
where
    L: LLMClient,
    RL: RateLimiter,
{
    let prompt = build_recipe_suggestion_prompt(ingredients, members)?;

    let raw = invoker
        .invoke(user_id, EndpointClass::SuggestRecipes, &ModelRequest::text(prompt))
        .await?;

    validate_recipe_suggestions(&raw)
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> PantryService
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
    async fn get_items(&self, identity: Identity) -> Result<Vec<PantryItem>, CoreError> {
        self.pantry_repository.get_items(identity.id()).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn add_item(
        &self,
        identity: Identity,
        input: AddPantryItemInput,
    ) -> Result<PantryItem, CoreError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CoreError::Invalid("item name must not be empty".to_string()));
        }

        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        self.pantry_repository
            .add_item(PantryItem::new(identity.id(), name.to_string(), category))
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn delete_item(&self, identity: Identity, item_id: Uuid) -> Result<(), CoreError> {
        self.pantry_repository
            .get_item(item_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        self.pantry_repository
            .delete_item(item_id, identity.id())
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn clear_items(&self, identity: Identity) -> Result<u64, CoreError> {
        let removed = self.pantry_repository.clear_items(identity.id()).await?;
        info!(removed, "Pantry cleared");

        Ok(removed)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn suggest_recipes(
        &self,
        identity: Identity,
        input: SuggestRecipesInput,
    ) -> Result<RecipeSuggestions, CoreError> {
        let ingredients = match input.ingredients {
            Some(ingredients) => ingredients,
            None => self
                .pantry_repository
                .get_items(identity.id())
                .await?
                .into_iter()
                .map(|i| i.name)
                .collect(),
        };

        if ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err(CoreError::Invalid(
                "pantry is empty, add some ingredients first".to_string(),
            ));
        }

        let profile = load_profile(&self.family_member_repository, identity.id()).await?;
        let members: Vec<&FamilyMember> = profile.members.iter().collect();

        let suggestions =
            run_recipe_suggestions(&self.invoker, identity.id(), &ingredients, &members).await?;
        info!(count = suggestions.suggestions.len(), "Recipes suggested");

        Ok(suggestions)
    }
}
