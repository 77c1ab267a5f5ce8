use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, generate_timestamp, services::Service},
    crypto::ports::HasherRepository,
    family::ports::FamilyMemberRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::{
        entities::ModelRequest,
        invoker::ModelInvoker,
        ports::{LLMClient, RateLimiter},
        rate_limit::EndpointClass,
    },
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    prompt::builder::{RecipeSource, build_ingredient_extraction_prompt},
    saved_recipe::ports::SavedRecipeRepository,
    shopping::{
        entities::{ExtractedIngredient, ShoppingItem, ShoppingList},
        ports::{ShoppingListRepository, ShoppingService},
        validator::validate_extracted_ingredients,
        value_objects::{
            AddShoppingItemInput, CreateShoppingListInput, GenerateShoppingListInput,
            NewShoppingItem, UpdateShoppingItemInput,
        },
    },
    user::ports::UserRepository,
};

pub async fn run_ingredient_extraction<L, RL>(
    invoker: &ModelInvoker<L, RL>,
    user_id: Uuid,
    recipes: &[RecipeSource],
) -> Result<Vec<ExtractedIngredient>, CoreError>
where
    L: LLMClient,
    RL: RateLimiter,
{
    let prompt = build_ingredient_extraction_prompt(recipes)?;

    let raw = invoker
        .invoke(user_id, EndpointClass::ExtractIngredients, &ModelRequest::text(prompt))
        .await?;

    validate_extracted_ingredients(&raw)
}

fn item_from_input(list_id: Uuid, item: NewShoppingItem) -> Result<ShoppingItem, CoreError> {
    let ingredient = item.ingredient.trim();
    if ingredient.is_empty() {
        return Err(CoreError::Invalid("ingredient must not be empty".to_string()));
    }

    Ok(ShoppingItem::new(
        list_id,
        ingredient.to_string(),
        item.quantity,
        item.category,
        None,
    ))
}

fn require_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Invalid("list name must not be empty".to_string()));
    }
    Ok(name.to_string())
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
    async fn owned_list(&self, list_id: Uuid, user_id: Uuid) -> Result<ShoppingList, CoreError> {
        self.shopping_list_repository
            .get_list(list_id, user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn owned_item(&self, item_id: Uuid, user_id: Uuid) -> Result<ShoppingItem, CoreError> {
        self.shopping_list_repository
            .get_item(item_id, user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> ShoppingService
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
    async fn create_list(
        &self,
        identity: Identity,
        input: CreateShoppingListInput,
    ) -> Result<ShoppingList, CoreError> {
        let mut list = ShoppingList::new(identity.id(), require_name(&input.name)?);
        for item in input.items {
            list.items.push(item_from_input(list.id, item)?);
        }

        self.shopping_list_repository.create_list(list).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn generate_list(
        &self,
        identity: Identity,
        input: GenerateShoppingListInput,
    ) -> Result<ShoppingList, CoreError> {
        let name = require_name(&input.name)?;
        let requested = input.recipe_ids.len();

        let recipes = self
            .saved_recipe_repository
            .get_recipes_by_ids(identity.id(), input.recipe_ids)
            .await?;

        if recipes.is_empty() {
            return Err(CoreError::Invalid(
                "none of the requested recipes were found".to_string(),
            ));
        }
        if recipes.len() < requested {
            warn!(
                requested,
                found = recipes.len(),
                "Ignoring recipe ids that do not belong to the user"
            );
        }

        let sources: Vec<RecipeSource> = recipes
            .iter()
            .map(|r| RecipeSource {
                dish_name: r.dish_name.clone(),
                recipe_text: r.recipe_text.clone(),
            })
            .collect();

        let extracted = run_ingredient_extraction(&self.invoker, identity.id(), &sources).await?;

        let source_recipe_id = match recipes.as_slice() {
            [only] => Some(only.id),
            _ => None,
        };

        let mut list = ShoppingList::new(identity.id(), name);
        list.items = extracted
            .into_iter()
            .map(|e| {
                ShoppingItem::new(
                    list.id,
                    e.ingredient,
                    Some(e.quantity),
                    Some(e.category),
                    source_recipe_id,
                )
            })
            .collect();

        let list = self.shopping_list_repository.create_list(list).await?;
        info!(list_id = %list.id, items = list.items.len(), "Shopping list generated");

        Ok(list)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_lists(&self, identity: Identity) -> Result<Vec<ShoppingList>, CoreError> {
        self.shopping_list_repository.get_lists(identity.id()).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_list(&self, identity: Identity, list_id: Uuid) -> Result<ShoppingList, CoreError> {
        self.owned_list(list_id, identity.id()).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn delete_list(&self, identity: Identity, list_id: Uuid) -> Result<(), CoreError> {
        self.owned_list(list_id, identity.id()).await?;
        self.shopping_list_repository
            .delete_list(list_id, identity.id())
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn complete_list(
        &self,
        identity: Identity,
        list_id: Uuid,
    ) -> Result<ShoppingList, CoreError> {
        let mut list = self.owned_list(list_id, identity.id()).await?;
        if list.completed_at.is_some() {
            return Ok(list);
        }

        let (now, _) = generate_timestamp();
        self.shopping_list_repository
            .complete_list(list_id, now)
            .await?;
        list.completed_at = Some(now);

        Ok(list)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn add_item(
        &self,
        identity: Identity,
        input: AddShoppingItemInput,
    ) -> Result<ShoppingItem, CoreError> {
        let list = self.owned_list(input.list_id, identity.id()).await?;
        let item = item_from_input(list.id, input.item)?;

        self.shopping_list_repository.add_item(item).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn update_item(
        &self,
        identity: Identity,
        input: UpdateShoppingItemInput,
    ) -> Result<ShoppingItem, CoreError> {
        let mut item = self.owned_item(input.item_id, identity.id()).await?;

        if let Some(checked) = input.is_checked {
            item.is_checked = checked;
        }
        if let Some(quantity) = input.quantity {
            item.quantity = Some(quantity);
        }

        self.shopping_list_repository.update_item(item).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn delete_item(&self, identity: Identity, item_id: Uuid) -> Result<(), CoreError> {
        let item = self.owned_item(item_id, identity.id()).await?;
        self.shopping_list_repository.delete_item(item.id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        llm::{
            invoker::tests::{ScriptedClient, invoker_with},
            rate_limit::RateLimits,
        },
        shopping::entities::GroceryCategory,
    };

    fn soup() -> RecipeSource {
        RecipeSource {
            dish_name: "Tomato soup".to_string(),
            recipe_text: "4 tomatoes, 1 onion, 500ml stock".to_string(),
        }
    }

    #[tokio::test]
    async fn test_extraction_returns_categorised_items() {
        let client = ScriptedClient::replying(
            &json!({
                "ingredients": [
                    {"ingredient": "tomatoes", "quantity": "4", "category": "produce"},
                    {"ingredient": "vegetable stock", "quantity": "500ml", "category": "pantry"}
                ]
            })
            .to_string(),
        );
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let items = run_ingredient_extraction(&invoker, Uuid::new_v4(), &[soup()])
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, GroceryCategory::Produce);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_recipes_fails_before_calling_model() {
        let client = ScriptedClient::replying("{}");
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let result = run_ingredient_extraction(&invoker, Uuid::new_v4(), &[]).await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_blank_item_is_rejected() {
        let result = item_from_input(
            Uuid::new_v4(),
            NewShoppingItem {
                ingredient: "   ".to_string(),
                quantity: None,
                category: None,
            },
        );

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }
}
