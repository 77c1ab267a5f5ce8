use tracing::{info, instrument};

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::{
        entities::{Product, ProductAnalysis, validate_barcode},
        ports::{BarcodeService, ProductCatalog},
    },
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::{ports::FamilyMemberRepository, services::load_profile},
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::ports::{LLMClient, RateLimiter},
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    prompt::builder::select_members,
    saved_recipe::ports::SavedRecipeRepository,
    scan::services::run_ingredient_check,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

const NO_INGREDIENTS_NOTE: &str =
    "No ingredient list is available for this product, so it could not be checked for your family.";

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> BarcodeService
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
    #[instrument(skip_all, fields(user_id = %identity.id(), barcode = %barcode))]
    async fn lookup_product(&self, identity: Identity, barcode: String) -> Result<Product, CoreError> {
        let barcode = validate_barcode(&barcode)?;

        self.product_catalog
            .lookup(barcode)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), barcode = %barcode))]
    async fn analyze_product(
        &self,
        identity: Identity,
        barcode: String,
    ) -> Result<ProductAnalysis, CoreError> {
        let product = self.lookup_product(identity.clone(), barcode).await?;

        let ingredients = product.analysable_ingredients();
        if ingredients.is_empty() {
            info!("Product has no ingredient list, skipping analysis");
            return Ok(ProductAnalysis {
                product,
                report: None,
                note: Some(NO_INGREDIENTS_NOTE.to_string()),
            });
        }

        let profile = load_profile(&self.family_member_repository, identity.id()).await?;
        let members = select_members(&profile, None)?;

        let report =
            run_ingredient_check(&self.invoker, identity.id(), &ingredients, &members).await?;

        Ok(ProductAnalysis {
            product,
            report: Some(report),
            note: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        barcode::entities::NutritionInfo, common::services::tests::Stores,
        llm::invoker::tests::ScriptedClient,
    };

    const BARCODE: &str = "5000112637922";

    fn water() -> Product {
        Product {
            barcode: BARCODE.to_string(),
            name: "Still water".to_string(),
            brand: "Spring".to_string(),
            quantity: "1.5 l".to_string(),
            categories: vec!["Waters".to_string()],
            ingredients_text: String::new(),
            ingredients_list: vec![],
            allergens: vec![],
            allergens_text: String::new(),
            nutrition: NutritionInfo::default(),
            nutriscore: Some("a".to_string()),
            nova_group: Some(1),
            image_url: None,
            image_small_url: None,
        }
    }

    fn caller() -> Identity {
        Identity::new(uuid::Uuid::new_v4(), "ana@example.com".to_string())
    }

    #[tokio::test]
    async fn test_product_without_ingredients_skips_the_model() {
        let stores = Stores::default();
        stores
            .catalog
            .products
            .lock()
            .unwrap()
            .insert(BARCODE.to_string(), water());
        let client = ScriptedClient::default();
        let service = stores.service(client.clone());

        let analysis = service
            .analyze_product(caller(), BARCODE.to_string())
            .await
            .unwrap();

        assert_eq!(analysis.product, water());
        assert_eq!(analysis.report, None);
        assert_eq!(analysis.note.as_deref(), Some(NO_INGREDIENTS_NOTE));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_barcodes() {
        let stores = Stores::default();
        let client = ScriptedClient::default();
        let service = stores.service(client.clone());

        assert_eq!(
            service.lookup_product(caller(), BARCODE.to_string()).await,
            Err(CoreError::NotFound)
        );
        assert!(matches!(
            service.analyze_product(caller(), "12ab".to_string()).await,
            Err(CoreError::ValidationError(_))
        ));
        assert_eq!(client.calls(), 0);
    }
}
