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
        entities::{ImageInput, ModelRequest},
        invoker::ModelInvoker,
        ports::{LLMClient, RateLimiter},
        rate_limit::EndpointClass,
    },
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    prompt::builder::{build_ingredient_list_prompt, build_label_scan_prompt, select_members},
    saved_recipe::ports::SavedRecipeRepository,
    scan::{
        entities::{IngredientSafetyReport, ScanResult},
        ports::ScanService,
        validator::{validate_ingredient_report, validate_label_scan},
    },
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

/// Checks an ingredient list against `members`. Shared with barcode analysis.
pub async fn run_ingredient_check<L, RL>(
    invoker: &ModelInvoker<L, RL>,
    user_id: Uuid,
    ingredients: &[String],
    members: &[&FamilyMember],
) -> Result<IngredientSafetyReport, CoreError>
where
    L: LLMClient,
    RL: RateLimiter,
{
    let prompt = build_ingredient_list_prompt(ingredients, members)?;

    let raw = invoker
        .invoke(user_id, EndpointClass::AnalyzeIngredients, &ModelRequest::text(prompt))
        .await?;

    validate_ingredient_report(&raw, members)
}

pub async fn run_label_scan<L, RL>(
    invoker: &ModelInvoker<L, RL>,
    user_id: Uuid,
    image: ImageInput,
    members: &[&FamilyMember],
) -> Result<ScanResult, CoreError>
where
    L: LLMClient,
    RL: RateLimiter,
{
    if image.data.is_empty() {
        return Err(CoreError::ValidationError("image is empty".to_string()));
    }
    let prompt = build_label_scan_prompt(members)?;

    let raw = invoker
        .invoke(
            user_id,
            EndpointClass::AnalyzeImage,
            &ModelRequest::with_image(prompt, image),
        )
        .await?;

    validate_label_scan(&raw, members)
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> ScanService
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
    #[instrument(skip_all, fields(user_id = %identity.id(), mime_type = %image.mime_type))]
    async fn analyze_label_image(
        &self,
        identity: Identity,
        image: ImageInput,
    ) -> Result<ScanResult, CoreError> {
        let profile = load_profile(&self.family_member_repository, identity.id()).await?;
        let members = select_members(&profile, None)?;

        let result = run_label_scan(&self.invoker, identity.id(), image, &members).await?;
        info!(
            product = %result.product_name,
            concerns = result.report.concerns.len(),
            "Label scanned"
        );

        Ok(result)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), ingredients = ingredients.len()))]
    async fn analyze_ingredients(
        &self,
        identity: Identity,
        ingredients: Vec<String>,
    ) -> Result<IngredientSafetyReport, CoreError> {
        let profile = load_profile(&self.family_member_repository, identity.id()).await?;
        let members = select_members(&profile, None)?;

        run_ingredient_check(&self.invoker, identity.id(), &ingredients, &members).await
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::domain::{
        family::entities::{FamilyMemberConfig, MemberRole},
        llm::{
            invoker::tests::{ScriptedClient, invoker_with},
            rate_limit::RateLimits,
        },
        recipe_analysis::entities::OverallSafety,
    };

    fn member(name: &str) -> FamilyMember {
        FamilyMember::new(FamilyMemberConfig {
            user_id: Uuid::nil(),
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role: MemberRole::Adult,
            conditions: vec![],
            custom_restrictions: vec![],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_label_scan_uses_image_endpoint_budget() {
        let sam = member("Sam");
        let client = ScriptedClient::replying(
            &json!({
                "product_name": "",
                "extracted_ingredients": ["wheat flour", "sugar"],
                "overall_safety": "safe",
                "concerns": [],
                "safe_for_all": ["Sam"],
                "recommendations": []
            })
            .to_string(),
        );
        let invoker = invoker_with(client.clone(), RateLimits::default());
        let user_id = Uuid::new_v4();

        let result = run_label_scan(
            &invoker,
            user_id,
            ImageInput {
                data: Bytes::from_static(b"\xff\xd8\xff"),
                mime_type: "image/jpeg".to_string(),
            },
            &[&sam],
        )
        .await
        .unwrap();

        assert_eq!(result.product_name, "Unknown Product");
        assert_eq!(result.report.overall_safety, OverallSafety::Safe);

        let usage = invoker.rate_limiter().usage(user_id).await.unwrap();
        let image_usage = usage
            .iter()
            .find(|u| u.endpoint == EndpointClass::AnalyzeImage)
            .unwrap();
        assert_eq!(image_usage.calls, 1);
    }

    #[tokio::test]
    async fn test_empty_image_is_rejected_without_call() {
        let sam = member("Sam");
        let client = ScriptedClient::replying("{}");
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let result = run_label_scan(
            &invoker,
            Uuid::new_v4(),
            ImageInput {
                data: Bytes::new(),
                mime_type: "image/png".to_string(),
            },
            &[&sam],
        )
        .await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_ingredient_check_reports_concerns_for_known_members() {
        let sam = member("Sam");
        let client = ScriptedClient::replying(
            &json!({
                "overall_safety": "caution",
                "concerns": [{
                    "ingredient": "salt",
                    "affected_members": ["sam"],
                    "reason": "High sodium",
                    "severity": "medium"
                }],
                "safe_for_all": [],
                "recommendations": ["Use less salt"]
            })
            .to_string(),
        );
        let invoker = invoker_with(client, RateLimits::default());

        let report = run_ingredient_check(&invoker, Uuid::new_v4(), &["salt".to_string()], &[&sam])
            .await
            .unwrap();

        assert_eq!(report.concerns.len(), 1);
        assert_eq!(report.concerns[0].affected_members, vec!["Sam".to_string()]);
    }
}
