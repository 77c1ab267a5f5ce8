use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::{ports::FamilyMemberRepository, services::load_profile},
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
    prompt::builder::{build_recipe_analysis_prompt, select_members},
    recipe_analysis::{
        entities::{RecipeAnalysis, RecipeAnalysisRequest},
        ports::RecipeAnalysisService,
        validator::validate_recipe_analysis,
        value_objects::AnalyzeRecipeInput,
    },
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

/// Prompt, invoke, validate. Request validation happens before any budget is
/// consumed or any call is made.
pub async fn run_recipe_analysis<L, RL>(
    invoker: &ModelInvoker<L, RL>,
    user_id: Uuid,
    request: &RecipeAnalysisRequest,
) -> Result<RecipeAnalysis, CoreError>
where
    L: LLMClient,
    RL: RateLimiter,
{
    let members = select_members(&request.profile, request.member_ids.as_deref())?;
    let prompt = build_recipe_analysis_prompt(&request.recipe_text, &members)?;

    let raw = invoker
        .invoke(user_id, EndpointClass::AnalyzeRecipe, &ModelRequest::text(prompt))
        .await?;

    validate_recipe_analysis(&raw, &members)
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> RecipeAnalysisService
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
    async fn analyze_recipe(
        &self,
        identity: Identity,
        input: AnalyzeRecipeInput,
    ) -> Result<RecipeAnalysis, CoreError> {
        let profile = load_profile(&self.family_member_repository, identity.id()).await?;

        let request = RecipeAnalysisRequest {
            recipe_text: input.recipe_text,
            profile,
            member_ids: input.member_ids,
        };

        let analysis = run_recipe_analysis(&self.invoker, identity.id(), &request).await?;
        info!(
            dish = %analysis.dish_name,
            verdicts = analysis.member_verdicts.len(),
            "Recipe analysed"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::RateLimitConfig,
        family::entities::{
            ConditionType, FamilyMember, FamilyMemberConfig, FamilyProfile, HealthCondition,
            MemberRole,
        },
        llm::{
            invoker::tests::{ScriptedClient, invoker_with},
            rate_limit::RateLimits,
        },
        recipe_analysis::entities::Verdict,
    };

    fn member(name: &str, role: MemberRole, conditions: Vec<ConditionType>) -> FamilyMember {
        FamilyMember::new(FamilyMemberConfig {
            user_id: Uuid::nil(),
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role,
            conditions: conditions
                .into_iter()
                .map(|condition_type| HealthCondition {
                    condition_type,
                    enabled: true,
                    notes: None,
                })
                .collect(),
            custom_restrictions: vec![],
        })
        .unwrap()
    }

    fn request(recipe_text: &str, members: Vec<FamilyMember>) -> RecipeAnalysisRequest {
        RecipeAnalysisRequest {
            recipe_text: recipe_text.to_string(),
            profile: FamilyProfile::new(members),
            member_ids: None,
        }
    }

    #[tokio::test]
    async fn test_single_adult_plain_rice_is_safe() {
        let adult = member("Alex", MemberRole::Adult, vec![]);
        let client = ScriptedClient::replying(
            &json!({
                "dish_name": "Plain rice",
                "base_description": "Steamed white rice",
                "overall_safety": "safe",
                "member_verdicts": [{
                    "member_id": adult.id.to_string(),
                    "member_name": "Alex",
                    "verdict": "safe",
                    "reasons": ["No restrictions apply"],
                    "concerns": []
                }]
            })
            .to_string(),
        );
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let analysis = run_recipe_analysis(&invoker, Uuid::new_v4(), &request("plain rice", vec![adult.clone()]))
            .await
            .unwrap();

        assert_eq!(analysis.member_verdicts.len(), 1);
        assert_eq!(analysis.member_verdicts[0].member_id, adult.id);
        assert_eq!(analysis.member_verdicts[0].verdict, Verdict::Safe);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_peanut_allergy_gets_flagged() {
        let kid = member("Mia", MemberRole::Child, vec![ConditionType::PeanutAllergy]);
        let client = ScriptedClient::replying(
            &json!({
                "dish_name": "Peanut butter sandwich",
                "base_description": "Bread with peanut butter",
                "overall_safety": "unsafe",
                "member_verdicts": [{
                    "member_id": kid.id.to_string(),
                    "member_name": "Mia",
                    "verdict": "not_recommended",
                    "reasons": ["Contains peanuts"],
                    "concerns": ["peanut butter"]
                }]
            })
            .to_string(),
        );
        let invoker = invoker_with(client, RateLimits::default());

        let analysis = run_recipe_analysis(&invoker, Uuid::new_v4(), &request("peanut butter", vec![kid]))
            .await
            .unwrap();

        let verdict = &analysis.member_verdicts[0];
        assert_ne!(verdict.verdict, Verdict::Safe);
        assert!(!verdict.concerns.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_output_is_malformed() {
        let adult = member("Alex", MemberRole::Adult, vec![]);
        let client = ScriptedClient::replying("{\"dish_name\": \"Rice\", \"member_verdicts\": [{\"member_id\"");
        let invoker = invoker_with(client, RateLimits::default());

        let result = run_recipe_analysis(&invoker, Uuid::new_v4(), &request("rice", vec![adult])).await;

        assert!(matches!(result, Err(CoreError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_verdict_for_stranger_is_incomplete() {
        let adult = member("Alex", MemberRole::Adult, vec![]);
        let client = ScriptedClient::replying(
            &json!({
                "dish_name": "Rice",
                "base_description": "Rice",
                "overall_safety": "safe",
                "member_verdicts": [
                    {
                        "member_id": adult.id.to_string(),
                        "member_name": "Alex",
                        "verdict": "safe",
                        "reasons": [],
                        "concerns": []
                    },
                    {
                        "member_id": Uuid::new_v4().to_string(),
                        "member_name": "Stranger",
                        "verdict": "safe",
                        "reasons": [],
                        "concerns": []
                    }
                ]
            })
            .to_string(),
        );
        let invoker = invoker_with(client, RateLimits::default());

        let result = run_recipe_analysis(&invoker, Uuid::new_v4(), &request("rice", vec![adult])).await;

        assert!(matches!(result, Err(CoreError::IncompleteVerdict(_))));
    }

    #[tokio::test]
    async fn test_fifth_call_over_limit_is_rate_limited_without_outbound_call() {
        let adult = member("Alex", MemberRole::Adult, vec![]);
        let body = json!({
            "dish_name": "Rice",
            "base_description": "Rice",
            "overall_safety": "safe",
            "member_verdicts": [{
                "member_id": adult.id.to_string(),
                "member_name": "Alex",
                "verdict": "safe",
                "reasons": [],
                "concerns": []
            }]
        })
        .to_string();
        let client = ScriptedClient::new(vec![Ok(body); 5]);
        let limits = RateLimits::new(RateLimitConfig {
            analyze_recipe: 4,
            ..RateLimitConfig::default()
        });
        let invoker = invoker_with(client.clone(), limits);
        let user_id = Uuid::new_v4();
        let request = request("rice", vec![adult]);

        for _ in 0..4 {
            run_recipe_analysis(&invoker, user_id, &request).await.unwrap();
        }
        let fifth = run_recipe_analysis(&invoker, user_id, &request).await;

        assert!(matches!(fifth, Err(CoreError::RateLimited { .. })));
        assert_eq!(client.calls(), 4);
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_call() {
        let adult = member("Alex", MemberRole::Adult, vec![]);
        let client = ScriptedClient::replying("{}");
        let invoker = invoker_with(client.clone(), RateLimits::default());
        let mut request = request("rice", vec![adult]);
        request.member_ids = Some(vec![Uuid::new_v4()]);

        let result = run_recipe_analysis(&invoker, Uuid::new_v4(), &request).await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_member_subset_is_analysed() {
        let mom = member("Mom", MemberRole::Adult, vec![]);
        let baby = member("Leo", MemberRole::Baby, vec![]);
        let client = ScriptedClient::replying(
            &json!({
                "dish_name": "Honey toast",
                "base_description": "Toast with honey",
                "overall_safety": "unsafe",
                "member_verdicts": [{
                    "member_id": baby.id.to_string(),
                    "member_name": "Leo",
                    "verdict": "not_recommended",
                    "reasons": ["Honey is unsafe under 12 months"],
                    "concerns": ["honey"]
                }]
            })
            .to_string(),
        );
        let invoker = invoker_with(client, RateLimits::default());
        let mut request = request("honey toast", vec![mom, baby.clone()]);
        request.member_ids = Some(vec![baby.id]);

        let analysis = run_recipe_analysis(&invoker, Uuid::new_v4(), &request).await.unwrap();

        assert_eq!(analysis.member_verdicts.len(), 1);
        assert_eq!(analysis.member_verdicts[0].member_id, baby.id);
    }
}
