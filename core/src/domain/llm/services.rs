use tracing::instrument;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::ports::FamilyMemberRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::{
        ports::{LLMClient, RateLimiter, UsageService},
        rate_limit::EndpointUsage,
    },
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> UsageService
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
    async fn get_usage(&self, identity: Identity) -> Result<Vec<EndpointUsage>, CoreError> {
        self.invoker.rate_limiter().usage(identity.id()).await
    }
}
