use crate::domain::{
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::ports::FamilyMemberRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::ports::{LLMClient, RateLimiter},
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> HealthCheckService
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
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }
}
