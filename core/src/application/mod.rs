use tracing::info;

use crate::{
    domain::{
        common::{MealAdaptConfig, services::Service},
        llm::{invoker::ModelInvoker, rate_limit::RateLimits},
    },
    infrastructure::{
        barcode::{
            cached_catalog::CachedProductCatalog, open_food_facts::OpenFoodFactsCatalog,
            repositories::product_cache_repository::PostgresProductCache,
        },
        crypto::argon2_hasher::Argon2HasherRepository,
        db::postgres::{Postgres, PostgresConfig},
        family::repositories::family_member_repository::PostgresFamilyMemberRepository,
        health::repositories::health_check_repository::PostgresHealthCheckRepository,
        jwt::{
            hs256_codec::Hs256TokenCodec,
            repositories::refresh_token_repository::PostgresRefreshTokenRepository,
        },
        llm::gemini_client::GeminiLLMClient,
        meal_plan::repositories::meal_plan_repository::PostgresMealPlanRepository,
        pantry::repositories::pantry_repository::PostgresPantryRepository,
        rate_limit::InMemoryRateLimiter,
        saved_recipe::repositories::saved_recipe_repository::PostgresSavedRecipeRepository,
        shopping::repositories::shopping_list_repository::PostgresShoppingListRepository,
        user::repositories::user_repository::PostgresUserRepository,
    },
};

pub type MealAdaptService = Service<
    PostgresUserRepository,
    PostgresRefreshTokenRepository,
    Argon2HasherRepository,
    Hs256TokenCodec,
    PostgresFamilyMemberRepository,
    PostgresSavedRecipeRepository,
    PostgresShoppingListRepository,
    PostgresMealPlanRepository,
    PostgresPantryRepository,
    CachedProductCatalog<OpenFoodFactsCatalog, PostgresProductCache>,
    PostgresHealthCheckRepository,
    GeminiLLMClient,
    InMemoryRateLimiter,
>;

pub async fn create_service(config: MealAdaptConfig) -> Result<MealAdaptService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    let db = postgres.get_db();

    let invoker = ModelInvoker::from_config(
        GeminiLLMClient::new(config.llm.gemini_api_key.clone(), config.llm.gemini_model.clone()),
        InMemoryRateLimiter::new(RateLimits::new(config.rate_limit.clone())),
        &config.llm,
    );
    info!(model = %config.llm.gemini_model, "Model invoker ready");

    Ok(Service::new(
        PostgresUserRepository::new(db.clone()),
        PostgresRefreshTokenRepository::new(db.clone()),
        Argon2HasherRepository::new(),
        Hs256TokenCodec::new(&config.auth.jwt_secret),
        PostgresFamilyMemberRepository::new(db.clone()),
        PostgresSavedRecipeRepository::new(db.clone()),
        PostgresShoppingListRepository::new(db.clone()),
        PostgresMealPlanRepository::new(db.clone()),
        PostgresPantryRepository::new(db.clone()),
        CachedProductCatalog::new(
            OpenFoodFactsCatalog::new(&config.barcode)?,
            PostgresProductCache::new(db.clone()),
            config.barcode.cache_ttl_hours,
        ),
        PostgresHealthCheckRepository::new(db),
        invoker,
        config.auth,
    ))
}
