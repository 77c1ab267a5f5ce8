use utoipa::OpenApi;

use crate::application::http::{
    authentication::router::AuthenticationApiDoc, barcode::router::BarcodeApiDoc,
    family::router::FamilyApiDoc, health::handlers::health_check::__path_health_check,
    meal_plan::router::MealPlanApiDoc,
    pantry::router::PantryApiDoc, rate_limit::router::RateLimitApiDoc,
    recipe::router::RecipeApiDoc, saved_recipe::router::SavedRecipeApiDoc,
    scan::router::ScanApiDoc, shopping::router::ShoppingApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MealAdapt API",
        description = "Family-aware recipe and food label safety analysis"
    ),
    paths(health_check),
    nest(
        (path = "/api/auth", api = AuthenticationApiDoc),
        (path = "/api/family", api = FamilyApiDoc),
        (path = "/api/recipe", api = RecipeApiDoc),
        (path = "/api/scan", api = ScanApiDoc),
        (path = "/api/pantry", api = PantryApiDoc),
        (path = "/api/recipes/saved", api = SavedRecipeApiDoc),
        (path = "/api/shopping", api = ShoppingApiDoc),
        (path = "/api/meal-plans", api = MealPlanApiDoc),
        (path = "/api/barcode", api = BarcodeApiDoc),
        (path = "/api/rate-limits", api = RateLimitApiDoc),
    )
)]
pub struct ApiDoc;
