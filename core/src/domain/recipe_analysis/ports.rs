use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    recipe_analysis::{entities::RecipeAnalysis, value_objects::AnalyzeRecipeInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeAnalysisService: Send + Sync {
    fn analyze_recipe(
        &self,
        identity: Identity,
        input: AnalyzeRecipeInput,
    ) -> impl Future<Output = Result<RecipeAnalysis, CoreError>> + Send;
}
