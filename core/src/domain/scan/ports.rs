use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    llm::entities::ImageInput,
    scan::entities::{IngredientSafetyReport, ScanResult},
};

#[cfg_attr(test, mockall::automock)]
pub trait ScanService: Send + Sync {
    fn analyze_label_image(
        &self,
        identity: Identity,
        image: ImageInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;

    fn analyze_ingredients(
        &self,
        identity: Identity,
        ingredients: Vec<String>,
    ) -> impl Future<Output = Result<IngredientSafetyReport, CoreError>> + Send;
}
