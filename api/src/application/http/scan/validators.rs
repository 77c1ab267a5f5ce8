use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const ACCEPTED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/heic"];

/// Normalises a declared content type, returning it only when it is an accepted image type.
pub fn accepted_image_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let essence = if essence == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        essence
    };

    ACCEPTED_IMAGE_TYPES
        .iter()
        .copied()
        .find(|accepted| *accepted == essence)
}

fn validate_ingredients(ingredients: &[String]) -> Result<(), ValidationError> {
    if ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(ValidationError::new("no_ingredients")
            .with_message("at least one non-blank ingredient is required".into()));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnalyzeIngredientsRequest {
    #[validate(
        length(max = 200, message = "at most 200 ingredients can be analysed at once"),
        custom(function = "validate_ingredients")
    )]
    pub ingredients: Vec<String>,
}

/// Multipart form accepted by the label scan endpoint.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct LabelScanForm {
    /// JPEG, PNG, WEBP or HEIC photo of an ingredient label, at most 10 MB.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
