use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{entities::RawModelOutput, payload::parse_document},
    shopping::entities::ExtractedIngredient,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtractionDocument {
    ingredients: Vec<ExtractedIngredient>,
}

/// Parses an ingredient extraction. An empty extraction is rejected rather
/// than turned into an empty shopping list.
pub fn validate_extracted_ingredients(
    raw: &RawModelOutput,
) -> Result<Vec<ExtractedIngredient>, CoreError> {
    let document: ExtractionDocument = parse_document(raw)?;

    if document.ingredients.is_empty() {
        return Err(CoreError::MalformedResponse(
            "no ingredients were extracted".to_string(),
        ));
    }

    if document
        .ingredients
        .iter()
        .any(|i| i.ingredient.trim().is_empty())
    {
        return Err(CoreError::MalformedResponse(
            "extracted ingredient without a name".to_string(),
        ));
    }

    Ok(document.ingredients)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::shopping::entities::GroceryCategory;

    #[test]
    fn test_valid_extraction() {
        let raw = RawModelOutput::new(
            json!({
                "ingredients": [
                    { "ingredient": "eggs", "quantity": "6", "category": "dairy" },
                    { "ingredient": "spinach", "quantity": "200g", "category": "produce" }
                ]
            })
            .to_string(),
        );

        let ingredients = validate_extracted_ingredients(&raw).unwrap();

        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[1].category, GroceryCategory::Produce);
    }

    #[test]
    fn test_unknown_category_is_malformed() {
        let raw = RawModelOutput::new(
            json!({
                "ingredients": [{ "ingredient": "tofu", "quantity": "1", "category": "deli" }]
            })
            .to_string(),
        );

        assert!(matches!(
            validate_extracted_ingredients(&raw),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_extraction_is_malformed() {
        let raw = RawModelOutput::new("{\"ingredients\": []}");

        assert!(validate_extracted_ingredients(&raw).is_err());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(GroceryCategory::parse(" Frozen "), Some(GroceryCategory::Frozen));
        assert_eq!(GroceryCategory::parse("snacks"), None);
    }
}
