use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{entities::RawModelOutput, payload::parse_document},
    pantry::entities::RecipeSuggestions,
};

pub fn validate_recipe_suggestions(raw: &RawModelOutput) -> Result<RecipeSuggestions, CoreError> {
    let suggestions: RecipeSuggestions = parse_document(raw)?;

    if suggestions.suggestions.is_empty() {
        return Err(CoreError::MalformedResponse(
            "no recipes were suggested".to_string(),
        ));
    }

    if let Some(out_of_range) = suggestions
        .suggestions
        .iter()
        .find(|s| !(1..=5).contains(&s.family_friendly_score))
    {
        return Err(CoreError::MalformedResponse(format!(
            "family_friendly_score {} for {} is outside 1..=5",
            out_of_range.family_friendly_score, out_of_range.name
        )));
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::pantry::entities::Difficulty;

    fn suggestion(score: serde_json::Value, difficulty: &str) -> RawModelOutput {
        RawModelOutput::new(
            json!({
                "suggestions": [{
                    "name": "Fried rice",
                    "description": "Quick weeknight dinner",
                    "difficulty": difficulty,
                    "prep_time": "20 minutes",
                    "matching_ingredients": ["rice", "eggs"],
                    "additional_ingredients": ["scallions"],
                    "safety_notes": "Use low-sodium soy sauce",
                    "family_friendly_score": score
                }],
                "tips": ["Use day-old rice"]
            })
            .to_string(),
        )
    }

    #[test]
    fn test_valid_suggestions() {
        let parsed = validate_recipe_suggestions(&suggestion(json!(4), "easy")).unwrap();

        assert_eq!(parsed.suggestions[0].difficulty, Difficulty::Easy);
        assert_eq!(parsed.tips.len(), 1);
    }

    #[test]
    fn test_score_out_of_range_is_malformed() {
        assert!(matches!(
            validate_recipe_suggestions(&suggestion(json!(9), "easy")),
            Err(CoreError::MalformedResponse(_))
        ));
        assert!(validate_recipe_suggestions(&suggestion(json!(0), "easy")).is_err());
        assert!(validate_recipe_suggestions(&suggestion(json!(-1), "easy")).is_err());
    }

    #[test]
    fn test_unknown_difficulty_is_malformed() {
        assert!(validate_recipe_suggestions(&suggestion(json!(3), "expert")).is_err());
    }
}
