use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::RateLimitConfig;

/// AI operations that are budgeted separately per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EndpointClass {
    AnalyzeRecipe,
    AnalyzeImage,
    SuggestRecipes,
    ExtractIngredients,
    AnalyzeIngredients,
}

impl EndpointClass {
    pub const ALL: [EndpointClass; 5] = [
        EndpointClass::AnalyzeRecipe,
        EndpointClass::AnalyzeImage,
        EndpointClass::SuggestRecipes,
        EndpointClass::ExtractIngredients,
        EndpointClass::AnalyzeIngredients,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointClass::AnalyzeRecipe => "analyze_recipe",
            EndpointClass::AnalyzeImage => "analyze_image",
            EndpointClass::SuggestRecipes => "suggest_recipes",
            EndpointClass::ExtractIngredients => "extract_ingredients",
            EndpointClass::AnalyzeIngredients => "analyze_ingredients",
        }
    }
}

impl fmt::Display for EndpointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimits {
    pub window_secs: u64,
    config: RateLimitConfig,
}

impl RateLimits {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            window_secs: config.window_secs,
            config,
        }
    }

    pub fn limit_for(&self, class: EndpointClass) -> u32 {
        match class {
            EndpointClass::AnalyzeRecipe => self.config.analyze_recipe,
            EndpointClass::AnalyzeImage => self.config.analyze_image,
            EndpointClass::SuggestRecipes => self.config.suggest_recipes,
            EndpointClass::ExtractIngredients => self.config.extract_ingredients,
            EndpointClass::AnalyzeIngredients => self.config.analyze_ingredients,
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointUsage {
    pub endpoint: EndpointClass,
    pub calls: u32,
    pub limit: u32,
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_per_class() {
        let limits = RateLimits::default();

        assert_eq!(limits.window_secs, 86_400);
        assert_eq!(limits.limit_for(EndpointClass::AnalyzeRecipe), 50);
        assert_eq!(limits.limit_for(EndpointClass::AnalyzeImage), 30);
        assert_eq!(limits.limit_for(EndpointClass::SuggestRecipes), 20);
        assert_eq!(limits.limit_for(EndpointClass::ExtractIngredients), 30);
        assert_eq!(limits.limit_for(EndpointClass::AnalyzeIngredients), 40);
    }

    #[test]
    fn test_endpoint_class_wire_names() {
        let json = serde_json::to_string(&EndpointClass::SuggestRecipes).unwrap();
        assert_eq!(json, "\"suggest_recipes\"");
        assert_eq!(EndpointClass::AnalyzeImage.to_string(), "analyze_image");
    }
}
