use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{common::entities::app_errors::CoreError, scan::entities::IngredientSafetyReport};

/// Per-100g nutrition facts; absent values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionInfo {
    pub energy_kcal: Option<f64>,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugars: Option<f64>,
    pub fiber: Option<f64>,
    pub proteins: Option<f64>,
    pub salt: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub quantity: String,
    pub categories: Vec<String>,
    pub ingredients_text: String,
    pub ingredients_list: Vec<String>,
    pub allergens: Vec<String>,
    pub allergens_text: String,
    pub nutrition: NutritionInfo,
    pub nutriscore: Option<String>,
    pub nova_group: Option<i32>,
    pub image_url: Option<String>,
    pub image_small_url: Option<String>,
}

impl Product {
    /// Ingredients to analyse: the structured list when present, otherwise the
    /// comma-separated ingredients text.
    pub fn analysable_ingredients(&self) -> Vec<String> {
        let from_list: Vec<String> = self
            .ingredients_list
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if !from_list.is_empty() {
            return from_list;
        }

        self.ingredients_text
            .split(',')
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect()
    }
}

/// A product with its safety report. `report` is `None` when the product
/// carries no ingredient information; `note` then says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductAnalysis {
    pub product: Product,
    pub report: Option<IngredientSafetyReport>,
    pub note: Option<String>,
}

/// Accepts EAN-8, UPC-A, EAN-13 and GTIN-14 style codes.
pub fn validate_barcode(barcode: &str) -> Result<String, CoreError> {
    let barcode = barcode.trim();
    if !(8..=14).contains(&barcode.len()) || !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::ValidationError(format!(
            "invalid barcode {}: expected 8 to 14 digits",
            barcode
        )));
    }
    Ok(barcode.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(list: Vec<&str>, text: &str) -> Product {
        Product {
            barcode: "3017620422003".to_string(),
            name: "Spread".to_string(),
            brand: "Brand".to_string(),
            quantity: "400 g".to_string(),
            categories: vec![],
            ingredients_text: text.to_string(),
            ingredients_list: list.into_iter().map(String::from).collect(),
            allergens: vec![],
            allergens_text: String::new(),
            nutrition: NutritionInfo::default(),
            nutriscore: None,
            nova_group: None,
            image_url: None,
            image_small_url: None,
        }
    }

    #[test]
    fn test_barcode_validation() {
        assert_eq!(validate_barcode(" 3017620422003 ").unwrap(), "3017620422003");
        assert!(validate_barcode("1234567").is_err());
        assert!(validate_barcode("123456789012345").is_err());
        assert!(validate_barcode("30176204x2003").is_err());
    }

    #[test]
    fn test_ingredients_fall_back_to_text() {
        assert_eq!(
            product(vec!["sugar", " "], "").analysable_ingredients(),
            vec!["sugar".to_string()]
        );
        assert_eq!(
            product(vec![], "sugar, palm oil, ,hazelnuts").analysable_ingredients(),
            vec!["sugar", "palm oil", "hazelnuts"]
        );
        assert!(product(vec![], "  ").analysable_ingredients().is_empty());
    }
}
