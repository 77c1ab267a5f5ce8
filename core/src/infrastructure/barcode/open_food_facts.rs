use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::domain::{
    barcode::{
        entities::{NutritionInfo, Product},
        ports::ProductCatalog,
    },
    common::{BarcodeConfig, entities::app_errors::CoreError},
};

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    status: i64,
    product: Option<OffProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OffProduct {
    product_name: Option<String>,
    product_name_en: Option<String>,
    brands: Option<String>,
    quantity: Option<String>,
    categories: Option<String>,
    ingredients_text: Option<String>,
    ingredients_text_en: Option<String>,
    ingredients: Vec<OffIngredient>,
    allergens_tags: Vec<String>,
    allergens: Option<String>,
    nutriments: Value,
    nutriscore_grade: Option<String>,
    nova_group: Option<Value>,
    image_front_url: Option<String>,
    image_url: Option<String>,
    image_front_small_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OffIngredient {
    text: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Nutriment values arrive as numbers or numeric strings.
fn number(nutriments: &Value, key: &str) -> Option<f64> {
    match nutriments.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl OffProduct {
    fn into_product(self, barcode: String) -> Product {
        let nutrition = NutritionInfo {
            energy_kcal: number(&self.nutriments, "energy-kcal_100g"),
            fat: number(&self.nutriments, "fat_100g"),
            saturated_fat: number(&self.nutriments, "saturated-fat_100g"),
            carbohydrates: number(&self.nutriments, "carbohydrates_100g"),
            sugars: number(&self.nutriments, "sugars_100g"),
            fiber: number(&self.nutriments, "fiber_100g"),
            proteins: number(&self.nutriments, "proteins_100g"),
            salt: number(&self.nutriments, "salt_100g"),
            sodium: number(&self.nutriments, "sodium_100g"),
        };

        let nova_group = match self.nova_group {
            Some(Value::Number(n)) => n.as_i64().map(|n| n as i32),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        Product {
            barcode,
            name: non_empty(self.product_name)
                .or(non_empty(self.product_name_en))
                .unwrap_or_else(|| "Unknown Product".to_string()),
            brand: non_empty(self.brands).unwrap_or_else(|| "Unknown Brand".to_string()),
            quantity: self.quantity.unwrap_or_default(),
            categories: self
                .categories
                .map(|c| {
                    c.split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            ingredients_text: non_empty(self.ingredients_text)
                .or(non_empty(self.ingredients_text_en))
                .unwrap_or_default(),
            ingredients_list: self
                .ingredients
                .into_iter()
                .filter_map(|i| non_empty(i.text))
                .collect(),
            allergens: self.allergens_tags,
            allergens_text: self.allergens.unwrap_or_default(),
            nutrition,
            nutriscore: non_empty(self.nutriscore_grade),
            nova_group,
            image_url: non_empty(self.image_front_url).or(non_empty(self.image_url)),
            image_small_url: non_empty(self.image_front_small_url),
        }
    }
}

/// Product lookups against the Open Food Facts v2 API.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsCatalog {
    base_url: String,
    client: Client,
}

impl OpenFoodFactsCatalog {
    pub fn new(config: &BarcodeConfig) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mealadapt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl ProductCatalog for OpenFoodFactsCatalog {
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: String) -> Result<Option<Product>, CoreError> {
        let url = format!("{}/{}.json", self.base_url, barcode);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Open Food Facts request failed: {}", e);
            if e.is_timeout() {
                CoreError::Timeout
            } else {
                CoreError::ExternalServiceError(format!("product lookup failed: {}", e))
            }
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                error!("Open Food Facts returned {}", status);
                return Err(CoreError::ExternalServiceError(format!(
                    "product lookup returned {}",
                    status
                )));
            }
            _ => {}
        }

        let body: OffResponse = response.json().await.map_err(|e| {
            error!("Failed to decode Open Food Facts response: {}", e);
            CoreError::ExternalServiceError("unreadable product data".to_string())
        })?;

        if body.status != 1 {
            return Ok(None);
        }

        Ok(body.product.map(|p| p.into_product(barcode)))
    }
}
