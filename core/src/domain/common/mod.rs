use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct MealAdaptConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub barcode: BarcodeConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl_hours: i64,
    pub refresh_token_ttl_days: i64,
}

/// Daily budgets per AI endpoint class, counted over a rolling window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub analyze_recipe: u32,
    pub analyze_image: u32,
    pub suggest_recipes: u32,
    pub extract_ingredients: u32,
    pub analyze_ingredients: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 24 * 60 * 60,
            analyze_recipe: 50,
            analyze_image: 30,
            suggest_recipes: 20,
            extract_ingredients: 30,
            analyze_ingredients: 40,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BarcodeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_hours: i64,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
