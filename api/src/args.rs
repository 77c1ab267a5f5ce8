use clap::{Args as ClapArgs, Parser};
use mealadapt_core::domain::common::{
    AuthConfig, BarcodeConfig, DatabaseConfig, LLMConfig, MealAdaptConfig, RateLimitConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "mealadapt", version, about = "MealAdapt API server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub rate_limit: RateLimitArgs,

    #[command(flatten)]
    pub barcode: BarcodeArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(id = "server-host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server-port", long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/mealadapt`. Empty serves from `/`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(id = "database-host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database-port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "mealadapt")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "mealadapt")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "mealadapt")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// Per-attempt timeout in seconds.
    #[arg(id = "llm-timeout-secs", long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long = "llm-max-retries", env = "LLM_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    #[arg(long = "llm-backoff-base-ms", env = "LLM_BACKOFF_BASE_MS", default_value_t = 1000)]
    pub backoff_base_ms: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AuthArgs {
    #[arg(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    #[arg(long = "access-token-ttl-hours", env = "ACCESS_TOKEN_TTL_HOURS", default_value_t = 24)]
    pub access_token_ttl_hours: i64,

    #[arg(long = "refresh-token-ttl-days", env = "REFRESH_TOKEN_TTL_DAYS", default_value_t = 7)]
    pub refresh_token_ttl_days: i64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct RateLimitArgs {
    #[arg(long = "rate-limit-window-secs", env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 86_400)]
    pub window_secs: u64,

    #[arg(long = "limit-analyze-recipe", env = "LIMIT_ANALYZE_RECIPE", default_value_t = 50)]
    pub analyze_recipe: u32,

    #[arg(long = "limit-analyze-image", env = "LIMIT_ANALYZE_IMAGE", default_value_t = 30)]
    pub analyze_image: u32,

    #[arg(long = "limit-suggest-recipes", env = "LIMIT_SUGGEST_RECIPES", default_value_t = 20)]
    pub suggest_recipes: u32,

    #[arg(
        long = "limit-extract-ingredients",
        env = "LIMIT_EXTRACT_INGREDIENTS",
        default_value_t = 30
    )]
    pub extract_ingredients: u32,

    #[arg(
        long = "limit-analyze-ingredients",
        env = "LIMIT_ANALYZE_INGREDIENTS",
        default_value_t = 40
    )]
    pub analyze_ingredients: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BarcodeArgs {
    #[arg(
        long = "open-food-facts-url",
        env = "OPEN_FOOD_FACTS_URL",
        default_value = "https://world.openfoodfacts.org/api/v2/product"
    )]
    pub base_url: String,

    #[arg(id = "open-food-facts-timeout-secs", long = "open-food-facts-timeout-secs", env = "OPEN_FOOD_FACTS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Age after which a cached product is fetched again.
    #[arg(long = "barcode-cache-ttl-hours", env = "BARCODE_CACHE_TTL_HOURS", default_value_t = 168)]
    pub cache_ttl_hours: i64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// `tracing_subscriber::EnvFilter` directive.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for MealAdaptConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                timeout_secs: args.llm.timeout_secs,
                max_retries: args.llm.max_retries,
                backoff_base_ms: args.llm.backoff_base_ms,
            },
            auth: AuthConfig {
                jwt_secret: args.auth.jwt_secret,
                access_token_ttl_hours: args.auth.access_token_ttl_hours,
                refresh_token_ttl_days: args.auth.refresh_token_ttl_days,
            },
            rate_limit: RateLimitConfig {
                window_secs: args.rate_limit.window_secs,
                analyze_recipe: args.rate_limit.analyze_recipe,
                analyze_image: args.rate_limit.analyze_image,
                suggest_recipes: args.rate_limit.suggest_recipes,
                extract_ingredients: args.rate_limit.extract_ingredients,
                analyze_ingredients: args.rate_limit.analyze_ingredients,
            },
            barcode: BarcodeConfig {
                base_url: args.barcode.base_url,
                timeout_secs: args.barcode.timeout_secs,
                cache_ttl_hours: args.barcode.cache_ttl_hours,
            },
        }
    }
}
