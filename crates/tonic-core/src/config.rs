use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_STORE_DOMAIN: &str = "tonic-thought-studios-2.myshopify.com";
const DEFAULT_API_VERSION: &str = "2024-01";

/// Shopify caps `first:` arguments at 250.
const MAX_PAGE_SIZE: u32 = 250;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
/// No variable is required: a missing storefront token is a supported mode in
/// which commerce features are disabled.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("TONIC_ENV", "development"));
    let log_level = or_default("TONIC_LOG_LEVEL", "info");

    let store_domain = normalize_domain(&or_default("SHOPIFY_STORE_DOMAIN", DEFAULT_STORE_DOMAIN));
    if store_domain.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPIFY_STORE_DOMAIN".to_string(),
            reason: "domain must not be empty".to_string(),
        });
    }

    // An empty token is the same as no token.
    let storefront_token = lookup("SHOPIFY_STOREFRONT_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let api_version = or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
    let session_path = PathBuf::from(or_default("TONIC_SESSION_PATH", "./.tonic/session.json"));
    let request_timeout_secs = parse_u64("TONIC_REQUEST_TIMEOUT_SECS", "30")?;

    let products_page_size = parse_u32("TONIC_PRODUCTS_PAGE_SIZE", "50")?;
    if products_page_size == 0 || products_page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "TONIC_PRODUCTS_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {products_page_size}"),
        });
    }

    let user_agent = or_default("TONIC_USER_AGENT", "tonic-storefront/0.1");

    Ok(AppConfig {
        env,
        log_level,
        store_domain,
        storefront_token,
        api_version,
        session_path,
        request_timeout_secs,
        products_page_size,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Strips an accidental scheme and trailing slash from a configured domain.
fn normalize_domain(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}
