use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Shop domain without scheme, e.g. `"tonic-thought-studios-2.myshopify.com"`.
    pub store_domain: String,
    /// Storefront API access token. `None` disables every commerce operation.
    pub storefront_token: Option<String>,
    pub api_version: String,
    /// File backing the persisted cart id.
    pub session_path: PathBuf,
    pub request_timeout_secs: u64,
    pub products_page_size: u32,
    pub user_agent: String,
}

impl AppConfig {
    /// The single gate for commerce features: `true` iff an access token is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.storefront_token.is_some()
    }

    /// Storefront GraphQL endpoint derived from the domain and API version.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("store_domain", &self.store_domain)
            .field(
                "storefront_token",
                &self.storefront_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .field("session_path", &self.session_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("products_page_size", &self.products_page_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
