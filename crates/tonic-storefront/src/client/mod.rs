//! HTTP client for the Shopify Storefront GraphQL API.

mod cart;
mod catalog;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tonic_core::AppConfig;

use crate::error::StorefrontError;
use crate::types::{GraphQlRequest, GraphQlResponse};

pub use cart::{CartLineInput, CartLineUpdate, CartMutation, UserError};

/// Header carrying the public Storefront access token.
pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for a single store's Storefront GraphQL endpoint.
///
/// Every operation is one `POST` of `{query, variables}`. Non-2xx statuses,
/// top-level GraphQL `errors`, and responses that do not match the requested
/// selection are all surfaced as typed [`StorefrontError`]s. Nothing is
/// retried.
///
/// Use [`StorefrontClient::new`] for a configured store or
/// [`StorefrontClient::with_endpoint`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl StorefrontClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotConfigured`] when no access token is set.
    /// - [`StorefrontError::InvalidEndpoint`] when the derived endpoint is not a URL.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, StorefrontError> {
        let token = config
            .storefront_token
            .as_deref()
            .ok_or(StorefrontError::NotConfigured)?;
        Self::with_endpoint(
            token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.graphql_endpoint(),
        )
    }

    /// Creates a client for an explicit endpoint URL.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotConfigured`] when `token` is blank.
    /// - [`StorefrontError::InvalidEndpoint`] when `endpoint` does not parse.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn with_endpoint(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        endpoint: &str,
    ) -> Result<Self, StorefrontError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StorefrontError::NotConfigured);
        }

        let endpoint = Url::parse(endpoint).map_err(|e| StorefrontError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one GraphQL document and decodes its `data` into `T`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Http`] on network failure.
    /// - [`StorefrontError::UnexpectedStatus`] on any non-2xx status.
    /// - [`StorefrontError::GraphQl`] when the response lists errors.
    /// - [`StorefrontError::MissingData`] when `data` is absent or `null`.
    /// - [`StorefrontError::Deserialize`] when the body or `data` does not
    ///   match the expected shape.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, StorefrontError> {
        tracing::debug!(operation, endpoint = %self.endpoint, "storefront request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope = serde_json::from_str::<GraphQlResponse>(&body).map_err(|e| {
            StorefrontError::Deserialize {
                context: format!("{operation} response envelope"),
                source: e,
            }
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            tracing::warn!(operation, errors = ?messages, "storefront returned GraphQL errors");
            return Err(StorefrontError::GraphQl {
                operation,
                messages,
            });
        }

        let data = envelope
            .data
            .filter(|d| !d.is_null())
            .ok_or(StorefrontError::MissingData { operation })?;

        serde_json::from_value(data).map_err(|e| StorefrontError::Deserialize {
            context: format!("{operation} data"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
