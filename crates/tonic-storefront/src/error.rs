use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response carried a non-empty top-level `errors` list.
    #[error("GraphQL error in {operation}: {}", .messages.join("; "))]
    GraphQl {
        operation: &'static str,
        messages: Vec<String>,
    },

    /// Neither `data` nor `errors` was present in the response.
    #[error("response to {operation} carried no data")]
    MissingData { operation: &'static str },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but violates an invariant of the domain model.
    #[error("decode error for {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("storefront access token is not configured")]
    NotConfigured,

    #[error("invalid storefront endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
