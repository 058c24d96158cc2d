pub mod app_config;
pub mod cart;
pub mod category;
pub mod config;
pub mod display;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartCost, CartLine, CartMerchandise};
pub use category::{category_counts, filter_by_category, product_category, Category, CategoryFilter};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{format_money, format_price, is_new_product, is_new_product_at, NEW_PRODUCT_WINDOW_DAYS};
pub use products::{
    Collection, CollectionProducts, Image, Money, PriceRange, Product, ProductOption,
    SelectedOption, Variant,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Three-way result of a remote read, as surfaced to views.
///
/// `NotConfigured` is distinct from `Failed`: it means no access token was
/// supplied and no request was attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotConfigured,
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The error message, when the fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchState<U> {
        match self {
            FetchState::NotConfigured => FetchState::NotConfigured,
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(message) => FetchState::Failed(message),
            FetchState::Ready(value) => FetchState::Ready(f(value)),
        }
    }
}
