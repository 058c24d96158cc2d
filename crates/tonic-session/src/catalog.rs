//! Catalog reads surfaced as [`FetchState`] for views.
//!
//! Failures are logged and folded into `FetchState::Failed`; nothing here
//! returns an error to the caller.

use std::future::Future;

use tokio::sync::watch;
use tonic_core::{Collection, CollectionProducts, FetchState, Product};
use tonic_storefront::StorefrontClient;
use tracing::{debug, error};

/// Message shown when a product handle resolves to nothing.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
/// Message shown when a collection handle resolves to nothing.
pub const COLLECTION_NOT_FOUND: &str = "Collection not found";

pub async fn load_products(
    client: Option<&StorefrontClient>,
    first: u32,
) -> FetchState<Vec<Product>> {
    let Some(client) = client else {
        return FetchState::NotConfigured;
    };
    match client.list_products(first).await {
        Ok(products) => {
            debug!(count = products.len(), "loaded products");
            FetchState::Ready(products)
        }
        Err(e) => {
            error!(error = %e, "failed to load products");
            FetchState::Failed(e.to_string())
        }
    }
}

pub async fn load_product(
    client: Option<&StorefrontClient>,
    handle: &str,
) -> FetchState<Product> {
    let Some(client) = client else {
        return FetchState::NotConfigured;
    };
    match client.product_by_handle(handle).await {
        Ok(Some(product)) => FetchState::Ready(product),
        Ok(None) => {
            debug!(handle, "product not found");
            FetchState::Failed(PRODUCT_NOT_FOUND.to_string())
        }
        Err(e) => {
            error!(handle, error = %e, "failed to load product");
            FetchState::Failed(e.to_string())
        }
    }
}

pub async fn load_collection(
    client: Option<&StorefrontClient>,
    handle: &str,
    first: u32,
) -> FetchState<CollectionProducts> {
    let Some(client) = client else {
        return FetchState::NotConfigured;
    };
    match client.collection_products(handle, first).await {
        Ok(Some(collection)) => FetchState::Ready(collection),
        Ok(None) => {
            debug!(handle, "collection not found");
            FetchState::Failed(COLLECTION_NOT_FOUND.to_string())
        }
        Err(e) => {
            error!(handle, error = %e, "failed to load collection");
            FetchState::Failed(e.to_string())
        }
    }
}

pub async fn load_collections(
    client: Option<&StorefrontClient>,
    first: u32,
) -> FetchState<Vec<Collection>> {
    let Some(client) = client else {
        return FetchState::NotConfigured;
    };
    match client.list_collections(first).await {
        Ok(collections) => FetchState::Ready(collections),
        Err(e) => {
            error!(error = %e, "failed to load collections");
            FetchState::Failed(e.to_string())
        }
    }
}

/// Publishes `Loading` on `tx`, then the result of `load`.
pub async fn load_into<T, F>(tx: &watch::Sender<FetchState<T>>, load: F)
where
    F: Future<Output = FetchState<T>>,
{
    tx.send_replace(FetchState::Loading);
    let state = load.await;
    tx.send_replace(state);
}
