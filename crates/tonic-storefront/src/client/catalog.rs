//! Catalog read operations for `StorefrontClient`.

use serde_json::json;
use tonic_core::{Collection, CollectionProducts, Product};

use crate::error::StorefrontError;
use crate::normalize::{
    normalize_collection, normalize_collection_products, normalize_product, normalize_products,
};
use crate::queries::{
    GET_ALL_COLLECTIONS, GET_ALL_PRODUCTS, GET_PRODUCTS_BY_COLLECTION, GET_PRODUCT_BY_HANDLE,
};
use crate::types::{CollectionData, CollectionsData, ProductData, ProductsData};

use super::StorefrontClient;

impl StorefrontClient {
    /// Fetches the first `first` products of the catalog. No further pages
    /// are requested.
    ///
    /// # Errors
    ///
    /// Propagates request errors from the client and
    /// [`StorefrontError::Decode`] for products that fail normalization.
    pub async fn list_products(&self, first: u32) -> Result<Vec<Product>, StorefrontError> {
        let data: ProductsData = self
            .execute("GetAllProducts", GET_ALL_PRODUCTS, json!({ "first": first }))
            .await?;
        normalize_products(data.products.into_nodes())
    }

    /// Fetches one product by handle. `Ok(None)` when no product has that handle.
    ///
    /// # Errors
    ///
    /// Propagates request errors from the client and
    /// [`StorefrontError::Decode`] if the product fails normalization.
    pub async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, StorefrontError> {
        let data: ProductData = self
            .execute(
                "GetProductByHandle",
                GET_PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
            )
            .await?;
        data.product.map(normalize_product).transpose()
    }

    /// Fetches a collection and the first `first` of its products.
    /// `Ok(None)` when no collection has that handle.
    ///
    /// # Errors
    ///
    /// Propagates request errors from the client and
    /// [`StorefrontError::Decode`] for products that fail normalization.
    pub async fn collection_products(
        &self,
        handle: &str,
        first: u32,
    ) -> Result<Option<CollectionProducts>, StorefrontError> {
        let data: CollectionData = self
            .execute(
                "GetProductsByCollection",
                GET_PRODUCTS_BY_COLLECTION,
                json!({ "handle": handle, "first": first }),
            )
            .await?;
        data.collection.map(normalize_collection_products).transpose()
    }

    /// Fetches the first `first` collections.
    ///
    /// # Errors
    ///
    /// Propagates request errors from the client.
    pub async fn list_collections(&self, first: u32) -> Result<Vec<Collection>, StorefrontError> {
        let data: CollectionsData = self
            .execute(
                "GetAllCollections",
                GET_ALL_COLLECTIONS,
                json!({ "first": first }),
            )
            .await?;
        Ok(data
            .collections
            .into_nodes()
            .into_iter()
            .map(normalize_collection)
            .collect())
    }
}
