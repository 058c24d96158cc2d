//! Wire types for Storefront API GraphQL responses.
//!
//! These mirror the selections in [`crate::queries`] field for field. Every
//! field the selection requests is required unless the schema marks it
//! nullable, so a response that drifts from the expected shape fails to
//! deserialize instead of producing half-filled records.
//!
//! ### Money
//! `amount` arrives as a decimal string (`"45.0"`), never a JSON number.
//!
//! ### Connections
//! List fields use the relay `edges { node }` shape; [`Connection::into_nodes`]
//! flattens them.
//!
//! ### `compareAtPriceRange`
//! Reported as `"0.0"` when no variant has a comparison price, not `null`.
//!
//! ### Cart merchandise
//! Selected through `... on ProductVariant`. Other merchandise types would
//! arrive as an empty object and are rejected at deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body sent to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Top-level response envelope. `data` stays untyped until `errors` has been
/// checked so that error responses with an unexpected `data` shape still
/// surface their messages.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorNode>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorNode {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOptionNode {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductOptionNode {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeNode {
    pub min_variant_price: MoneyNode,
    pub max_variant_price: MoneyNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareAtPriceRangeNode {
    pub min_variant_price: MoneyNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: MoneyNode,
    #[serde(default)]
    pub compare_at_price: Option<MoneyNode>,
    pub selected_options: Vec<SelectedOptionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub product_type: String,
    pub created_at: DateTime<Utc>,
    pub price_range: PriceRangeNode,
    pub compare_at_price_range: CompareAtPriceRangeNode,
    #[serde(default)]
    pub featured_image: Option<ImageNode>,
    pub images: Connection<ImageNode>,
    pub variants: Connection<VariantNode>,
    pub options: Vec<ProductOptionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<ImageNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionWithProductsNode {
    #[serde(flatten)]
    pub collection: CollectionNode,
    pub products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartNode {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: u32,
    pub cost: CartCostNode,
    pub lines: Connection<CartLineNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostNode {
    pub subtotal_amount: MoneyNode,
    pub total_amount: MoneyNode,
}

#[derive(Debug, Deserialize)]
pub struct CartLineNode {
    pub id: String,
    pub quantity: u32,
    pub merchandise: MerchandiseNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseNode {
    pub id: String,
    pub title: String,
    pub price: MoneyNode,
    pub product: MerchandiseProductNode,
    pub selected_options: Vec<SelectedOptionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProductNode {
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub featured_image: Option<ImageNode>,
}

#[derive(Debug, Deserialize)]
pub struct UserErrorNode {
    /// Path to the offending input field; `null` for cart-level errors.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Shared payload shape of every cart mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayloadNode {
    #[serde(default)]
    pub cart: Option<CartNode>,
    pub user_errors: Vec<UserErrorNode>,
}

// ---------------------------------------------------------------------------
// `data` shapes, one per document
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionData {
    #[serde(default)]
    pub collection: Option<CollectionWithProductsNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsData {
    pub collections: Connection<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CartData {
    #[serde(default)]
    pub cart: Option<CartNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: CartPayloadNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: CartPayloadNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: CartPayloadNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: CartPayloadNode,
}
