//! Cart query and mutation operations for `StorefrontClient`.
//!
//! Mutations hand back the server's cart snapshot together with its
//! `userErrors`; deciding what a non-empty error list means is left to the
//! caller.

use serde::Serialize;
use serde_json::json;
use tonic_core::Cart;

use crate::error::StorefrontError;
use crate::normalize::normalize_cart;
use crate::queries::{ADD_TO_CART, CREATE_CART, GET_CART, REMOVE_FROM_CART, UPDATE_CART_LINE};
use crate::types::{
    CartCreateData, CartData, CartLinesAddData, CartLinesRemoveData, CartLinesUpdateData,
    CartPayloadNode, UserErrorNode,
};

use super::StorefrontClient;

/// A line to add: variant id and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// A new quantity for an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineUpdate {
    pub id: String,
    pub quantity: u32,
}

/// Application-level rejection reported inside an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    /// Input path the error refers to; empty for cart-level errors.
    pub field: Vec<String>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field.join("."), self.message)
        }
    }
}

/// Result of a cart mutation as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMutation {
    pub cart: Option<Cart>,
    pub user_errors: Vec<UserError>,
}

impl CartMutation {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        !self.user_errors.is_empty()
    }
}

impl StorefrontClient {
    /// Creates a new, empty cart.
    ///
    /// # Errors
    ///
    /// Propagates request and decode errors from the client.
    pub async fn create_cart(&self) -> Result<CartMutation, StorefrontError> {
        let data: CartCreateData = self
            .execute("CreateCart", CREATE_CART, json!({ "lines": [] }))
            .await?;
        decode_payload(data.cart_create)
    }

    /// Fetches a cart by id. `Ok(None)` when the cart no longer exists
    /// (expired or completed).
    ///
    /// # Errors
    ///
    /// Propagates request and decode errors from the client.
    pub async fn get_cart(&self, cart_id: &str) -> Result<Option<Cart>, StorefrontError> {
        let data: CartData = self
            .execute("GetCart", GET_CART, json!({ "cartId": cart_id }))
            .await?;
        data.cart.map(normalize_cart).transpose()
    }

    /// # Errors
    ///
    /// Propagates request and decode errors from the client.
    pub async fn add_lines(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> Result<CartMutation, StorefrontError> {
        let data: CartLinesAddData = self
            .execute(
                "AddToCart",
                ADD_TO_CART,
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;
        decode_payload(data.cart_lines_add)
    }

    /// # Errors
    ///
    /// Propagates request and decode errors from the client.
    pub async fn update_lines(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdate],
    ) -> Result<CartMutation, StorefrontError> {
        let data: CartLinesUpdateData = self
            .execute(
                "UpdateCartLine",
                UPDATE_CART_LINE,
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;
        decode_payload(data.cart_lines_update)
    }

    /// # Errors
    ///
    /// Propagates request and decode errors from the client.
    pub async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<CartMutation, StorefrontError> {
        let data: CartLinesRemoveData = self
            .execute(
                "RemoveFromCart",
                REMOVE_FROM_CART,
                json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;
        decode_payload(data.cart_lines_remove)
    }
}

fn decode_payload(payload: CartPayloadNode) -> Result<CartMutation, StorefrontError> {
    Ok(CartMutation {
        cart: payload.cart.map(normalize_cart).transpose()?,
        user_errors: payload.user_errors.into_iter().map(decode_user_error).collect(),
    })
}

fn decode_user_error(node: UserErrorNode) -> UserError {
    UserError {
        field: node.field.unwrap_or_default(),
        message: node.message,
    }
}
