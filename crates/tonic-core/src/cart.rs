use serde::{Deserialize, Serialize};

use crate::products::{Image, Money, SelectedOption};

/// A server-side cart as last reported by the storefront.
///
/// Instances are only ever produced by decoding a server response; the client
/// never edits one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Opaque global id, e.g. `"gid://shopify/Cart/abc123"`.
    pub id: String,
    /// Hosted checkout page for this cart.
    pub checkout_url: String,
    pub total_quantity: u32,
    pub cost: CartCost,
    pub lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCost {
    pub subtotal: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    /// Always at least 1; lines at zero are removed server-side.
    pub quantity: u32,
    pub merchandise: CartMerchandise,
}

/// Snapshot of the variant a line refers to, as of the last server response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant id.
    pub id: String,
    pub title: String,
    pub price: Money,
    pub product_title: String,
    pub product_handle: String,
    pub featured_image: Option<Image>,
    pub selected_options: Vec<SelectedOption>,
}

impl CartMerchandise {
    /// Option values joined for display, e.g. `"M / Black"`. Empty when the
    /// variant has no options.
    #[must_use]
    pub fn options_label(&self) -> String {
        self.selected_options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
