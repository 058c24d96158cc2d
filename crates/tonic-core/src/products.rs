use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One option group of a product, e.g. `Size` with `["S", "M", "L"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    /// Values in storefront display order.
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Lowest and highest variant price of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// `true` when every variant costs the same.
    #[must_use]
    pub fn is_single_price(&self) -> bool {
        self.min == self.max
    }
}

/// A purchasable configuration of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Opaque global id, e.g. `"gid://shopify/ProductVariant/1"`.
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// Whether the variant carries exactly the given option values.
    ///
    /// Order does not matter, but every option of the variant must be
    /// present in `selected` and vice versa.
    #[must_use]
    pub fn matches(&self, selected: &[SelectedOption]) -> bool {
        self.selected_options.len() == selected.len()
            && selected.iter().all(|wanted| {
                self.selected_options
                    .iter()
                    .any(|o| o.name == wanted.name && o.value == wanted.value)
            })
    }

    /// `true` when a higher comparison price is set.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .as_ref()
            .is_some_and(|c| c.amount > self.price.amount)
    }
}

/// A catalog product, read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// URL-safe identifier, e.g. `"sacred-geometry-print-01"`.
    pub handle: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub product_type: String,
    pub created_at: DateTime<Utc>,
    pub price_range: PriceRange,
    /// Lowest comparison price across variants, when any variant has one.
    pub compare_at_min_price: Option<Money>,
    pub featured_image: Option<Image>,
    pub images: Vec<Image>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Looks up the variant whose options exactly match `selected`.
    ///
    /// The catalog is expected to cover every combination of option values,
    /// but nothing here enforces it, so `None` is a normal result.
    #[must_use]
    pub fn find_variant(&self, selected: &[SelectedOption]) -> Option<&Variant> {
        self.variants.iter().find(|v| v.matches(selected))
    }

    /// The variant a detail view preselects: the first one for sale, or the
    /// first one overall when nothing is for sale.
    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.available_for_sale)
            .or_else(|| self.variants.first())
    }

    /// Returns `true` if at least one variant is currently for sale.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }

    /// `true` for products with a single "Default Title" variant and no
    /// meaningful option choice to present.
    #[must_use]
    pub fn has_only_default_variant(&self) -> bool {
        self.variants.len() == 1
            && self.options.iter().all(|o| o.values.len() <= 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
}

/// A collection together with the first page of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionProducts {
    pub collection: Collection,
    pub products: Vec<Product>,
}
