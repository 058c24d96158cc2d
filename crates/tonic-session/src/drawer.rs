//! Render model for the cart drawer.

use tonic_core::{format_money, CartLine};

use crate::session::CartState;

/// Footer note shown under the subtotal.
pub const CHECKOUT_NOTE: &str = "Shipping and taxes calculated at checkout";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub open: bool,
    pub busy: bool,
    pub item_count: u32,
    pub body: DrawerBody,
}

/// The footer only exists alongside at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerBody {
    Empty,
    Items {
        lines: Vec<LineRow>,
        footer: DrawerFooter,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    pub line_id: String,
    pub product_title: String,
    /// `"M / Black"`; `None` when the variant has no options.
    pub options_label: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub image_url: Option<String>,
    /// Quantity and remove controls are disabled while a mutation is pending.
    pub controls_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerFooter {
    pub subtotal: String,
    pub checkout_url: String,
    pub note: &'static str,
}

impl DrawerView {
    /// Builds the drawer for `state`. `None` when the storefront is not
    /// configured and the drawer should not render at all.
    #[must_use]
    pub fn from_state(state: &CartState, configured: bool) -> Option<Self> {
        if !configured {
            return None;
        }
        let busy = state.is_busy();
        let body = match state.cart.as_ref() {
            Some(cart) if !cart.lines.is_empty() => DrawerBody::Items {
                lines: cart.lines.iter().map(|l| line_row(l, busy)).collect(),
                footer: DrawerFooter {
                    subtotal: format_money(&cart.cost.subtotal),
                    checkout_url: cart.checkout_url.clone(),
                    note: CHECKOUT_NOTE,
                },
            },
            _ => DrawerBody::Empty,
        };
        Some(Self {
            open: state.is_open,
            busy,
            item_count: state.total_quantity(),
            body,
        })
    }

    #[must_use]
    pub fn footer(&self) -> Option<&DrawerFooter> {
        match &self.body {
            DrawerBody::Items { footer, .. } => Some(footer),
            DrawerBody::Empty => None,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[LineRow] {
        match &self.body {
            DrawerBody::Items { lines, .. } => lines,
            DrawerBody::Empty => &[],
        }
    }
}

fn line_row(line: &CartLine, busy: bool) -> LineRow {
    let merchandise = &line.merchandise;
    let options = merchandise.options_label();
    LineRow {
        line_id: line.id.clone(),
        product_title: merchandise.product_title.clone(),
        options_label: (!options.is_empty()).then_some(options),
        unit_price: format_money(&merchandise.price),
        quantity: line.quantity,
        image_url: merchandise.featured_image.as_ref().map(|i| i.url.clone()),
        controls_enabled: !busy,
    }
}
