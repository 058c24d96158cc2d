//! Plain-text rendering for catalog and cart output.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tonic_core::{format_money, is_new_product_at, Product};
use tonic_session::{DrawerBody, DrawerView};

/// Shown wherever the storefront would render data but no token is set.
pub(crate) const NOT_CONFIGURED: &str =
    "Storefront not configured: set SHOPIFY_STOREFRONT_TOKEN to load the shop.";

const TITLE_WIDTH: usize = 40;

/// `"$45.00"`, or `"from $38.00"` when variants differ in price.
pub(crate) fn price_label(product: &Product) -> String {
    let min = format_money(&product.price_range.min);
    if product.price_range.is_single_price() {
        min
    } else {
        format!("from {min}")
    }
}

/// Status badges in display order.
pub(crate) fn badges(product: &Product, now: DateTime<Utc>) -> Vec<&'static str> {
    let mut out = Vec::new();
    if is_new_product_at(product.created_at, now) {
        out.push("NEW");
    }
    let on_sale = product
        .compare_at_min_price
        .as_ref()
        .is_some_and(|c| c.amount > product.price_range.min.amount);
    if on_sale {
        out.push("SALE");
    }
    if !product.is_available() {
        out.push("SOLD OUT");
    }
    out
}

fn truncate(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        format!("{}...", title.chars().take(TITLE_WIDTH).collect::<String>())
    } else {
        title.to_string()
    }
}

pub(crate) fn product_header() -> String {
    format!("{:<28}{:<10}{:<14}{:<44}STATUS", "HANDLE", "CATEGORY", "PRICE", "TITLE")
}

pub(crate) fn product_row(product: &Product, now: DateTime<Utc>) -> String {
    format!(
        "{:<28}{:<10}{:<14}{:<44}{}",
        product.handle,
        product.category(),
        price_label(product),
        truncate(&product.title),
        badges(product, now).join(" ")
    )
}

pub(crate) fn product_detail(product: &Product, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "{}  [{}]", price_label(product), product.category().label());
    let status = badges(product, now);
    if !status.is_empty() {
        let _ = writeln!(out, "{}", status.join(" "));
    }
    if !product.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.description);
    }
    if !product.has_only_default_variant() {
        let _ = writeln!(out);
        for option in &product.options {
            let _ = writeln!(out, "{}: {}", option.name, option.values.join(", "));
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<44}{:<12}{:<12}VARIANT", "ID", "PRICE", "STOCK");
    for variant in &product.variants {
        let stock = if variant.available_for_sale {
            "available"
        } else {
            "sold out"
        };
        let _ = writeln!(
            out,
            "{:<44}{:<12}{:<12}{}",
            variant.id,
            format_money(&variant.price),
            stock,
            variant.title
        );
    }
    out
}

pub(crate) fn drawer(view: &DrawerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Your Cart ({})", view.item_count);
    match &view.body {
        DrawerBody::Empty => {
            let _ = writeln!(out, "Your cart is empty");
        }
        DrawerBody::Items { lines, footer } => {
            for line in lines {
                let options = line
                    .options_label
                    .as_deref()
                    .map(|o| format!(" ({o})"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {} x{}  {}{}  {}",
                    line.line_id, line.quantity, line.product_title, options, line.unit_price
                );
            }
            let _ = writeln!(out, "Subtotal: {}", footer.subtotal);
            let _ = writeln!(out, "{}", footer.note);
            let _ = writeln!(out, "Checkout: {}", footer.checkout_url);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tonic_core::{Money, PriceRange, SelectedOption, Variant};
    use tonic_session::{DrawerFooter, LineRow};

    use super::*;

    fn usd(cents: i64) -> Money {
        Money {
            amount: Decimal::new(cents, 2),
            currency_code: "USD".to_string(),
        }
    }

    fn product(min: i64, max: i64, available: bool) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "frequency-tee".to_string(),
            title: "Frequency Tee".to_string(),
            description: String::new(),
            tags: vec!["apparel".to_string()],
            product_type: "T-Shirt".to_string(),
            created_at: "2025-05-01T00:00:00Z".parse().unwrap(),
            price_range: PriceRange {
                min: usd(min),
                max: usd(max),
            },
            compare_at_min_price: None,
            featured_image: None,
            images: vec![],
            options: vec![],
            variants: vec![Variant {
                id: "gid://shopify/ProductVariant/1".to_string(),
                title: "M".to_string(),
                available_for_sale: available,
                price: usd(min),
                compare_at_price: None,
                selected_options: vec![SelectedOption::new("Size", "M")],
            }],
        }
    }

    #[test]
    fn price_label_single_and_range() {
        assert_eq!(price_label(&product(3800, 3800, true)), "$38.00");
        assert_eq!(price_label(&product(3800, 4200, true)), "from $38.00");
    }

    #[test]
    fn badges_new_sale_sold_out() {
        let now: DateTime<Utc> = "2025-05-11T00:00:00Z".parse().unwrap();
        let mut p = product(3800, 3800, false);
        p.compare_at_min_price = Some(usd(4500));
        assert_eq!(badges(&p, now), vec!["NEW", "SALE", "SOLD OUT"]);

        let later: DateTime<Utc> = "2025-06-15T00:00:00Z".parse().unwrap();
        let p = product(3800, 3800, true);
        assert!(badges(&p, later).is_empty());
    }

    #[test]
    fn truncate_long_titles() {
        let long = "x".repeat(45);
        assert_eq!(truncate(&long), format!("{}...", "x".repeat(40)));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn empty_drawer_has_no_checkout() {
        let view = DrawerView {
            open: true,
            busy: false,
            item_count: 0,
            body: DrawerBody::Empty,
        };
        let text = drawer(&view);
        assert!(text.contains("Your cart is empty"));
        assert!(!text.contains("Checkout"));
        assert!(!text.contains("Subtotal"));
    }

    #[test]
    fn drawer_lists_lines_and_footer() {
        let view = DrawerView {
            open: true,
            busy: false,
            item_count: 2,
            body: DrawerBody::Items {
                lines: vec![LineRow {
                    line_id: "l1".to_string(),
                    product_title: "Frequency Tee".to_string(),
                    options_label: Some("M / Black".to_string()),
                    unit_price: "$38.00".to_string(),
                    quantity: 2,
                    image_url: None,
                    controls_enabled: true,
                }],
                footer: DrawerFooter {
                    subtotal: "$76.00".to_string(),
                    checkout_url: "https://studio.example.com/checkout".to_string(),
                    note: tonic_session::drawer::CHECKOUT_NOTE,
                },
            },
        };
        let text = drawer(&view);
        assert!(text.starts_with("Your Cart (2)"));
        assert!(text.contains("l1 x2  Frequency Tee (M / Black)  $38.00"));
        assert!(text.contains("Subtotal: $76.00"));
        assert!(text.contains("Checkout: https://studio.example.com/checkout"));
    }
}
