//! Conversion from Storefront wire types to [`tonic_core`] domain types.
//!
//! Serde already rejects structurally wrong responses; this module rejects
//! responses that are well-formed but break a model invariant (a product with
//! no variants, a cart line with zero quantity).

use tonic_core::{
    Cart, CartCost, CartLine, CartMerchandise, Collection, CollectionProducts, Image, Money,
    PriceRange, Product, ProductOption, SelectedOption, Variant,
};

use crate::error::StorefrontError;
use crate::types::{
    CartLineNode, CartNode, CollectionNode, CollectionWithProductsNode, ImageNode, MoneyNode,
    ProductNode, SelectedOptionNode, VariantNode,
};

/// Normalizes a raw [`ProductNode`] into a [`Product`].
///
/// # Errors
///
/// Returns [`StorefrontError::Decode`] if the product has no variants.
pub fn normalize_product(node: ProductNode) -> Result<Product, StorefrontError> {
    if node.variants.edges.is_empty() {
        return Err(StorefrontError::Decode {
            context: format!("product {}", node.handle),
            reason: "product has no variants".into(),
        });
    }

    // A zero minimum means no variant carries a comparison price.
    let compare_min = normalize_money(node.compare_at_price_range.min_variant_price);
    let compare_at_min_price = (!compare_min.amount.is_zero()).then_some(compare_min);

    Ok(Product {
        id: node.id,
        handle: node.handle,
        title: node.title,
        description: node.description,
        tags: node.tags,
        product_type: node.product_type,
        created_at: node.created_at,
        price_range: PriceRange {
            min: normalize_money(node.price_range.min_variant_price),
            max: normalize_money(node.price_range.max_variant_price),
        },
        compare_at_min_price,
        featured_image: node.featured_image.map(normalize_image),
        images: node.images.into_nodes().into_iter().map(normalize_image).collect(),
        options: node
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.values,
            })
            .collect(),
        variants: node
            .variants
            .into_nodes()
            .into_iter()
            .map(normalize_variant)
            .collect(),
    })
}

/// Normalizes every product node, failing on the first invalid one.
///
/// # Errors
///
/// Propagates [`StorefrontError::Decode`] from [`normalize_product`].
pub fn normalize_products(nodes: Vec<ProductNode>) -> Result<Vec<Product>, StorefrontError> {
    nodes.into_iter().map(normalize_product).collect()
}

pub fn normalize_collection(node: CollectionNode) -> Collection {
    Collection {
        id: node.id,
        handle: node.handle,
        title: node.title,
        description: node.description,
        image: node.image.map(normalize_image),
    }
}

/// # Errors
///
/// Propagates [`StorefrontError::Decode`] from [`normalize_product`].
pub fn normalize_collection_products(
    node: CollectionWithProductsNode,
) -> Result<CollectionProducts, StorefrontError> {
    Ok(CollectionProducts {
        collection: normalize_collection(node.collection),
        products: normalize_products(node.products.into_nodes())?,
    })
}

/// Normalizes a raw [`CartNode`] into a [`Cart`].
///
/// # Errors
///
/// Returns [`StorefrontError::Decode`] if any line reports a zero quantity.
pub fn normalize_cart(node: CartNode) -> Result<Cart, StorefrontError> {
    let cart_id = node.id;
    let lines = node
        .lines
        .into_nodes()
        .into_iter()
        .map(|line| normalize_cart_line(line, &cart_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart {
        id: cart_id,
        checkout_url: node.checkout_url,
        total_quantity: node.total_quantity,
        cost: CartCost {
            subtotal: normalize_money(node.cost.subtotal_amount),
            total: normalize_money(node.cost.total_amount),
        },
        lines,
    })
}

fn normalize_cart_line(line: CartLineNode, cart_id: &str) -> Result<CartLine, StorefrontError> {
    if line.quantity == 0 {
        return Err(StorefrontError::Decode {
            context: format!("cart {cart_id}"),
            reason: format!("line {} has zero quantity", line.id),
        });
    }

    let merchandise = line.merchandise;
    Ok(CartLine {
        id: line.id,
        quantity: line.quantity,
        merchandise: CartMerchandise {
            id: merchandise.id,
            title: merchandise.title,
            price: normalize_money(merchandise.price),
            product_title: merchandise.product.title,
            product_handle: merchandise.product.handle,
            featured_image: merchandise.product.featured_image.map(normalize_image),
            selected_options: normalize_options(merchandise.selected_options),
        },
    })
}

fn normalize_variant(node: VariantNode) -> Variant {
    Variant {
        id: node.id,
        title: node.title,
        available_for_sale: node.available_for_sale,
        price: normalize_money(node.price),
        compare_at_price: node.compare_at_price.map(normalize_money),
        selected_options: normalize_options(node.selected_options),
    }
}

fn normalize_options(options: Vec<SelectedOptionNode>) -> Vec<SelectedOption> {
    options
        .into_iter()
        .map(|o| SelectedOption {
            name: o.name,
            value: o.value,
        })
        .collect()
}

fn normalize_money(node: MoneyNode) -> Money {
    Money {
        amount: node.amount,
        currency_code: node.currency_code,
    }
}

fn normalize_image(node: ImageNode) -> Image {
    Image {
        url: node.url,
        alt_text: node.alt_text.filter(|s| !s.is_empty()),
        width: node.width,
        height: node.height,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_json(variants: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "gid://shopify/Product/1",
            "handle": "sacred-geometry-i",
            "title": "Sacred Geometry I",
            "description": "A study in fundamental geometric relationships.",
            "tags": ["prints"],
            "productType": "Print",
            "createdAt": "2025-05-01T12:00:00Z",
            "priceRange": {
                "minVariantPrice": { "amount": "45.0", "currencyCode": "USD" },
                "maxVariantPrice": { "amount": "120.0", "currencyCode": "USD" }
            },
            "compareAtPriceRange": {
                "minVariantPrice": { "amount": "0.0", "currencyCode": "USD" }
            },
            "featuredImage": { "url": "https://cdn.example.com/a.jpg", "altText": "", "width": 800, "height": 1000 },
            "images": { "edges": [
                { "node": { "url": "https://cdn.example.com/a.jpg", "altText": "Front", "width": 800, "height": 1000 } }
            ] },
            "variants": { "edges": variants },
            "options": [ { "name": "Size", "values": ["8×10", "24×30"] } ]
        })
    }

    fn variant_edge(id: &str, size: &str, price: &str) -> serde_json::Value {
        json!({ "node": {
            "id": id,
            "title": size,
            "availableForSale": true,
            "price": { "amount": price, "currencyCode": "USD" },
            "compareAtPrice": null,
            "selectedOptions": [ { "name": "Size", "value": size } ]
        }})
    }

    fn parse_product(value: serde_json::Value) -> ProductNode {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn normalize_product_flattens_connections() {
        let node = parse_product(product_json(json!([
            variant_edge("v1", "8×10", "45.0"),
            variant_edge("v2", "24×30", "120.0"),
        ])));
        let product = normalize_product(node).unwrap();
        assert_eq!(product.handle, "sacred-geometry-i");
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].alt_text.as_deref(), Some("Front"));
        assert_eq!(product.variants[1].price.amount.to_string(), "120.0");
        assert_eq!(product.options[0].values, vec!["8×10", "24×30"]);
    }

    #[test]
    fn normalize_product_zero_compare_at_becomes_none() {
        let node = parse_product(product_json(json!([variant_edge("v1", "8×10", "45.0")])));
        let product = normalize_product(node).unwrap();
        assert!(product.compare_at_min_price.is_none());
    }

    #[test]
    fn normalize_product_keeps_real_compare_at() {
        let mut value = product_json(json!([variant_edge("v1", "8×10", "45.0")]));
        value["compareAtPriceRange"]["minVariantPrice"]["amount"] = json!("60.0");
        let product = normalize_product(parse_product(value)).unwrap();
        assert_eq!(
            product.compare_at_min_price.map(|m| m.amount.to_string()),
            Some("60.0".to_string())
        );
    }

    #[test]
    fn normalize_product_empty_alt_text_becomes_none() {
        let node = parse_product(product_json(json!([variant_edge("v1", "8×10", "45.0")])));
        let product = normalize_product(node).unwrap();
        assert!(product.featured_image.unwrap().alt_text.is_none());
    }

    #[test]
    fn normalize_product_error_when_no_variants() {
        let node = parse_product(product_json(json!([])));
        let err = normalize_product(node).unwrap_err();
        assert!(
            matches!(err, StorefrontError::Decode { ref reason, .. } if reason.contains("no variants")),
            "expected Decode error, got: {err:?}"
        );
    }

    #[test]
    fn product_missing_required_field_fails_to_deserialize() {
        let mut value = product_json(json!([variant_edge("v1", "8×10", "45.0")]));
        value.as_object_mut().unwrap().remove("createdAt");
        assert!(serde_json::from_value::<ProductNode>(value).is_err());
    }

    #[test]
    fn normalize_cart_rejects_zero_quantity_line() {
        let node: CartNode = serde_json::from_value(json!({
            "id": "gid://shopify/Cart/1",
            "checkoutUrl": "https://shop.example.com/cart/c/1",
            "totalQuantity": 0,
            "cost": {
                "subtotalAmount": { "amount": "0.0", "currencyCode": "USD" },
                "totalAmount": { "amount": "0.0", "currencyCode": "USD" }
            },
            "lines": { "edges": [ { "node": {
                "id": "line-1",
                "quantity": 0,
                "merchandise": {
                    "id": "v1",
                    "title": "Default Title",
                    "price": { "amount": "10.0", "currencyCode": "USD" },
                    "product": { "title": "Sticker", "handle": "sticker", "featuredImage": null },
                    "selectedOptions": []
                }
            } } ] }
        }))
        .unwrap();
        let err = normalize_cart(node).unwrap_err();
        assert!(matches!(err, StorefrontError::Decode { .. }));
    }
}
