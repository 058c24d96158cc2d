//! Fixed Storefront API documents.
//!
//! Product and cart selections live in shared fragments appended to each
//! document with `concat!`, so every cart mutation returns the same cart
//! shape as `GetCart`.

macro_rules! product_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  tags
  productType
  createdAt
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
  }
  featuredImage { url altText width height }
  images(first: 5) {
    edges { node { url altText width height } }
  }
  variants(first: 20) {
    edges {
      node {
        id
        title
        availableForSale
        price { amount currencyCode }
        compareAtPrice { amount currencyCode }
        selectedOptions { name value }
      }
    }
  }
  options { name values }
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
  }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        merchandise {
          ... on ProductVariant {
            id
            title
            price { amount currencyCode }
            product {
              title
              handle
              featuredImage { url altText width height }
            }
            selectedOptions { name value }
          }
        }
      }
    }
  }
}
"
    };
}

pub const GET_ALL_PRODUCTS: &str = concat!(
    r"
query GetAllProducts($first: Int = 50) {
  products(first: $first) {
    edges { node { ...ProductFields } }
  }
}
",
    product_fragment!()
);

pub const GET_PRODUCTS_BY_COLLECTION: &str = concat!(
    r"
query GetProductsByCollection($handle: String!, $first: Int = 50) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    image { url altText width height }
    products(first: $first) {
      edges { node { ...ProductFields } }
    }
  }
}
",
    product_fragment!()
);

pub const GET_PRODUCT_BY_HANDLE: &str = concat!(
    r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) { ...ProductFields }
}
",
    product_fragment!()
);

pub const GET_ALL_COLLECTIONS: &str = r"
query GetAllCollections($first: Int = 20) {
  collections(first: $first) {
    edges {
      node {
        id
        handle
        title
        description
        image { url altText width height }
      }
    }
  }
}
";

pub const CREATE_CART: &str = concat!(
    r"
mutation CreateCart($lines: [CartLineInput!]) {
  cartCreate(input: { lines: $lines }) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
",
    cart_fragment!()
);

pub const GET_CART: &str = concat!(
    r"
query GetCart($cartId: ID!) {
  cart(id: $cartId) { ...CartFields }
}
",
    cart_fragment!()
);

pub const ADD_TO_CART: &str = concat!(
    r"
mutation AddToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
",
    cart_fragment!()
);

pub const UPDATE_CART_LINE: &str = concat!(
    r"
mutation UpdateCartLine($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
",
    cart_fragment!()
);

pub const REMOVE_FROM_CART: &str = concat!(
    r"
mutation RemoveFromCart($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
",
    cart_fragment!()
);
