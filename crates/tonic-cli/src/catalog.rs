//! Catalog command handlers for the CLI.
//!
//! Fetch failures are already logged by the loaders; handlers print the
//! message and return normally so the exit status reflects only usage and
//! configuration errors.

use chrono::Utc;
use tonic_core::{
    category_counts, filter_by_category, is_new_product_at, AppConfig, Category, CategoryFilter,
    FetchState, Product,
};
use tonic_session::catalog::{load_collection, load_collections, load_product, load_products};
use tonic_storefront::StorefrontClient;

use crate::render;

const COLLECTIONS_PAGE_SIZE: u32 = 20;

/// Products admitted by the department filter and, if `only_new`, added in
/// the last 30 days.
pub(crate) fn select_products(
    products: &[Product],
    category: Option<Category>,
    only_new: bool,
    now: chrono::DateTime<Utc>,
) -> Vec<&Product> {
    filter_by_category(products, CategoryFilter::from(category))
        .into_iter()
        .filter(|p| !only_new || is_new_product_at(p.created_at, now))
        .collect()
}

fn print_failure<T>(state: &FetchState<T>) -> bool {
    match state {
        FetchState::NotConfigured => println!("{}", render::NOT_CONFIGURED),
        FetchState::Failed(message) => println!("error: {message}"),
        FetchState::Loading | FetchState::Ready(_) => return false,
    }
    true
}

pub(crate) async fn run_products(
    client: Option<&StorefrontClient>,
    config: &AppConfig,
    category: Option<Category>,
    only_new: bool,
) {
    let state = load_products(client, config.products_page_size).await;
    if print_failure(&state) {
        return;
    }
    let FetchState::Ready(products) = state else {
        return;
    };

    let now = Utc::now();
    let selected = select_products(&products, category, only_new, now);
    if selected.is_empty() {
        println!("No products found in this category.");
        return;
    }

    println!("{}", render::product_header());
    for product in &selected {
        println!("{}", render::product_row(product, now));
    }
    println!();
    let counts: Vec<String> = category_counts(&products)
        .into_iter()
        .map(|(filter, n)| match filter {
            CategoryFilter::All => format!("All {n}"),
            CategoryFilter::Only(c) => format!("{} {n}", c.label()),
        })
        .collect();
    println!("{}", counts.join("  |  "));
}

pub(crate) async fn run_product(client: Option<&StorefrontClient>, handle: &str) {
    let state = load_product(client, handle).await;
    if print_failure(&state) {
        return;
    }
    if let FetchState::Ready(product) = state {
        print!("{}", render::product_detail(&product, Utc::now()));
    }
}

pub(crate) async fn run_collections(client: Option<&StorefrontClient>) {
    let state = load_collections(client, COLLECTIONS_PAGE_SIZE).await;
    if print_failure(&state) {
        return;
    }
    let FetchState::Ready(collections) = state else {
        return;
    };
    if collections.is_empty() {
        println!("no collections found");
        return;
    }
    println!("{:<28}TITLE", "HANDLE");
    for collection in &collections {
        println!("{:<28}{}", collection.handle, collection.title);
    }
}

pub(crate) async fn run_collection(
    client: Option<&StorefrontClient>,
    config: &AppConfig,
    handle: &str,
) {
    let state = load_collection(client, handle, config.products_page_size).await;
    if print_failure(&state) {
        return;
    }
    let FetchState::Ready(found) = state else {
        return;
    };

    println!("{}", found.collection.title);
    if !found.collection.description.is_empty() {
        println!("{}", found.collection.description);
    }
    println!();
    if found.products.is_empty() {
        println!("No products in this collection.");
        return;
    }
    let now = Utc::now();
    println!("{}", render::product_header());
    for product in &found.products {
        println!("{}", render::product_row(product, now));
    }
}
