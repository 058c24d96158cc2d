use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Shop department a product is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prints,
    Apparel,
    Objects,
    Digital,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prints,
        Category::Apparel,
        Category::Objects,
        Category::Digital,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Prints => "prints",
            Category::Apparel => "apparel",
            Category::Objects => "objects",
            Category::Digital => "digital",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Prints => "Prints",
            Category::Apparel => "Apparel",
            Category::Objects => "Objects",
            Category::Digital => "Digital",
        }
    }

    fn from_keyword(tag: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| tag.eq_ignore_ascii_case(c.as_str()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_keyword(s.trim()).ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Classifies a product from its tags and product type.
///
/// A tag equal to a category keyword (case-insensitive) wins, first match in
/// tag order. Otherwise the lowercased type is searched for `print`, then
/// `apparel` / `shirt` / `hoodie`, then `digital`. Everything else is
/// [`Category::Objects`].
#[must_use]
pub fn product_category(tags: &[String], product_type: &str) -> Category {
    if let Some(category) = tags.iter().find_map(|t| Category::from_keyword(t)) {
        return category;
    }

    let kind = product_type.to_lowercase();
    if kind.contains("print") {
        Category::Prints
    } else if kind.contains("apparel") || kind.contains("shirt") || kind.contains("hoodie") {
        Category::Apparel
    } else if kind.contains("digital") {
        Category::Digital
    } else {
        Category::Objects
    }
}

impl Product {
    #[must_use]
    pub fn category(&self) -> Category {
        product_category(&self.tags, &self.product_type)
    }
}

/// Shop-page filter: everything, or a single department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn admits(self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category() == category,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(value: Option<Category>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// Products admitted by `filter`, in their original order.
#[must_use]
pub fn filter_by_category(products: &[Product], filter: CategoryFilter) -> Vec<&Product> {
    products.iter().filter(|p| filter.admits(p)).collect()
}

/// Per-department product counts in [`Category::ALL`] order, preceded by
/// the total.
#[must_use]
pub fn category_counts(products: &[Product]) -> Vec<(CategoryFilter, usize)> {
    let mut counts = vec![(CategoryFilter::All, products.len())];
    counts.extend(Category::ALL.into_iter().map(|c| {
        let n = products.iter().filter(|p| p.category() == c).count();
        (CategoryFilter::Only(c), n)
    }));
    counts
}
