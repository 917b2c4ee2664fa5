//! Derived views over the tool collection: featured subset, category set,
//! filter, sort, and the owned [`ViewModel`] tying them together.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::tool::Tool;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

static PRICE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid price pattern"));

/// Tools flagged as featured, in input order.
pub fn derive_featured(tools: &[Tool]) -> Vec<Tool> {
    tools.iter().filter(|t| t.featured).cloned().collect()
}

/// `"all"` followed by each distinct category in first-seen order.
pub fn derive_category_set(tools: &[Tool]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for tool in tools {
        if !categories[1..].contains(&tool.category) {
            categories.push(tool.category.clone());
        }
    }
    categories
}

/// Tools in `category` (or any, for `"all"`) whose name or description
/// contains `search`, ignoring case. Input order is preserved.
pub fn apply_filter(tools: &[Tool], category: &str, search: &str) -> Vec<Tool> {
    let needle = search.to_lowercase();
    tools
        .iter()
        .filter(|tool| category == ALL_CATEGORIES || tool.category == category)
        .filter(|tool| {
            needle.is_empty()
                || tool.name.to_lowercase().contains(&needle)
                || tool.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sort orders offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Rating,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort selector value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}' (expected name, rating, price-low or price-high)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Stable in-place sort.
pub fn apply_sort(tools: &mut [Tool], key: SortKey) {
    match key {
        SortKey::Name => tools.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Rating => tools.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceLow => {
            tools.sort_by(|a, b| extract_price(&a.price).total_cmp(&extract_price(&b.price)))
        }
        SortKey::PriceHigh => {
            tools.sort_by(|a, b| extract_price(&b.price).total_cmp(&extract_price(&a.price)))
        }
    }
}

/// Name ordering: case-insensitive first, then byte order so that names
/// differing only in case still order deterministically.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// First decimal number in a free-text price, or 0.
pub fn extract_price(price: &str) -> f64 {
    PRICE_NUMBER
        .find(price)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Owned view state over one fetched collection.
///
/// Each event consumes the model and returns the updated one. The full
/// collection is never modified; only `visible` is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    tools: Vec<Tool>,
    category: String,
    search: String,
    sort: Option<SortKey>,
    visible: Vec<Tool>,
}

impl ViewModel {
    /// A fresh view: every tool visible in upstream order.
    pub fn new(tools: Vec<Tool>) -> Self {
        let visible = tools.clone();
        Self {
            tools,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            sort: None,
            visible,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self.refilter()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.refilter()
    }

    /// Sort the current view in place; the full collection keeps its order.
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        apply_sort(&mut self.visible, key);
        self
    }

    /// Recompute the visible list from the full collection, keeping the
    /// chosen sort order.
    fn refilter(mut self) -> Self {
        self.visible = apply_filter(&self.tools, &self.category, &self.search);
        if let Some(key) = self.sort {
            apply_sort(&mut self.visible, key);
        }
        self
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn visible(&self) -> &[Tool] {
        &self.visible
    }

    pub fn featured(&self) -> Vec<Tool> {
        derive_featured(&self.tools)
    }

    pub fn categories(&self) -> Vec<String> {
        derive_category_set(&self.tools)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Number of tools in the full collection.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Number of distinct categories (excluding `"all"`).
    pub fn category_count(&self) -> usize {
        self.categories().len() - 1
    }
}
