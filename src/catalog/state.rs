//! Load-cycle state machine and whole-page rendering.
//!
//! ```text
//! Loading ──fetch ok──▶ Loaded ──category/search/sort──▶ Loaded
//!    │
//!    └──fetch failed──▶ Error   (terminal; reload restarts at Loading)
//! ```

use serde_json::Value;

use crate::catalog::render::{
    escape_html, render_categories, render_error, render_featured, render_visible, Fragment,
};
use crate::catalog::tool::{parse_response, Tool};
use crate::catalog::view::{SortKey, ViewModel};

/// UI state for one load cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Loaded(ViewModel),
    Error(String),
}

/// A user interaction on a loaded page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SelectCategory(String),
    Search(String),
    Sort(SortKey),
}

impl DirectoryState {
    /// Fetch completed with a query response body.
    ///
    /// Only meaningful while `Loading`; otherwise the state is unchanged.
    pub fn fetch_succeeded(self, body: &Value) -> Self {
        self.loaded_with(parse_response(body))
    }

    /// Fetch completed with an already-parsed collection.
    pub fn loaded_with(self, tools: Vec<Tool>) -> Self {
        match self {
            DirectoryState::Loading => {
                tracing::debug!(count = tools.len(), "Directory loaded");
                DirectoryState::Loaded(ViewModel::new(tools))
            }
            other => other,
        }
    }

    /// Fetch failed; the page shows the error panel until reloaded.
    pub fn fetch_failed(self, message: impl Into<String>) -> Self {
        match self {
            DirectoryState::Loading => DirectoryState::Error(message.into()),
            other => other,
        }
    }

    /// Apply a user interaction. Ignored unless `Loaded`.
    pub fn apply(self, event: Event) -> Self {
        match self {
            DirectoryState::Loaded(view) => DirectoryState::Loaded(match event {
                Event::SelectCategory(category) => view.with_category(category),
                Event::Search(term) => view.with_search(term),
                Event::Sort(key) => view.with_sort(key),
            }),
            other => other,
        }
    }

    /// Apply a category, a search term and an optional sort in one go.
    pub fn apply_view(
        self,
        category: impl Into<String>,
        search: impl Into<String>,
        sort: Option<SortKey>,
    ) -> Self {
        let state = self
            .apply(Event::SelectCategory(category.into()))
            .apply(Event::Search(search.into()));
        match sort {
            Some(key) => state.apply(Event::Sort(key)),
            None => state,
        }
    }

    /// Full reload: back to `Loading`, dropping the collection.
    pub fn reload(self) -> Self {
        DirectoryState::Loading
    }

    pub fn view(&self) -> Option<&ViewModel> {
        match self {
            DirectoryState::Loaded(view) => Some(view),
            _ => None,
        }
    }
}

/// Contents of every render target on the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub featured: Fragment,
    pub tools: Fragment,
    pub categories: Fragment,
    pub tool_count: usize,
    pub category_count: usize,
}

/// Render the page for `state`. `Loading` leaves every target empty.
pub fn render_page(state: &DirectoryState) -> Page {
    match state {
        DirectoryState::Loading => Page::default(),
        DirectoryState::Loaded(view) => Page {
            featured: render_featured(&view.featured()),
            tools: render_visible(view.visible()),
            categories: render_categories(&view.categories(), view.category()),
            tool_count: view.tool_count(),
            category_count: view.category_count(),
        },
        DirectoryState::Error(message) => {
            let panel = render_error(message);
            Page {
                featured: panel.clone(),
                tools: panel,
                ..Page::default()
            }
        }
    }
}

impl Page {
    /// A standalone HTML document with every render target filled in.
    pub fn to_html(&self, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
  <p class="stats"><span id="toolCount">{tool_count}</span> tools in <span id="categoryCount">{category_count}</span> categories</p>
  <section><h2>Featured</h2><div id="featuredTools" class="tools-grid">{featured}</div></section>
  <nav id="categoryFilter">{categories}</nav>
  <section><h2>All Tools</h2><div id="allTools" class="tools-grid">{tools}</div></section>
</body>
</html>
"#,
            title = escape_html(title),
            tool_count = self.tool_count,
            category_count = self.category_count,
            featured = self.featured,
            categories = self.categories,
            tools = self.tools,
        )
    }
}
