//! Normalization of Notion pages into [`Tool`] records.
//!
//! Parsing is total: a missing or oddly-typed property degrades to the
//! field's default and never to an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_LINK: &str = "#";
pub const DEFAULT_PRICE: &str = "Contact for pricing";

/// Placeholder logo used when a page has no `Logo URL`.
pub const DEFAULT_LOGO: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\"><rect fill=\"%23667eea\" width=\"100\" height=\"100\"/><text x=\"50\" y=\"50\" font-size=\"40\" fill=\"white\" text-anchor=\"middle\" dominant-baseline=\"central\">🚀</text></svg>";

/// Lines longer than this are candidates for the capitalization split.
const LONG_LINE_CHARS: usize = 80;

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    /// Short subtitle, shown when `description` is empty.
    pub title: String,
    pub category: String,
    pub description: String,
    pub affiliate_link: String,
    pub price: String,
    pub rating: f64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub featured: bool,
    pub logo_url: String,
}

impl Default for Tool {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            title: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
            affiliate_link: DEFAULT_LINK.to_string(),
            price: DEFAULT_PRICE.to_string(),
            rating: 0.0,
            pros: Vec::new(),
            cons: Vec::new(),
            featured: false,
            logo_url: DEFAULT_LOGO.to_string(),
        }
    }
}

/// Knobs for [`parse_records_with`].
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Split long single-line pros/cons before each `Xx` capital boundary.
    ///
    /// Upstream text sometimes arrives with its line breaks stripped; this
    /// recovers a usable list in the common case and is not exact.
    pub split_on_capitals: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            split_on_capitals: true,
        }
    }
}

/// Parse the `results` array of a Notion query response.
pub fn parse_response(body: &Value) -> Vec<Tool> {
    parse_records(body.get("results"))
}

/// Parse a list of raw Notion pages with default options.
pub fn parse_records(raw: Option<&Value>) -> Vec<Tool> {
    parse_records_with(raw, ParseOptions::default())
}

/// Parse a list of raw Notion pages.
///
/// Anything other than a JSON array yields an empty list.
pub fn parse_records_with(raw: Option<&Value>, options: ParseOptions) -> Vec<Tool> {
    match raw {
        Some(Value::Array(pages)) => pages.iter().map(|page| parse_page(page, options)).collect(),
        other => {
            tracing::warn!(
                kind = other.map(json_kind).unwrap_or("absent"),
                "Query results are not a list; showing no tools"
            );
            Vec::new()
        }
    }
}

fn parse_page(page: &Value, options: ParseOptions) -> Tool {
    let props = Properties(page.get("properties"));
    let defaults = Tool::default();

    Tool {
        id: page
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        name: props.text("Tool Name", "title"),
        title: props.text("Title", "rich_text"),
        category: non_empty(props.select_name("Category"), defaults.category),
        description: props.text("Description", "rich_text"),
        affiliate_link: non_empty(props.url("Affiliate Link"), defaults.affiliate_link),
        price: non_empty(Some(props.text("Price", "rich_text")), defaults.price),
        rating: props.number("Rating").unwrap_or(defaults.rating),
        pros: split_feature_list(&props.text("Pros", "rich_text"), options),
        cons: split_feature_list(&props.text("Cons", "rich_text"), options),
        featured: props.checkbox("Featured").unwrap_or(defaults.featured),
        logo_url: non_empty(props.url("Logo URL"), defaults.logo_url),
    }
}

/// Typed accessors over a page's `properties` bag.
struct Properties<'a>(Option<&'a Value>);

impl<'a> Properties<'a> {
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.0.and_then(|props| props.get(name))
    }

    /// Concatenated `plain_text` of a title or rich text property.
    fn text(&self, name: &str, kind: &str) -> String {
        self.get(name)
            .and_then(|prop| prop.get(kind))
            .and_then(Value::as_array)
            .map(|segments| {
                segments
                    .iter()
                    .filter_map(|s| s.get("plain_text").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn select_name(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(|prop| prop.get("select"))
            .and_then(|select| select.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn url(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(|prop| prop.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(|prop| prop.get("number"))
            .and_then(Value::as_f64)
    }

    fn checkbox(&self, name: &str) -> Option<bool> {
        self.get(name)
            .and_then(|prop| prop.get("checkbox"))
            .and_then(Value::as_bool)
    }
}

fn non_empty(value: Option<String>, default: String) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(default)
}

/// Split a pros/cons blob into list items.
///
/// Items are separated by line breaks. With `split_on_capitals`, a line
/// longer than 80 characters is also cut before every uppercase letter that
/// is followed by a lowercase one. Items are trimmed; blank items dropped.
pub fn split_feature_list(text: &str, options: ParseOptions) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| {
            if options.split_on_capitals && line.chars().count() > LONG_LINE_CHARS {
                split_before_capitals(line)
            } else {
                vec![line]
            }
        })
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_before_capitals(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let next_is_lower = chars
            .peek()
            .map(|&(_, n)| n.is_ascii_lowercase())
            .unwrap_or(false);
        if idx > start && c.is_ascii_uppercase() && next_is_lower {
            pieces.push(&line[start..idx]);
            start = idx;
        }
    }
    pieces.push(&line[start..]);
    pieces
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
