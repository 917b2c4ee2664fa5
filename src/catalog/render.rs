//! HTML rendering of tool cards and page sections.
//!
//! Every function here is pure: the same input always yields byte-identical
//! markup. Attaching fragments to a document is the caller's business.

use std::fmt;

use crate::catalog::tool::Tool;
use crate::catalog::view::ALL_CATEGORIES;

/// Shown in a card when its logo fails to load.
pub const FALLBACK_LOGO: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22%3E%3Crect fill=%22%23667eea%22 width=%22100%22 height=%22100%22/%3E%3Ctext x=%2250%22 y=%2250%22 font-size=%2240%22 fill=%22white%22 text-anchor=%22middle%22 dominant-baseline=%22central%22%3E🔧%3C/text%3E%3C/svg%3E";

pub const NO_FEATURED_MESSAGE: &str =
    "No featured tools yet. Mark some tools as featured in Notion!";
pub const NO_MATCHES_MESSAGE: &str = "No tools found matching your criteria.";

const MAX_LISTED_FEATURES: usize = 3;

/// A rendered piece of markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for use in element content and double- or single-quoted
/// attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Most stars a card can show.
const MAX_STARS: f64 = 5.0;

/// `⭐` repeated to the nearest whole rating, capped at five.
pub fn stars(rating: f64) -> String {
    let count = if rating.is_finite() {
        rating.round().clamp(0.0, MAX_STARS) as usize
    } else {
        0
    };
    "⭐".repeat(count)
}

/// Rating as shown next to the stars: `4`, `4.5`.
///
/// Printed as stored; out-of-range values are not clamped here.
pub fn format_rating(rating: f64) -> String {
    rating.to_string()
}

/// One card per tool, concatenated in order.
pub fn render_tools(tools: &[Tool]) -> Fragment {
    Fragment(tools.iter().map(render_card).collect())
}

/// The featured grid, or a placeholder when nothing is featured.
pub fn render_featured(featured: &[Tool]) -> Fragment {
    if featured.is_empty() {
        return placeholder(NO_FEATURED_MESSAGE);
    }
    render_tools(featured)
}

/// The main grid, or a placeholder when the filter matches nothing.
pub fn render_visible(visible: &[Tool]) -> Fragment {
    if visible.is_empty() {
        return placeholder(NO_MATCHES_MESSAGE);
    }
    render_tools(visible)
}

fn placeholder(message: &str) -> Fragment {
    Fragment(format!(
        "<p class=\"empty-state\">{}</p>",
        escape_html(message)
    ))
}

fn feature_list(items: &[String]) -> String {
    items
        .iter()
        .take(MAX_LISTED_FEATURES)
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

fn feature_section(title: &str, class: &str, list: &str) -> String {
    format!(
        "\n        <div class=\"feature-section\">\
         \n          <div class=\"feature-title\">{title}</div>\
         \n          <ul class=\"feature-list {class}\">{list}</ul>\
         \n        </div>"
    )
}

/// Markup for a single tool card.
pub fn render_card(tool: &Tool) -> String {
    let pros = feature_list(&tool.pros);
    let cons = feature_list(&tool.cons);

    let features = if pros.is_empty() && cons.is_empty() {
        String::new()
    } else {
        let mut sections = String::new();
        if !pros.is_empty() {
            sections.push_str(&feature_section("✨ Pros", "pros", &pros));
        }
        if !cons.is_empty() {
            sections.push_str(&feature_section("⚠️ Cons", "cons", &cons));
        }
        format!("\n      <div class=\"tool-features\">{sections}\n      </div>")
    };

    let description = if tool.description.is_empty() {
        &tool.title
    } else {
        &tool.description
    };

    format!(
        r#"
    <div class="tool-card" data-id="{id}">
      <div class="tool-header">
        <img src="{logo}" alt="{name} logo" class="tool-logo" onerror="this.onerror=null; this.src='{fallback}'">
        <div class="tool-info">
          <h3 class="tool-name">{name}</h3>
          <span class="tool-category">{category}</span>
        </div>
      </div>
      <div class="tool-rating">
        <span class="stars">{stars}</span>
        <span class="rating-number">{rating}/5</span>
      </div>
      <p class="tool-description">{description}</p>{features}
      <div class="tool-footer">
        <div class="tool-price">{price}</div>
        <a href="{link}" target="_blank" class="tool-link" rel="noopener noreferrer">Learn More →</a>
      </div>
    </div>
"#,
        id = escape_html(&tool.id),
        logo = escape_html(&tool.logo_url),
        name = escape_html(&tool.name),
        fallback = FALLBACK_LOGO,
        category = escape_html(&tool.category),
        stars = stars(tool.rating),
        rating = format_rating(tool.rating),
        description = escape_html(description),
        features = features,
        price = escape_html(&tool.price),
        link = escape_html(&tool.affiliate_link),
    )
}

/// Category filter buttons; `active` gets the `active` class.
pub fn render_categories(categories: &[String], active: &str) -> Fragment {
    Fragment(
        categories
            .iter()
            .map(|cat| {
                let label = if cat == ALL_CATEGORIES { "All Tools" } else { cat };
                let class = if cat == active {
                    "category-btn active"
                } else {
                    "category-btn"
                };
                format!(
                    "<button class=\"{class}\" data-category=\"{}\">{}</button>",
                    escape_html(cat),
                    escape_html(label)
                )
            })
            .collect(),
    )
}

/// Error panel with a retry action that reloads the page.
pub fn render_error(message: &str) -> Fragment {
    Fragment(format!(
        r#"
    <div class="error-panel">
      <h3>⚠️ Error Loading Tools</h3>
      <p>{}</p>
      <p class="error-hint">Check the browser console for more details.</p>
      <button class="retry-btn" onclick="location.reload()">Retry</button>
    </div>
"#,
        escape_html(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tool() -> Tool {
        Tool {
            id: "t-1".into(),
            name: "Acme & Co".into(),
            category: "Dev <Tools>".into(),
            description: "Builds things".into(),
            affiliate_link: "https://acme.example/?a=1&b=2".into(),
            price: "$12.50/mo".into(),
            rating: 4.5,
            pros: vec!["One".into(), "Two".into(), "Three".into(), "Four".into()],
            cons: vec![],
            ..Tool::default()
        }
    }

    /// Text between `open` and the next `close`, unescaped.
    fn visible_field(card: &str, open: &str, close: &str) -> String {
        let start = card.find(open).expect("field present") + open.len();
        let end = start + card[start..].find(close).expect("field closed");
        card[start..end]
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_visible_fields_round_trip() {
        let tool = sample_tool();
        let card = render_card(&tool);

        assert_eq!(visible_field(&card, "<h3 class=\"tool-name\">", "</h3>"), tool.name);
        assert_eq!(
            visible_field(&card, "<span class=\"tool-category\">", "</span>"),
            tool.category
        );
        assert_eq!(visible_field(&card, "<div class=\"tool-price\">", "</div>"), tool.price);
        let rating: f64 = visible_field(&card, "<span class=\"rating-number\">", "/5</span>")
            .parse()
            .unwrap();
        assert_eq!(rating, tool.rating);
    }

    #[test]
    fn test_card_escapes_text() {
        let card = render_card(&sample_tool());
        assert!(card.contains("Acme &amp; Co"));
        assert!(card.contains("Dev &lt;Tools&gt;"));
        assert!(card.contains("href=\"https://acme.example/?a=1&amp;b=2\""));
        assert!(!card.contains("<Tools>"));
    }

    #[test]
    fn test_card_limits_and_omits_feature_lists() {
        let card = render_card(&sample_tool());
        assert!(card.contains("<li>Three</li>"));
        assert!(!card.contains("<li>Four</li>"));
        assert!(card.contains("feature-list pros"));
        assert!(!card.contains("feature-list cons"));

        let bare = render_card(&Tool::default());
        assert!(!bare.contains("tool-features"));
    }

    #[test]
    fn test_card_link_opens_new_context() {
        let card = render_card(&sample_tool());
        assert!(card.contains("target=\"_blank\""));
        assert!(card.contains("rel=\"noopener noreferrer\""));
        assert!(card.contains("onerror=\"this.onerror=null;"));
    }

    #[test]
    fn test_description_falls_back_to_title() {
        let tool = Tool {
            title: "Short pitch".into(),
            ..Tool::default()
        };
        assert!(render_card(&tool).contains("<p class=\"tool-description\">Short pitch</p>"));
    }

    #[test]
    fn test_stars_round_to_nearest() {
        assert_eq!(stars(4.5), "⭐⭐⭐⭐⭐");
        assert_eq!(stars(4.4), "⭐⭐⭐⭐");
        assert_eq!(stars(0.0), "");
        assert_eq!(stars(-2.0), "");
        assert_eq!(format_rating(4.0), "4");
        assert_eq!(format_rating(3.5), "3.5");
    }

    #[test]
    fn test_out_of_range_rating_renders() {
        assert_eq!(stars(1e20), "⭐⭐⭐⭐⭐");
        assert_eq!(stars(7.2), "⭐⭐⭐⭐⭐");
        assert_eq!(stars(-1e20), "");
        assert_eq!(stars(f64::INFINITY), "");
        assert_eq!(format_rating(1e19).parse::<f64>().unwrap(), 1e19);
        assert_eq!(format_rating(-3.0), "-3");

        let raw = serde_json::json!([
            { "properties": { "Rating": { "number": 1e20 } } },
            { "properties": { "Rating": { "number": -4 } } }
        ]);
        let tools = crate::catalog::parse_records(Some(&raw));
        let html = render_tools(&tools);
        for tool in &tools {
            let card = render_card(tool);
            let shown: f64 = visible_field(&card, "<span class=\"rating-number\">", "/5</span>")
                .parse()
                .unwrap();
            assert_eq!(shown, tool.rating);
        }
        assert_eq!(html.as_str().matches('⭐').count(), 5);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tools = vec![sample_tool(), Tool::default()];
        assert_eq!(render_tools(&tools), render_tools(&tools));
    }

    #[test]
    fn test_placeholders() {
        assert!(render_featured(&[]).as_str().contains(NO_FEATURED_MESSAGE));
        assert!(render_visible(&[]).as_str().contains(NO_MATCHES_MESSAGE));
        assert!(render_tools(&[]).is_empty());
    }

    #[test]
    fn test_category_buttons() {
        let categories = vec!["all".to_string(), "Video".to_string()];
        let html = render_categories(&categories, "Video");
        assert_eq!(
            html.as_str(),
            "<button class=\"category-btn\" data-category=\"all\">All Tools</button>\
             <button class=\"category-btn active\" data-category=\"Video\">Video</button>"
        );
    }

    #[test]
    fn test_error_panel_has_retry() {
        let html = render_error("Failed to fetch tools: 500");
        assert!(html.as_str().contains("Failed to fetch tools: 500"));
        assert!(html.as_str().contains("location.reload()"));
    }
}
