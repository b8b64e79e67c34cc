//! Stock search page
//!
//! Closing price history with a range selector and the latest news.

use url::Url;

use crate::config::Config;
use crate::error::DashboardError;
use crate::render::chart;
use crate::surface::{Element, escape};
use crate::types::{NewsArticle, RenderingTarget, SearchPayload};

use super::{Page, PageBuilder, PageKind};

pub const HISTORY_PLOT: &str = "historyPlot";
pub const NEWS_LIST: &str = "newsList";

pub fn render(payload: &SearchPayload, config: &Config) -> Page {
    build(payload, PageBuilder::new(config))
}

pub(crate) fn build(payload: &SearchPayload, mut page: PageBuilder<'_>) -> Page {
    if !payload.history.date.is_empty() {
        let figure = chart::price_chart(&payload.history, &page.theme);
        page.chart(HISTORY_PLOT, figure);
    }

    if !payload.news.is_empty() {
        let (list, issues) = news_list(&payload.news);
        page.doc.append(&RenderingTarget::new(NEWS_LIST), list);
        page.issues.extend(issues);
    }

    let body = format!(
        r#"        <div class="grid">
            <div class="card wide">
                <div class="card-header"><span class="card-title">{ticker}</span></div>
                <div id="{HISTORY_PLOT}">{history}</div>
            </div>
            <div class="card wide">
                <div class="card-header"><span class="card-title">News</span></div>
                <div id="{NEWS_LIST}">{news}</div>
            </div>
        </div>"#,
        ticker = escape(&payload.ticker),
        history = page.html_or(HISTORY_PLOT, "No price history available"),
        news = page.html_or(NEWS_LIST, "No recent news"),
    );

    page.finish(PageKind::Search, &body)
}

/// Only web links are clickable; anything else is shown as plain text
fn is_web_link(link: &str) -> bool {
    Url::parse(link.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn news_list(articles: &[NewsArticle]) -> (Element, Vec<DashboardError>) {
    let mut list = Element::new("ul").attr("class", "news-list");
    let mut issues = Vec::new();

    for (row, article) in articles.iter().enumerate() {
        let item = if is_web_link(&article.url) {
            Element::new("a")
                .attr("href", article.url.trim())
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .text(article.name.as_str())
        } else {
            issues.push(DashboardError::UnsafeLink {
                row,
                url: article.url.clone(),
            });
            Element::new("span").text(article.name.as_str())
        };
        list.push(Element::new("li").child(item));
    }

    (list, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> SearchPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_search_page() {
        let page = render(
            &payload(json!({
                "ticker": "NVDA",
                "history": {"date": ["2024-01-02", "2024-01-03"], "price": [481.7, 475.7]},
                "news": [
                    {"name": "Chips rally", "url": "https://news.example.com/a?x=1&y=2"}
                ]
            })),
            &Config::default(),
        );

        assert!(page.issues.is_empty());
        assert!(page.html.contains("rangeselector"));
        assert!(page.html.contains(concat!(
            r#"<a href="https://news.example.com/a?x=1&amp;y=2" target="_blank" rel="noopener">"#,
            "Chips rally</a>"
        )));
    }

    #[test]
    fn test_script_links_are_not_clickable() {
        let page = render(
            &payload(json!({
                "ticker": "NVDA",
                "news": [
                    {"name": "Free shares", "url": "javascript:alert(document.cookie)"},
                    {"name": "Odd casing", "url": " JavaScript:alert(1)"},
                    {"name": "Earnings", "url": "https://news.example.com/earnings"}
                ]
            })),
            &Config::default(),
        );

        assert!(!page.html.contains("javascript:"));
        assert!(!page.html.contains("JavaScript:"));
        assert!(page.html.contains("<li><span>Free shares</span></li>"));
        assert!(page.html.contains(r#"<a href="https://news.example.com/earnings""#));
        assert_eq!(page.issues.len(), 2);
        assert!(matches!(page.issues[0], DashboardError::UnsafeLink { row: 0, .. }));
        assert!(page.issues.iter().all(DashboardError::is_row_level));
    }

    #[test]
    fn test_search_page_without_data() {
        let page = render(&payload(json!({"ticker": "NVDA"})), &Config::default());

        assert!(page.html.contains("No price history available"));
        assert!(page.html.contains("No recent news"));
        assert!(!page.html.contains("news-list\""));
    }

    #[test]
    fn test_undated_history_is_reported() {
        let page = render(
            &payload(json!({
                "ticker": "NVDA",
                "history": {"date": ["Jan 2"], "price": [481.7]}
            })),
            &Config::default(),
        );

        assert_eq!(page.issues.len(), 1);
        assert!(page.html.contains(crate::pages::CHART_UNAVAILABLE));
    }
}
