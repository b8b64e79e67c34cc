//! Portfolio dashboard
//!
//! Value history, holdings, transactions, sector/holding breakdowns and the
//! popup for starting a new purchase.

use crate::config::Config;
use crate::render::chart;
use crate::render::popup::action_popup;
use crate::render::table::TableOptions;
use crate::surface::Element;
use crate::types::{Breakdown, DashboardPayload, RenderingTarget};

use super::{POPUPS, Page, PageBuilder, PageKind};

pub const HISTORY_PLOT: &str = "historyPlot";
pub const HOLDINGS_TABLE: &str = "holdingsTable";
pub const TRANSACTION_TABLE: &str = "transactionTable";
pub const SECTOR_CHART: &str = "sectorChart";
pub const HOLDINGS_CHART: &str = "holdingsChart";
pub const BUY_POPUP: &str = "buyPopup";

pub fn render(payload: &DashboardPayload, config: &Config) -> Page {
    build(payload, PageBuilder::new(config))
}

pub(crate) fn build(payload: &DashboardPayload, mut page: PageBuilder<'_>) -> Page {
    if !payload.history.date.is_empty() {
        let figure = chart::value_chart(&payload.history, &page.theme);
        page.chart(HISTORY_PLOT, figure);
    }

    if !payload.holdings.is_empty() {
        page.table(&payload.holdings, HOLDINGS_TABLE, TableOptions::default().sortable(true));
    }

    if !payload.transactions.is_empty() {
        let options = TableOptions::default().sortable(true);
        page.table(&payload.transactions, TRANSACTION_TABLE, options);
    }

    for (breakdown, id, title) in [
        (&payload.sectors, SECTOR_CHART, "Sectors"),
        (&payload.breakdown, HOLDINGS_CHART, "Holdings"),
    ] {
        if let Some(breakdown) = breakdown.as_ref().filter(|b| has_weights(b)) {
            let figure = chart::pie_chart(breakdown, title, &page.theme);
            page.chart(id, figure);
        }
    }

    let search = Element::new("form")
        .attr("class", "trade-form")
        .attr("method", "get")
        .attr("action", "/buy")
        .child(Element::new("label").attr("for", "buyTicker").text("Ticker"))
        .child(
            Element::new("input")
                .attr("type", "text")
                .attr("id", "buyTicker")
                .attr("name", "ticker")
                .attr("required", "required"),
        )
        .child(
            Element::new("button")
                .attr("type", "submit")
                .attr("class", "btn btn-primary")
                .text("Continue"),
        );
    action_popup(&mut page.doc, &RenderingTarget::new(POPUPS), BUY_POPUP, "Buy Stock", search);

    let body = format!(
        r#"        <div class="grid">
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Portfolio Value</span>
                    <button class="btn btn-primary" data-open="{BUY_POPUP}">Buy</button>
                </div>
                <div id="{HISTORY_PLOT}">{history}</div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Sectors</span></div>
                <div id="{SECTOR_CHART}">{sectors}</div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Holdings Breakdown</span></div>
                <div id="{HOLDINGS_CHART}">{breakdown}</div>
            </div>
            <div class="card wide">
                <div class="card-header"><span class="card-title">Holdings</span></div>
                <table class="data-table" id="{HOLDINGS_TABLE}">{holdings}</table>
            </div>
            <div class="card wide">
                <div class="card-header"><span class="card-title">Transactions</span></div>
                <table class="data-table" id="{TRANSACTION_TABLE}">{transactions}</table>
            </div>
        </div>"#,
        history = page.html_or(HISTORY_PLOT, "No history yet"),
        sectors = page.html_or(SECTOR_CHART, "No holdings yet"),
        breakdown = page.html_or(HOLDINGS_CHART, "No holdings yet"),
        holdings = empty_row_or(page.doc.html_of(HOLDINGS_TABLE), "No holdings yet"),
        transactions = empty_row_or(page.doc.html_of(TRANSACTION_TABLE), "No transactions yet"),
    );

    page.finish(PageKind::Dashboard, &body)
}

fn has_weights(breakdown: &Breakdown) -> bool {
    !breakdown.labels.is_empty()
}

/// Table body placeholder for a table that rendered nothing
fn empty_row_or(html: String, empty: &str) -> String {
    if html.is_empty() {
        format!(r#"<tbody><tr><td class="empty">{empty}</td></tr></tbody>"#)
    } else {
        html
    }
}
