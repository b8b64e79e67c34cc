//! Table renderer
//!
//! Builds a `<thead>` from the first record's keys and one `<tbody>` row per
//! record. Columns are fixed once from the first record; later records with
//! a different key set are skipped and reported instead of rendered ragged.

use crate::error::DashboardError;
use crate::surface::{Document, Element};
use crate::types::{Record, RenderingTarget, display_value};

/// Header text of the optional index column
pub const INDEX_HEADER: &str = "#";

/// Table rendering options
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    /// Prefix every row with its 1-based position
    pub numbered: bool,
    /// Clear the target first; `false` appends to whatever is already there
    pub clear: bool,
    /// Mark header cells so the page script can sort by column
    pub sortable: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            numbered: false,
            clear: true,
            sortable: false,
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    #[must_use]
    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }
}

/// What a render call produced
#[derive(Debug, Default)]
pub struct TableReport {
    pub columns: Vec<String>,
    pub rows_rendered: usize,
    /// Skipped rows, one `ShapeMismatch` each
    pub issues: Vec<DashboardError>,
}

/// Render `records` into `target`.
///
/// An empty sequence renders nothing (the target is still cleared when
/// `options.clear` is set). Row index labels follow input position, so a
/// skipped row leaves a gap rather than renumbering the rest.
pub fn render_table(
    records: &[Record],
    target: &RenderingTarget,
    options: &TableOptions,
    doc: &mut Document,
) -> TableReport {
    if options.clear {
        doc.clear(target);
    }

    let mut report = TableReport::default();
    let Some(first) = records.first() else {
        return report;
    };
    report.columns = first.keys().cloned().collect();

    let mut header = Element::new("tr");
    if options.numbered {
        header.push(header_cell(INDEX_HEADER, false));
    }
    for column in &report.columns {
        header.push(header_cell(column, options.sortable));
    }

    let mut body = Element::new("tbody");
    for (index, record) in records.iter().enumerate() {
        if let Err(issue) = check_shape(&report.columns, record, index) {
            report.issues.push(issue);
            continue;
        }

        let mut row = Element::new("tr");
        if options.numbered {
            row.push(
                Element::new("td")
                    .attr("class", "row-index")
                    .text((index + 1).to_string()),
            );
        }
        for column in &report.columns {
            let value = record.get(column).map(display_value).unwrap_or_default();
            row.push(Element::new("td").text(value));
        }
        body.push(row);
        report.rows_rendered += 1;
    }

    doc.append(target, Element::new("thead").child(header));
    doc.append(target, body);
    report
}

fn header_cell(label: &str, sortable: bool) -> Element {
    let cell = Element::new("th").attr("scope", "col");
    let cell = if sortable {
        cell.attr("data-sortable", "true")
    } else {
        cell
    };
    cell.text(label)
}

/// Key set of `record` must equal the header columns (order may differ)
fn check_shape(columns: &[String], record: &Record, row: usize) -> Result<(), DashboardError> {
    let same_keys =
        record.len() == columns.len() && columns.iter().all(|c| record.contains_key(c));
    if same_keys {
        return Ok(());
    }

    Err(DashboardError::ShapeMismatch {
        row,
        expected: format!("{columns:?}"),
        found: format!("{:?}", record.keys().collect::<Vec<_>>()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    fn row_texts(doc: &Document, target: &RenderingTarget) -> Vec<Vec<String>> {
        doc.find_by_tag(target, "tbody")[0]
            .child_elements()
            .map(|tr| tr.child_elements().map(Element::text_content).collect())
            .collect()
    }

    #[test]
    fn test_header_follows_first_record_order() {
        let data = records(json!([
            {"Ticker": "AAPL", "Shares Owned": 3, "Current Price": 190.1},
            {"Ticker": "MSFT", "Shares Owned": 1, "Current Price": 410.0}
        ]));
        let target = RenderingTarget::new("holdingsTable");
        let mut doc = Document::new();

        for numbered in [false, true] {
            let options = TableOptions::default().numbered(numbered);
            let report = render_table(&data, &target, &options, &mut doc);
            let headers: Vec<String> = doc
                .find_by_tag(&target, "th")
                .into_iter()
                .map(Element::text_content)
                .filter(|h| h != INDEX_HEADER)
                .collect();

            assert_eq!(headers, vec!["Ticker", "Shares Owned", "Current Price"]);
            assert_eq!(report.columns.len(), 3);
        }
    }

    #[test]
    fn test_one_row_per_record() {
        let data = records(json!([
            {"Ticker": "AAPL", "Shares": 3},
            {"Ticker": "MSFT", "Shares": 1},
            {"Ticker": "NVDA", "Shares": 8}
        ]));
        let target = RenderingTarget::new("transactionTable");
        let mut doc = Document::new();

        let report = render_table(&data, &target, &TableOptions::default(), &mut doc);

        assert_eq!(report.rows_rendered, 3);
        assert!(report.issues.is_empty());
        let rows = row_texts(&doc, &target);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 2));
        assert_eq!(rows[2], vec!["NVDA", "8"]);
    }

    #[test]
    fn test_numbered_rows_are_one_based() {
        let data = records(json!([{"Username": "ann"}, {"Username": "bob"}]));
        let target = RenderingTarget::new("topPerformersTable");
        let mut doc = Document::new();

        render_table(&data, &target, &TableOptions::default().numbered(true), &mut doc);

        let headers = doc.find_by_tag(&target, "th");
        assert_eq!(headers[0].text_content(), "#");
        let rows = row_texts(&doc, &target);
        assert_eq!(rows[0], vec!["1", "ann"]);
        assert_eq!(rows[1], vec!["2", "bob"]);
    }

    #[test]
    fn test_values_follow_header_order_not_record_order() {
        let data = records(json!([
            {"Ticker": "AAPL", "Shares": 3},
            {"Shares": 5, "Ticker": "MSFT"}
        ]));
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();

        render_table(&data, &target, &TableOptions::default(), &mut doc);

        assert_eq!(row_texts(&doc, &target)[1], vec!["MSFT", "5"]);
    }

    #[test]
    fn test_mismatched_rows_are_skipped_and_reported() {
        let data = records(json!([
            {"Ticker": "AAPL", "Shares": 3},
            {"Ticker": "MSFT"},
            {"Ticker": "NVDA", "Shares": 8}
        ]));
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();

        let options = TableOptions::default().numbered(true);
        let report = render_table(&data, &target, &options, &mut doc);

        assert_eq!(report.rows_rendered, 2);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(report.issues[0], DashboardError::ShapeMismatch { row: 1, .. }));
        // index labels keep input positions
        let rows = row_texts(&doc, &target);
        assert_eq!(rows[1][0], "3");
    }

    #[test]
    fn test_empty_records_render_nothing() {
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();

        let report = render_table(&[], &target, &TableOptions::default(), &mut doc);

        assert_eq!(report.rows_rendered, 0);
        assert!(doc.children(&target).is_empty());
    }

    #[test]
    fn test_rerender_is_idempotent_by_default() {
        let data = records(json!([{"Ticker": "AAPL"}]));
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();

        render_table(&data, &target, &TableOptions::default(), &mut doc);
        let first = doc.inner_html(&target);
        render_table(&data, &target, &TableOptions::default(), &mut doc);

        assert_eq!(doc.inner_html(&target), first);
    }

    #[test]
    fn test_rerender_accumulates_without_clear() {
        let data = records(json!([{"Ticker": "AAPL"}]));
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();
        let options = TableOptions::default().clear(false);

        render_table(&data, &target, &options, &mut doc);
        render_table(&data, &target, &options, &mut doc);

        assert_eq!(doc.find_by_tag(&target, "thead").len(), 2);
        assert_eq!(doc.find_by_tag(&target, "tbody").len(), 2);
    }

    #[test]
    fn test_sortable_marks_value_headers_only() {
        let data = records(json!([{"Rank": 1, "Username": "ann"}]));
        let target = RenderingTarget::new("t");
        let mut doc = Document::new();

        let options = TableOptions::default().numbered(true).sortable(true);
        render_table(&data, &target, &options, &mut doc);

        let headers = doc.find_by_tag(&target, "th");
        assert_eq!(headers[0].get_attr("data-sortable"), None);
        assert_eq!(headers[1].get_attr("data-sortable"), Some("true"));
        assert_eq!(headers[2].get_attr("data-sortable"), Some("true"));
    }
}
