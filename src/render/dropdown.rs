//! Ticker dropdown populator
//!
//! Fills a `<select>` target with a placeholder option followed by one option
//! per holding, labelled and valued by the holding's ticker.

use crate::error::DashboardError;
use crate::surface::{Document, Element};
use crate::types::{Record, RenderingTarget, TICKER_FIELD, display_value, ticker};

/// Label of the leading empty-valued option
pub const DEFAULT_PLACEHOLDER: &str = "Select ticker";

/// Dropdown options
#[derive(Debug, Clone)]
pub struct DropdownOptions<'a> {
    pub placeholder: &'a str,
    /// Ticker to mark as selected, if any option carries it
    pub selected: Option<&'a str>,
    /// `(attribute, field)` pairs copied onto each option as `data-<attribute>`
    /// when the holding has a value for `field`
    pub data: &'a [(&'a str, &'a str)],
}

impl Default for DropdownOptions<'_> {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            selected: None,
            data: &[],
        }
    }
}

/// What a populate call produced
#[derive(Debug, Default)]
pub struct DropdownReport {
    /// Option values in emitted order, placeholder included
    pub values: Vec<String>,
    /// Holdings skipped for lacking a ticker
    pub issues: Vec<DashboardError>,
}

/// Populate `target` with the default placeholder
pub fn populate_dropdown(
    holdings: &[Record],
    target: &RenderingTarget,
    doc: &mut Document,
) -> DropdownReport {
    populate_dropdown_with(holdings, target, &DropdownOptions::default(), doc)
}

/// Populate `target`, replacing any options it already holds.
///
/// Source order is kept and duplicate tickers produce duplicate options.
pub fn populate_dropdown_with(
    holdings: &[Record],
    target: &RenderingTarget,
    options: &DropdownOptions<'_>,
    doc: &mut Document,
) -> DropdownReport {
    doc.clear(target);

    let mut report = DropdownReport::default();
    doc.append(
        target,
        Element::new("option").attr("value", "").text(options.placeholder),
    );
    report.values.push(String::new());

    for (row, holding) in holdings.iter().enumerate() {
        let Some(symbol) = ticker(holding) else {
            report.issues.push(DashboardError::MissingField {
                field: TICKER_FIELD.to_string(),
                row,
            });
            continue;
        };

        let mut option = Element::new("option").attr("value", symbol);
        for (attribute, field) in options.data {
            if let Some(value) = holding.get(*field).filter(|v| !v.is_null()) {
                option.set_attr(format!("data-{attribute}"), display_value(value));
            }
        }
        if options.selected == Some(symbol) {
            option.set_attr("selected", "selected");
        }
        doc.append(target, option.text(symbol));
        report.values.push(symbol.to_string());
    }

    report
}
