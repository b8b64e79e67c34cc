//! Modal popups
//!
//! The trade confirmation modal and plain action modals. Modals render
//! hidden; the page script opens them.

use crate::surface::{Document, Element, Node};
use crate::trade::Confirmation;
use crate::types::{RenderingTarget, TradeAction};

/// Id of the confirmation modal
pub const CONFIRM_POPUP: &str = "confirmPopup";

/// Id of the element holding the confirmation prompt
pub const CONFIRM_TEXT: &str = "confirmText";

/// Append the confirmation modal for `action` to `target`.
///
/// `form_id` is the form the confirm button submits. With a known
/// confirmation the prompt is filled in and the modal renders open,
/// otherwise the page script fills the prompt after validating.
pub fn confirm_popup(
    doc: &mut Document,
    target: &RenderingTarget,
    action: TradeAction,
    form_id: &str,
    confirmation: Option<&Confirmation>,
) {
    let prompt = confirmation.map(Confirmation::prompt).unwrap_or_default();
    let title = match action {
        TradeAction::Buy => "Confirm Purchase",
        TradeAction::Sell => "Confirm Sale",
    };

    let body = Element::new("p").attr("id", CONFIRM_TEXT).text(prompt);
    let footer = Element::new("div")
        .attr("class", "modal-footer")
        .child(close_button("Cancel"))
        .child(
            Element::new("button")
                .attr("type", "submit")
                .attr("class", "btn btn-primary")
                .attr("form", form_id)
                .text("Confirm"),
        );

    let mut modal = modal(CONFIRM_POPUP, title, body.into(), Some(footer));
    if confirmation.is_some() {
        modal.set_attr("class", "modal open");
    }
    doc.append(target, modal);
}

/// Append a hidden modal with arbitrary body content
pub fn action_popup(
    doc: &mut Document,
    target: &RenderingTarget,
    id: &str,
    title: &str,
    body: impl Into<Node>,
) {
    doc.append(target, modal(id, title, body.into(), None));
}

fn modal(id: &str, title: &str, body: Node, footer: Option<Element>) -> Element {
    let header = Element::new("div")
        .attr("class", "modal-header")
        .child(Element::new("h5").attr("class", "modal-title").text(title))
        .child(close_button("×"));

    let mut content = Element::new("div")
        .attr("class", "modal-content")
        .child(header)
        .child(Element::new("div").attr("class", "modal-body").child(body));
    if let Some(footer) = footer {
        content.push(footer);
    }

    Element::new("div")
        .attr("id", id)
        .attr("class", "modal")
        .attr("role", "dialog")
        .attr("aria-hidden", "true")
        .child(content)
}

fn close_button(label: &str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("class", "btn btn-secondary")
        .attr("data-dismiss", "modal")
        .text(label)
}
