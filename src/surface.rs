//! Rendering surface
//!
//! A minimal HTML element tree and a `Document` that maps rendering targets
//! (element ids) to the nodes appended into them. Renderers only ever append
//! to or clear a target; the page templates pull each target's inner HTML.

use std::collections::BTreeMap;

use crate::types::RenderingTarget;

/// Elements serialised without a closing tag
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.text_content(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute (replaces an existing one of the same name)
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: append a child node
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Builder: append a text child
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// All descendant elements with the given tag, in document order
    pub fn descendants_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_by_tag(&self.children, tag, &mut found);
        found
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn collect_by_tag<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for el in nodes.iter().filter_map(Node::as_element) {
        if el.tag == tag {
            found.push(el);
        }
        collect_by_tag(&el.children, tag, found);
    }
}

/// Escape text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Named presentation surfaces for one page render
#[derive(Debug, Default)]
pub struct Document {
    targets: BTreeMap<RenderingTarget, Vec<Node>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to a target, creating the target on first use
    pub fn append(&mut self, target: &RenderingTarget, node: impl Into<Node>) {
        self.targets
            .entry(target.clone())
            .or_default()
            .push(node.into());
    }

    /// Remove everything previously appended to a target
    pub fn clear(&mut self, target: &RenderingTarget) {
        if let Some(nodes) = self.targets.get_mut(target) {
            nodes.clear();
        }
    }

    pub fn children(&self, target: &RenderingTarget) -> &[Node] {
        self.targets.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Elements of a given tag anywhere under a target
    pub fn find_by_tag<'a>(&'a self, target: &RenderingTarget, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_by_tag(self.children(target), tag, &mut found);
        found
    }

    /// Serialised children of a target (empty if the target was never used)
    pub fn inner_html(&self, target: &RenderingTarget) -> String {
        let mut out = String::new();
        for node in self.children(target) {
            node.write_html(&mut out);
        }
        out
    }

    /// Convenience for templates that name targets by id
    pub fn html_of(&self, id: &str) -> String {
        self.inner_html(&RenderingTarget::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_to_html() {
        let el = Element::new("td").attr("class", "num").text("42");
        assert_eq!(el.to_html(), r#"<td class="num">42</td>"#);
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let el = Element::new("option")
            .attr("value", "\"><script>")
            .text("<b>AT&T</b>");
        assert_eq!(
            el.to_html(),
            r#"<option value="&quot;&gt;&lt;script&gt;">&lt;b&gt;AT&amp;T&lt;/b&gt;</option>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let el = Element::new("input").attr("type", "number");
        assert_eq!(el.to_html(), r#"<input type="number">"#);
    }

    #[test]
    fn test_set_attr_replaces() {
        let el = Element::new("div").attr("class", "a").attr("class", "b");
        assert_eq!(el.get_attr("class"), Some("b"));
        assert_eq!(el.to_html(), r#"<div class="b"></div>"#);
    }

    #[test]
    fn test_document_append_and_clear() {
        let mut doc = Document::new();
        let target = RenderingTarget::new("alertMessage");

        doc.append(&target, Element::new("p").text("one"));
        doc.append(&target, Element::new("p").text("two"));
        assert_eq!(doc.children(&target).len(), 2);
        assert_eq!(doc.inner_html(&target), "<p>one</p><p>two</p>");

        doc.clear(&target);
        assert!(doc.children(&target).is_empty());
        assert_eq!(doc.html_of("missing"), "");
    }

    #[test]
    fn test_find_by_tag_is_recursive() {
        let mut doc = Document::new();
        let target = RenderingTarget::new("t");
        let row = Element::new("tr")
            .child(Element::new("td").text("a"))
            .child(Element::new("td").text("b"));
        doc.append(&target, Element::new("tbody").child(row));

        let cells = doc.find_by_tag(&target, "td");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].text_content(), "b");
    }
}
