//! Minimal SVG node tree.
//!
//! Markup is assembled as typed nodes and serialized in one pass, so escaping
//! of text content and attribute values happens in exactly one place.

use crate::utils::escape_xml;

/// A child of an [`Element`]: another element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An SVG element with ordered attributes and children.
///
/// Built by value with chained calls; nothing is escaped until [`Element::render`].
///
/// # Example
///
/// ```
/// let markup = Element::new("text")
///     .attr("x", 20)
///     .attr("id", "title")
///     .text("Tom & Jerry")
///     .render();
/// // <text x="20" id="title">Tom &amp; Jerry</text>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    /// Creates an empty element with the given tag name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends an attribute.
    ///
    /// # Arguments
    ///
    /// * `name` - Attribute name, written verbatim
    /// * `value` - Any displayable value; escaped at render time
    ///
    /// # Behavior
    ///
    /// Attributes are written in insertion order. Setting the same name twice
    /// writes it twice; callers are expected not to.
    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Appends a child element or text node after the existing children.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Appends `node` only when present.
    pub fn child_opt(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(node) => self.child(node),
            None => self,
        }
    }

    /// Appends every node yielded by `nodes`, in order.
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Appends a text node. The text is escaped at render time.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Serializes the element and its subtree.
    ///
    /// # Behavior
    ///
    /// * Attribute values and text are passed through [`escape_xml`]
    /// * Elements without children are self-closed (`<rect/>`)
    /// * No whitespace or newlines are inserted, so the output is stable for
    ///   hashing
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(out),
                Node::Text(text) => out.push_str(&escape_xml(text)),
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}
