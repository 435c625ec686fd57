//! # View Tree
//!
//! Pages render into a small element tree that can be queried the way a
//! browser DOM is (by class, by `data-testid`) and serialized to HTML.
//!
//! ```text
//! Node { tag: "div", classes: ["ProductItem", "card"], attrs: {data-testid: 1} }
//!   └── Node { tag: "h5", classes: ["ProductItem-Name"], text: "Product 1" }
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

/// Attribute holding a node's test id.
pub const TEST_ID_ATTR: &str = "data-testid";

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];

/// An element with optional text followed by child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            ..Node::default()
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Adds whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn test_id(self, id: impl ToString) -> Self {
        self.attr(TEST_ID_ATTR, id.to_string())
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends `child` only when it is `Some`.
    pub fn maybe_child(self, child: Option<Node>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Own text followed by the text of every descendant, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Visits this node and its descendants in document order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// First node (this one included) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        self.descendants().into_iter().find(|n| n.has_class(class))
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    /// Every node whose `data-testid` equals `id`, in document order.
    pub fn find_all_by_test_id(&self, id: impl ToString) -> Vec<&Node> {
        let id = id.to_string();
        self.descendants()
            .into_iter()
            .filter(|n| n.get_attr(TEST_ID_ATTR) == Some(id.as_str()))
            .collect()
    }

    // =========================================================================
    // HTML
    // =========================================================================

    /// Serializes the tree to HTML with escaped text and attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
