// SPDX-License-Identifier: PMPL-1.0-or-later
//! Read-only document tree consumed by the analyzers.
//!
//! Nodes live in an arena addressed by [`NodeId`]; every node stores the
//! index of its parent, so ancestor walks are plain index chasing. A
//! `Document` is built either programmatically or from parsed HTML via
//! [`Document::parse_html`], which is the only place a markup parser is
//! involved.

use scraper::{Html, Node};

/// Elements serialized without a closing tag inside diagnostic snippets
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

/// Index of a node inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root
    Document,
    /// An element with its tag name and attributes in source order
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// A run of character data
    Text(String),
    /// Comments, doctypes, processing instructions
    Other,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse an HTML document with the html5ever-based `scraper` parser
    pub fn parse_html(content: &str) -> Self {
        Self::from_html(&Html::parse_document(content))
    }

    /// Copy a parsed `scraper` tree into the arena
    pub fn from_html(html: &Html) -> Self {
        let mut doc = Document::new();
        let root = doc.root();

        // Children are pushed in reverse so they pop, and get allocated,
        // in document order.
        let mut stack: Vec<_> = html.tree.root().children().rev().map(|c| (c, root)).collect();

        while let Some((node, parent)) = stack.pop() {
            let id = match node.value() {
                Node::Element(element) => doc.append_element(parent, element.name(), element.attrs()),
                Node::Text(text) => doc.append_text(parent, text),
                _ => doc.push(parent, NodeKind::Other),
            };
            stack.extend(node.children().rev().map(|c| (c, id)));
        }

        doc
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append an element as the last child of `parent`
    pub fn append_element<I, K, V>(&mut self, parent: NodeId, tag: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                attrs,
            },
        )
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    /// Tag name of an element, `None` for any other node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Attributes of an element in source order; empty for other nodes
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// Value of an attribute. With duplicates, the first occurrence wins.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Character data of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ancestors of a node, nearest first, ending at the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// All nodes below and including `id`, depth-first pre-order
    pub fn descendants(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            doc: self,
            stack: vec![id],
        }
    }

    /// Every node of the document, depth-first pre-order
    pub fn preorder(&self) -> Preorder<'_> {
        self.descendants(self.root())
    }

    /// Concatenation of every descendant text node, each trimmed
    pub fn descendant_text(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.text(n))
            .map(str::trim)
            .collect()
    }

    /// Concatenation of the direct text children, trimmed as a whole
    pub fn own_text(&self, id: NodeId) -> String {
        let text: String = self
            .children(id)
            .iter()
            .filter_map(|&c| self.text(c))
            .collect();
        text.trim().to_string()
    }

    /// Diagnostic snippet: opening tag with attributes, content, closing tag.
    ///
    /// Direct text children are trimmed; nested elements are rendered as
    /// regular HTML.
    pub fn outer_html(&self, id: NodeId) -> String {
        let tag = match self.kind(id) {
            NodeKind::Element { tag, .. } => tag,
            NodeKind::Text(text) => return text.clone(),
            _ => return String::new(),
        };

        let mut out = String::new();
        self.write_open_tag(id, tag, &mut out);
        for &child in self.children(id) {
            match self.kind(child) {
                NodeKind::Text(text) => out.push_str(text.trim()),
                NodeKind::Element { .. } => self.write_html(child, &mut out),
                _ => {}
            }
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Frame::Enter(id)];

        while let Some(frame) = stack.pop() {
            let node = match frame {
                Frame::Enter(node) => node,
                Frame::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                    continue;
                }
            };

            match self.kind(node) {
                NodeKind::Element { tag, .. } => {
                    self.write_open_tag(node, tag, out);
                    if VOID_ELEMENTS.contains(&tag.as_str()) {
                        continue;
                    }
                    // closing tag pops after every child
                    stack.push(Frame::Close(tag.as_str()));
                    stack.extend(self.children(node).iter().rev().map(|&c| Frame::Enter(c)));
                }
                NodeKind::Text(text) => out.push_str(&escape(text, false)),
                _ => {}
            }
        }
    }

    fn write_open_tag(&self, id: NodeId, tag: &str, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        for (key, value) in self.attrs(id) {
            out.push_str(&format!(" {}=\"{}\"", key, escape(value, true)));
        }
        out.push('>');
    }
}

/// Serializer work item
enum Frame<'a> {
    Enter(NodeId),
    Close(&'a str),
}

fn escape(value: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Iterator returned by [`Document::ancestors`]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Iterator returned by [`Document::preorder`] and [`Document::descendants`]
pub struct Preorder<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(doc: &Document, tag: &str) -> NodeId {
        doc.preorder()
            .find(|&n| doc.tag_name(n) == Some(tag))
            .expect("element present")
    }

    #[test]
    fn test_builder_links_parent_and_children() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root(), "body", Vec::<(&str, &str)>::new());
        let p = doc.append_element(body, "p", [("class", "lead")]);
        let text = doc.append_text(p, "hello");

        assert_eq!(doc.parent(p), Some(body));
        assert_eq!(doc.children(body), &[p]);
        assert_eq!(doc.text(text), Some("hello"));
        assert_eq!(doc.attr(p, "class"), Some("lead"));
        assert_eq!(doc.ancestors(text).collect::<Vec<_>>(), vec![p, body, doc.root()]);
    }

    #[test]
    fn test_first_duplicate_attribute_wins() {
        let mut doc = Document::new();
        let img = doc.append_element(doc.root(), "img", [("alt", "first"), ("alt", "second")]);
        assert_eq!(doc.attr(img, "alt"), Some("first"));
    }

    #[test]
    fn test_preorder_visits_parents_before_children() {
        let doc = Document::parse_html("<html><body><div><p>a</p></div><span>b</span></body></html>");
        let tags: Vec<_> = doc.preorder().filter_map(|n| doc.tag_name(n)).collect();
        assert_eq!(tags, vec!["html", "head", "body", "div", "p", "span"]);
    }

    #[test]
    fn test_descendant_text_trims_each_piece() {
        let doc = Document::parse_html("<a href=\"/\">  Read <b> more </b> </a>");
        let a = find(&doc, "a");
        assert_eq!(doc.descendant_text(a), "Readmore");
    }

    #[test]
    fn test_outer_html_snippet() {
        let doc = Document::parse_html(r#"<p id="x">  Hi <img src="a.png"> <b>there</b></p>"#);
        let p = find(&doc, "p");
        assert_eq!(
            doc.outer_html(p),
            r#"<p id="x">Hi<img src="a.png"><b>there</b></p>"#
        );
    }

    #[test]
    fn test_outer_html_closes_void_root() {
        let doc = Document::parse_html(r#"<img src="a.png">"#);
        let img = find(&doc, "img");
        assert_eq!(doc.outer_html(img), r#"<img src="a.png"></img>"#);
    }

    #[test]
    fn test_outer_html_deep_nesting() {
        const DEPTH: usize = 50_000;
        let mut doc = Document::new();
        let main = doc.append_element(doc.root(), "main", Vec::<(&str, &str)>::new());
        let mut parent = main;
        for _ in 0..DEPTH {
            parent = doc.append_element(parent, "span", Vec::<(&str, &str)>::new());
        }
        doc.append_text(parent, "x");

        let html = doc.outer_html(main);
        let expected = format!("<main>{}x{}</main>", "<span>".repeat(DEPTH), "</span>".repeat(DEPTH));
        assert_eq!(html, expected);
        assert_eq!(doc.descendant_text(main), "x");
    }

    #[test]
    fn test_non_element_accessors() {
        let doc = Document::new();
        assert!(!doc.is_element(doc.root()));
        assert_eq!(doc.tag_name(doc.root()), None);
        assert!(doc.attrs(doc.root()).is_empty());
        assert_eq!(doc.node_count(), 1);
    }
}
