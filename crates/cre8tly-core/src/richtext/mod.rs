//! Rich-text document model for community posts.
//!
//! Node and mark types are plain descriptors ([`SchemaSpec`]) registered in
//! a [`SchemaRegistry`]. Each descriptor names its HTML tag, its attributes
//! and the functions that turn attributes into HTML and back, so adding a
//! type is a matter of registering another descriptor.

mod builtins;
mod divider;
mod mention;
mod post;

pub use divider::{SUBSCRIBER_DIVIDER, subscriber_divider, subscriber_divider_spec};
pub use mention::{MENTION, mention, mention_spec};
pub use post::Post;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Attribute map shared by nodes, marks and raw HTML tags.
pub type Attrs = BTreeMap<String, String>;

/// Schema errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Type already registered: {0}")]
    Duplicate(String),
    #[error("Unknown type: {0}")]
    Unknown(String),
    #[error("{kind} {name} used as a {expected}")]
    WrongKind {
        name: String,
        kind: SchemaKind,
        expected: SchemaKind,
    },
    #[error("{name} is missing required attribute {attr}")]
    MissingAttribute { name: String, attr: String },
    #[error("{0} cannot have children")]
    LeafWithChildren(String),
    #[error("No type matches <{0}>")]
    Unmatched(String),
}

/// Whether a type is a block/inline node or a mark on text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Node,
    Mark,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SchemaKind::Node => "node",
            SchemaKind::Mark => "mark",
        })
    }
}

/// An attribute a type understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub name: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl AttrSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true, default: None }
    }

    pub const fn optional(name: &'static str, default: Option<&'static str>) -> Self {
        Self { name, required: false, default }
    }
}

/// A tag as seen by an HTML tokenizer: name plus attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlTag {
    pub name: String,
    pub attrs: Attrs,
}

impl HtmlTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Attrs::new(),
        }
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Descriptor for one node or mark type.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    /// Type name used in the document model.
    pub name: &'static str,
    pub kind: SchemaKind,
    /// HTML tag the type renders to.
    pub tag: &'static str,
    pub attributes: Vec<AttrSpec>,
    /// Leaf nodes render as void tags and cannot hold children.
    pub leaf: bool,
    /// Higher priorities are tried first when matching HTML tags.
    pub priority: u8,
    /// HTML attributes to emit for the given model attributes.
    pub to_html: fn(&Attrs) -> Vec<(String, String)>,
    /// Model attributes if `tag` is an instance of this type.
    pub from_html: fn(&HtmlTag) -> Option<Attrs>,
}

impl SchemaSpec {
    /// Fill in defaults and check required attributes.
    pub fn normalize(&self, attrs: &Attrs) -> Result<Attrs, SchemaError> {
        let mut out = attrs.clone();
        for spec in &self.attributes {
            if out.contains_key(spec.name) {
                continue;
            }
            match spec.default {
                Some(default) => {
                    out.insert(spec.name.to_string(), default.to_string());
                }
                None if spec.required => {
                    return Err(SchemaError::MissingAttribute {
                        name: self.name.to_string(),
                        attr: spec.name.to_string(),
                    });
                }
                None => {}
            }
        }
        Ok(out)
    }

    fn open_tag(&self, attrs: &Attrs) -> String {
        let mut html = format!("<{}", self.tag);
        for (key, value) in (self.to_html)(attrs) {
            html.push_str(&format!(" {}=\"{}\"", key, escape_attr(&value)));
        }
        html.push('>');
        html
    }

    fn close_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// A mark applied to a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: Attrs::new() }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }
}

/// A typed element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: Attrs::new(), children: Vec::new() }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Document tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into(), marks: Vec::new() }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text { text: text.into(), marks }
    }

    /// Whether this is an element of type `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Node::Element(e) if e.name == name)
    }

    /// Visit this node and all descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        if let Node::Element(element) = self {
            for child in &element.children {
                child.walk(visit);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Result of matching an HTML tag against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Node(Element),
    Mark(Mark),
}

/// Registry of node and mark descriptors.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    specs: Vec<SchemaSpec>,
}

impl SchemaRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard post types plus mentions and the
    /// subscriber divider.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for spec in builtins::all()
            .into_iter()
            .chain([mention_spec(), subscriber_divider_spec()])
        {
            if let Err(e) = registry.register(spec) {
                log::error!("Skipping built-in type: {}", e);
            }
        }
        registry
    }

    pub fn register(&mut self, spec: SchemaSpec) -> Result<(), SchemaError> {
        if self.get(spec.name).is_some() {
            return Err(SchemaError::Duplicate(spec.name.to_string()));
        }
        log::debug!("Registered {} type {}", spec.kind, spec.name);
        self.specs.push(spec);
        // Stable sort keeps registration order among equal priorities.
        self.specs.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    fn get_kind(&self, name: &str, expected: SchemaKind) -> Result<&SchemaSpec, SchemaError> {
        let spec = self
            .get(name)
            .ok_or_else(|| SchemaError::Unknown(name.to_string()))?;
        if spec.kind != expected {
            return Err(SchemaError::WrongKind {
                name: name.to_string(),
                kind: spec.kind,
                expected,
            });
        }
        Ok(spec)
    }

    /// Names of all registered types, highest priority first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|s| s.name)
    }

    /// Match a raw HTML tag to a registered type.
    pub fn parse_tag(&self, tag: &HtmlTag) -> Result<Parsed, SchemaError> {
        for spec in self.specs.iter().filter(|s| s.tag == tag.name) {
            let Some(attrs) = (spec.from_html)(tag) else {
                continue;
            };
            let attrs = spec.normalize(&attrs)?;
            return Ok(match spec.kind {
                SchemaKind::Node => Parsed::Node(Element {
                    name: spec.name.to_string(),
                    attrs,
                    children: Vec::new(),
                }),
                SchemaKind::Mark => Parsed::Mark(Mark {
                    name: spec.name.to_string(),
                    attrs,
                }),
            });
        }
        Err(SchemaError::Unmatched(tag.name.clone()))
    }

    /// Check a tree against the registered types.
    pub fn validate(&self, nodes: &[Node]) -> Result<(), SchemaError> {
        for node in nodes {
            match node {
                Node::Text { marks, .. } => {
                    for mark in marks {
                        self.get_kind(&mark.name, SchemaKind::Mark)?.normalize(&mark.attrs)?;
                    }
                }
                Node::Element(element) => {
                    let spec = self.get_kind(&element.name, SchemaKind::Node)?;
                    spec.normalize(&element.attrs)?;
                    if spec.leaf && !element.children.is_empty() {
                        return Err(SchemaError::LeafWithChildren(element.name.clone()));
                    }
                    self.validate(&element.children)?;
                }
            }
        }
        Ok(())
    }

    /// Serialize a tree to HTML.
    pub fn to_html(&self, nodes: &[Node]) -> Result<String, SchemaError> {
        let mut html = String::new();
        for node in nodes {
            self.write_node(node, &mut html)?;
        }
        Ok(html)
    }

    fn write_node(&self, node: &Node, html: &mut String) -> Result<(), SchemaError> {
        match node {
            Node::Text { text, marks } => {
                let mut specs = Vec::with_capacity(marks.len());
                for mark in marks {
                    let spec = self.get_kind(&mark.name, SchemaKind::Mark)?;
                    let attrs = spec.normalize(&mark.attrs)?;
                    html.push_str(&spec.open_tag(&attrs));
                    specs.push(spec);
                }
                html.push_str(&escape_text(text));
                for spec in specs.iter().rev() {
                    html.push_str(&spec.close_tag());
                }
            }
            Node::Element(element) => {
                let spec = self.get_kind(&element.name, SchemaKind::Node)?;
                let attrs = spec.normalize(&element.attrs)?;
                html.push_str(&spec.open_tag(&attrs));
                if spec.leaf {
                    if !element.children.is_empty() {
                        return Err(SchemaError::LeafWithChildren(element.name.clone()));
                    }
                    return Ok(());
                }
                for child in &element.children {
                    self.write_node(child, html)?;
                }
                html.push_str(&spec.close_tag());
            }
        }
        Ok(())
    }
}

/// Escape text content for HTML.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Node {
        Element::new("paragraph").with_child(Node::text(text)).into()
    }

    #[test]
    fn test_render_paragraph_with_marks() {
        let registry = SchemaRegistry::with_defaults();
        let nodes: Vec<Node> = vec![
            Element::new("paragraph")
                .with_child(Node::text("Hello "))
                .with_child(Node::marked("world", vec![Mark::new("bold"), Mark::new("italic")]))
                .into(),
        ];
        assert_eq!(
            registry.to_html(&nodes).unwrap(),
            "<p>Hello <strong><em>world</em></strong></p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let registry = SchemaRegistry::with_defaults();
        let html = registry.to_html(&[paragraph("a < b & c")]).unwrap();
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_attr_is_escaped() {
        let registry = SchemaRegistry::with_defaults();
        let link = Mark::new("link").with_attr("href", "https://x.example/?q=\"a\"");
        let html = registry
            .to_html(&[Node::marked("x", vec![link])])
            .unwrap();
        assert!(html.contains("href=\"https://x.example/?q=&quot;a&quot;\""));
    }

    #[test]
    fn test_unknown_type() {
        let registry = SchemaRegistry::with_defaults();
        let nodes = vec![Node::Element(Element::new("marquee"))];
        assert_eq!(
            registry.validate(&nodes),
            Err(SchemaError::Unknown("marquee".to_string()))
        );
    }

    #[test]
    fn test_mark_used_as_node() {
        let registry = SchemaRegistry::with_defaults();
        let nodes = vec![Node::Element(Element::new("bold"))];
        assert!(matches!(
            registry.validate(&nodes),
            Err(SchemaError::WrongKind { expected: SchemaKind::Node, .. })
        ));
    }

    #[test]
    fn test_defaults_register_every_builtin() {
        let registry = SchemaRegistry::with_defaults();
        let names: Vec<&str> = registry.names().collect();
        let unique: std::collections::BTreeSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), builtins::all().len() + 2);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = SchemaRegistry::with_defaults();
        assert_eq!(
            registry.register(mention_spec()),
            Err(SchemaError::Duplicate(MENTION.to_string()))
        );
    }

    #[test]
    fn test_headings() {
        let registry = SchemaRegistry::with_defaults();
        let nodes: Vec<Node> = vec![Element::new("heading").with_child(Node::text("Title")).into()];
        assert_eq!(registry.to_html(&nodes).unwrap(), "<h2>Title</h2>");

        let parsed = registry.parse_tag(&HtmlTag::new("H3")).unwrap();
        assert_eq!(parsed, Parsed::Node(Element::new("subheading")));
    }

    #[test]
    fn test_link_defaults_and_required_href() {
        let registry = SchemaRegistry::with_defaults();
        let parsed = registry
            .parse_tag(&HtmlTag::new("a").attr("href", "https://cre8tlystudio.com"))
            .unwrap();
        let Parsed::Mark(mark) = parsed else {
            panic!("expected a mark");
        };
        assert_eq!(mark.attrs.get("target").map(String::as_str), Some("_blank"));

        let missing = vec![Node::marked("x", vec![Mark::new("link")])];
        assert!(matches!(
            registry.validate(&missing),
            Err(SchemaError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_plain_hr_is_rule_not_divider() {
        let registry = SchemaRegistry::with_defaults();
        let parsed = registry.parse_tag(&HtmlTag::new("hr")).unwrap();
        assert_eq!(parsed, Parsed::Node(Element::new("horizontal_rule")));
    }

    #[test]
    fn test_unmatched_tag() {
        let registry = SchemaRegistry::with_defaults();
        assert_eq!(
            registry.parse_tag(&HtmlTag::new("blink")),
            Err(SchemaError::Unmatched("blink".to_string()))
        );
    }

    #[test]
    fn test_tree_serde() {
        let nodes = vec![paragraph("hi")];
        let json = serde_json::to_string(&nodes).unwrap();
        let back: Vec<Node> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nodes);
    }
}
