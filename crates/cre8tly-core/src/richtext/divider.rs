//! Divider separating the public part of a post from subscriber-only content.

use super::{AttrSpec, Attrs, Element, HtmlTag, Node, SchemaKind, SchemaSpec};

/// Type name of the subscriber divider node.
pub const SUBSCRIBER_DIVIDER: &str = "subscriber_divider";

const MARKER: &str = "subscriber-divider";

fn to_html(attrs: &Attrs) -> Vec<(String, String)> {
    let mut out = vec![
        ("data-type".to_string(), MARKER.to_string()),
        ("class".to_string(), "subscriber-divider".to_string()),
    ];
    if let Some(label) = attrs.get("label") {
        out.push(("data-label".to_string(), label.clone()));
    }
    out
}

fn from_html(tag: &HtmlTag) -> Option<Attrs> {
    if tag.get("data-type") != Some(MARKER) {
        return None;
    }
    let mut attrs = Attrs::new();
    if let Some(label) = tag.get("data-label") {
        attrs.insert("label".to_string(), label.to_string());
    }
    Some(attrs)
}

/// Descriptor for the subscriber divider.
pub fn subscriber_divider_spec() -> SchemaSpec {
    SchemaSpec {
        name: SUBSCRIBER_DIVIDER,
        kind: SchemaKind::Node,
        tag: "hr",
        attributes: vec![AttrSpec::optional("label", Some("Subscribers only"))],
        leaf: true,
        // Must win over the plain horizontal rule.
        priority: 10,
        to_html,
        from_html,
    }
}

/// A subscriber divider node.
pub fn subscriber_divider() -> Node {
    Element::new(SUBSCRIBER_DIVIDER).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::{Parsed, SchemaError, SchemaRegistry};

    #[test]
    fn test_divider_renders_void_tag_with_default_label() {
        let registry = SchemaRegistry::with_defaults();
        assert_eq!(
            registry.to_html(&[subscriber_divider()]).unwrap(),
            "<hr data-type=\"subscriber-divider\" class=\"subscriber-divider\" data-label=\"Subscribers only\">"
        );
    }

    #[test]
    fn test_divider_parsed_before_plain_rule() {
        let registry = SchemaRegistry::with_defaults();
        let tag = HtmlTag::new("hr").attr("data-type", "subscriber-divider");
        assert_eq!(
            registry.parse_tag(&tag).unwrap(),
            Parsed::Node(Element::new(SUBSCRIBER_DIVIDER).with_attr("label", "Subscribers only"))
        );
    }

    #[test]
    fn test_divider_cannot_have_children() {
        let registry = SchemaRegistry::with_defaults();
        let bad: Vec<Node> = vec![Element::new(SUBSCRIBER_DIVIDER).with_child(Node::text("x")).into()];
        assert_eq!(
            registry.validate(&bad),
            Err(SchemaError::LeafWithChildren(SUBSCRIBER_DIVIDER.to_string()))
        );
    }
}
