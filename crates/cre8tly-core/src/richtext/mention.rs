//! `@mention` mark linking a run of text to a community member.

use super::{AttrSpec, Attrs, HtmlTag, Mark, Node, SchemaKind, SchemaSpec};

/// Type name of the mention mark.
pub const MENTION: &str = "mention";

const DATA_TYPE: &str = "data-type";
const DATA_ID: &str = "data-id";
const DATA_LABEL: &str = "data-label";

fn to_html(attrs: &Attrs) -> Vec<(String, String)> {
    let mut out = vec![
        (DATA_TYPE.to_string(), MENTION.to_string()),
        ("class".to_string(), "mention".to_string()),
    ];
    if let Some(id) = attrs.get("id") {
        out.push((DATA_ID.to_string(), id.clone()));
    }
    if let Some(label) = attrs.get("label") {
        out.push((DATA_LABEL.to_string(), label.clone()));
    }
    out
}

fn from_html(tag: &HtmlTag) -> Option<Attrs> {
    if tag.get(DATA_TYPE) != Some(MENTION) {
        return None;
    }
    let mut attrs = Attrs::new();
    attrs.insert("id".to_string(), tag.get(DATA_ID)?.to_string());
    if let Some(label) = tag.get(DATA_LABEL) {
        attrs.insert("label".to_string(), label.to_string());
    }
    Some(attrs)
}

/// Descriptor for the mention mark.
pub fn mention_spec() -> SchemaSpec {
    SchemaSpec {
        name: MENTION,
        kind: SchemaKind::Mark,
        tag: "span",
        attributes: vec![AttrSpec::required("id"), AttrSpec::optional("label", None)],
        leaf: false,
        priority: 10,
        to_html,
        from_html,
    }
}

/// Text node `@label` carrying a mention of member `id`.
pub fn mention(id: &str, label: &str) -> Node {
    let mark = Mark::new(MENTION)
        .with_attr("id", id)
        .with_attr("label", label);
    Node::marked(format!("@{}", label), vec![mark])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::{Element, Parsed, SchemaRegistry};

    #[test]
    fn test_mention_renders_data_attributes() {
        let registry = SchemaRegistry::with_defaults();
        let nodes: Vec<Node> = vec![
            Element::new("paragraph")
                .with_child(Node::text("Thanks "))
                .with_child(mention("u_42", "maya"))
                .into(),
        ];
        assert_eq!(
            registry.to_html(&nodes).unwrap(),
            "<p>Thanks <span data-type=\"mention\" class=\"mention\" data-id=\"u_42\" data-label=\"maya\">@maya</span></p>"
        );
    }

    #[test]
    fn test_mention_parsed_from_span() {
        let registry = SchemaRegistry::with_defaults();
        let tag = HtmlTag::new("span")
            .attr("data-type", "mention")
            .attr("data-id", "u_7")
            .attr("data-label", "sam");
        assert_eq!(
            registry.parse_tag(&tag).unwrap(),
            Parsed::Mark(Mark::new(MENTION).with_attr("id", "u_7").with_attr("label", "sam"))
        );
    }

    #[test]
    fn test_span_without_marker_is_not_a_mention() {
        let registry = SchemaRegistry::with_defaults();
        assert!(registry.parse_tag(&HtmlTag::new("span").attr("data-id", "u_7")).is_err());
    }

    #[test]
    fn test_mention_requires_id() {
        let registry = SchemaRegistry::with_defaults();
        let nodes = vec![Node::marked("@x", vec![Mark::new(MENTION)])];
        assert!(registry.validate(&nodes).is_err());
    }
}
