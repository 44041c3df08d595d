//! Standard block and inline types for posts.

use url::Url;

use super::{AttrSpec, Attrs, HtmlTag, SchemaKind, SchemaSpec};

fn no_attrs(_: &Attrs) -> Vec<(String, String)> {
    Vec::new()
}

fn any_tag(_: &HtmlTag) -> Option<Attrs> {
    Some(Attrs::new())
}

/// Plain tag with no attributes.
fn simple(name: &'static str, kind: SchemaKind, tag: &'static str, leaf: bool) -> SchemaSpec {
    SchemaSpec {
        name,
        kind,
        tag,
        attributes: Vec::new(),
        leaf,
        priority: 0,
        to_html: no_attrs,
        from_html: any_tag,
    }
}

/// Schemes a link may point at. Relative links are always allowed.
const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `href` is safe to put in post HTML.
fn is_safe_href(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => LINK_SCHEMES.contains(&url.scheme()),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

fn link_to_html(attrs: &Attrs) -> Vec<(String, String)> {
    ["href", "target", "rel"]
        .into_iter()
        .filter_map(|key| attrs.get(key).map(|v| (key, v)))
        .filter(|(key, value)| *key != "href" || is_safe_href(value))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn link_from_html(tag: &HtmlTag) -> Option<Attrs> {
    let href = tag.get("href")?;
    if !is_safe_href(href) {
        log::warn!("Dropping link with disallowed href {:?}", href);
        return None;
    }
    let mut attrs = Attrs::new();
    attrs.insert("href".to_string(), href.to_string());
    for key in ["target", "rel"] {
        if let Some(value) = tag.get(key) {
            attrs.insert(key.to_string(), value.to_string());
        }
    }
    Some(attrs)
}

fn link() -> SchemaSpec {
    SchemaSpec {
        name: "link",
        kind: SchemaKind::Mark,
        tag: "a",
        attributes: vec![
            AttrSpec::required("href"),
            AttrSpec::optional("target", Some("_blank")),
            AttrSpec::optional("rel", Some("noopener noreferrer nofollow")),
        ],
        leaf: false,
        priority: 0,
        to_html: link_to_html,
        from_html: link_from_html,
    }
}

pub(super) fn all() -> Vec<SchemaSpec> {
    vec![
        simple("paragraph", SchemaKind::Node, "p", false),
        simple("heading", SchemaKind::Node, "h2", false),
        simple("subheading", SchemaKind::Node, "h3", false),
        simple("blockquote", SchemaKind::Node, "blockquote", false),
        simple("bullet_list", SchemaKind::Node, "ul", false),
        simple("ordered_list", SchemaKind::Node, "ol", false),
        simple("list_item", SchemaKind::Node, "li", false),
        simple("horizontal_rule", SchemaKind::Node, "hr", true),
        simple("hard_break", SchemaKind::Node, "br", true),
        simple("bold", SchemaKind::Mark, "strong", false),
        simple("italic", SchemaKind::Mark, "em", false),
        simple("underline", SchemaKind::Mark, "u", false),
        link(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::{Mark, Node, SchemaError, SchemaRegistry};

    #[test]
    fn test_safe_hrefs() {
        assert!(is_safe_href("https://cre8tlystudio.com/shop"));
        assert!(is_safe_href("mailto:hello@cre8tlystudio.com"));
        assert!(is_safe_href("/community/posts/42"));
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href("  JavaScript:alert(1)"));
        assert!(!is_safe_href("data:text/html,<b>x</b>"));
    }

    #[test]
    fn test_unsafe_href_not_parsed_as_link() {
        let registry = SchemaRegistry::with_defaults();
        let tag = HtmlTag::new("a").attr("href", "javascript:alert(1)");
        assert_eq!(
            registry.parse_tag(&tag),
            Err(SchemaError::Unmatched("a".to_string()))
        );
    }

    #[test]
    fn test_unsafe_href_dropped_when_rendering() {
        let registry = SchemaRegistry::with_defaults();
        let link = Mark::new("link").with_attr("href", "javascript:alert(1)");
        let html = registry.to_html(&[Node::marked("click", vec![link])]).unwrap();
        assert!(!html.contains("javascript"));
        assert!(html.starts_with("<a target=\"_blank\""));
        assert!(html.ends_with(">click</a>"));
    }
}
