//! Community post body.

use serde::{Deserialize, Serialize};

use super::{MENTION, Node, SUBSCRIBER_DIVIDER, SchemaError, SchemaRegistry};

/// A post: title plus top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub body: Vec<Node>,
}

impl Post {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: Vec::new() }
    }

    pub fn with_block(mut self, block: impl Into<Node>) -> Self {
        self.body.push(block.into());
        self
    }

    fn divider_index(&self) -> Option<usize> {
        self.body.iter().position(|n| n.is(SUBSCRIBER_DIVIDER))
    }

    /// Whether part of the post is reserved for subscribers.
    pub fn is_gated(&self) -> bool {
        self.divider_index().is_some()
    }

    /// Blocks visible to everyone: all blocks before the first divider.
    pub fn public_preview(&self) -> &[Node] {
        match self.divider_index() {
            Some(i) => &self.body[..i],
            None => &self.body,
        }
    }

    /// Blocks after the first divider. Empty for ungated posts.
    pub fn subscriber_content(&self) -> &[Node] {
        match self.divider_index() {
            Some(i) => &self.body[i + 1..],
            None => &[],
        }
    }

    /// Ids of mentioned members, in order of first appearance.
    pub fn mentions(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for block in &self.body {
            block.walk(&mut |node| {
                let Node::Text { marks, .. } = node else {
                    return;
                };
                for mark in marks.iter().filter(|m| m.name == MENTION) {
                    if let Some(id) = mark.attrs.get("id") {
                        if !ids.contains(&id.as_str()) {
                            ids.push(id);
                        }
                    }
                }
            });
        }
        ids
    }

    /// Full body as HTML.
    pub fn to_html(&self, registry: &SchemaRegistry) -> Result<String, SchemaError> {
        registry.to_html(&self.body)
    }

    /// Public part of the body as HTML.
    pub fn preview_html(&self, registry: &SchemaRegistry) -> Result<String, SchemaError> {
        registry.to_html(self.public_preview())
    }
}
