use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Tag used for text runs.
pub const TEXT_TAG: &str = "#text";

/// One parsed template element or text run.
///
/// A text node has `tag == "#text"`, a trimmed `text` payload and no
/// children. Every other node is an element whose children keep document
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MarkupNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MarkupNode {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: Some(content.into()),
        }
    }

    /// Builder-style attribute setter, used for synthesized fallback nodes.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn is_element(&self) -> bool {
        !self.is_text()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Whitespace-separated tokens of the `class` attribute, in source order.
    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Element children only, skipping text runs.
    pub fn element_children(&self) -> impl Iterator<Item = &MarkupNode> {
        self.children.iter().filter(|c| c.is_element())
    }

    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a MarkupNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First descendant (or self) with the given tag, in document order.
    pub fn find(&self, tag: &str) -> Option<&MarkupNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.find_descendant(tag)
    }

    /// First strict descendant with the given tag, in document order.
    pub fn find_descendant(&self, tag: &str) -> Option<&MarkupNode> {
        self.children.iter().find_map(|c| c.find(tag))
    }

    /// Text of the first direct text child.
    pub fn first_text(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.is_text())
            .and_then(|c| c.text.as_deref())
    }

    /// All text under this node, joined with single spaces.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(text) = &self.text {
            if !text.is_empty() {
                out.push(text);
            }
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// True when the node only holds text runs (at least one).
    pub fn is_text_only(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(|c| c.is_text())
    }

    /// Re-serialize the node back to markup. Attributes are written in key
    /// order; empty values are written as boolean attributes.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
            return;
        }
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            if !value.is_empty() {
                let _ = write!(out, "=\"{}\"", value.replace('"', "&quot;"));
            }
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    /// Indented outline of the tree, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.text {
            Some(text) => {
                let _ = writeln!(out, "{indent}\"{text}\"");
            }
            None => {
                let _ = write!(out, "{indent}<{}", self.tag);
                for (key, value) in &self.attributes {
                    if value.is_empty() {
                        let _ = write!(out, " {key}");
                    } else {
                        let _ = write!(out, " {key}=\"{value}\"");
                    }
                }
                out.push_str(">\n");
                for child in &self.children {
                    child.write_outline(out, depth + 1);
                }
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> MarkupNode {
        MarkupNode::element("q-card")
            .with_attr("class", "bg-primary q-pa-md")
            .with_child(
                MarkupNode::element("q-card-section")
                    .with_child(MarkupNode::text("Title"))
                    .with_child(MarkupNode::element("q-btn").with_attr("label", "Go")),
            )
    }

    #[test]
    fn test_find_walks_document_order() {
        let node = sample();
        assert_eq!(node.find("q-btn").and_then(|b| b.attr("label")), Some("Go"));
        assert!(node.find_descendant("q-card").is_none());
        assert!(node.find("q-card").is_some());
    }

    #[test]
    fn test_classes_split() {
        let node = sample();
        assert_eq!(node.classes(), vec!["bg-primary", "q-pa-md"]);
        assert!(node.has_class("q-pa-md"));
        assert!(!node.has_class("q-pa"));
    }

    #[test]
    fn test_text_content_joins_runs() {
        let node = sample();
        assert_eq!(node.text_content(), "Title");
        assert_eq!(node.children[0].first_text(), Some("Title"));
    }

    #[test]
    fn test_to_markup() {
        let node = MarkupNode::element("q-btn")
            .with_attr("flat", "")
            .with_attr("label", "Say \"hi\"");
        assert_eq!(node.to_markup(), "<q-btn flat label=\"Say &quot;hi&quot;\" />");
    }

    #[test]
    fn test_outline() {
        let node = MarkupNode::element("q-list")
            .with_child(MarkupNode::element("q-item").with_child(MarkupNode::text("One")));
        assert_eq!(node.outline(), "<q-list>\n  <q-item>\n    \"One\"\n");
    }
}
