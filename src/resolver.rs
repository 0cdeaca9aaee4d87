use std::collections::BTreeMap;

use crate::markup::MarkupNode;
use crate::props::extract_props;
use crate::style::{parse_inline_style, ResolvedStyle};
use crate::theme::Palette;
use crate::utility::ClassRegistry;

/// Everything the builders need to style one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub props: BTreeMap<String, String>,
    /// Merged class styles, in class-list order.
    pub classes: ResolvedStyle,
    /// Inline `style` declarations.
    pub inline: ResolvedStyle,
}

impl NodeStyle {
    /// Class styles overlaid with inline styles.
    pub fn combined(&self) -> ResolvedStyle {
        let mut style = self.classes.clone();
        style.merge(&self.inline);
        style
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        crate::props::prop(&self.props, key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        crate::props::is_truthy(&self.props, key)
    }
}

/// Resolves props, class styles and inline styles of markup nodes.
///
/// Built once per conversion from an injected palette; immutable afterwards.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    registry: ClassRegistry,
}

impl StyleResolver {
    pub fn new(palette: Palette, preserve_theme_colors: bool) -> Self {
        Self {
            registry: ClassRegistry::new(palette, preserve_theme_colors),
        }
    }

    pub fn palette(&self) -> &Palette {
        self.registry.palette()
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn resolve_node_style(&self, node: &MarkupNode) -> NodeStyle {
        NodeStyle {
            props: extract_props(node),
            classes: self.registry.resolve_all(node.classes()),
            inline: node
                .attr("style")
                .map(|s| parse_inline_style(s, self.palette()))
                .unwrap_or_default(),
        }
    }

    pub fn resolve_class_style(&self, class: &str) -> Option<ResolvedStyle> {
        self.registry.resolve(class)
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(Palette::quasar(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::parser::parse_fragment;
    use pretty_assertions::assert_eq;

    fn node(markup: &str) -> MarkupNode {
        parse_fragment(markup).unwrap().remove(0)
    }

    #[test]
    fn test_inline_overrides_class() {
        let n = node(r#"<div class="q-pa-md bg-primary" style="padding-top: 2px; background-color: #000"></div>"#);
        let style = StyleResolver::default().resolve_node_style(&n);
        let combined = style.combined();
        assert_eq!(combined.padding(), [Some(2.0), Some(16.0), Some(16.0), Some(16.0)]);
        assert_eq!(combined.fill(), Some(Rgba::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let n = node(r#"<q-btn class="q-pa-md text-h6 row" style="gap: 4px" color="primary" />"#);
        let resolver = StyleResolver::default();
        assert_eq!(resolver.resolve_node_style(&n), resolver.resolve_node_style(&n));
    }

    #[test]
    fn test_props_and_flags() {
        let n = node(r#"<q-btn flat :dense="false" label="Go" />"#);
        let style = StyleResolver::default().resolve_node_style(&n);
        assert!(style.is_set("flat"));
        assert!(!style.is_set("dense"));
        assert_eq!(style.prop("label"), Some("Go"));
    }
}
