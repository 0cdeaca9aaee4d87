//! # Quasar utility classes
//!
//! Resolves the small, fixed vocabulary of Quasar CSS utility classes to
//! [`ResolvedStyle`](crate::style::ResolvedStyle) maps.
//!
//! ## Families, in priority order
//! - **Spacing** — `q-{m|p}{a|t|r|b|l|x|y}?-{none|xs|sm|md|lg|xl}`
//! - **Typography** — `text-h1` … `text-h6`, `text-subtitle1/2`, `text-body1/2`, `text-caption`, `text-overline`
//! - **Theme colors** — `bg-{name}`, `text-{name}` over the 11 palette colors
//! - **Flex** — `row`, `column`, `items-*`, `justify-*`, `content-*`
//! - **Text alignment** — `text-left`, `text-right`, `text-center`, `text-justify`
//!
//! ## Usage
//! ```ignore
//! let registry = ClassRegistry::new(Palette::quasar(), true);
//! let style = registry.resolve_all(["q-pa-md", "text-h6"]);
//! ```

pub mod parser;
pub mod registry;
pub mod spacing;
pub mod typography;

pub use registry::ClassRegistry;

/// Classes used anywhere in `root` that no family recognises, in order of
/// first appearance.
pub fn unrecognized_classes(registry: &ClassRegistry, root: &crate::markup::MarkupNode) -> Vec<String> {
    parser::collect_classes(root)
        .into_iter()
        .filter(|class| registry.resolve(class).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;
    use crate::theme::Palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_unknown_classes_once() {
        let nodes = parse_fragment(
            r#"<div class="q-pa-md fancy"><span class="text-h6 fancy shiny"></span></div>"#,
        )
        .unwrap();
        let registry = ClassRegistry::new(Palette::quasar(), true);
        assert_eq!(unrecognized_classes(&registry, &nodes[0]), vec!["fancy", "shiny"]);
    }

    #[test]
    fn nothing_to_report() {
        let nodes = parse_fragment(r#"<div class="row items-center"></div>"#).unwrap();
        let registry = ClassRegistry::new(Palette::quasar(), true);
        assert!(unrecognized_classes(&registry, &nodes[0]).is_empty());
    }
}
