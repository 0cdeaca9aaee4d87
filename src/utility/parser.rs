use std::collections::HashSet;

use crate::markup::MarkupNode;

/// Every class token used in the tree, each exactly once, in order of first
/// appearance (depth first, document order).
pub fn collect_classes(root: &MarkupNode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();
    walk(root, &mut seen, &mut classes);
    classes
}

fn walk(node: &MarkupNode, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    for class in node.classes() {
        if seen.insert(class.to_string()) {
            out.push(class.to_string());
        }
    }
    for child in node.element_children() {
        walk(child, seen, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_in_order() {
        let nodes = parse_fragment(r#"<div class="row q-pa-md"><q-btn class="q-ml-sm row" /></div>"#)
            .unwrap();
        assert_eq!(collect_classes(&nodes[0]), vec!["row", "q-pa-md", "q-ml-sm"]);
    }

    #[test]
    fn ignores_bound_class() {
        let nodes = parse_fragment(r#"<div class="card" :class="{ active: on }"></div>"#).unwrap();
        assert_eq!(collect_classes(&nodes[0]), vec!["card"]);
    }
}
