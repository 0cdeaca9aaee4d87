use std::collections::BTreeMap;

use crate::markup::MarkupNode;
use crate::parser::binding_target;

/// Attribute names that carry component semantics.
pub const QUASAR_PROPS: &[&str] = &[
    // Appearance
    "color", "text-color", "label", "dense", "dark", "flat", "outline", "outlined",
    "rounded", "round", "push", "glossy", "unelevated", "size", "fab", "stack",
    "no-caps", "icon", "icon-right", "align", "bordered", "square", "vertical",
    "active-color", "indicator-color",
    // State
    "disable", "disabled", "loading", "percentage", "dark-percentage", "indeterminate",
    "value", "checked", "keep-color", "toggle-indeterminate", "true-value",
    "false-value", "indeterminate-value", "persistent", "ratio", "label-always",
    // Fields
    "placeholder", "error", "error-message", "maxlength", "hint", "autogrow",
    "counter", "filled", "standout", "bottom-slots", "autocomplete", "prefix",
    "suffix", "type", "name", "options",
];

/// Semantic props of a node: whitelisted attributes plus the bare name of
/// every binding. Other attributes stay on the node for fallback text.
pub fn extract_props(node: &MarkupNode) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for (key, value) in &node.attributes {
        if QUASAR_PROPS.contains(&key.as_str()) {
            props.insert(key.clone(), value.clone());
        } else if let Some(bare) = binding_target(key) {
            // The parser already stored the bare key, possibly overridden by
            // a literal attribute; prefer that value.
            let value = node.attr(bare).unwrap_or(value);
            if !matches!(bare, "class" | "style") {
                props.insert(bare.to_string(), value.to_string());
            }
        }
    }
    props
}

/// Boolean-ish prop: present and not literally `false`.
pub fn is_truthy(props: &BTreeMap<String, String>, key: &str) -> bool {
    props.get(key).is_some_and(|v| v != "false")
}

pub fn prop<'a>(props: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}
