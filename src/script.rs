use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Name used when the script block does not declare one.
pub const DEFAULT_COMPONENT_NAME: &str = "QuasarComponent";

static SCRIPT_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static PROPS_START_REGEX: OnceLock<Regex> = OnceLock::new();
static PROP_DEF_REGEX: OnceLock<Regex> = OnceLock::new();

fn script_block_regex() -> &'static Regex {
    SCRIPT_BLOCK_REGEX.get_or_init(|| Regex::new(r"<script[^>]*>([\s\S]*?)</script>").unwrap())
}

fn name_regex() -> &'static Regex {
    NAME_REGEX.get_or_init(|| Regex::new(r#"name:\s*['"]([^'"]+)['"]"#).unwrap())
}

fn props_start_regex() -> &'static Regex {
    PROPS_START_REGEX.get_or_init(|| Regex::new(r"props:\s*([\[{])").unwrap())
}

fn prop_def_regex() -> &'static Regex {
    PROP_DEF_REGEX.get_or_init(|| {
        Regex::new(r"^\s*['\x22]?([A-Za-z_$][\w$-]*)['\x22]?\s*:\s*([\s\S]+?)\s*$").unwrap()
    })
}

/// What the optional `<script>` block tells us about the component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropDef>,
}

impl Default for ScriptInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPONENT_NAME.to_string(),
            props: Vec::new(),
        }
    }
}

/// A declared component prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    pub name: String,
    pub prop_type: PropType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<PropDefault>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Function,
    Any,
}

impl PropType {
    fn from_constructor(name: &str) -> Self {
        match name.trim() {
            "String" => PropType::String,
            "Number" => PropType::Number,
            "Boolean" => PropType::Boolean,
            "Array" => PropType::Array,
            "Object" => PropType::Object,
            "Function" => PropType::Function,
            _ => PropType::Any,
        }
    }
}

/// A literal default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropDefault {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl PropDefault {
    fn parse(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        if let Some(inner) = strip_quotes(literal) {
            return Some(PropDefault::String(inner.to_string()));
        }
        match literal {
            "true" => return Some(PropDefault::Boolean(true)),
            "false" => return Some(PropDefault::Boolean(false)),
            _ => {}
        }
        literal.parse::<f64>().ok().map(PropDefault::Number)
    }

    /// Attribute-value spelling of the default.
    pub fn as_attribute(&self) -> String {
        match self {
            PropDefault::String(s) => s.clone(),
            PropDefault::Number(n) => n.to_string(),
            PropDefault::Boolean(b) => b.to_string(),
        }
    }
}

impl ScriptInfo {
    /// Literal prop defaults keyed by prop name.
    pub fn prop_defaults(&self) -> BTreeMap<String, String> {
        self.props
            .iter()
            .filter_map(|p| p.default.as_ref().map(|d| (p.name.clone(), d.as_attribute())))
            .collect()
    }
}

/// Extract the component name and props from the first `<script>` block.
/// Missing or unrecognized pieces fall back to defaults; this never fails.
pub fn extract_script_info(source: &str) -> ScriptInfo {
    let Some(script) = script_block_regex()
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return ScriptInfo::default();
    };

    let name = name_regex()
        .captures(script)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_COMPONENT_NAME.to_string());

    ScriptInfo {
        name,
        props: extract_props(script),
    }
}

fn extract_props(script: &str) -> Vec<PropDef> {
    let Some(m) = props_start_regex().find(script) else {
        return Vec::new();
    };
    let open = m.end() - 1;
    let Some(body) = balanced_block(script, open) else {
        return Vec::new();
    };

    if script[open..].starts_with('[') {
        // props: ['title', 'color']
        return split_top_level(body)
            .into_iter()
            .filter_map(strip_quotes)
            .map(|name| PropDef {
                name: name.to_string(),
                prop_type: PropType::Any,
                default: None,
                required: false,
            })
            .collect();
    }

    split_top_level(body)
        .into_iter()
        .filter_map(|entry| {
            let caps = prop_def_regex().captures(entry)?;
            let name = caps.get(1)?.as_str().to_string();
            let spec = caps.get(2)?.as_str();
            Some(parse_prop_spec(name, spec))
        })
        .collect()
}

fn parse_prop_spec(name: String, spec: &str) -> PropDef {
    let mut def = PropDef {
        name,
        prop_type: PropType::Any,
        default: None,
        required: false,
    };

    let Some(inner) = spec.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
        // title: String
        def.prop_type = PropType::from_constructor(spec);
        return def;
    };

    for field in split_top_level(inner) {
        let Some((key, value)) = field.split_once(':') else {
            continue;
        };
        match key.trim() {
            "type" => def.prop_type = PropType::from_constructor(value),
            "default" => def.default = PropDefault::parse(value),
            "required" => def.required = value.trim() == "true",
            _ => {}
        }
    }
    def
}

/// Contents between the bracket at `open` and its match, exclusive.
fn balanced_block(s: &str, open: usize) -> Option<&str> {
    let opener = s[open..].chars().next()?;
    let closer = match opener {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        if c == opener {
            depth += 1;
        } else if c == closer {
            depth -= 1;
            if depth == 0 {
                return Some(&s[open + 1..open + i]);
            }
        }
    }
    None
}

/// Split on commas that are not nested inside brackets or quotes.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '{' | '[' | '(') => depth += 1,
            (None, '}' | ']' | ')') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn strip_quotes(s: &str) -> Option<&str> {
    let s = s.trim();
    ['\'', '"', '`']
        .iter()
        .find_map(|q| s.strip_prefix(*q).and_then(|r| r.strip_suffix(*q)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = r#"
<template><q-btn :label="title" /></template>
<script>
export default {
  name: 'SaveButton',
  props: {
    title: { type: String, default: 'Save' },
    size: { type: Number, default: 2, required: true },
    flat: Boolean,
    items: { type: Array, default: () => [] }
  },
  data() { return { other: { name: 'ignored' } } }
}
</script>
"#;

    #[test]
    fn test_extract_name_and_props() {
        let info = extract_script_info(SOURCE);
        assert_eq!(info.name, "SaveButton");
        assert_eq!(info.props.len(), 4);
        assert_eq!(info.props[0].prop_type, PropType::String);
        assert_eq!(
            info.props[0].default,
            Some(PropDefault::String("Save".into()))
        );
        assert!(info.props[1].required);
        assert_eq!(info.props[2].prop_type, PropType::Boolean);
        assert_eq!(info.props[3].default, None);
    }

    #[test]
    fn test_prop_defaults_map() {
        let defaults = extract_script_info(SOURCE).prop_defaults();
        assert_eq!(defaults.get("title").map(String::as_str), Some("Save"));
        assert_eq!(defaults.get("size").map(String::as_str), Some("2"));
        assert!(!defaults.contains_key("flat"));
    }

    #[test]
    fn test_array_props() {
        let info = extract_script_info("<script>export default { props: ['a', \"b\"] }</script>");
        let names: Vec<_> = info.props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(info.name, DEFAULT_COMPONENT_NAME);
    }

    #[test]
    fn test_missing_script() {
        assert_eq!(extract_script_info("<template><div/></template>"), ScriptInfo::default());
    }
}
