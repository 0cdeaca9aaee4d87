use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as HtmlToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};
use crate::markup::MarkupNode;

/// Elements that never have children, even without a self-closing slash.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const TEMPLATE_OPEN: &str = "<template";
const TEMPLATE_CLOSE: &str = "</template";

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_$][\w$]*$").unwrap())
}

/// The located template block of a single-file component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateSection<'a> {
    pub content: &'a str,
    /// 1-based line of the first content character in the full source.
    pub line: usize,
}

// ─── Public parse functions ──────────────────────────────────────────────────

/// Locate the template block and parse its first element into a tree.
pub fn parse_template(source: &str) -> ConvertResult<MarkupNode> {
    parse_template_with_defaults(source, &BTreeMap::new())
}

/// Like [`parse_template`], substituting literal prop defaults into bindings
/// whose expression is a bare prop name.
pub fn parse_template_with_defaults(
    source: &str,
    defaults: &BTreeMap<String, String>,
) -> ConvertResult<MarkupNode> {
    let section = extract_template(source)?;
    debug!(line = section.line, len = section.content.len(), "template located");
    let nodes = parse_fragment_at(section.content, section.line, defaults)?;
    nodes
        .into_iter()
        .find(MarkupNode::is_element)
        .ok_or(ConvertError::NoRootElement)
}

/// Parse a markup fragment into its top-level nodes.
pub fn parse_fragment(fragment: &str) -> ConvertResult<Vec<MarkupNode>> {
    parse_fragment_at(fragment, 1, &BTreeMap::new())
}

/// Find the outermost `<template>` block, counting nested slot templates so
/// that the matching close tag is used.
pub fn extract_template(source: &str) -> ConvertResult<TemplateSection<'_>> {
    let open = find_tag(source, TEMPLATE_OPEN, 0).ok_or(ConvertError::TemplateNotFound)?;
    let open_end = source[open..]
        .find('>')
        .map(|i| open + i + 1)
        .ok_or(ConvertError::TemplateNotFound)?;

    let mut depth = 1usize;
    let mut cursor = open_end;
    loop {
        let next_open = find_tag(source, TEMPLATE_OPEN, cursor);
        let next_close = source[cursor..].find(TEMPLATE_CLOSE).map(|i| cursor + i);

        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                // Nested `<template #slot>` blocks do not end the outer one.
                let self_closing = source[o..]
                    .find('>')
                    .is_some_and(|i| source[..o + i].ends_with('/'));
                if !self_closing {
                    depth += 1;
                }
                cursor = o + TEMPLATE_OPEN.len();
            }
            (_, Some(c)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(TemplateSection {
                        content: &source[open_end..c],
                        line: line_of(source, open_end),
                    });
                }
                cursor = c + TEMPLATE_CLOSE.len();
            }
            (_, None) => {
                return Err(ConvertError::UnterminatedTemplate {
                    line: line_of(source, open),
                })
            }
        }
    }
}

/// Find `needle` as a tag start: it must be followed by whitespace, `>` or `/`.
fn find_tag(source: &str, needle: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(i) = source[cursor..].find(needle) {
        let at = cursor + i;
        let after = source[at + needle.len()..].chars().next();
        if matches!(after, Some(c) if c.is_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        cursor = at + needle.len();
    }
    None
}

fn line_of(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].matches('\n').count() + 1
}

fn parse_fragment_at(
    fragment: &str,
    first_line: usize,
    defaults: &BTreeMap<String, String>,
) -> ConvertResult<Vec<MarkupNode>> {
    let tokens = tokenize(fragment, first_line)?;
    Ok(TreeBuilder::new(defaults).build(tokens))
}

// ─── Tokenizing ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    Close {
        name: String,
    },
    Text(String),
}

/// Run the HTML tokenizer over a fragment. Nesting is left to
/// [`TreeBuilder`]: slot `<template>` content stays in place and custom tags
/// honor the self-closing slash.
fn tokenize(fragment: &str, first_line: usize) -> ConvertResult<Vec<Token>> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from(fragment));

    let tokenizer = Tokenizer::new(TokenCollector::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let sink = &tokenizer.sink;
    sink.flush_text();
    if sink.unterminated.get() {
        let last_line = fragment.rsplit('\n').next().unwrap_or(fragment);
        return Err(ConvertError::ParseError {
            line: first_line + fragment.matches('\n').count(),
            column: last_line.chars().count() + 1,
            message: "Unexpected end of template inside a tag or comment".to_string(),
        });
    }
    Ok(sink.tokens.take())
}

#[derive(Default)]
struct TokenCollector {
    tokens: RefCell<Vec<Token>>,
    text: RefCell<String>,
    /// Set when input ends inside a tag or comment. A trailing `<` that the
    /// tokenizer gives back as text clears it.
    unterminated: Cell<bool>,
}

impl TokenCollector {
    fn flush_text(&self) {
        let mut text = self.text.borrow_mut();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.tokens.borrow_mut().push(Token::Text(trimmed.to_string()));
        }
        text.clear();
    }
}

impl TokenSink for TokenCollector {
    type Handle = ();

    fn process_token(&self, token: HtmlToken, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            HtmlToken::CharacterTokens(chars) => {
                self.unterminated.set(false);
                self.text.borrow_mut().push_str(&chars);
            }
            HtmlToken::TagToken(tag) => {
                self.flush_text();
                let name = tag.name.to_string();
                let token = match tag.kind {
                    TagKind::StartTag => Token::Open {
                        name,
                        attributes: tag
                            .attrs
                            .into_iter()
                            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                            .collect(),
                        self_closing: tag.self_closing,
                    },
                    TagKind::EndTag => Token::Close { name },
                };
                self.tokens.borrow_mut().push(token);
            }
            HtmlToken::CommentToken(_) => self.flush_text(),
            HtmlToken::ParseError(message) if message.contains("EOF") => {
                self.unterminated.set(true);
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

// ─── Tree building ───────────────────────────────────────────────────────────

struct TreeBuilder<'d> {
    defaults: &'d BTreeMap<String, String>,
    /// Open elements; index 0 is the synthetic fragment root.
    stack: Vec<MarkupNode>,
}

impl<'d> TreeBuilder<'d> {
    fn new(defaults: &'d BTreeMap<String, String>) -> Self {
        Self {
            defaults,
            stack: vec![MarkupNode::element("#fragment")],
        }
    }

    fn build(mut self, tokens: Vec<Token>) -> Vec<MarkupNode> {
        for token in tokens {
            match token {
                Token::Text(text) => self.append(MarkupNode::text(text)),
                Token::Open {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let mut node = MarkupNode::element(name);
                    node.attributes = normalize_attributes(attributes, self.defaults);
                    if self_closing || VOID_ELEMENTS.contains(&node.tag.as_str()) {
                        self.append(node);
                    } else {
                        self.stack.push(node);
                    }
                }
                Token::Close { name } => self.close(&name),
            }
        }
        while self.stack.len() > 1 {
            self.pop();
        }
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }

    fn append(&mut self, node: MarkupNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn pop(&mut self) {
        if let Some(node) = self.stack.pop() {
            self.append(node);
        }
    }

    /// Close the innermost open element with this tag and everything opened
    /// after it. Unmatched close tags are ignored.
    fn close(&mut self, name: &str) {
        let Some(index) = self.stack.iter().rposition(|n| n.tag == name) else {
            return;
        };
        if index == 0 {
            return;
        }
        while self.stack.len() > index {
            self.pop();
        }
    }
}

// ─── Attribute normalization ─────────────────────────────────────────────────

/// Bare property name for a binding attribute, if the key is one.
///
/// `:label`, `v-bind:label` and `v-model` rewrite to `label`, `label` and
/// `model`. Event handlers and slot directives are not properties.
pub fn binding_target(key: &str) -> Option<&str> {
    if key.starts_with("v-on:") || key.starts_with("v-slot") {
        return None;
    }
    let rest = key
        .strip_prefix("v-bind:")
        .or_else(|| key.strip_prefix(':'))
        .or_else(|| key.strip_prefix("v-"))?;
    // Drop modifiers such as `.trim` or `.sync`.
    let bare = rest.split('.').next().unwrap_or(rest);
    (!bare.is_empty()).then_some(bare)
}

/// Keep every attribute as written and add the bare key for each binding.
/// A literal attribute with the bare name wins over a bound one, and the
/// first binding for a name wins over later ones. Bound `class` and `style`
/// hold expressions, not class lists or declarations, so they get no bare key.
fn normalize_attributes(
    raw: Vec<(String, String)>,
    defaults: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for (key, value) in &raw {
        attributes.entry(key.clone()).or_insert_with(|| value.clone());
    }

    for (key, value) in &raw {
        let Some(bare) = binding_target(key) else {
            continue;
        };
        if matches!(bare, "class" | "style") || attributes.contains_key(bare) {
            continue;
        }
        let resolved = if identifier_regex().is_match(value) {
            defaults.get(value).cloned().unwrap_or_else(|| value.clone())
        } else {
            value.clone()
        };
        attributes.insert(bare.to_string(), resolved);
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_template() {
        let src = "<template>\n  <q-btn />\n</template>\n<script>export default {}</script>";
        let section = extract_template(src).unwrap();
        assert_eq!(section.content.trim(), "<q-btn />");
        assert_eq!(section.line, 1);
    }

    #[test]
    fn test_extract_template_with_nested_slot() {
        let src = "<template>\n<q-input>\n<template v-slot:append><q-icon /></template>\n</q-input>\n</template>";
        let section = extract_template(src).unwrap();
        assert!(section.content.contains("<q-icon />"));
        assert!(section.content.trim_end().ends_with("</q-input>"));
    }

    #[test]
    fn test_missing_template() {
        let result = parse_template("<script>export default {}</script>");
        assert_eq!(result.unwrap_err(), ConvertError::TemplateNotFound);
    }

    #[test]
    fn test_unterminated_template() {
        let result = extract_template("\n<template><div>");
        assert_eq!(
            result.unwrap_err(),
            ConvertError::UnterminatedTemplate { line: 2 }
        );
    }

    #[test]
    fn test_template_without_element_has_no_root() {
        let result = parse_template("<template>  just text  </template>");
        assert_eq!(result.unwrap_err(), ConvertError::NoRootElement);
    }

    #[test]
    fn test_parse_simple_button() {
        let root = parse_template("<template><q-btn flat color=\"primary\">Go</q-btn></template>")
            .unwrap();
        assert_eq!(root.tag, "q-btn");
        assert_eq!(root.attr("flat"), Some(""));
        assert_eq!(root.attr("color"), Some("primary"));
        assert_eq!(root.children, vec![MarkupNode::text("Go")]);
    }

    #[test]
    fn test_tag_names_lowercased_and_whitespace_stripped() {
        let nodes = parse_fragment("<Q-Card>\n   \n  <Q-Card-Section>Hi</Q-Card-Section>\n</Q-Card>")
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag, "q-card");
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].tag, "q-card-section");
    }

    #[test]
    fn test_comments_dropped_siblings_kept() {
        let nodes = parse_fragment("<div><!-- note --><span>a</span><!-- x --><span>b</span></div>")
            .unwrap();
        let spans: Vec<_> = nodes[0].element_children().collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text_content(), "b");
    }

    #[test]
    fn test_self_closing_and_void_elements() {
        let nodes = parse_fragment("<div><q-input label=\"A\" /><br><span>x</span></div>").unwrap();
        let tags: Vec<_> = nodes[0].children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["q-input", "br", "span"]);
    }

    #[test]
    fn test_unclosed_and_unmatched_tags() {
        let nodes = parse_fragment("<div><p>one</span><p>two</div>").unwrap();
        assert_eq!(nodes.len(), 1);
        let p = &nodes[0].children[0];
        assert_eq!(p.tag, "p");
        assert_eq!(p.children[0], MarkupNode::text("one"));
        assert_eq!(p.children[1].tag, "p");
    }

    #[test]
    fn test_binding_rewrite_keeps_both_keys() {
        let nodes = parse_fragment("<q-input :label=\"title\" v-model=\"name\" @update=\"save\" />")
            .unwrap();
        let attrs = &nodes[0].attributes;
        assert_eq!(attrs.get(":label").map(String::as_str), Some("title"));
        assert_eq!(attrs.get("label").map(String::as_str), Some("title"));
        assert_eq!(attrs.get("v-model").map(String::as_str), Some("name"));
        assert_eq!(attrs.get("model").map(String::as_str), Some("name"));
        assert_eq!(attrs.get("@update").map(String::as_str), Some("save"));
        assert!(!attrs.contains_key("update"));
    }

    #[test]
    fn test_bound_class_and_style_not_rewritten() {
        let nodes = parse_fragment("<div :class=\"{ on: active }\" :style=\"s\" />").unwrap();
        assert!(!nodes[0].has_attr("class"));
        assert!(!nodes[0].has_attr("style"));
        assert_eq!(nodes[0].attr(":class"), Some("{ on: active }"));
    }

    #[test]
    fn test_literal_attribute_wins_over_binding() {
        let nodes = parse_fragment("<q-btn :label=\"dynamic\" label=\"Static\" />").unwrap();
        assert_eq!(nodes[0].attr("label"), Some("Static"));
        assert_eq!(nodes[0].attr(":label"), Some("dynamic"));
    }

    #[test]
    fn test_binding_target() {
        assert_eq!(binding_target(":color"), Some("color"));
        assert_eq!(binding_target("v-bind:color"), Some("color"));
        assert_eq!(binding_target("v-model.trim"), Some("model"));
        assert_eq!(binding_target("v-on:click"), None);
        assert_eq!(binding_target("v-slot:append"), None);
        assert_eq!(binding_target("@click"), None);
        assert_eq!(binding_target("#header"), None);
        assert_eq!(binding_target("color"), None);
    }

    #[test]
    fn test_prop_default_substitution() {
        let mut defaults = BTreeMap::new();
        defaults.insert("title".to_string(), "Hello".to_string());
        let root = parse_template_with_defaults(
            "<template><q-btn :label=\"title\" :color=\"ok ? 'red' : 'blue'\" /></template>",
            &defaults,
        )
        .unwrap();
        assert_eq!(root.attr("label"), Some("Hello"));
        assert_eq!(root.attr("color"), Some("ok ? 'red' : 'blue'"));
    }

    #[test]
    fn test_entities_and_unquoted_values() {
        let nodes = parse_fragment("<span title=a&amp;b data-x=1>Tom &amp; Jerry</span>").unwrap();
        assert_eq!(nodes[0].attr("title"), Some("a&b"));
        assert_eq!(nodes[0].attr("data-x"), Some("1"));
        assert_eq!(nodes[0].text_content(), "Tom & Jerry");
    }

    #[test]
    fn test_unterminated_attribute_reports_position() {
        let err = parse_fragment("<div>\n  <q-btn label=\"oops>\n</div>").unwrap_err();
        assert!(matches!(err, ConvertError::ParseError { line: 3, column: 7, .. }));
    }

    #[test]
    fn test_unterminated_comment_is_an_error() {
        let err = parse_template("<template>\n<div><!-- open\n</div></template>").unwrap_err();
        assert!(matches!(err, ConvertError::ParseError { line: 3, column: 7, .. }));
    }

    #[test]
    fn test_trailing_less_than_is_text() {
        let nodes = parse_fragment("<span>x</span> a <").unwrap();
        assert_eq!(nodes[1], MarkupNode::text("a <"));
    }

    #[test]
    fn test_numeric_and_named_entities() {
        let nodes = parse_fragment("<span title=\"&copy; 2024\">Wait &#8212; &hellip; &#x41;</span>")
            .unwrap();
        assert_eq!(nodes[0].attr("title"), Some("\u{a9} 2024"));
        assert_eq!(nodes[0].text_content(), "Wait \u{2014} \u{2026} A");
    }

    #[test]
    fn test_custom_self_closing_tags_stay_siblings() {
        let nodes =
            parse_fragment("<q-card><q-input label=\"A\" /><q-input label=\"B\"/><q-btn /></q-card>")
                .unwrap();
        let tags: Vec<_> = nodes[0].children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["q-input", "q-input", "q-btn"]);
        assert!(nodes[0].children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_slot_template_kept_in_tree() {
        let root = parse_template(
            "<template><q-input><template v-slot:append><q-icon name=\"event\" /></template></q-input></template>",
        )
        .unwrap();
        let slot = &root.children[0];
        assert_eq!(slot.tag, "template");
        assert_eq!(slot.attr("v-slot:append"), Some(""));
        assert_eq!(slot.children[0].tag, "q-icon");
    }

    #[test]
    fn test_round_trip_literal_attributes() {
        let source = "<q-btn color=\"primary\" flat label=\"Go\" size=\"lg\" />";
        let first = parse_fragment(source).unwrap();
        let second = parse_fragment(&first[0].to_markup()).unwrap();
        assert_eq!(first[0].attributes, second[0].attributes);
    }

    #[test]
    fn test_less_than_in_text() {
        let nodes = parse_fragment("<span>a < b</span>").unwrap();
        assert_eq!(nodes[0].text_content(), "a < b");
    }
}
