use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::trace;

use crate::color::{parse_css_color, Rgb, Rgba};
use crate::scene::{AxisAlign, Effect, FontName, FontWeight, LayoutMode, Paint, SizingMode, SceneNode, TextAlign, TextCase};
use crate::theme::Palette;

/// Pixels per `em`/`rem`.
pub const PX_PER_EM: f64 = 16.0;

static LENGTH_REGEX: OnceLock<Regex> = OnceLock::new();

fn length_regex() -> &'static Regex {
    LENGTH_REGEX.get_or_init(|| Regex::new(r"^(-?\d+(?:\.\d+)?)(px|em|rem|vh|vw|%)$").unwrap())
}

/// One normalized style property. Every variant maps onto a fixed
/// [`SceneNode`] field in [`ResolvedStyle::apply_to`]; anything else is kept
/// as `Unsupported` and ignored there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum StyleProperty {
    // Box model
    PaddingTop(f64),
    PaddingRight(f64),
    PaddingBottom(f64),
    PaddingLeft(f64),
    MarginTop(f64),
    MarginRight(f64),
    MarginBottom(f64),
    MarginLeft(f64),
    Width(f64),
    Height(f64),
    CornerRadius(f64),
    ItemSpacing(f64),

    // Typography
    FontSize(f64),
    FontWeight(FontWeight),
    LetterSpacing(f64),
    LineHeight(f64),
    TextCase(TextCase),
    TextAlign(TextAlign),

    // Paint
    Fill(Rgba),
    TextColor(Rgba),
    StrokeColor(Rgba),
    StrokeWeight(f64),
    Opacity(f64),
    Effects(Vec<Effect>),

    // Auto layout
    LayoutMode(LayoutMode),
    PrimaryAlign(AxisAlign),
    CounterAlign(AxisAlign),
    CounterAlignContent(AxisAlign),

    Unsupported { name: String, value: String },
}

/// Map key of a [`StyleProperty`]; one slot per variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Width,
    Height,
    CornerRadius,
    ItemSpacing,
    FontSize,
    FontWeight,
    LetterSpacing,
    LineHeight,
    TextCase,
    TextAlign,
    Fill,
    TextColor,
    StrokeColor,
    StrokeWeight,
    Opacity,
    Effects,
    LayoutMode,
    PrimaryAlign,
    CounterAlign,
    CounterAlignContent,
    Unsupported(String),
}

impl StyleProperty {
    pub fn key(&self) -> StyleKey {
        match self {
            StyleProperty::PaddingTop(_) => StyleKey::PaddingTop,
            StyleProperty::PaddingRight(_) => StyleKey::PaddingRight,
            StyleProperty::PaddingBottom(_) => StyleKey::PaddingBottom,
            StyleProperty::PaddingLeft(_) => StyleKey::PaddingLeft,
            StyleProperty::MarginTop(_) => StyleKey::MarginTop,
            StyleProperty::MarginRight(_) => StyleKey::MarginRight,
            StyleProperty::MarginBottom(_) => StyleKey::MarginBottom,
            StyleProperty::MarginLeft(_) => StyleKey::MarginLeft,
            StyleProperty::Width(_) => StyleKey::Width,
            StyleProperty::Height(_) => StyleKey::Height,
            StyleProperty::CornerRadius(_) => StyleKey::CornerRadius,
            StyleProperty::ItemSpacing(_) => StyleKey::ItemSpacing,
            StyleProperty::FontSize(_) => StyleKey::FontSize,
            StyleProperty::FontWeight(_) => StyleKey::FontWeight,
            StyleProperty::LetterSpacing(_) => StyleKey::LetterSpacing,
            StyleProperty::LineHeight(_) => StyleKey::LineHeight,
            StyleProperty::TextCase(_) => StyleKey::TextCase,
            StyleProperty::TextAlign(_) => StyleKey::TextAlign,
            StyleProperty::Fill(_) => StyleKey::Fill,
            StyleProperty::TextColor(_) => StyleKey::TextColor,
            StyleProperty::StrokeColor(_) => StyleKey::StrokeColor,
            StyleProperty::StrokeWeight(_) => StyleKey::StrokeWeight,
            StyleProperty::Opacity(_) => StyleKey::Opacity,
            StyleProperty::Effects(_) => StyleKey::Effects,
            StyleProperty::LayoutMode(_) => StyleKey::LayoutMode,
            StyleProperty::PrimaryAlign(_) => StyleKey::PrimaryAlign,
            StyleProperty::CounterAlign(_) => StyleKey::CounterAlign,
            StyleProperty::CounterAlignContent(_) => StyleKey::CounterAlignContent,
            StyleProperty::Unsupported { name, .. } => StyleKey::Unsupported(name.clone()),
        }
    }

    /// True for properties that only make sense on text nodes.
    pub fn is_typography(&self) -> bool {
        matches!(
            self,
            StyleProperty::FontSize(_)
                | StyleProperty::FontWeight(_)
                | StyleProperty::LetterSpacing(_)
                | StyleProperty::LineHeight(_)
                | StyleProperty::TextCase(_)
                | StyleProperty::TextAlign(_)
                | StyleProperty::TextColor(_)
        )
    }
}

/// Normalized style map of one node. Inserting a property replaces any
/// earlier property with the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    entries: BTreeMap<StyleKey, StyleProperty>,
}

impl ResolvedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(props: impl IntoIterator<Item = StyleProperty>) -> Self {
        let mut style = Self::new();
        for prop in props {
            style.insert(prop);
        }
        style
    }

    pub fn insert(&mut self, prop: StyleProperty) {
        self.entries.insert(prop.key(), prop);
    }

    /// Overlay `other` on top of `self`; `other` wins on shared keys.
    pub fn merge(&mut self, other: &ResolvedStyle) {
        for prop in other.entries.values() {
            self.insert(prop.clone());
        }
    }

    pub fn get(&self, key: &StyleKey) -> Option<&StyleProperty> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.entries.values()
    }

    // ─── Typed accessors ─────────────────────────────────────────────────────

    pub fn fill(&self) -> Option<Rgba> {
        match self.get(&StyleKey::Fill) {
            Some(StyleProperty::Fill(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn text_color(&self) -> Option<Rgb> {
        match self.get(&StyleKey::TextColor) {
            Some(StyleProperty::TextColor(c)) => Some(c.rgb()),
            _ => None,
        }
    }

    pub fn font_size(&self) -> Option<f64> {
        match self.get(&StyleKey::FontSize) {
            Some(StyleProperty::FontSize(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn font_weight(&self) -> Option<FontWeight> {
        match self.get(&StyleKey::FontWeight) {
            Some(StyleProperty::FontWeight(w)) => Some(*w),
            _ => None,
        }
    }

    pub fn letter_spacing(&self) -> Option<f64> {
        match self.get(&StyleKey::LetterSpacing) {
            Some(StyleProperty::LetterSpacing(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn padding(&self) -> [Option<f64>; 4] {
        let side = |key: StyleKey| match self.get(&key) {
            Some(
                StyleProperty::PaddingTop(v)
                | StyleProperty::PaddingRight(v)
                | StyleProperty::PaddingBottom(v)
                | StyleProperty::PaddingLeft(v),
            ) => Some(*v),
            _ => None,
        };
        [
            side(StyleKey::PaddingTop),
            side(StyleKey::PaddingRight),
            side(StyleKey::PaddingBottom),
            side(StyleKey::PaddingLeft),
        ]
    }

    /// Only the typography entries, for handing down to text children.
    pub fn typography(&self) -> ResolvedStyle {
        Self::from_properties(self.iter().filter(|p| p.is_typography()).cloned())
    }

    /// Write every property onto the matching node field. Typography only
    /// applies to text nodes and container properties only to frames;
    /// margins and unsupported properties are ignored.
    pub fn apply_to(&self, node: &mut SceneNode) {
        for prop in self.entries.values() {
            apply_property(prop, node);
        }
    }
}

fn apply_property(prop: &StyleProperty, node: &mut SceneNode) {
    let is_text = node.text.is_some();
    match prop {
        StyleProperty::PaddingTop(v) if !is_text => node.padding.top = *v,
        StyleProperty::PaddingRight(v) if !is_text => node.padding.right = *v,
        StyleProperty::PaddingBottom(v) if !is_text => node.padding.bottom = *v,
        StyleProperty::PaddingLeft(v) if !is_text => node.padding.left = *v,
        StyleProperty::Width(v) => {
            node.width = Some(*v);
            match node.layout_mode {
                LayoutMode::Vertical => node.counter_axis_sizing = SizingMode::Fixed,
                _ => node.primary_axis_sizing = SizingMode::Fixed,
            }
        }
        StyleProperty::Height(v) => {
            node.height = Some(*v);
            match node.layout_mode {
                LayoutMode::Vertical => node.primary_axis_sizing = SizingMode::Fixed,
                _ => node.counter_axis_sizing = SizingMode::Fixed,
            }
        }
        StyleProperty::CornerRadius(v) if !is_text => node.corner_radius = *v,
        StyleProperty::ItemSpacing(v) if !is_text => node.item_spacing = *v,
        StyleProperty::Fill(c) if !is_text => node.fills = vec![Paint::from(*c)],
        StyleProperty::StrokeColor(c) => {
            node.strokes = vec![Paint::from(*c)];
            if node.stroke_weight == 0.0 {
                node.stroke_weight = 1.0;
            }
        }
        StyleProperty::StrokeWeight(v) => node.stroke_weight = *v,
        StyleProperty::Opacity(v) => node.opacity = v.clamp(0.0, 1.0),
        StyleProperty::Effects(effects) => node.effects = effects.clone(),
        StyleProperty::LayoutMode(mode) if !is_text => node.layout_mode = *mode,
        StyleProperty::PrimaryAlign(a) if !is_text => node.primary_axis_align = *a,
        StyleProperty::CounterAlign(a) if !is_text => node.counter_axis_align = *a,
        StyleProperty::CounterAlignContent(a) if !is_text => {
            node.counter_axis_align_content = Some(*a)
        }
        StyleProperty::TextColor(c) if is_text => node.fills = vec![Paint::from(*c)],
        StyleProperty::FontSize(v) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.font_size = *v;
            }
        }
        StyleProperty::FontWeight(w) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.font = FontName::new(text.font.family.clone(), w.style_name());
            }
        }
        StyleProperty::LetterSpacing(v) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.letter_spacing = Some(*v);
            }
        }
        StyleProperty::LineHeight(v) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.line_height = Some(*v);
            }
        }
        StyleProperty::TextCase(case) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.text_case = *case;
            }
        }
        StyleProperty::TextAlign(align) if is_text => {
            if let Some(text) = node.text.as_mut() {
                text.text_align = *align;
            }
        }
        other => trace!(node = %node.name, property = ?other.key(), "style property not applied"),
    }
}

// ─── Inline style parsing ────────────────────────────────────────────────────

/// Parse a `style` attribute. Declarations are split on `;`, each on its
/// first `:`. Unparsable colors are dropped; unknown properties are kept as
/// [`StyleProperty::Unsupported`].
pub fn parse_inline_style(style: &str, palette: &Palette) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::new();
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let (name, value) = (to_camel_case(name.trim()), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        for prop in declaration_properties(&name, value, palette) {
            resolved.insert(prop);
        }
    }
    resolved
}

/// `background-color` → `backgroundColor`.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// A CSS length in pixels: `px` as-is, `em`/`rem` at 16px. Other units are
/// not lengths the scene can use.
pub fn parse_length(value: &str) -> Option<f64> {
    let caps = length_regex().captures(value.trim())?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2)?.as_str() {
        "px" => Some(number),
        "em" | "rem" => Some(number * PX_PER_EM),
        _ => None,
    }
}

fn declaration_properties(name: &str, value: &str, palette: &Palette) -> Vec<StyleProperty> {
    if name.to_ascii_lowercase().contains("color") {
        let Some(color) = parse_css_color(value, palette) else {
            return Vec::new();
        };
        return match name {
            "color" => vec![StyleProperty::TextColor(color)],
            "backgroundColor" => vec![StyleProperty::Fill(color)],
            "borderColor" => vec![StyleProperty::StrokeColor(color)],
            _ => vec![unsupported(name, value)],
        };
    }

    let px = parse_length(value);
    let prop = match (name, px) {
        ("padding", _) => return box_sides(value, SideKind::Padding).unwrap_or_else(|| vec![unsupported(name, value)]),
        ("margin", _) => return box_sides(value, SideKind::Margin).unwrap_or_else(|| vec![unsupported(name, value)]),
        ("border", _) => return border_shorthand(value, palette),
        ("paddingTop", Some(v)) => StyleProperty::PaddingTop(v),
        ("paddingRight", Some(v)) => StyleProperty::PaddingRight(v),
        ("paddingBottom", Some(v)) => StyleProperty::PaddingBottom(v),
        ("paddingLeft", Some(v)) => StyleProperty::PaddingLeft(v),
        ("marginTop", Some(v)) => StyleProperty::MarginTop(v),
        ("marginRight", Some(v)) => StyleProperty::MarginRight(v),
        ("marginBottom", Some(v)) => StyleProperty::MarginBottom(v),
        ("marginLeft", Some(v)) => StyleProperty::MarginLeft(v),
        ("width", Some(v)) => StyleProperty::Width(v),
        ("height", Some(v)) => StyleProperty::Height(v),
        ("borderRadius", Some(v)) => StyleProperty::CornerRadius(v),
        ("borderWidth", Some(v)) => StyleProperty::StrokeWeight(v),
        ("gap", Some(v)) => StyleProperty::ItemSpacing(v),
        ("fontSize", Some(v)) => StyleProperty::FontSize(v),
        ("letterSpacing", Some(v)) => StyleProperty::LetterSpacing(v),
        ("lineHeight", Some(v)) => StyleProperty::LineHeight(v),
        ("background", None) => match parse_css_color(value, palette) {
            Some(color) => StyleProperty::Fill(color),
            None => unsupported(name, value),
        },
        ("fontWeight", None) => match parse_font_weight(value) {
            Some(weight) => StyleProperty::FontWeight(weight),
            None => unsupported(name, value),
        },
        ("opacity", None) => match value.parse::<f64>() {
            Ok(v) => StyleProperty::Opacity(v.clamp(0.0, 1.0)),
            Err(_) => unsupported(name, value),
        },
        ("textAlign", None) => match value {
            "left" | "start" => StyleProperty::TextAlign(TextAlign::Left),
            "center" => StyleProperty::TextAlign(TextAlign::Center),
            "right" | "end" => StyleProperty::TextAlign(TextAlign::Right),
            "justify" => StyleProperty::TextAlign(TextAlign::Justified),
            _ => unsupported(name, value),
        },
        ("textTransform", None) => match value {
            "uppercase" => StyleProperty::TextCase(TextCase::Upper),
            "lowercase" => StyleProperty::TextCase(TextCase::Lower),
            "none" => StyleProperty::TextCase(TextCase::Original),
            _ => unsupported(name, value),
        },
        ("flexDirection", None) => match value {
            "row" | "row-reverse" => StyleProperty::LayoutMode(LayoutMode::Horizontal),
            "column" | "column-reverse" => StyleProperty::LayoutMode(LayoutMode::Vertical),
            _ => unsupported(name, value),
        },
        ("justifyContent", None) => match parse_axis_align(value) {
            Some(align) => StyleProperty::PrimaryAlign(align),
            None => unsupported(name, value),
        },
        ("alignItems", None) => match parse_axis_align(value) {
            Some(align) => StyleProperty::CounterAlign(align),
            None => unsupported(name, value),
        },
        _ => unsupported(name, value),
    };
    vec![prop]
}

fn unsupported(name: &str, value: &str) -> StyleProperty {
    StyleProperty::Unsupported {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_font_weight(value: &str) -> Option<FontWeight> {
    match value {
        "normal" | "lighter" => Some(FontWeight::Regular),
        "bold" | "bolder" => Some(FontWeight::Bold),
        _ => value.parse::<f64>().ok().map(FontWeight::from_numeric),
    }
}

fn parse_axis_align(value: &str) -> Option<AxisAlign> {
    match value {
        "flex-start" | "start" => Some(AxisAlign::Min),
        "center" => Some(AxisAlign::Center),
        "flex-end" | "end" => Some(AxisAlign::Max),
        "space-between" | "space-around" | "space-evenly" => Some(AxisAlign::SpaceBetween),
        _ => None,
    }
}

#[derive(Clone, Copy)]
enum SideKind {
    Padding,
    Margin,
}

/// CSS 1–4 value box shorthand.
fn box_sides(value: &str, kind: SideKind) -> Option<Vec<StyleProperty>> {
    let values = value
        .split_whitespace()
        .map(|v| if v == "0" { Some(0.0) } else { parse_length(v) })
        .collect::<Option<Vec<f64>>>()?;
    let [top, right, bottom, left] = match values.as_slice() {
        [a] => [*a, *a, *a, *a],
        [v, h] => [*v, *h, *v, *h],
        [t, h, b] => [*t, *h, *b, *h],
        [t, r, b, l] => [*t, *r, *b, *l],
        _ => return None,
    };
    Some(match kind {
        SideKind::Padding => vec![
            StyleProperty::PaddingTop(top),
            StyleProperty::PaddingRight(right),
            StyleProperty::PaddingBottom(bottom),
            StyleProperty::PaddingLeft(left),
        ],
        SideKind::Margin => vec![
            StyleProperty::MarginTop(top),
            StyleProperty::MarginRight(right),
            StyleProperty::MarginBottom(bottom),
            StyleProperty::MarginLeft(left),
        ],
    })
}

/// `border: 1px solid #ccc` → stroke weight and color; `none` clears.
fn border_shorthand(value: &str, palette: &Palette) -> Vec<StyleProperty> {
    if value == "none" || value == "0" {
        return vec![StyleProperty::StrokeWeight(0.0)];
    }
    let mut props = Vec::new();
    for part in value.split_whitespace() {
        if let Some(width) = parse_length(part) {
            props.push(StyleProperty::StrokeWeight(width));
        } else if let Some(color) = parse_css_color(part, palette) {
            props.push(StyleProperty::StrokeColor(color));
        }
    }
    props
}
