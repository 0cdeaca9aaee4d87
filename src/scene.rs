use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::color::{Rgb, Rgba};

/// Default family for every text node.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
/// Font size used when a builder does not set one.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Text,
    Rectangle,
    Ellipse,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Frame => "FRAME",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    #[default]
    Auto,
    Fixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    pub fn style_name(&self) -> &'static str {
        match self {
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::Bold => "Bold",
        }
    }

    /// Map a numeric CSS weight onto the three loaded styles.
    pub fn from_numeric(weight: f64) -> Self {
        if weight >= 600.0 {
            FontWeight::Bold
        } else if weight >= 500.0 {
            FontWeight::Medium
        } else {
            FontWeight::Regular
        }
    }
}

/// A font the backend must make available before text can be placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    pub fn inter(weight: FontWeight) -> Self {
        Self::new(DEFAULT_FONT_FAMILY, weight.style_name())
    }
}

/// Per-side values, used for padding and per-side stroke weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub const fn all(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Horizontal and vertical values, CSS `padding: v h` order reversed.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Sides::default()
    }
}

/// Solid paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Rgb,
    #[serde(default = "full_opacity", skip_serializing_if = "is_full_opacity")]
    pub opacity: f64,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(color: Rgb, opacity: f64) -> Self {
        Self { color, opacity }
    }

    /// Fully transparent white, the "no fill" fill.
    pub fn transparent() -> Self {
        Self::with_opacity(Rgb::WHITE, 0.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity == 0.0
    }
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Self::with_opacity(c.rgb(), c.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow {
        color: Rgba,
        offset_x: f64,
        offset_y: f64,
        radius: f64,
        #[serde(default)]
        spread: f64,
    },
}

impl Effect {
    /// Black drop shadow with the given offset, blur radius and alpha.
    pub fn drop_shadow(offset_x: f64, offset_y: f64, radius: f64, alpha: f64) -> Self {
        Effect::DropShadow {
            color: Rgba::new(0.0, 0.0, 0.0, alpha),
            offset_x,
            offset_y,
            radius,
            spread: 0.0,
        }
    }
}

/// Text payload and typography of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub characters: String,
    pub font: FontName,
    pub font_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub text_case: TextCase,
    #[serde(default, skip_serializing_if = "is_default")]
    pub text_align: TextAlign,
}

impl TextStyle {
    pub fn weight(&self) -> FontWeight {
        match self.font.style.as_str() {
            "Bold" => FontWeight::Bold,
            "Medium" => FontWeight::Medium,
            _ => FontWeight::Regular,
        }
    }
}

/// One node of the output design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub kind: NodeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_default")]
    pub layout_mode: LayoutMode,
    #[serde(default, skip_serializing_if = "is_default")]
    pub primary_axis_sizing: SizingMode,
    #[serde(default, skip_serializing_if = "is_default")]
    pub counter_axis_sizing: SizingMode,
    #[serde(default, skip_serializing_if = "is_default")]
    pub primary_axis_align: AxisAlign,
    #[serde(default, skip_serializing_if = "is_default")]
    pub counter_axis_align: AxisAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_content: Option<AxisAlign>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub stretch: bool,
    #[serde(default, skip_serializing_if = "Sides::is_zero")]
    pub padding: Sides,
    #[serde(default, skip_serializing_if = "is_default")]
    pub item_spacing: f64,
    #[serde(default, skip_serializing_if = "is_default")]
    pub corner_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub stroke_weight: f64,
    /// Per-side stroke weights; `None` means `stroke_weight` on every side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_sides: Option<Sides>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default = "full_opacity", skip_serializing_if = "is_full_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl SceneNode {
    fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            layout_mode: LayoutMode::None,
            primary_axis_sizing: SizingMode::Auto,
            counter_axis_sizing: SizingMode::Auto,
            primary_axis_align: AxisAlign::Min,
            counter_axis_align: AxisAlign::Min,
            counter_axis_align_content: None,
            stretch: false,
            padding: Sides::default(),
            item_spacing: 0.0,
            corner_radius: 0.0,
            width: None,
            height: None,
            x: None,
            y: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_sides: None,
            effects: Vec::new(),
            opacity: 1.0,
            text: None,
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// An auto-sized container.
    pub fn frame(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Frame, name)
    }

    /// A vertical auto-layout container.
    pub fn column(name: impl Into<String>) -> Self {
        Self::frame(name).layout(LayoutMode::Vertical)
    }

    /// A horizontal auto-layout container.
    pub fn row(name: impl Into<String>) -> Self {
        Self::frame(name).layout(LayoutMode::Horizontal)
    }

    pub fn text_node(name: impl Into<String>, style: TextStyle) -> Self {
        let mut node = Self::new(NodeKind::Text, name);
        node.text = Some(style);
        node
    }

    pub fn rectangle(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(NodeKind::Rectangle, name).size(width, height)
    }

    pub fn ellipse(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(NodeKind::Ellipse, name).size(width, height)
    }

    // ─── Builder setters ─────────────────────────────────────────────────────

    pub fn layout(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    pub fn align(mut self, primary: AxisAlign, counter: AxisAlign) -> Self {
        self.primary_axis_align = primary;
        self.counter_axis_align = counter;
        self
    }

    pub fn padding(mut self, horizontal: f64, vertical: f64) -> Self {
        self.padding = Sides::symmetric(horizontal, vertical);
        self
    }

    pub fn padding_all(mut self, v: f64) -> Self {
        self.padding = Sides::all(v);
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = spacing;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn fill(mut self, color: Rgb) -> Self {
        self.fills = vec![Paint::solid(color)];
        self
    }

    pub fn transparent(mut self) -> Self {
        self.fills = vec![Paint::transparent()];
        self
    }

    pub fn stroke(mut self, color: Rgb, weight: f64) -> Self {
        self.strokes = vec![Paint::solid(color)];
        self.stroke_weight = weight;
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Fixed width and height.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.primary_axis_sizing = SizingMode::Fixed;
        self.counter_axis_sizing = SizingMode::Fixed;
        self
    }

    /// Fix the width only; the axis carrying width becomes fixed.
    pub fn fixed_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        match self.layout_mode {
            LayoutMode::Vertical => self.counter_axis_sizing = SizingMode::Fixed,
            _ => self.primary_axis_sizing = SizingMode::Fixed,
        }
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Frame
    }

    pub fn characters(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.characters.as_str())
    }

    /// Fill color of a text node, which is its text color.
    pub fn text_color(&self) -> Option<Rgb> {
        self.text.as_ref().and(self.fills.first()).map(|p| p.color)
    }

    /// First node (self included) with the given name, depth first.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// All text payloads in the subtree, depth first.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(chars) = self.characters() {
            out.push(chars);
        }
        for child in &self.children {
            child.collect_texts(out);
        }
    }

    /// Turn every container in the subtree into a free-form frame.
    pub fn strip_auto_layout(&mut self) {
        if self.is_container() {
            self.layout_mode = LayoutMode::None;
        }
        for child in &mut self.children {
            child.strip_auto_layout();
        }
    }

    /// Indented `name (KIND)` structure report.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}{} ({})", self.name, self.kind.as_str());
        if let Some(chars) = self.characters() {
            let _ = write!(out, ": \"{chars}\"");
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

fn full_opacity() -> f64 {
    1.0
}

fn is_full_opacity(value: &f64) -> bool {
    *value == 1.0
}
