use super::spacing::{parse_spacing_class, SpacingProperty};
use super::typography::type_scale;
use crate::color::Rgba;
use crate::scene::{AxisAlign, LayoutMode, TextAlign};
use crate::style::{ResolvedStyle, StyleProperty};
use crate::theme::Palette;

/// Resolves Quasar utility classes against an injected palette.
///
/// Holds no mutable state: the same class always resolves to the same style.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    palette: Palette,
    preserve_theme_colors: bool,
}

impl ClassRegistry {
    pub fn new(palette: Palette, preserve_theme_colors: bool) -> Self {
        Self {
            palette,
            preserve_theme_colors,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // ─── Public resolver ─────────────────────────────────────────────────────

    /// Resolve one class. Families are tried in priority order and the first
    /// match wins: spacing, typography, theme color, flex, text alignment.
    ///
    /// Returns `None` if the class is not recognised.
    pub fn resolve(&self, class: &str) -> Option<ResolvedStyle> {
        resolve_spacing(class)
            .or_else(|| resolve_typography(class))
            .or_else(|| self.resolve_theme_color(class))
            .or_else(|| resolve_flex(class))
            .or_else(|| resolve_text_align(class))
    }

    /// Resolve a class list in order; later classes win on shared keys.
    pub fn resolve_all<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> ResolvedStyle {
        let mut style = ResolvedStyle::new();
        for class in classes {
            if let Some(resolved) = self.resolve(class) {
                style.merge(&resolved);
            }
        }
        style
    }

    // ─── Colors ──────────────────────────────────────────────────────────────

    fn resolve_theme_color(&self, class: &str) -> Option<ResolvedStyle> {
        if !self.preserve_theme_colors {
            return None;
        }
        if let Some(name) = class.strip_prefix("bg-") {
            let color = self.palette.get(name)?;
            return Some(single(StyleProperty::Fill(Rgba::from(color))));
        }
        if let Some(name) = class.strip_prefix("text-") {
            let color = self.palette.get(name)?;
            return Some(single(StyleProperty::TextColor(Rgba::from(color))));
        }
        None
    }
}

fn single(prop: StyleProperty) -> ResolvedStyle {
    ResolvedStyle::from_properties([prop])
}

// ─── Spacing ─────────────────────────────────────────────────────────────────

fn resolve_spacing(class: &str) -> Option<ResolvedStyle> {
    let spacing = parse_spacing_class(class)?;
    let v = spacing.value;
    let props = match spacing.property {
        SpacingProperty::Padding => [
            StyleProperty::PaddingTop(v),
            StyleProperty::PaddingRight(v),
            StyleProperty::PaddingBottom(v),
            StyleProperty::PaddingLeft(v),
        ],
        SpacingProperty::Margin => [
            StyleProperty::MarginTop(v),
            StyleProperty::MarginRight(v),
            StyleProperty::MarginBottom(v),
            StyleProperty::MarginLeft(v),
        ],
    };
    let sides = spacing.sides;
    let enabled = [sides.top, sides.right, sides.bottom, sides.left];

    let mut style = ResolvedStyle::new();
    for (on, prop) in enabled.into_iter().zip(props) {
        if on {
            style.insert(prop);
        }
    }
    Some(style)
}

// ─── Typography ──────────────────────────────────────────────────────────────

fn resolve_typography(class: &str) -> Option<ResolvedStyle> {
    let scale = type_scale(class)?;
    let mut style = ResolvedStyle::from_properties([
        StyleProperty::FontSize(scale.font_size),
        StyleProperty::FontWeight(scale.weight),
        StyleProperty::LetterSpacing(scale.letter_spacing),
    ]);
    if let Some(case) = scale.text_case {
        style.insert(StyleProperty::TextCase(case));
    }
    Some(style)
}

// ─── Flex ────────────────────────────────────────────────────────────────────

fn resolve_flex(class: &str) -> Option<ResolvedStyle> {
    let prop = match class {
        "row" => StyleProperty::LayoutMode(LayoutMode::Horizontal),
        "column" => StyleProperty::LayoutMode(LayoutMode::Vertical),
        "items-start" => StyleProperty::CounterAlign(AxisAlign::Min),
        "items-center" => StyleProperty::CounterAlign(AxisAlign::Center),
        "items-end" => StyleProperty::CounterAlign(AxisAlign::Max),
        "justify-start" => StyleProperty::PrimaryAlign(AxisAlign::Min),
        "justify-center" => StyleProperty::PrimaryAlign(AxisAlign::Center),
        "justify-end" => StyleProperty::PrimaryAlign(AxisAlign::Max),
        "justify-between" => StyleProperty::PrimaryAlign(AxisAlign::SpaceBetween),
        "content-start" => StyleProperty::CounterAlignContent(AxisAlign::Min),
        "content-center" => StyleProperty::CounterAlignContent(AxisAlign::Center),
        "content-end" => StyleProperty::CounterAlignContent(AxisAlign::Max),
        _ => return None,
    };
    Some(single(prop))
}

// ─── Text alignment ──────────────────────────────────────────────────────────

fn resolve_text_align(class: &str) -> Option<ResolvedStyle> {
    let align = match class {
        "text-left" => TextAlign::Left,
        "text-right" => TextAlign::Right,
        "text-center" => TextAlign::Center,
        "text-justify" => TextAlign::Justified,
        _ => return None,
    };
    Some(single(StyleProperty::TextAlign(align)))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
