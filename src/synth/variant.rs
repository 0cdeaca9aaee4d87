use crate::color::{contrasting_text_color, Rgb};
use crate::resolver::NodeStyle;
use crate::scene::{Paint, SceneNode};
use crate::settings::Density;

/// How an interactive control paints itself from one resolved color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub has_fill: bool,
    pub stroke_only: bool,
    pub icon_leading: bool,
}

impl Variant {
    pub const SOLID: Variant = Variant {
        has_fill: true,
        stroke_only: false,
        icon_leading: false,
    };
    pub const FLAT: Variant = Variant {
        has_fill: false,
        stroke_only: false,
        icon_leading: false,
    };
    pub const OUTLINE: Variant = Variant {
        has_fill: false,
        stroke_only: true,
        icon_leading: false,
    };

    /// `flat` wins over `outline`. With variants disabled every control is
    /// solid.
    pub fn for_node(style: &NodeStyle, variants_enabled: bool) -> Self {
        let base = if !variants_enabled {
            Variant::SOLID
        } else if style.is_set("flat") {
            Variant::FLAT
        } else if style.is_set("outline") || style.is_set("outlined") {
            Variant::OUTLINE
        } else {
            Variant::SOLID
        };
        Variant {
            icon_leading: style.prop("icon").is_some(),
            ..base
        }
    }

    pub fn paint(&self, color: Rgb) -> VariantPaint {
        if self.has_fill {
            VariantPaint {
                fill: Paint::solid(color),
                stroke: None,
                content: contrasting_text_color(color),
            }
        } else if self.stroke_only {
            VariantPaint {
                fill: Paint::transparent(),
                stroke: Some(Paint::solid(color)),
                content: color,
            }
        } else {
            VariantPaint {
                fill: Paint::transparent(),
                stroke: None,
                content: color,
            }
        }
    }
}

/// Fill, optional border and content (text/glyph) color of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPaint {
    pub fill: Paint,
    pub stroke: Option<Paint>,
    pub content: Rgb,
}

impl VariantPaint {
    pub fn apply_to(&self, node: &mut SceneNode) {
        node.fills = vec![self.fill];
        match self.stroke {
            Some(stroke) => {
                node.strokes = vec![stroke];
                node.stroke_weight = 1.0;
            }
            None => {
                node.strokes.clear();
                node.stroke_weight = 0.0;
            }
        }
    }
}

/// Enumerated padding table for buttons and other controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Dense,
}

impl ControlSize {
    pub fn from_name(name: &str) -> Option<Self> {
        let size = match name {
            "xs" => ControlSize::Xs,
            "sm" => ControlSize::Sm,
            "md" => ControlSize::Md,
            "lg" => ControlSize::Lg,
            "xl" => ControlSize::Xl,
            _ => return None,
        };
        Some(size)
    }

    pub fn for_density(density: Density) -> Self {
        match density {
            Density::Default => ControlSize::Md,
            Density::Comfortable => ControlSize::Lg,
            Density::Compact => ControlSize::Dense,
        }
    }

    /// `dense` beats `size`; both beat the density setting. With variants
    /// disabled only the density setting counts.
    pub fn resolve(style: &NodeStyle, density: Density, variants_enabled: bool) -> Self {
        if !variants_enabled {
            return Self::for_density(density);
        }
        if style.is_set("dense") {
            return ControlSize::Dense;
        }
        style
            .prop("size")
            .and_then(Self::from_name)
            .unwrap_or_else(|| Self::for_density(density))
    }

    /// Whether the node names its own size rather than taking the density
    /// default.
    pub fn is_explicit(style: &NodeStyle, variants_enabled: bool) -> bool {
        variants_enabled
            && (style.is_set("dense") || style.prop("size").and_then(Self::from_name).is_some())
    }

    /// Horizontal and vertical padding.
    pub fn padding(&self) -> (f64, f64) {
        match self {
            ControlSize::Xs => (8.0, 4.0),
            ControlSize::Sm => (10.0, 6.0),
            ControlSize::Md => (16.0, 8.0),
            ControlSize::Lg => (20.0, 12.0),
            ControlSize::Xl => (24.0, 16.0),
            ControlSize::Dense => (8.0, 4.0),
        }
    }
}
