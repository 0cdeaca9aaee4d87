use crate::color::Rgb;
use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::scene::{AxisAlign, FontWeight, SceneNode};

use super::{fallback, ControlSize, Synthesizer, TextSpec, Variant};

const GLYPH_SIZE: f64 = 18.0;
const ROUNDED_RADIUS: f64 = 28.0;
const DISABLED_OPACITY: f64 = 0.6;

impl Synthesizer<'_> {
    pub(crate) async fn button(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let variants = self.settings.create_component_variants;
        let variant = Variant::for_node(&style, variants);
        let icon_right = style.prop("icon-right").is_some();

        let size = ControlSize::resolve(&style, self.settings.component_density, variants);
        let (h, v) = size.padding();
        let mut frame = SceneNode::row("q-btn")
            .align(AxisAlign::Center, AxisAlign::Center)
            .radius(4.0)
            .padding(h, v);
        if variant.icon_leading || icon_right {
            frame.item_spacing = 8.0;
        }
        if variants && style.is_set("rounded") {
            frame.corner_radius = ROUNDED_RADIUS;
        }

        style.combined().apply_to(&mut frame);
        // An explicit `size`/`dense` beats `q-p*-*` classes; the density
        // default does not.
        if ControlSize::is_explicit(&style, variants) {
            frame = frame.padding(h, v);
        }

        let paint = variant.paint(self.control_color(&style));
        paint.apply_to(&mut frame);
        let content = self.content_color(&style, paint.content);

        if style.is_set("disable") || style.is_set("disabled") {
            frame.opacity = DISABLED_OPACITY;
        }

        if variant.icon_leading {
            frame = frame.child(glyph(content));
        }
        let label = match button_label(node) {
            Some(label) => Some(label),
            // Icon-only buttons show just the glyph.
            None if variant.icon_leading || icon_right => None,
            None => Some(fallback::BUTTON.to_string()),
        };
        if let Some(label) = label {
            let spec = TextSpec::new(14.0)
                .weight(FontWeight::Medium)
                .color(content);
            frame = frame.child(self.text("label", &label, &spec).await?);
        }
        if icon_right {
            frame = frame.child(glyph(content));
        }
        Ok(frame)
    }

    /// Fixed-label button used when an actions row has nothing to show.
    pub(crate) async fn fallback_button(
        &self,
        label: &str,
        variant: Variant,
    ) -> ConvertResult<SceneNode> {
        let paint = variant.paint(self.resolver.palette().primary());
        let mut frame = SceneNode::row("q-btn")
            .align(AxisAlign::Center, AxisAlign::Center)
            .radius(4.0)
            .padding(12.0, 8.0);
        paint.apply_to(&mut frame);
        let spec = TextSpec::new(14.0)
            .weight(FontWeight::Medium)
            .color(paint.content);
        Ok(frame.child(self.text("label", label, &spec).await?))
    }
}

/// `label` prop, then direct text, then the text of nested markup.
fn button_label(node: &MarkupNode) -> Option<String> {
    if let Some(label) = node.attr("label").filter(|l| !l.is_empty()) {
        return Some(label.to_string());
    }
    if let Some(text) = node.first_text() {
        return Some(text.to_string());
    }
    Some(node.text_content()).filter(|t| !t.is_empty())
}

fn glyph(color: Rgb) -> SceneNode {
    SceneNode::ellipse("q-icon", GLYPH_SIZE, GLYPH_SIZE).fill(color)
}
