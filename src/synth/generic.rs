use crate::color::Rgb;
use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::parser::binding_target;
use crate::scene::{FontWeight, SceneNode};

use super::{fallback, Synthesizer, TextSpec};

impl Synthesizer<'_> {
    /// Neutral placeholder for tags no builder knows: the tag name plus a
    /// plain listing of its attributes, minus `class` and `style`.
    pub(crate) async fn generic(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let mut frame = SceneNode::column(node.tag.as_str())
            .fill(Rgb::WHITE)
            .radius(4.0);

        let title = TextSpec::new(16.0)
            .weight(FontWeight::Medium)
            .color(Rgb::grey(0.4));
        frame = frame.child(
            self.text("title", &fallback::component(&node.tag), &title)
                .await?,
        );

        // A binding shows once, under the bare key it resolved to.
        let lines: Vec<String> = node
            .attributes
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "class" | "style"))
            .filter(|(key, _)| {
                binding_target(key).map_or(true, |bare| !node.attributes.contains_key(bare))
            })
            .map(|(key, value)| format!("{key}=\"{value}\""))
            .collect();
        let attributes = if lines.is_empty() {
            fallback::NO_ATTRIBUTES.to_string()
        } else {
            lines.join("\n")
        };
        let detail = TextSpec::new(12.0).color(Rgb::grey(0.6));
        frame = frame.child(self.text("attributes", &attributes, &detail).await?);
        Ok(frame)
    }

    /// Plain HTML element. Text-only elements become text nodes (wrapped in a
    /// frame when their classes give them a box); others become transparent
    /// frames whose children are built in order.
    pub(crate) async fn html_element(
        &self,
        node: &MarkupNode,
        inherited: &TextSpec,
    ) -> ConvertResult<SceneNode> {
        let style = self.style_of(node).combined();
        let mut spec = inherited.clone().styled(&style);
        if node.has_class("text-subtitle2") {
            spec = spec.opacity(0.7);
        }

        if node.is_text_only() {
            let text = self.text(&node.tag, &node.text_content(), &spec).await?;
            let has_box = style.padding().iter().any(Option::is_some) || style.fill().is_some();
            if !has_box {
                return Ok(text);
            }
            let mut frame = SceneNode::column(node.tag.as_str()).transparent();
            style.apply_to(&mut frame);
            return Ok(frame.child(text));
        }

        let mut frame = SceneNode::column(node.tag.as_str()).transparent();
        style.apply_to(&mut frame);
        if spec.color.is_none() {
            if let Some(fill) = style.fill() {
                spec.color = Some(crate::color::contrasting_text_color(fill.rgb()));
            }
        }
        for built in self.build_children(node, &spec).await {
            frame.children.push(built.node);
        }
        Ok(frame)
    }

    pub(crate) fn separator(&self, node: &MarkupNode) -> SceneNode {
        let (width, height) = if node.has_attr("vertical") {
            (1.0, 24.0)
        } else {
            (300.0, 1.0)
        };
        SceneNode::rectangle("q-separator", width, height).fill(Rgb::grey(0.9))
    }
}
