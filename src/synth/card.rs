use crate::color::{contrasting_text_color, Rgb};
use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::scene::{AxisAlign, Effect, SceneNode};

use super::{fallback, Synthesizer, TextSpec, Variant};

impl Synthesizer<'_> {
    /// Card with its sections built in order. A card without an actions row
    /// gets the fallback pair appended.
    pub(crate) async fn card(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node).combined();
        let mut frame = SceneNode::column("q-card")
            .radius(4.0)
            .fill(Rgb::WHITE)
            .effect(Effect::drop_shadow(0.0, 2.0, 4.0, 0.2));
        style.apply_to(&mut frame);

        let inherited = TextSpec::default().styled(&style);
        for built in self.build_children(node, &inherited).await {
            frame.children.push(built.node);
        }

        if node.children_with_tag("q-card-actions").next().is_none() {
            let actions = self.actions_row(None);
            if let Some(actions) = self.isolate("q-card-actions", self.with_fallback_pair(actions).await) {
                frame.children.push(actions);
            }
        }
        Ok(frame)
    }

    /// Section: `bg-*` gives a fill and a contrasting text color, `text-*`
    /// overrides the text color.
    pub(crate) async fn card_section(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node).combined();
        let mut frame = SceneNode::column("q-card-section")
            .padding_all(16.0)
            .spacing(4.0)
            .fill(Rgb::WHITE);
        frame.stretch = true;
        style.apply_to(&mut frame);

        let text_color = style
            .text_color()
            .or_else(|| style.fill().map(|fill| contrasting_text_color(fill.rgb())));
        let inherited = TextSpec::default().styled(&style).maybe_color(text_color);
        for built in self.build_children(node, &inherited).await {
            frame.children.push(built.node);
        }
        Ok(frame)
    }

    /// Actions row. Without any recognized child it shows the fallback pair.
    pub(crate) async fn card_actions(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let mut frame = self.actions_row(Some(node));
        let children = self.build_children(node, &TextSpec::default()).await;
        let recognized = children.iter().any(|b| b.recognized);
        frame.children.extend(children.into_iter().map(|b| b.node));
        if recognized {
            Ok(frame)
        } else {
            self.with_fallback_pair(frame).await
        }
    }

    fn actions_row(&self, node: Option<&MarkupNode>) -> SceneNode {
        let mut frame = SceneNode::row("q-card-actions")
            .padding_all(8.0)
            .spacing(8.0)
            .fill(Rgb::WHITE);
        let Some(node) = node else {
            return frame;
        };
        let style = self.style_of(node);
        frame.primary_axis_align = match style.prop("align") {
            Some("center") => AxisAlign::Center,
            Some("right") | Some("end") => AxisAlign::Max,
            Some("between") => AxisAlign::SpaceBetween,
            _ => AxisAlign::Min,
        };
        if style.is_set("vertical") {
            frame.layout_mode = crate::scene::LayoutMode::Vertical;
        }
        style.combined().apply_to(&mut frame);
        frame
    }

    async fn with_fallback_pair(&self, frame: SceneNode) -> ConvertResult<SceneNode> {
        let cancel = self.fallback_button(fallback::CANCEL, Variant::FLAT).await?;
        let confirm = self.fallback_button(fallback::CONFIRM, Variant::SOLID).await?;
        Ok(frame.child(cancel).child(confirm))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::color::Rgb;
    use crate::scene::{AxisAlign, Paint};
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    const PRIMARY: Rgb = Rgb::new(0.1, 0.5, 0.9);

    #[tokio::test]
    async fn test_card_without_actions_gets_fallback_pair() {
        let scene = build(
            r#"<q-card><q-card-section><div class="text-h6">Title</div></q-card-section></q-card>"#,
        )
        .await;
        assert_eq!(names(&scene), vec!["q-card-section", "q-card-actions"]);

        let actions = scene.children.last().unwrap();
        assert_eq!(actions.children.len(), 2);
        assert_eq!(actions.texts(), vec!["Cancelar", "OK"]);
        assert!(actions.children[0].fills[0].is_transparent());
        assert_eq!(actions.children[0].children[0].text_color(), Some(PRIMARY));
        assert_eq!(actions.children[1].fills[0], Paint::solid(PRIMARY));
        assert_eq!(actions.children[1].children[0].text_color(), Some(Rgb::WHITE));
    }

    #[tokio::test]
    async fn test_card_keeps_own_actions() {
        let scene = build(
            r#"<q-card>
                 <q-card-section>Body</q-card-section>
                 <q-card-actions align="right"><q-btn flat label="Close" /></q-card-actions>
               </q-card>"#,
        )
        .await;
        let actions = scene.find("q-card-actions").unwrap();
        assert_eq!(actions.primary_axis_align, AxisAlign::Max);
        assert_eq!(actions.texts(), vec!["Close"]);
    }

    #[tokio::test]
    async fn test_empty_actions_row_is_filled() {
        let scene = build("<q-card><q-card-actions></q-card-actions></q-card>").await;
        assert_eq!(names(&scene), vec!["q-card-actions"]);
        assert_eq!(scene.texts(), vec!["Cancelar", "OK"]);
    }

    #[tokio::test]
    async fn test_section_colors() {
        let scene = build(
            r#"<q-card><q-card-section class="bg-primary">On primary</q-card-section><q-card-actions /></q-card>"#,
        )
        .await;
        let section = &scene.children[0];
        assert_eq!(section.fills[0], Paint::solid(PRIMARY));
        assert_eq!(section.children[0].text_color(), Some(Rgb::WHITE));

        let scene = build(
            r#"<q-card><q-card-section class="text-negative">Alert</q-card-section><q-card-actions /></q-card>"#,
        )
        .await;
        assert_eq!(
            scene.children[0].children[0].text_color(),
            Some(Rgb::new(0.76, 0.0, 0.08))
        );
    }

    #[tokio::test]
    async fn test_nested_card_is_focused() {
        let scene = build(r#"<div class="q-pa-md"><q-card><q-card-section>x</q-card-section></q-card></div>"#).await;
        assert_eq!(scene.name, "q-card");
    }

    #[tokio::test]
    async fn test_display_group_disabled() {
        let mut settings = Settings::default();
        settings.component_group_toggles.display = false;
        let scene = build_with("<q-card />", &settings).await;
        assert_eq!(scene.texts()[0], "Componente q-card");
    }
}
