use crate::color::Rgb;
use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::resolver::NodeStyle;
use crate::scene::{AxisAlign, Effect, FontWeight, Paint, SceneNode, Sides};
use crate::settings::Density;

use super::{fallback, Synthesizer, TextSpec, Variant};

const CONTROL_WIDTH: f64 = 250.0;
const ERROR_COLOR: Rgb = Rgb::new(0.9, 0.2, 0.2);

/// Field decoration of text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldStyle {
    Filled,
    Outlined,
    Underlined,
}

impl FieldStyle {
    fn of(style: &NodeStyle, variants_enabled: bool) -> Self {
        if !variants_enabled {
            FieldStyle::Underlined
        } else if style.is_set("filled") {
            FieldStyle::Filled
        } else if style.is_set("outlined") || style.is_set("standout") {
            FieldStyle::Outlined
        } else {
            FieldStyle::Underlined
        }
    }
}

impl Synthesizer<'_> {
    /// Form builder entry point; dispatches on the control's own tag.
    pub(crate) async fn form_control(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        match node.tag.as_str() {
            "q-input" => self.input(node, "q-input").await,
            "q-select" => self.select(node).await,
            "q-checkbox" => self.checkbox(node).await,
            "q-radio" => self.radio(node).await,
            "q-toggle" => self.toggle(node).await,
            "q-form" => self.form(node).await,
            "q-field" => self.field(node).await,
            "q-btn" => self.button(node).await,
            other => self.unimplemented(other).await,
        }
    }

    async fn unimplemented(&self, tag: &str) -> ConvertResult<SceneNode> {
        let frame = SceneNode::column(tag).padding_all(8.0).fill(Rgb::grey(0.95)).radius(4.0);
        let spec = TextSpec::new(12.0).color(Rgb::grey(0.5));
        Ok(frame.child(self.text("placeholder", &fallback::unimplemented(tag), &spec).await?))
    }

    /// Label, decorated control row, then hint or error line.
    async fn input(&self, node: &MarkupNode, name: &str) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let color = self.prop_color(&style, "color");
        let mut frame = SceneNode::column(name).spacing(4.0).transparent();
        style.combined().apply_to(&mut frame);

        if let Some(label) = style.prop("label") {
            let spec = TextSpec::new(14.0).weight(FontWeight::Medium).color(Rgb::grey(0.4));
            frame = frame.child(self.text(&format!("{name}__label"), label, &spec).await?);
        }

        let vertical = if style.is_set("dense") {
            4.0
        } else {
            match self.settings.component_density {
                Density::Compact => 4.0,
                Density::Default => 8.0,
                Density::Comfortable => 12.0,
            }
        };
        let mut control = SceneNode::row(format!("{name}__control"))
            .fixed_width(CONTROL_WIDTH)
            .padding(12.0, vertical)
            .spacing(8.0)
            .align(AxisAlign::Min, AxisAlign::Center);
        let border = color.unwrap_or(Rgb::grey(0.8));
        match FieldStyle::of(&style, self.settings.create_component_variants) {
            FieldStyle::Filled => {
                control.corner_radius = 4.0;
                control.fills = vec![match color {
                    Some(c) => Paint::with_opacity(c, 0.1),
                    None => Paint::solid(Rgb::grey(0.95)),
                }];
            }
            FieldStyle::Outlined => {
                control = control.radius(4.0).fill(Rgb::WHITE).stroke(border, 1.0);
            }
            FieldStyle::Underlined => {
                control = control.fill(Rgb::WHITE).stroke(border, 1.0);
                control.stroke_sides = Some(Sides {
                    bottom: 1.0,
                    ..Sides::default()
                });
            }
        }

        let affix = TextSpec::new(14.0).color(Rgb::grey(0.4));
        if let Some(prefix) = style.prop("prefix") {
            control = control.child(self.text("prefix", prefix, &affix).await?);
        }
        let native = style
            .prop("placeholder")
            .or_else(|| style.prop("label"))
            .or_else(|| style.prop("hint"))
            .unwrap_or(fallback::INPUT_VALUE);
        let spec = TextSpec::new(14.0).color(Rgb::grey(0.6));
        control = control.child(self.text(&format!("{name}__native"), native, &spec).await?);
        if let Some(suffix) = style.prop("suffix") {
            control = control.child(self.text("suffix", suffix, &affix).await?);
        }
        frame = frame.child(control);

        if style.is_set("error") {
            let message = style.prop("error-message").unwrap_or(fallback::INPUT_ERROR);
            let spec = TextSpec::new(12.0).color(ERROR_COLOR);
            frame = frame.child(self.text(&format!("{name}__error"), message, &spec).await?);
        } else if let Some(hint) = style.prop("hint") {
            let spec = TextSpec::new(12.0).color(Rgb::grey(0.6));
            frame = frame.child(self.text(&format!("{name}__hint"), hint, &spec).await?);
        }
        Ok(frame)
    }

    /// An input with a dropdown glyph at the end of the control row.
    async fn select(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let mut frame = self.input(node, "q-select").await?;
        let arrow = SceneNode::row("q-select__dropdown-icon")
            .size(16.0, 16.0)
            .align(AxisAlign::Center, AxisAlign::Center)
            .transparent()
            .child(self.text("arrow", "▼", &TextSpec::new(10.0).color(Rgb::grey(0.6))).await?);
        if let Some(control) = frame
            .children
            .iter_mut()
            .find(|c| c.name == "q-select__control")
        {
            control.children.push(arrow);
        }
        Ok(frame)
    }

    async fn checkbox(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = choice_row("q-checkbox");
        style.combined().apply_to(&mut frame);

        let mut inner = SceneNode::row("q-checkbox__inner")
            .size(20.0, 20.0)
            .radius(4.0)
            .align(AxisAlign::Center, AxisAlign::Center);
        if is_checked(&style) {
            let paint = Variant::SOLID.paint(self.control_color(&style));
            paint.apply_to(&mut inner);
            let mark = TextSpec::new(14.0).color(paint.content);
            inner = inner.child(self.text("check", "✓", &mark).await?);
        } else {
            inner = inner.fill(Rgb::WHITE).stroke(Rgb::grey(0.7), 1.0);
        }
        frame = frame.child(inner);
        self.choice_label(frame, &style, "q-checkbox__label").await
    }

    async fn radio(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = choice_row("q-radio");
        style.combined().apply_to(&mut frame);

        let color = self.control_color(&style);
        let mut inner = SceneNode::row("q-radio__inner")
            .size(20.0, 20.0)
            .radius(10.0)
            .align(AxisAlign::Center, AxisAlign::Center)
            .fill(Rgb::WHITE);
        if is_checked(&style) {
            let paint = Variant::OUTLINE.paint(color);
            inner.strokes = paint.stroke.into_iter().collect();
            inner.stroke_weight = 2.0;
            inner = inner.child(SceneNode::ellipse("q-radio__dot", 10.0, 10.0).fill(color));
        } else {
            inner = inner.stroke(Rgb::grey(0.7), 2.0);
        }
        frame = frame.child(inner);
        self.choice_label(frame, &style, "q-radio__label").await
    }

    async fn toggle(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = choice_row("q-toggle");
        style.combined().apply_to(&mut frame);

        let color = self.control_color(&style);
        let active = is_checked(&style);
        let track_fill = if active {
            Paint::with_opacity(color, 0.5)
        } else {
            Paint::with_opacity(Rgb::grey(0.5), 0.3)
        };
        let thumb = SceneNode::ellipse("q-toggle__thumb", 20.0, 20.0)
            .position(if active { 16.0 } else { 0.0 }, -3.0)
            .fill(if active { color } else { Rgb::grey(0.9) })
            .effect(Effect::drop_shadow(0.0, 1.0, 3.0, 0.2));
        let mut track = SceneNode::frame("q-toggle__track")
            .size(36.0, 14.0)
            .radius(7.0)
            .child(thumb);
        track.fills = vec![track_fill];
        frame = frame.child(track);
        self.choice_label(frame, &style, "q-toggle__label").await
    }

    async fn choice_label(
        &self,
        frame: SceneNode,
        style: &NodeStyle,
        name: &str,
    ) -> ConvertResult<SceneNode> {
        match style.prop("label") {
            Some(label) => {
                let spec = TextSpec::default().maybe_color(style.classes.text_color());
                Ok(frame.child(self.text(name, label, &spec).await?))
            }
            None => Ok(frame),
        }
    }

    /// Form container. An empty form shows one example field.
    async fn form(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::column("q-form").spacing(16.0).transparent();
        style.combined().apply_to(&mut frame);

        let children = self.build_children(node, &TextSpec::default()).await;
        if children.is_empty() {
            let example = MarkupNode::element("q-input")
                .with_attr("label", fallback::FORM_FIELD_LABEL)
                .with_attr("outlined", "");
            frame = frame.child(self.input(&example, "q-input").await?);
        } else {
            frame.children.extend(children.into_iter().map(|b| b.node));
        }
        Ok(frame)
    }

    /// Generic field wrapper: label, a filled control holding the slot text,
    /// then the hint.
    async fn field(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::column("q-field").spacing(4.0).transparent();
        style.combined().apply_to(&mut frame);

        if let Some(label) = style.prop("label") {
            let spec = TextSpec::new(14.0).weight(FontWeight::Medium).color(Rgb::grey(0.4));
            frame = frame.child(self.text("q-field__label", label, &spec).await?);
        }
        let content = node.text_content();
        let content = if content.is_empty() {
            fallback::FIELD_CONTENT.to_string()
        } else {
            content
        };
        let control = SceneNode::row("q-field__control")
            .fixed_width(CONTROL_WIDTH)
            .padding(12.0, 8.0)
            .radius(4.0)
            .fill(Rgb::grey(0.98))
            .child(
                self.text("q-field__native", &content, &TextSpec::new(14.0).color(Rgb::grey(0.3)))
                    .await?,
            );
        frame = frame.child(control);

        if let Some(hint) = style.prop("hint") {
            let spec = TextSpec::new(12.0).color(Rgb::grey(0.6));
            frame = frame.child(self.text("q-field__hint", hint, &spec).await?);
        }
        Ok(frame)
    }
}

fn choice_row(name: &str) -> SceneNode {
    SceneNode::row(name)
        .spacing(8.0)
        .align(AxisAlign::Min, AxisAlign::Center)
        .transparent()
}

/// Checked state of a choice control. `model` is a bound expression, so it
/// only counts once a default has been substituted for it.
fn is_checked(style: &NodeStyle) -> bool {
    let flag = |key: &str| style.props.get(key).is_some_and(|v| v.is_empty() || v == "true");
    flag("value") || flag("checked") || style.props.get("model").is_some_and(|v| v == "true")
}
