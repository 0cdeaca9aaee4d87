//! Scene synthesis: turns a classified markup tree into a [`SceneNode`] tree.
//!
//! Builders are tag-specific. Each one starts from a per-tag default table,
//! then applies class styles, inline styles and finally attribute-derived
//! color. Containers recurse through [`Synthesizer::build_node`]; a child that
//! fails to build is logged and left out, its siblings are unaffected.

mod button;
mod card;
mod form;
mod generic;
mod layout;
pub mod variant;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::backend::RenderBackend;
use crate::classify::LayoutArchetype;
use crate::color::{Rgb, Rgba};
use crate::error::{ConvertError, ConvertResult};
use crate::markup::MarkupNode;
use crate::resolver::{NodeStyle, StyleResolver};
use crate::scene::{FontName, FontWeight, Paint, SceneNode, TextStyle};
use crate::settings::Settings;
use crate::style::ResolvedStyle;

pub use variant::{ControlSize, Variant, VariantPaint};

/// Fixed labels used when the markup lacks the content a builder needs.
pub mod fallback {
    pub const CANCEL: &str = "Cancelar";
    pub const CONFIRM: &str = "OK";
    pub const BUTTON: &str = "Botão";
    pub const NO_ATTRIBUTES: &str = "Sem atributos";
    pub const INPUT_VALUE: &str = "Valor";
    pub const INPUT_ERROR: &str = "Erro";
    pub const FORM_FIELD_LABEL: &str = "Exemplo de campo";
    pub const FIELD_CONTENT: &str = "Conteúdo do field";
    pub const TABS: [&str; 3] = ["Tab 1", "Tab 2", "Tab 3"];
    pub const LIST_ITEMS: [&str; 3] = ["Item 1", "Item 2", "Item 3"];
    pub const ITEM_CONTENT: &str = "Item Content";
    pub const LIST_MISSING: &str = "Lista não encontrada";
    pub const MENU_TITLE: &str = "Menu";
    pub const MENU_ITEMS: [&str; 4] = ["Home", "Perfil", "Configurações", "Sobre"];
    pub const PAGE_CONTENT: &str = "Conteúdo da Página";
    pub const PAGE_TITLE: &str = "Título da Página";
    pub const PAGE_SUBTITLE: &str = "Subtítulo com descrição da página e seus recursos";
    pub const EXAMPLE_CARD_TITLE: &str = "Card de Exemplo";
    pub const EXAMPLE_CARD_TEXT: &str = "Descrição do card";
    pub const HEADER_TITLE: &str = "App Header";
    pub const TOOLBAR_TITLE: &str = "App Title";
    pub const MENU_GLYPH: &str = "≡";
    pub const FOOTER_TEXT: &str = "© 2025 My App";

    pub fn component(tag: &str) -> String {
        format!("Componente {tag}")
    }

    pub fn unimplemented(tag: &str) -> String {
        format!("Componente {tag} (não implementado)")
    }

    pub fn tab_content(tab: &str) -> String {
        format!("Conteúdo da {tab}")
    }
}

/// Plain HTML tags rendered as text or as transparent frames.
const HTML_TAGS: &[&str] = &[
    "div", "span", "p", "section", "article", "main", "nav", "aside", "header", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "label", "strong", "b", "em", "i", "small", "a",
    "ul", "ol", "li", "template", "q-page-container", "q-item-label", "q-toolbar-title",
];

// ─── Text ────────────────────────────────────────────────────────────────────

/// Typography of a text node about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub size: f64,
    pub weight: FontWeight,
    pub color: Option<Rgb>,
    pub opacity: f64,
    /// Extra typography (letter spacing, case, alignment) applied last.
    pub typography: ResolvedStyle,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self::new(crate::scene::DEFAULT_FONT_SIZE)
    }
}

impl TextSpec {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: None,
            opacity: 1.0,
            typography: ResolvedStyle::new(),
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn maybe_color(mut self, color: Option<Rgb>) -> Self {
        if color.is_some() {
            self.color = color;
        }
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Overlay the typography entries of a resolved style.
    pub fn styled(mut self, style: &ResolvedStyle) -> Self {
        if let Some(size) = style.font_size() {
            self.size = size;
        }
        if let Some(weight) = style.font_weight() {
            self.weight = weight;
        }
        if let Some(color) = style.text_color() {
            self.color = Some(color);
        }
        self.typography.merge(&style.typography());
        self
    }
}

// ─── Synthesizer ─────────────────────────────────────────────────────────────

/// One built child and whether a specific builder recognized its tag.
#[derive(Debug, Clone)]
pub struct Built {
    pub node: SceneNode,
    pub recognized: bool,
}

impl Built {
    fn recognized(node: SceneNode) -> Self {
        Self {
            node,
            recognized: true,
        }
    }

    fn placeholder(node: SceneNode) -> Self {
        Self {
            node,
            recognized: false,
        }
    }
}

pub struct Synthesizer<'a> {
    resolver: StyleResolver,
    settings: &'a Settings,
    backend: &'a dyn RenderBackend,
}

impl<'a> Synthesizer<'a> {
    pub fn new(settings: &'a Settings, backend: &'a dyn RenderBackend) -> Self {
        let resolver = StyleResolver::new(settings.palette(), settings.preserve_theme_colors);
        Self::with_resolver(resolver, settings, backend)
    }

    pub fn with_resolver(
        resolver: StyleResolver,
        settings: &'a Settings,
        backend: &'a dyn RenderBackend,
    ) -> Self {
        Self {
            resolver,
            settings,
            backend,
        }
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    /// Build the scene for a whole template. Errors here are fatal to the
    /// conversion; errors below the top-level builder are isolated per child.
    pub async fn synthesize(
        &self,
        root: &MarkupNode,
        archetype: LayoutArchetype,
    ) -> ConvertResult<SceneNode> {
        debug!(archetype = %archetype, root = %root.tag, "synthesizing");
        match archetype {
            LayoutArchetype::ButtonComponent => self.guarded(root, self.button(root)).await,
            LayoutArchetype::CardLayout => {
                let card = root.find("q-card").unwrap_or(root);
                self.guarded(card, self.card(card)).await
            }
            LayoutArchetype::FormLayout => {
                let form = root.find("q-form").unwrap_or(root);
                self.guarded(form, self.form_control(form)).await
            }
            LayoutArchetype::FormComponent => self.guarded(root, self.form_control(root)).await,
            LayoutArchetype::AppLayoutWithDrawer
            | LayoutArchetype::AppLayout
            | LayoutArchetype::BasicLayout => {
                let with_drawer = archetype == LayoutArchetype::AppLayoutWithDrawer;
                self.guarded(root, self.app_layout(root, with_drawer)).await
            }
            LayoutArchetype::PageOnly => self.guarded(root, self.page(root)).await,
            LayoutArchetype::TabsLayout => self.tabs_layout(root).await,
            LayoutArchetype::ListLayout => self.list_layout(root).await,
            LayoutArchetype::Unknown => self.build_node(root).await.map(|b| b.node),
        }
    }

    /// Run a top-level builder unless the group of `node` is switched off.
    async fn guarded(
        &self,
        node: &MarkupNode,
        build: impl std::future::Future<Output = ConvertResult<SceneNode>>,
    ) -> ConvertResult<SceneNode> {
        if self.settings.component_group_toggles.allows_tag(&node.tag) {
            build.await
        } else {
            debug!(tag = %node.tag, "component group disabled, using placeholder");
            self.generic(node).await
        }
    }

    /// Build any node with the default inherited typography.
    pub fn build_node<'s>(&'s self, node: &'s MarkupNode) -> BoxFuture<'s, ConvertResult<Built>> {
        self.build_node_with(node, TextSpec::default())
    }

    /// Dispatch one node to its tag builder. `inherited` is the typography
    /// text runs and text-only elements start from.
    pub fn build_node_with<'s>(
        &'s self,
        node: &'s MarkupNode,
        inherited: TextSpec,
    ) -> BoxFuture<'s, ConvertResult<Built>> {
        async move {
            if node.is_text() {
                let content = node
                    .text
                    .as_deref()
                    .ok_or_else(|| self.build_error(node, "text run without content"))?;
                return self.text("text", content, &inherited).await.map(Built::recognized);
            }
            let tag = node.tag.as_str();
            if !self.settings.component_group_toggles.allows_tag(tag) {
                return self.generic(node).await.map(Built::placeholder);
            }
            let built = match tag {
                "q-btn" => self.button(node).await?,
                "q-card" => self.card(node).await?,
                "q-card-section" => self.card_section(node).await?,
                "q-card-actions" => self.card_actions(node).await?,
                "q-separator" => self.separator(node),
                "q-input" | "q-select" | "q-checkbox" | "q-radio" | "q-toggle" | "q-form"
                | "q-field" => self.form_control(node).await?,
                "q-layout" => self.app_layout(node, false).await?,
                "q-header" => self.header(node).await?,
                "q-footer" => self.footer(node).await?,
                "q-drawer" => self.drawer(node).await?,
                "q-page" => self.page(node).await?,
                "q-toolbar" => self.toolbar(node, &inherited).await?,
                "q-tabs" => self.tabs_strip(Some(node)).await?,
                "q-tab-panels" => self.tab_panels(Some(node), fallback::TABS[0]).await?,
                "q-list" => self.list(node).await?,
                "q-item" => self.list_item(node).await?,
                _ if HTML_TAGS.contains(&tag) => self.html_element(node, &inherited).await?,
                _ => return self.generic(node).await.map(Built::placeholder),
            };
            Ok(Built::recognized(built))
        }
        .boxed()
    }

    /// Build every child of `parent` in document order, dropping the ones
    /// that fail.
    pub async fn build_children(&self, parent: &MarkupNode, inherited: &TextSpec) -> Vec<Built> {
        let mut built = Vec::with_capacity(parent.children.len());
        for child in &parent.children {
            match self.build_node_with(child, inherited.clone()).await {
                Ok(b) => built.push(b),
                Err(err) => warn!(parent = %parent.tag, child = %child.tag, error = %err, "child skipped"),
            }
        }
        built
    }

    /// Keep an optional sub-part, logging and dropping it on failure.
    fn isolate(&self, part: &str, result: ConvertResult<SceneNode>) -> Option<SceneNode> {
        match result {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(part = part, error = %err, "part skipped");
                None
            }
        }
    }

    /// Create a text node. The font is requested from the backend first.
    pub async fn text(&self, name: &str, content: &str, spec: &TextSpec) -> ConvertResult<SceneNode> {
        let font = FontName::inter(spec.weight);
        self.backend.load_font(&font).await?;
        let mut node = SceneNode::text_node(
            name,
            TextStyle {
                characters: content.to_string(),
                font,
                font_size: spec.size,
                letter_spacing: None,
                line_height: None,
                text_case: Default::default(),
                text_align: Default::default(),
            },
        );
        node.fills = vec![Paint::solid(spec.color.unwrap_or(Rgb::BLACK))];
        node.opacity = spec.opacity;
        spec.typography.apply_to(&mut node);
        if let Some(text) = node.text.as_ref() {
            if text.weight() != spec.weight {
                // Typography switched the weight after the font was loaded.
                self.backend.load_font(&text.font).await?;
            }
        }
        Ok(node)
    }

    fn style_of(&self, node: &MarkupNode) -> NodeStyle {
        self.resolver.resolve_node_style(node)
    }

    /// Theme or CSS color named by a prop, honoring `preserveThemeColors`.
    fn prop_color(&self, style: &NodeStyle, key: &str) -> Option<Rgb> {
        if !self.settings.preserve_theme_colors {
            return None;
        }
        style.prop(key).and_then(|v| self.resolver.palette().resolve(v))
    }

    /// Base color of an interactive control: inline fill, then the `color`
    /// prop, then a `bg-*` class, then primary.
    fn control_color(&self, style: &NodeStyle) -> Rgb {
        let visible = |fill: Rgba| (fill.a > 0.0).then(|| fill.rgb());
        style
            .inline
            .fill()
            .and_then(visible)
            .or_else(|| self.prop_color(style, "color"))
            .or_else(|| style.classes.fill().and_then(visible))
            .unwrap_or_else(|| self.resolver.palette().primary())
    }

    /// Text and glyph color of a control: `text-color` prop, inline `color`,
    /// a `text-*` class, then `fallback`.
    fn content_color(&self, style: &NodeStyle, fallback: Rgb) -> Rgb {
        self.prop_color(style, "text-color")
            .or_else(|| style.inline.text_color())
            .or_else(|| style.classes.text_color())
            .unwrap_or(fallback)
    }

    fn build_error(&self, node: &MarkupNode, reason: impl Into<String>) -> ConvertError {
        ConvertError::Build {
            component: node.tag.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::backend::NoopBackend;
    use crate::classify::Classifier;
    use crate::parser::parse_fragment;

    pub fn markup(source: &str) -> MarkupNode {
        parse_fragment(source).unwrap().remove(0)
    }

    pub async fn build_with(source: &str, settings: &Settings) -> SceneNode {
        let root = markup(source);
        let archetype = Classifier::default().classify(&root);
        Synthesizer::new(settings, &NoopBackend)
            .synthesize(&root, archetype)
            .await
            .unwrap()
    }

    pub async fn build(source: &str) -> SceneNode {
        build_with(source, &Settings::default()).await
    }

    pub fn names(node: &SceneNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }
}
