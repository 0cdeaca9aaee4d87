use crate::color::{contrasting_text_color, Rgb};
use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::scene::{AxisAlign, Effect, FontWeight, SceneNode, Sides};

use super::{fallback, Synthesizer, TextSpec};

// ─── Shell geometry ──────────────────────────────────────────────────────────

const APP_WIDTH: f64 = 1024.0;
const APP_HEIGHT: f64 = 768.0;
const BAR_HEIGHT: f64 = 40.0;
const DRAWER_WIDTH: f64 = 256.0;
const DRAWER_HEIGHT: f64 = 700.0;
const TOOLBAR_WIDTH: f64 = 992.0;
const TABS_WIDTH: f64 = 400.0;
const FOOTER_COLOR: Rgb = Rgb::new(0.2, 0.2, 0.2);

impl Synthesizer<'_> {
    /// App shell: header, a content row (drawer and page), footer.
    pub(crate) async fn app_layout(
        &self,
        node: &MarkupNode,
        with_drawer: bool,
    ) -> ConvertResult<SceneNode> {
        let header = node.find_descendant("q-header");
        let footer = node.find_descendant("q-footer");
        let drawer = node.find_descendant("q-drawer");
        let page = node.find_descendant("q-page");

        let mut frame = SceneNode::column("q-layout")
            .size(APP_WIDTH, APP_HEIGHT)
            .fill(Rgb::grey(0.95));

        if let Some(header) = header {
            if let Some(built) = self.isolate("q-header", self.part(header).await) {
                frame.children.push(built);
            }
        }

        let bars = [header, footer].iter().filter(|b| b.is_some()).count() as f64;
        let mut content = SceneNode::row("q-layout__content")
            .size(APP_WIDTH, APP_HEIGHT - bars * BAR_HEIGHT)
            .fill(Rgb::WHITE);

        let has_drawer = with_drawer || drawer.is_some();
        if has_drawer {
            let built = match drawer {
                Some(drawer) => self.part(drawer).await,
                None => self.generic_drawer().await,
            };
            if let Some(built) = self.isolate("q-drawer", built) {
                content.children.push(built);
            }
        }

        let built = match page {
            Some(page) => self.part(page).await,
            None => self.generic_page().await,
        };
        if let Some(mut built) = self.isolate("q-page", built) {
            if has_drawer {
                built.width = Some(APP_WIDTH - DRAWER_WIDTH);
            }
            content.children.push(built);
        }
        frame.children.push(content);

        if let Some(footer) = footer {
            if let Some(built) = self.isolate("q-footer", self.part(footer).await) {
                frame.children.push(built);
            }
        }
        Ok(frame)
    }

    async fn part(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        self.build_node(node).await.map(|b| b.node)
    }

    pub(crate) async fn header(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::row("q-header")
            .size(APP_WIDTH, BAR_HEIGHT)
            .padding(16.0, 8.0)
            .align(AxisAlign::SpaceBetween, AxisAlign::Center)
            .fill(self.resolver.palette().primary());
        style.combined().apply_to(&mut frame);
        if let Some(color) = self.prop_color(&style, "color") {
            frame = frame.fill(color);
        }
        let content = bar_text_color(&frame);

        match node.find_descendant("q-toolbar") {
            Some(toolbar) => {
                let inherited = TextSpec::default().color(content);
                let built = self.build_node_with(toolbar, inherited).await;
                if let Some(built) = self.isolate("q-toolbar", built.map(|b| b.node)) {
                    frame.children.push(built);
                }
            }
            None => {
                let spec = TextSpec::new(18.0).weight(FontWeight::Medium).color(content);
                frame = frame
                    .child(self.text("title", fallback::HEADER_TITLE, &spec).await?)
                    .child(SceneNode::row("header-actions").spacing(8.0).transparent());
            }
        }
        Ok(frame)
    }

    /// Title on the left, every other child in `toolbar-actions`.
    pub(crate) async fn toolbar(
        &self,
        node: &MarkupNode,
        inherited: &TextSpec,
    ) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::row("q-toolbar")
            .fixed_width(TOOLBAR_WIDTH)
            .align(AxisAlign::SpaceBetween, AxisAlign::Center)
            .spacing(8.0)
            .transparent();
        style.combined().apply_to(&mut frame);
        let color = inherited.color.unwrap_or(Rgb::WHITE);

        let title = node
            .children_with_tag("q-toolbar-title")
            .next()
            .map(MarkupNode::text_content)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback::TOOLBAR_TITLE.to_string());
        let spec = TextSpec::new(18.0).weight(FontWeight::Medium).color(color);
        frame = frame.child(self.text("q-toolbar-title", &title, &spec).await?);

        let mut actions = SceneNode::row("toolbar-actions")
            .spacing(8.0)
            .align(AxisAlign::Min, AxisAlign::Center)
            .transparent();
        let inherited = TextSpec::default().color(color);
        for child in node.element_children().filter(|c| c.tag != "q-toolbar-title") {
            let built = self.build_node_with(child, inherited.clone()).await;
            if let Some(built) = self.isolate(&child.tag, built.map(|b| b.node)) {
                actions.children.push(built);
            }
        }
        if actions.children.is_empty() {
            let glyph = TextSpec::new(20.0).color(color);
            actions = actions.child(
                SceneNode::row("menu-button")
                    .align(AxisAlign::Center, AxisAlign::Center)
                    .transparent()
                    .child(self.text("icon", fallback::MENU_GLYPH, &glyph).await?),
            );
        }
        Ok(frame.child(actions))
    }

    pub(crate) async fn footer(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::row("q-footer")
            .size(APP_WIDTH, BAR_HEIGHT)
            .padding(16.0, 8.0)
            .align(AxisAlign::Min, AxisAlign::Center)
            .fill(FOOTER_COLOR);
        style.combined().apply_to(&mut frame);
        if let Some(color) = self.prop_color(&style, "color") {
            frame = frame.fill(color);
        }
        let text = node.text_content();
        let text = if text.is_empty() {
            fallback::FOOTER_TEXT.to_string()
        } else {
            text
        };
        let spec = TextSpec::default().color(bar_text_color(&frame));
        Ok(frame.child(self.text("footer-text", &text, &spec).await?))
    }

    pub(crate) async fn drawer(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = drawer_frame();
        if style.is_set("bordered") {
            frame = frame.stroke(Rgb::grey(0.88), 1.0);
        }
        style.combined().apply_to(&mut frame);

        let list = match node.find_descendant("q-list") {
            Some(list) => self.part(list).await,
            None => self.menu_list().await,
        };
        if let Some(list) = self.isolate("q-list", list) {
            frame.children.push(list);
        }
        Ok(frame)
    }

    async fn generic_drawer(&self) -> ConvertResult<SceneNode> {
        let title = TextSpec::new(18.0).weight(FontWeight::Medium).color(Rgb::WHITE);
        let header = SceneNode::column("drawer-header")
            .padding_all(16.0)
            .fill(self.resolver.palette().primary())
            .child(self.text("title", fallback::MENU_TITLE, &title).await?);
        Ok(drawer_frame().child(header).child(self.menu_list().await?))
    }

    async fn menu_list(&self) -> ConvertResult<SceneNode> {
        let mut list = SceneNode::column("q-list").fill(Rgb::WHITE);
        for label in fallback::MENU_ITEMS {
            let item = SceneNode::row("q-item")
                .fixed_width(DRAWER_WIDTH)
                .padding(16.0, 12.0)
                .align(AxisAlign::Min, AxisAlign::Center)
                .transparent()
                .child(self.text("label", label, &TextSpec::default()).await?);
            list.children.push(item);
        }
        Ok(list)
    }

    pub(crate) async fn page(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node).combined();
        let mut frame = page_frame();
        style.apply_to(&mut frame);

        let inherited = TextSpec::default().styled(&style);
        let children = self.build_children(node, &inherited).await;
        if children.is_empty() {
            let spec = TextSpec::new(16.0);
            frame = frame.child(self.text("content", fallback::PAGE_CONTENT, &spec).await?);
        } else {
            frame.children.extend(children.into_iter().map(|b| b.node));
        }
        Ok(frame)
    }

    /// Page shown when the shell has no page of its own.
    async fn generic_page(&self) -> ConvertResult<SceneNode> {
        let title = TextSpec::new(24.0).weight(FontWeight::Bold);
        let subtitle = TextSpec::new(16.0).color(Rgb::grey(0.5));
        let card_title = TextSpec::new(16.0).weight(FontWeight::Bold);
        let card_text = TextSpec::default().color(Rgb::grey(0.6));

        let section = SceneNode::column("q-card-section")
            .padding_all(16.0)
            .spacing(8.0)
            .transparent()
            .child(self.text("title", fallback::EXAMPLE_CARD_TITLE, &card_title).await?)
            .child(self.text("text", fallback::EXAMPLE_CARD_TEXT, &card_text).await?);
        let card = SceneNode::column("q-card")
            .radius(4.0)
            .fill(Rgb::WHITE)
            .effect(Effect::drop_shadow(0.0, 2.0, 4.0, 0.2))
            .child(section);

        Ok(page_frame()
            .child(self.text("title", fallback::PAGE_TITLE, &title).await?)
            .child(self.text("subtitle", fallback::PAGE_SUBTITLE, &subtitle).await?)
            .child(card))
    }

    // ─── Tabs ────────────────────────────────────────────────────────────────

    pub(crate) async fn tabs_layout(&self, root: &MarkupNode) -> ConvertResult<SceneNode> {
        let tabs = root.find("q-tabs");
        if let Some(tabs) = tabs {
            if !self.settings.component_group_toggles.allows_tag(&tabs.tag) {
                return self.generic(tabs).await;
            }
        }
        let strip = self.tabs_strip(tabs).await?;
        let first = strip
            .children
            .first()
            .and_then(|tab| tab.texts().first().map(|t| t.to_string()))
            .unwrap_or_else(|| fallback::TABS[0].to_string());
        let panel = self.tab_panels(root.find("q-tab-panels"), &first).await?;
        Ok(SceneNode::column("tabs-container")
            .fixed_width(TABS_WIDTH)
            .fill(Rgb::WHITE)
            .child(strip)
            .child(panel))
    }

    /// Tab strip; the first tab is drawn active. No tabs means three
    /// numbered placeholders.
    pub(crate) async fn tabs_strip(&self, node: Option<&MarkupNode>) -> ConvertResult<SceneNode> {
        let mut labels: Vec<String> = node
            .into_iter()
            .flat_map(|tabs| tabs.children_with_tag("q-tab"))
            .map(|tab| {
                tab.attr("label")
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| tab.text_content())
            })
            .map(|label| if label.is_empty() { "Tab".to_string() } else { label })
            .collect();
        if labels.is_empty() {
            labels = fallback::TABS.iter().map(|t| t.to_string()).collect();
        }

        let style = node.map(|n| self.style_of(n));
        let primary = self.resolver.palette().primary();
        let active_color = style
            .as_ref()
            .and_then(|s| self.prop_color(s, "active-color"))
            .unwrap_or(primary);
        let indicator = style
            .as_ref()
            .and_then(|s| self.prop_color(s, "indicator-color"))
            .unwrap_or(primary);

        let mut strip = SceneNode::row("q-tabs")
            .fixed_width(TABS_WIDTH)
            .fill(Rgb::WHITE);
        if let Some(style) = &style {
            style.combined().apply_to(&mut strip);
        }
        let width = TABS_WIDTH / labels.len() as f64;
        for (i, label) in labels.iter().enumerate() {
            let active = i == 0;
            let mut tab = SceneNode::row("q-tab")
                .fixed_width(width)
                .padding(16.0, 12.0)
                .align(AxisAlign::Center, AxisAlign::Center);
            let text_color = if active {
                tab = tab.fill(Rgb::grey(0.95)).stroke(indicator, 2.0);
                tab.stroke_sides = Some(Sides {
                    bottom: 2.0,
                    ..Sides::default()
                });
                active_color
            } else {
                tab = tab.fill(Rgb::WHITE);
                Rgb::grey(0.4)
            };
            let spec = TextSpec::default().weight(FontWeight::Medium).color(text_color);
            strip.children.push(tab.child(self.text("label", label, &spec).await?));
        }
        Ok(strip)
    }

    /// Content of the first tab panel, or a placeholder naming `first_tab`.
    pub(crate) async fn tab_panels(
        &self,
        node: Option<&MarkupNode>,
        first_tab: &str,
    ) -> ConvertResult<SceneNode> {
        let mut frame = SceneNode::column("q-tab-panel")
            .fixed_width(TABS_WIDTH)
            .padding_all(16.0)
            .spacing(8.0)
            .fill(Rgb::WHITE);
        let panel = node.and_then(|n| n.find_descendant("q-tab-panel"));
        let children = match panel {
            Some(panel) => self.build_children(panel, &TextSpec::default()).await,
            None => Vec::new(),
        };
        if children.is_empty() {
            let text = fallback::tab_content(first_tab);
            frame = frame.child(self.text("content", &text, &TextSpec::default()).await?);
        } else {
            frame.children.extend(children.into_iter().map(|b| b.node));
        }
        Ok(frame)
    }

    // ─── Lists ───────────────────────────────────────────────────────────────

    pub(crate) async fn list_layout(&self, root: &MarkupNode) -> ConvertResult<SceneNode> {
        match root.find("q-list") {
            Some(list) if self.settings.component_group_toggles.allows_tag(&list.tag) => {
                self.list(list).await
            }
            Some(list) => self.generic(list).await,
            None => {
                let spec = TextSpec::default();
                Ok(SceneNode::column("list-container")
                    .child(self.text("message", fallback::LIST_MISSING, &spec).await?))
            }
        }
    }

    /// Items separated by dividers, unless the markup places its own.
    pub(crate) async fn list(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::column("q-list").fill(Rgb::WHITE);
        if style.is_set("bordered") {
            frame = frame.stroke(Rgb::grey(0.88), 1.0).radius(4.0);
        }
        style.combined().apply_to(&mut frame);

        let has_items = node.children_with_tag("q-item").next().is_some();
        if !has_items {
            for (i, label) in fallback::LIST_ITEMS.iter().enumerate() {
                if i > 0 {
                    frame.children.push(divider());
                }
                let item = MarkupNode::element("q-item").with_child(MarkupNode::text(*label));
                frame.children.push(self.list_item(&item).await?);
            }
            return Ok(frame);
        }

        let own_separators = node.children_with_tag("q-separator").next().is_some();
        let mut previous_item = false;
        for child in node.element_children() {
            let built = match child.tag.as_str() {
                "q-item-label" if child.has_attr("header") => self.caption(child).await,
                "q-item" => {
                    if previous_item && !own_separators {
                        frame.children.push(divider());
                    }
                    self.list_item(child).await
                }
                _ => self.part(child).await,
            };
            previous_item = child.tag == "q-item";
            if let Some(built) = self.isolate(&child.tag, built) {
                frame.children.push(built);
            }
        }
        Ok(frame)
    }

    async fn caption(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let spec = TextSpec::default()
            .weight(FontWeight::Medium)
            .color(Rgb::grey(0.5));
        let text = self.text("q-item-label", &node.text_content(), &spec).await?;
        Ok(SceneNode::column("q-item-label")
            .padding(16.0, 12.0)
            .transparent()
            .child(text))
    }

    /// Item: avatar sections lead, side sections trail, the rest stack in
    /// a content column.
    pub(crate) async fn list_item(&self, node: &MarkupNode) -> ConvertResult<SceneNode> {
        let style = self.style_of(node);
        let mut frame = SceneNode::row("q-item")
            .padding(16.0, 12.0)
            .spacing(16.0)
            .align(AxisAlign::Min, AxisAlign::Center)
            .fill(Rgb::WHITE);
        style.combined().apply_to(&mut frame);
        let inherited = TextSpec::default().maybe_color(style.classes.text_color());

        let mut content = SceneNode::column("q-item__content").spacing(4.0).transparent();
        let mut trailing = Vec::new();
        let sections: Vec<&MarkupNode> = node.children_with_tag("q-item-section").collect();

        if sections.is_empty() {
            let text = node.text_content();
            let text = if text.is_empty() {
                fallback::ITEM_CONTENT.to_string()
            } else {
                text
            };
            content = content.child(self.text("label", &text, &inherited).await?);
        }
        for section in sections {
            if section.has_attr("avatar") {
                frame.children.push(glyph());
                continue;
            }
            if section.has_attr("side") {
                trailing.push(glyph());
                continue;
            }
            let labels: Vec<&MarkupNode> = section.children_with_tag("q-item-label").collect();
            if labels.is_empty() {
                let text = section.text_content();
                let text = if text.is_empty() {
                    fallback::ITEM_CONTENT.to_string()
                } else {
                    text
                };
                content = content.child(self.text("label", &text, &inherited).await?);
            }
            for label in labels {
                let spec = if label.has_attr("caption") {
                    TextSpec::new(12.0).color(Rgb::grey(0.5))
                } else {
                    inherited.clone()
                };
                let text = label.text_content();
                content = content.child(self.text("q-item-label", &text, &spec).await?);
            }
        }
        frame.children.push(content);
        frame.children.extend(trailing);
        Ok(frame)
    }
}

/// Content color on a bar: contrast against its fill.
fn bar_text_color(frame: &SceneNode) -> Rgb {
    frame
        .fills
        .first()
        .filter(|p| !p.is_transparent())
        .map(|p| contrasting_text_color(p.color))
        .unwrap_or(Rgb::BLACK)
}

fn drawer_frame() -> SceneNode {
    SceneNode::column("q-drawer")
        .size(DRAWER_WIDTH, DRAWER_HEIGHT)
        .fill(Rgb::WHITE)
        .effect(Effect::drop_shadow(2.0, 0.0, 4.0, 0.1))
}

fn page_frame() -> SceneNode {
    SceneNode::column("q-page")
        .fixed_width(APP_WIDTH)
        .padding_all(24.0)
        .spacing(16.0)
        .fill(Rgb::WHITE)
}

fn divider() -> SceneNode {
    SceneNode::rectangle("q-separator", DRAWER_WIDTH, 1.0).fill(Rgb::grey(0.9))
}

fn glyph() -> SceneNode {
    SceneNode::ellipse("q-item__avatar", 24.0, 24.0).fill(Rgb::grey(0.8))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::color::Rgb;
    use crate::scene::{NodeKind, Paint};
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_app_layout_with_drawer() {
        let scene = build(
            r#"<q-layout view="hHh lpR fFf">
                 <q-header elevated class="bg-primary text-white">
                   <q-toolbar>
                     <q-btn flat round dense icon="menu" />
                     <q-toolbar-title>My App</q-toolbar-title>
                   </q-toolbar>
                 </q-header>
                 <q-drawer show-if-above side="left" bordered>
                   <q-list><q-item clickable>Inbox</q-item><q-item clickable>Sent</q-item></q-list>
                 </q-drawer>
                 <q-page-container><q-page padding><p>Hello</p></q-page></q-page-container>
               </q-layout>"#,
        )
        .await;
        assert_eq!(scene.name, "q-layout");
        assert_eq!(names(&scene), vec!["q-header", "q-layout__content"]);

        let header = &scene.children[0];
        let toolbar = header.find("q-toolbar").unwrap();
        assert_eq!(names(toolbar), vec!["q-toolbar-title", "toolbar-actions"]);
        assert_eq!(toolbar.children[0].characters(), Some("My App"));
        assert_eq!(toolbar.children[0].text_color(), Some(Rgb::WHITE));
        assert_eq!(toolbar.children[1].children[0].name, "q-btn");

        let content = &scene.children[1];
        assert_eq!(content.height, Some(728.0));
        assert_eq!(names(content), vec!["q-drawer", "q-page"]);
        assert_eq!(content.children[1].width, Some(768.0));

        let list = content.children[0].find("q-list").unwrap();
        assert_eq!(names(list), vec!["q-item", "q-separator", "q-item"]);
        assert_eq!(scene.texts().last(), Some(&"Hello"));
    }

    #[tokio::test]
    async fn test_basic_layout_fallbacks() {
        let scene = build("<q-layout><q-footer /></q-layout>").await;
        assert_eq!(names(&scene), vec!["q-layout__content", "q-footer"]);
        let page = scene.find("q-page").unwrap();
        assert_eq!(page.texts()[0], "Título da Página");
        let footer = scene.find("q-footer").unwrap();
        assert_eq!(footer.texts(), vec!["© 2025 My App"]);
        assert_eq!(footer.children[0].text_color(), Some(Rgb::WHITE));
    }

    #[tokio::test]
    async fn test_header_without_toolbar() {
        let scene = build("<q-layout><q-header /><q-drawer /></q-layout>").await;
        let header = scene.find("q-header").unwrap();
        assert_eq!(header.texts(), vec!["App Header"]);
        let drawer = scene.find("q-drawer").unwrap();
        assert_eq!(drawer.texts(), vec!["Home", "Perfil", "Configurações", "Sobre"]);
    }

    #[tokio::test]
    async fn test_generic_drawer_when_missing() {
        // Classified with a drawer, but the drawer failed to show up as a
        // direct part: the generic drawer carries a menu header.
        let settings = Settings::default();
        let root = markup("<q-layout><q-header /></q-layout>");
        let synth = super::super::Synthesizer::new(&settings, &crate::backend::NoopBackend);
        let scene = synth.app_layout(&root, true).await.unwrap();
        let drawer = scene.find("q-drawer").unwrap();
        assert_eq!(drawer.texts()[0], "Menu");
    }

    #[tokio::test]
    async fn test_page_only() {
        let scene = build("<q-page><q-card><q-card-section>Inside</q-card-section></q-card></q-page>").await;
        assert_eq!(scene.name, "q-page");
        assert_eq!(names(&scene), vec!["q-card"]);
        let scene = build("<q-page />").await;
        assert_eq!(scene.texts(), vec!["Conteúdo da Página"]);
    }

    #[tokio::test]
    async fn test_tabs_layout() {
        let scene = build(
            r#"<div>
                 <q-tabs v-model="tab" active-color="secondary">
                   <q-tab name="mails" label="Mails" />
                   <q-tab name="alarms" label="Alarms" />
                 </q-tabs>
                 <q-tab-panels v-model="tab">
                   <q-tab-panel name="mails"><div class="text-h6">Mails</div>Lorem</q-tab-panel>
                 </q-tab-panels>
               </div>"#,
        )
        .await;
        assert_eq!(names(&scene), vec!["q-tabs", "q-tab-panel"]);
        let strip = &scene.children[0];
        assert_eq!(strip.children.len(), 2);
        assert_eq!(strip.children[0].width, Some(200.0));
        assert_eq!(
            strip.children[0].children[0].text_color(),
            Some(Rgb::new(0.15, 0.65, 0.6))
        );
        assert_eq!(scene.children[1].texts(), vec!["Mails", "Lorem"]);
    }

    #[tokio::test]
    async fn test_tabs_fallback() {
        let scene = build("<q-tabs />").await;
        let strip = &scene.children[0];
        let labels: Vec<_> = strip.children.iter().flat_map(|t| t.texts()).collect();
        assert_eq!(labels, vec!["Tab 1", "Tab 2", "Tab 3"]);
        assert_eq!(scene.children[1].texts(), vec!["Conteúdo da Tab 1"]);
    }

    #[tokio::test]
    async fn test_list_layout() {
        let scene = build(
            r#"<section>
                 <q-list bordered>
                   <q-item-label header>Contacts</q-item-label>
                   <q-item>
                     <q-item-section avatar><q-avatar icon="person" /></q-item-section>
                     <q-item-section>
                       <q-item-label>Ana</q-item-label>
                       <q-item-label caption>Online</q-item-label>
                     </q-item-section>
                     <q-item-section side>3</q-item-section>
                   </q-item>
                 </q-list>
               </section>"#,
        )
        .await;
        assert_eq!(scene.name, "q-list");
        assert_eq!(scene.stroke_weight, 1.0);
        assert_eq!(names(&scene), vec!["q-item-label", "q-item"]);
        let item = &scene.children[1];
        assert_eq!(names(item), vec!["q-item__avatar", "q-item__content", "q-item__avatar"]);
        assert_eq!(item.children[0].kind, NodeKind::Ellipse);
        let caption = &item.children[1].children[1];
        assert_eq!(caption.characters(), Some("Online"));
        assert_eq!(caption.text.as_ref().unwrap().font_size, 12.0);
    }

    #[tokio::test]
    async fn test_list_fallback_items() {
        let scene = build("<q-list />").await;
        assert_eq!(scene.texts(), vec!["Item 1", "Item 2", "Item 3"]);
        assert_eq!(
            names(&scene),
            vec!["q-item", "q-separator", "q-item", "q-separator", "q-item"]
        );
        assert_eq!(scene.children[1].fills, vec![Paint::solid(Rgb::grey(0.9))]);
    }

    #[tokio::test]
    async fn test_layout_group_disabled() {
        let mut settings = Settings::default();
        settings.component_group_toggles.layout = false;
        let scene = build_with("<q-page />", &settings).await;
        assert_eq!(scene.texts()[0], "Componente q-page");
    }
}
