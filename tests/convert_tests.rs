use async_trait::async_trait;
use pretty_assertions::assert_eq;
use quasar_scene::color::{contrasting_text_color, Rgb};
use quasar_scene::scene::{FontName, FontWeight, NodeKind, Paint};
use quasar_scene::utility::spacing::spacing_value;
use quasar_scene::{
    classify, convert, convert_with_settings, parse_component, parse_template, ConvertError,
    ConvertResult, FontCatalog, LayoutArchetype, MarkupNode, RenderBackend, SceneNode, Settings,
    StyleResolver,
};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

const PRIMARY: Rgb = Rgb::new(0.1, 0.5, 0.9);

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push(filename);
    path
}

fn read_fixture(filename: &str) -> String {
    fs::read_to_string(get_fixture_path(filename)).unwrap()
}

/// The synthesized component inside the main frame.
fn content(root: &SceneNode) -> &SceneNode {
    &root.children[0]
}

/// Accepts the preload, then refuses one font for every later request.
struct RefusingBackend {
    refused: FontName,
    calls: AtomicUsize,
}

impl RefusingBackend {
    fn new(weight: FontWeight) -> Self {
        Self {
            refused: FontName::inter(weight),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RenderBackend for RefusingBackend {
    fn name(&self) -> &str {
        "refusing"
    }

    async fn load_font(&self, font: &FontName) -> ConvertResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= 3 && *font == self.refused {
            return Err(ConvertError::FontUnavailable {
                family: font.family.clone(),
                style: font.style.clone(),
                reason: "refused".to_string(),
            });
        }
        Ok(())
    }
}

// ─── Whole fixtures ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_flat_button() {
    let result = convert(&read_fixture("flat-button.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::ButtonComponent);
    assert_eq!(result.component_name, "QuasarComponent");

    let button = content(&result.root);
    assert_eq!(button.name, "q-btn");
    assert!(button.fills[0].is_transparent());
    assert_eq!(button.texts(), vec!["Go"]);
    assert_eq!(button.children[0].text_color(), Some(PRIMARY));
}

#[tokio::test]
async fn test_card_without_actions() {
    let result = convert(&read_fixture("card-no-actions.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::CardLayout);
    assert_eq!(result.root.name, "PlanetCard");

    let card = content(&result.root);
    assert_eq!(card.name, "q-card");
    let names: Vec<&str> = card.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["q-card-section", "q-separator", "q-card-section", "q-card-actions"]
    );

    let actions = card.children.last().unwrap();
    assert_eq!(actions.texts(), vec!["Cancelar", "OK"]);
    assert!(actions.children[0].fills[0].is_transparent());
    assert_eq!(actions.children[1].fills[0], Paint::solid(PRIMARY));

    // Section on primary: white text, subtitle dimmed.
    let header = &card.children[0];
    assert_eq!(header.fills[0], Paint::solid(PRIMARY));
    assert_eq!(header.texts(), vec!["Our Changing Planet", "by John Doe"]);
    assert_eq!(header.children[0].text_color(), Some(Rgb::WHITE));
    assert_eq!(header.children[1].opacity, 0.7);

    // q-pa-md text-h6 on the body section.
    let body = &card.children[2];
    assert_eq!(body.padding.top, 16.0);
    assert_eq!(body.padding.left, 16.0);
    let text = body.children[0].text.as_ref().unwrap();
    assert_eq!(text.characters, "Lorem ipsum dolor sit amet");
    assert_eq!(text.font_size, 20.0);
    assert_eq!(text.weight(), FontWeight::Bold);

    assert_eq!(result.unrecognized_classes, vec!["my-card"]);
}

#[tokio::test]
async fn test_page_wins_over_card() {
    let result = convert(&read_fixture("page-with-card.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::PageOnly);

    let page = content(&result.root);
    assert_eq!(page.name, "q-page");
    let card = page.find("q-card").unwrap();
    let actions = card.find("q-card-actions").unwrap();
    // The card's own actions row is kept, no fallback pair.
    assert_eq!(actions.texts(), vec!["Close"]);
}

#[tokio::test]
async fn test_app_layout_with_drawer() {
    let result = convert(&read_fixture("app-layout.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::AppLayoutWithDrawer);
    assert_eq!(result.component_name, "MainLayout");

    let layout = content(&result.root);
    assert_eq!(layout.name, "q-layout");
    let names: Vec<&str> = layout.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["q-header", "q-layout__content", "q-footer"]);

    let header = &layout.children[0];
    assert_eq!(header.fills[0], Paint::solid(PRIMARY));
    let title = header.find("q-toolbar-title").unwrap();
    assert_eq!(title.characters(), Some("Dashboard"));
    assert_eq!(title.text_color(), Some(Rgb::WHITE));

    let body = &layout.children[1];
    assert_eq!(body.height, Some(768.0 - 80.0));
    let drawer = body.find("q-drawer").unwrap();
    let drawer_texts = drawer.texts();
    assert!(drawer_texts.contains(&"Navigation"));
    assert!(drawer_texts.contains(&"Inbox"));
    assert!(drawer_texts.contains(&"Outbox"));

    let page = body.find("q-page").unwrap();
    assert_eq!(page.width, Some(768.0));
    assert_eq!(page.padding.top, 24.0);
    assert_eq!(page.texts(), vec!["Welcome", "Start"]);

    let footer = &layout.children[2];
    assert!(footer.texts().contains(&"Footer note"));
}

#[tokio::test]
async fn test_login_form_with_prop_defaults() {
    let result = convert(&read_fixture("login-form.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::FormLayout);

    let form = content(&result.root);
    assert_eq!(form.name, "q-form");

    // `:label="nameLabel"` picks up the declared default.
    let label = form.find("q-input__label").unwrap();
    assert_eq!(label.characters(), Some("Your name *"));
    let error = form.find("q-input__error").unwrap();
    assert_eq!(error.characters(), Some("Please type your age"));

    // `:value="accepted"` with a `true` default renders a checked toggle.
    let thumb = form.find("q-toggle__thumb").unwrap();
    assert_eq!(thumb.x, Some(16.0));

    // No builder for q-rating: generic placeholder.
    let rating = form.find("q-rating").unwrap();
    assert_eq!(rating.texts()[0], "Componente q-rating");

    let texts = form.texts();
    assert!(texts.contains(&"Submit"));
    assert!(texts.contains(&"Reset"));
    assert!(result.unrecognized_classes.contains(&"q-gutter-md".to_string()));
}

#[tokio::test]
async fn test_tabs_panel_inside_slot_template() {
    let result = convert(&read_fixture("tabs.vue")).await.unwrap();
    assert_eq!(result.archetype, LayoutArchetype::TabsLayout);

    let container = content(&result.root);
    assert_eq!(container.name, "tabs-container");
    let strip = container.find("q-tabs").unwrap();
    assert_eq!(strip.texts(), vec!["Mails", "Alarms", "Movies"]);

    let panel = container.find("q-tab-panel").unwrap();
    let texts = panel.texts();
    assert_eq!(texts[0], "Mails");
    assert!(texts[1].starts_with("Lorem ipsum"));
}

#[tokio::test]
async fn test_missing_template_diagnostic() {
    let failure = convert(&read_fixture("no-template.vue")).await.unwrap_err();
    assert_eq!(failure.error, ConvertError::TemplateNotFound);
    assert_eq!(failure.diagnostic.kind, NodeKind::Text);
    assert_eq!(failure.diagnostic.name, "error");
    assert!(failure
        .diagnostic
        .characters()
        .unwrap()
        .starts_with("Erro ao processar o componente:"));
}

#[tokio::test]
async fn test_settings_file() {
    let settings = Settings::load(get_fixture_path("settings-compact.yaml")).unwrap();
    assert!(!settings.preserve_theme_colors);

    let source = read_fixture("card-no-actions.vue");
    let result = convert_with_settings(&source, &settings, &FontCatalog::inter())
        .await
        .unwrap();
    // Display group switched off: the card is a placeholder.
    let card = content(&result.root);
    assert_eq!(card.name, "q-card");
    assert_eq!(card.texts()[0], "Componente q-card");
}

// ─── Failure isolation ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_failing_children_are_dropped() {
    let backend = RefusingBackend::new(FontWeight::Bold);
    let source = read_fixture("card-no-actions.vue");
    let result = convert_with_settings(&source, &Settings::default(), &backend)
        .await
        .unwrap();

    let card = content(&result.root);
    // Bold headings are gone, their siblings and the fallback pair remain.
    assert_eq!(card.texts(), vec!["by John Doe", "Cancelar", "OK"]);
    assert_eq!(card.children.len(), 4);
}

#[tokio::test]
async fn test_font_failure_at_top_level_is_fatal() {
    let backend = RefusingBackend::new(FontWeight::Medium);
    let failure = convert_with_settings(&read_fixture("flat-button.vue"), &Settings::default(), &backend)
        .await
        .unwrap_err();
    assert!(matches!(failure.error, ConvertError::FontUnavailable { .. }));
}

// ─── Parsing and styling ─────────────────────────────────────────────────────

#[test]
fn test_component_parsing() {
    let document = parse_component(&read_fixture("login-form.vue")).unwrap();
    assert_eq!(document.name(), "LoginForm");
    assert_eq!(document.script.props.len(), 2);
    assert_eq!(document.template_line, 1);
    assert_eq!(classify(document.root()), LayoutArchetype::FormLayout);
}

#[test]
fn test_markup_round_trip() {
    let root = parse_template(&read_fixture("page-with-card.vue")).unwrap();
    let again = parse_template(&format!("<template>{}</template>", root.to_markup())).unwrap();
    assert_eq!(root, again);
}

#[test]
fn test_spacing_and_typography_classes() {
    let node = MarkupNode::element("div").with_attr("class", "q-pa-md text-h6");
    let style = StyleResolver::default().resolve_node_style(&node).combined();
    assert_eq!(style.padding(), [Some(16.0); 4]);
    assert_eq!(style.font_size(), Some(20.0));
    assert_eq!(style.font_weight(), Some(FontWeight::Bold));
    assert_eq!(style.letter_spacing(), Some(0.0));
}

#[test]
fn test_spacing_scale_is_shared() {
    let resolver = StyleResolver::default();
    for (size, px) in [("xs", 4.0), ("sm", 8.0), ("md", 16.0), ("lg", 24.0), ("xl", 32.0)] {
        assert_eq!(spacing_value(size), Some(px));
        let padding = resolver.resolve_class_style(&format!("q-pa-{size}")).unwrap();
        let margin = resolver.resolve_class_style(&format!("q-ma-{size}")).unwrap();
        assert_eq!(padding.padding(), [Some(px); 4]);
        assert_eq!(padding.len(), 4);
        assert_eq!(margin.len(), 4);
    }
}

#[test]
fn test_contrast_is_black_or_white() {
    assert_eq!(contrasting_text_color(Rgb::WHITE), Rgb::BLACK);
    assert_eq!(contrasting_text_color(Rgb::BLACK), Rgb::WHITE);
    assert_eq!(contrasting_text_color(PRIMARY), Rgb::WHITE);
    assert_eq!(contrasting_text_color(Rgb::new(0.95, 0.75, 0.22)), Rgb::BLACK);
}
