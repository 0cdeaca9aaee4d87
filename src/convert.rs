use serde::Serialize;
use tracing::{debug, info};

use crate::backend::{required_fonts, RenderBackend};
use crate::classify::{Classifier, LayoutArchetype};
use crate::color::Rgb;
use crate::document::{parse_component, ComponentDocument};
use crate::error::{ConversionFailure, ConvertError};
use crate::scene::{FontName, FontWeight, Paint, SceneNode, TextStyle};
use crate::settings::Settings;
use crate::synth::Synthesizer;
use crate::utility::unrecognized_classes;

const DIAGNOSTIC_COLOR: Rgb = Rgb::new(0.9, 0.3, 0.3);

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// Main frame wrapping the synthesized component.
    pub root: SceneNode,
    pub archetype: LayoutArchetype,
    pub component_name: String,
    /// Classes that no utility family resolved, in order of first use.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_classes: Vec<String>,
}

/// Convert a component source into a scene tree.
///
/// Fonts are preloaded first; any failure before or during the top-level
/// build is fatal and comes back with a ready diagnostic node.
pub async fn convert(
    source: &str,
    settings: &Settings,
    backend: &dyn RenderBackend,
) -> Result<Conversion, ConversionFailure> {
    for font in required_fonts() {
        backend.load_font(&font).await.map_err(fail)?;
    }
    debug!(backend = backend.name(), "fonts ready");

    let document = parse_component(source).map_err(fail)?;
    let archetype = Classifier::default().classify(document.root());
    debug!(archetype = %archetype, "template classified");

    let synth = Synthesizer::new(settings, backend);
    let content = synth
        .synthesize(document.root(), archetype)
        .await
        .map_err(fail)?;
    let unrecognized = unrecognized_classes(synth.resolver().registry(), document.root());
    if !unrecognized.is_empty() {
        debug!(classes = ?unrecognized, "unrecognized classes ignored");
    }

    let mut root = main_frame(&document, archetype).child(content);
    if !settings.use_auto_layout_semantics {
        root.strip_auto_layout();
    }
    info!(component = %document.name(), archetype = %archetype, "conversion finished");
    Ok(Conversion {
        root,
        archetype,
        component_name: document.name().to_string(),
        unrecognized_classes: unrecognized,
    })
}

fn main_frame(document: &ComponentDocument, archetype: LayoutArchetype) -> SceneNode {
    SceneNode::column(document.name())
        .padding_all(20.0)
        .spacing(16.0)
        .fill(Rgb::WHITE)
        .meta("quasarComponent", "true")
        .meta("layoutType", archetype.as_str())
        .meta("componentName", document.name())
}

fn fail(error: ConvertError) -> ConversionFailure {
    let diagnostic = Box::new(diagnostic_node(&error));
    ConversionFailure { error, diagnostic }
}

/// Readable error text for a failed conversion. Built without the backend,
/// since the backend itself may be what failed.
pub fn diagnostic_node(error: &ConvertError) -> SceneNode {
    let mut node = SceneNode::text_node(
        "error",
        TextStyle {
            characters: format!("Erro ao processar o componente: {error}"),
            font: FontName::inter(FontWeight::Regular),
            font_size: 14.0,
            letter_spacing: None,
            line_height: None,
            text_case: Default::default(),
            text_align: Default::default(),
        },
    );
    node.fills = vec![Paint::solid(DIAGNOSTIC_COLOR)];
    node
}
