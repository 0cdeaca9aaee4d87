//! # Quasar template to scene-graph converter
//!
//! Reads a Vue single-file component built with Quasar components and turns
//! its template into a backend-agnostic design tree (frames, text, shapes)
//! that a design tool can materialize.
//!
//! ## Pipeline
//! - **Parse** the `<template>` block into a [`MarkupNode`] tree (lenient,
//!   accepts Vue binding syntax) and read the optional `<script>` block.
//! - **Classify** the whole template into one [`LayoutArchetype`].
//! - **Synthesize** a [`SceneNode`] tree with tag-specific builders, resolving
//!   Quasar utility classes, inline styles and component props.
//!
//! ## Example
//! ```ignore
//! use quasar_scene::{convert_with_settings, FontCatalog, Settings};
//!
//! let source = r#"
//! <template>
//!   <q-btn flat color="primary">Go</q-btn>
//! </template>
//! "#;
//!
//! let settings = Settings::default();
//! let conversion = convert_with_settings(source, &settings, &FontCatalog::inter())
//!     .await
//!     .expect("conversion failed");
//! println!("{}", conversion.root.outline());
//! ```

pub mod backend;
pub mod classify;
pub mod color;
pub mod convert;
pub mod document;
pub mod error;
pub mod markup;
pub mod parser;
pub mod props;
pub mod resolver;
pub mod scene;
pub mod script;
pub mod settings;
pub mod style;
pub mod synth;
pub mod theme;
pub mod utility;

// --- Core types ---
pub use backend::{FontCatalog, NoopBackend, RenderBackend};
pub use classify::{Classifier, LayoutArchetype};
pub use convert::Conversion;
pub use document::ComponentDocument;
pub use error::{ConversionFailure, ConvertError, ConvertResult};
pub use markup::MarkupNode;
pub use resolver::{NodeStyle, StyleResolver};
pub use scene::SceneNode;
pub use settings::Settings;
pub use style::{ResolvedStyle, StyleProperty};

// --- Script types ---
pub use script::{PropDef, PropDefault, PropType, ScriptInfo};

/// Parse the template block of a component source into its root element.
pub fn parse_template(source: &str) -> ConvertResult<MarkupNode> {
    parser::parse_template(source)
}

/// Parse a component source: script info plus template root, with literal
/// prop defaults substituted into matching bindings.
pub fn parse_component(source: &str) -> ConvertResult<ComponentDocument> {
    document::parse_component(source)
}

/// Classify a parsed template with the stock Quasar tag vocabulary.
pub fn classify(root: &MarkupNode) -> LayoutArchetype {
    Classifier::default().classify(root)
}

/// Convert with default settings against a backend where every font is
/// available.
pub async fn convert(source: &str) -> Result<Conversion, ConversionFailure> {
    convert::convert(source, &Settings::default(), &NoopBackend).await
}

/// Convert with explicit settings and rendering backend.
pub async fn convert_with_settings(
    source: &str,
    settings: &Settings,
    backend: &dyn RenderBackend,
) -> Result<Conversion, ConversionFailure> {
    convert::convert(source, settings, backend).await
}
