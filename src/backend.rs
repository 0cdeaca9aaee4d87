use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};
use crate::scene::{FontName, FontWeight};

/// Fonts every conversion needs before synthesis starts.
pub fn required_fonts() -> Vec<FontName> {
    [FontWeight::Regular, FontWeight::Medium, FontWeight::Bold]
        .into_iter()
        .map(FontName::inter)
        .collect()
}

/// The rendering backend as seen by the synthesizer: the only thing the
/// core asks of it is to make a font available before text is placed.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Make `font` available. May suspend; an error means text in that font
    /// cannot be placed.
    async fn load_font(&self, font: &FontName) -> ConvertResult<()>;
}

/// Backend for which every font is always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

#[async_trait]
impl RenderBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn load_font(&self, _font: &FontName) -> ConvertResult<()> {
        Ok(())
    }
}

/// Backend with a fixed set of installed fonts. Records every request.
#[derive(Debug, Default)]
pub struct FontCatalog {
    available: HashSet<FontName>,
    requests: Mutex<Vec<FontName>>,
}

impl FontCatalog {
    pub fn new(fonts: impl IntoIterator<Item = FontName>) -> Self {
        Self {
            available: fonts.into_iter().collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A catalog holding the three Inter styles.
    pub fn inter() -> Self {
        Self::new(required_fonts())
    }

    /// Fonts requested so far, in request order.
    pub fn requests(&self) -> Vec<FontName> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RenderBackend for FontCatalog {
    fn name(&self) -> &str {
        "font-catalog"
    }

    async fn load_font(&self, font: &FontName) -> ConvertResult<()> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(font.clone());
        }
        if self.available.contains(font) {
            debug!(family = %font.family, style = %font.style, "font loaded");
            Ok(())
        } else {
            Err(ConvertError::FontUnavailable {
                family: font.family.clone(),
                style: font.style.clone(),
                reason: "not in catalog".to_string(),
            })
        }
    }
}
