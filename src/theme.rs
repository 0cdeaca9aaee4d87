use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::color::{parse_css_color, Rgb};

/// Which built-in palette a conversion starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    ThemeDefault,
    Alternate,
    Custom,
}

/// Named theme colors used by `bg-*`/`text-*` classes, `color` props and
/// `var(--q-*)` references. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: BTreeMap<String, Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::quasar()
    }
}

impl Palette {
    /// The stock Quasar palette.
    pub fn quasar() -> Self {
        Self::from_entries(&[
            ("primary", Rgb::new(0.1, 0.5, 0.9)),
            ("secondary", Rgb::new(0.15, 0.65, 0.6)),
            ("accent", Rgb::new(0.61, 0.15, 0.69)),
            ("positive", Rgb::new(0.13, 0.73, 0.27)),
            ("negative", Rgb::new(0.76, 0.0, 0.08)),
            ("info", Rgb::new(0.19, 0.8, 0.93)),
            ("warning", Rgb::new(0.95, 0.75, 0.22)),
            ("dark", Rgb::new(0.19, 0.19, 0.19)),
            ("white", Rgb::WHITE),
            ("black", Rgb::BLACK),
            ("grey", Rgb::grey(0.5)),
        ])
    }

    /// Material-style palette with the same names.
    pub fn alternate() -> Self {
        Self::from_entries(&[
            ("primary", Rgb::new(0.38, 0.0, 0.93)),
            ("secondary", Rgb::new(0.01, 0.85, 0.78)),
            ("accent", Rgb::new(1.0, 0.25, 0.51)),
            ("positive", Rgb::new(0.3, 0.69, 0.31)),
            ("negative", Rgb::new(0.69, 0.0, 0.13)),
            ("info", Rgb::new(0.13, 0.59, 0.95)),
            ("warning", Rgb::new(0.98, 0.55, 0.0)),
            ("dark", Rgb::new(0.07, 0.07, 0.07)),
            ("white", Rgb::WHITE),
            ("black", Rgb::BLACK),
            ("grey", Rgb::grey(0.5)),
        ])
    }

    /// Build the palette for a color theme. `custom` entries are CSS colors
    /// laid over the stock palette; unparsable entries are skipped.
    pub fn for_theme(theme: ColorTheme, custom: &BTreeMap<String, String>) -> Self {
        match theme {
            ColorTheme::ThemeDefault => Self::quasar(),
            ColorTheme::Alternate => Self::alternate(),
            ColorTheme::Custom => {
                let base = Self::quasar();
                let mut colors = base.colors.clone();
                for (name, value) in custom {
                    match parse_css_color(value, &base) {
                        Some(color) => {
                            colors.insert(name.clone(), color.rgb());
                        }
                        None => warn!(name = %name, value = %value, "skipping unparsable custom color"),
                    }
                }
                Self { colors }
            }
        }
    }

    fn from_entries(entries: &[(&str, Rgb)]) -> Self {
        Self {
            colors: entries
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn primary(&self) -> Rgb {
        self.get("primary").unwrap_or(Rgb::new(0.1, 0.5, 0.9))
    }

    /// Resolve a `color` prop: theme name first, then any CSS color.
    pub fn resolve(&self, value: &str) -> Option<Rgb> {
        self.get(value)
            .or_else(|| parse_css_color(value, self).map(|c| c.rgb()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }
}
