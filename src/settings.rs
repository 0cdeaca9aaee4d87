use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConvertResult;
use crate::theme::{ColorTheme, Palette};

/// Control density when a node carries no `size`/`dense` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Default,
    Comfortable,
    Compact,
}

/// Families of builders that can be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentGroup {
    Form,
    Layout,
    Navigation,
    Display,
}

impl ComponentGroup {
    /// Group a tag belongs to, if any.
    pub fn of_tag(tag: &str) -> Option<Self> {
        let group = match tag {
            "q-btn" | "q-input" | "q-select" | "q-checkbox" | "q-radio" | "q-toggle"
            | "q-form" | "q-field" => ComponentGroup::Form,
            "q-layout" | "q-page" | "q-header" | "q-footer" | "q-drawer" => ComponentGroup::Layout,
            "q-tabs" | "q-tab" | "q-tab-panels" | "q-tab-panel" | "q-toolbar"
            | "q-toolbar-title" => ComponentGroup::Navigation,
            "q-card" | "q-card-section" | "q-card-actions" | "q-list" | "q-item"
            | "q-item-section" | "q-separator" => ComponentGroup::Display,
            _ => return None,
        };
        Some(group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentGroupToggles {
    pub form: bool,
    pub layout: bool,
    pub navigation: bool,
    pub display: bool,
}

impl Default for ComponentGroupToggles {
    fn default() -> Self {
        Self {
            form: true,
            layout: true,
            navigation: true,
            display: true,
        }
    }
}

impl ComponentGroupToggles {
    pub fn is_enabled(&self, group: ComponentGroup) -> bool {
        match group {
            ComponentGroup::Form => self.form,
            ComponentGroup::Layout => self.layout,
            ComponentGroup::Navigation => self.navigation,
            ComponentGroup::Display => self.display,
        }
    }

    /// Tags outside every group are always enabled.
    pub fn allows_tag(&self, tag: &str) -> bool {
        ComponentGroup::of_tag(tag).map_or(true, |g| self.is_enabled(g))
    }
}

/// Conversion options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub preserve_theme_colors: bool,
    pub use_auto_layout_semantics: bool,
    pub create_component_variants: bool,
    pub component_density: Density,
    pub color_theme: ColorTheme,
    pub component_group_toggles: ComponentGroupToggles,
    /// Extra or replacement palette entries for `colorTheme: custom`.
    pub custom_colors: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preserve_theme_colors: true,
            use_auto_layout_semantics: true,
            create_component_variants: true,
            component_density: Density::Default,
            color_theme: ColorTheme::ThemeDefault,
            component_group_toggles: ComponentGroupToggles::default(),
            custom_colors: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML (JSON is accepted too). Missing keys take
    /// their defaults.
    pub fn from_yaml_str(source: &str) -> ConvertResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.color_theme, &self.custom_colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.preserve_theme_colors);
        assert!(settings.use_auto_layout_semantics);
        assert_eq!(settings.component_density, Density::Default);
        assert_eq!(settings.color_theme, ColorTheme::ThemeDefault);
        assert!(settings.component_group_toggles.allows_tag("q-card"));
    }

    #[test]
    fn test_yaml_partial() {
        let yaml = "preserveThemeColors: false\ncomponentDensity: compact\ncomponentGroupToggles:\n  display: false\n";
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert!(!settings.preserve_theme_colors);
        assert_eq!(settings.component_density, Density::Compact);
        assert!(!settings.component_group_toggles.display);
        assert!(settings.component_group_toggles.form);
        assert!(!settings.component_group_toggles.allows_tag("q-card"));
        assert!(settings.component_group_toggles.allows_tag("q-avatar"));
    }

    #[test]
    fn test_json_is_accepted() {
        let json = r##"{"colorTheme": "custom", "customColors": {"primary": "#ff0000"}}"##;
        let settings = Settings::from_yaml_str(json).unwrap();
        assert_eq!(settings.color_theme, ColorTheme::Custom);
        assert_eq!(settings.palette().primary(), crate::color::Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        assert_eq!(Settings::from_yaml_str("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_value() {
        let err = Settings::from_yaml_str("componentDensity: roomy").unwrap_err();
        assert!(matches!(err, ConvertError::Settings(_)));
    }

    #[test]
    fn test_tag_groups() {
        assert_eq!(ComponentGroup::of_tag("q-toggle"), Some(ComponentGroup::Form));
        assert_eq!(ComponentGroup::of_tag("q-tab"), Some(ComponentGroup::Navigation));
        assert_eq!(ComponentGroup::of_tag("div"), None);
    }
}
