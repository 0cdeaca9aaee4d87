use serde::{Deserialize, Serialize};
use std::fmt;

use crate::markup::MarkupNode;

/// The overall shape of a template, picked once per conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutArchetype {
    AppLayoutWithDrawer,
    AppLayout,
    BasicLayout,
    PageOnly,
    TabsLayout,
    CardLayout,
    FormLayout,
    ButtonComponent,
    FormComponent,
    ListLayout,
    Unknown,
}

impl LayoutArchetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutArchetype::AppLayoutWithDrawer => "app-layout-with-drawer",
            LayoutArchetype::AppLayout => "app-layout",
            LayoutArchetype::BasicLayout => "basic-layout",
            LayoutArchetype::PageOnly => "page-only",
            LayoutArchetype::TabsLayout => "tabs-layout",
            LayoutArchetype::CardLayout => "card-layout",
            LayoutArchetype::FormLayout => "form-layout",
            LayoutArchetype::ButtonComponent => "button-component",
            LayoutArchetype::FormComponent => "form-component",
            LayoutArchetype::ListLayout => "list-layout",
            LayoutArchetype::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LayoutArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag names the classifier looks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagVocabulary {
    pub shell: String,
    pub drawer: String,
    pub header: String,
    pub page: String,
    pub tabs: String,
    pub card: String,
    pub form: String,
    pub button: String,
    pub form_controls: Vec<String>,
    pub list: String,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            shell: "q-layout".into(),
            drawer: "q-drawer".into(),
            header: "q-header".into(),
            page: "q-page".into(),
            tabs: "q-tabs".into(),
            card: "q-card".into(),
            form: "q-form".into(),
            button: "q-btn".into(),
            form_controls: ["q-input", "q-select", "q-checkbox", "q-radio", "q-toggle", "q-file"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            list: "q-list".into(),
        }
    }
}

/// Pure, deterministic template classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    tags: TagVocabulary,
}

impl Classifier {
    pub fn new(tags: TagVocabulary) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &TagVocabulary {
        &self.tags
    }

    /// First matching rule wins; the order matters because a page holding a
    /// card is still a page.
    pub fn classify(&self, root: &MarkupNode) -> LayoutArchetype {
        let t = &self.tags;
        let tag = root.tag.as_str();

        if tag == t.shell {
            let has_drawer = root.find_descendant(&t.drawer).is_some();
            let has_header = root.find_descendant(&t.header).is_some();
            return match (has_drawer, has_header) {
                (true, true) => LayoutArchetype::AppLayoutWithDrawer,
                (false, true) => LayoutArchetype::AppLayout,
                _ => LayoutArchetype::BasicLayout,
            };
        }
        if tag == t.page {
            return LayoutArchetype::PageOnly;
        }
        if root.find(&t.tabs).is_some() {
            return LayoutArchetype::TabsLayout;
        }
        if root.find(&t.card).is_some() {
            return LayoutArchetype::CardLayout;
        }
        if root.find(&t.form).is_some() {
            return LayoutArchetype::FormLayout;
        }
        if tag == t.button {
            return LayoutArchetype::ButtonComponent;
        }
        if t.form_controls.iter().any(|c| c == tag) {
            return LayoutArchetype::FormComponent;
        }
        if root.find(&t.list).is_some() {
            return LayoutArchetype::ListLayout;
        }
        LayoutArchetype::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;
    use pretty_assertions::assert_eq;

    fn classify(markup: &str) -> LayoutArchetype {
        let root = parse_fragment(markup).unwrap().remove(0);
        Classifier::default().classify(&root)
    }

    #[test]
    fn test_app_layouts() {
        assert_eq!(
            classify("<q-layout><q-header /><div><q-drawer /></div></q-layout>"),
            LayoutArchetype::AppLayoutWithDrawer
        );
        assert_eq!(
            classify("<q-layout><q-header /><q-page-container /></q-layout>"),
            LayoutArchetype::AppLayout
        );
        // A drawer without a header is still a basic layout.
        assert_eq!(
            classify("<q-layout><q-drawer /></q-layout>"),
            LayoutArchetype::BasicLayout
        );
    }

    #[test]
    fn test_page_wins_over_card() {
        assert_eq!(
            classify("<q-page><q-card><q-card-section>x</q-card-section></q-card></q-page>"),
            LayoutArchetype::PageOnly
        );
    }

    #[test]
    fn test_subtree_searches() {
        assert_eq!(classify("<div><div><q-tabs /></div><q-card /></div>"), LayoutArchetype::TabsLayout);
        assert_eq!(classify("<div><q-form><q-card /></q-form></div>"), LayoutArchetype::CardLayout);
        assert_eq!(classify("<div><q-form><q-input /></q-form></div>"), LayoutArchetype::FormLayout);
        assert_eq!(classify("<section><q-list /></section>"), LayoutArchetype::ListLayout);
    }

    #[test]
    fn test_root_only_rules() {
        assert_eq!(classify("<q-btn label=\"Go\" />"), LayoutArchetype::ButtonComponent);
        assert_eq!(classify("<q-toggle />"), LayoutArchetype::FormComponent);
        assert_eq!(classify("<q-file />"), LayoutArchetype::FormComponent);
        // A nested button does not make the template a button component.
        assert_eq!(classify("<div><q-btn /></div>"), LayoutArchetype::Unknown);
    }

    #[test]
    fn test_display_matches_serde() {
        let json = serde_json::to_string(&LayoutArchetype::AppLayoutWithDrawer).unwrap();
        assert_eq!(json, "\"app-layout-with-drawer\"");
        assert_eq!(LayoutArchetype::PageOnly.to_string(), "page-only");
    }

    #[test]
    fn test_deterministic() {
        let root = parse_fragment("<div><q-list /><q-card /></div>").unwrap().remove(0);
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&root), classifier.classify(&root));
        assert_eq!(classifier.classify(&root), LayoutArchetype::CardLayout);
    }
}
