use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvertResult;
use crate::markup::MarkupNode;
use crate::parser::{extract_template, parse_template_with_defaults};
use crate::script::{extract_script_info, ScriptInfo};

/// A parsed single-file component: what the script declares plus the root
/// element of its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    pub script: ScriptInfo,
    pub root: MarkupNode,
    /// 1-based source line where the template content starts.
    pub template_line: usize,
}

impl ComponentDocument {
    /// Component name from the script block, or the default name.
    pub fn name(&self) -> &str {
        &self.script.name
    }

    pub fn root(&self) -> &MarkupNode {
        &self.root
    }
}

/// Parse a whole component source. The script block is optional; the
/// template block is not.
pub fn parse_component(source: &str) -> ConvertResult<ComponentDocument> {
    let script = extract_script_info(source);
    let template_line = extract_template(source)?.line;
    let root = parse_template_with_defaults(source, &script.prop_defaults())?;
    debug!(name = %script.name, root = %root.tag, props = script.props.len(), "component parsed");
    Ok(ComponentDocument {
        script,
        root,
        template_line,
    })
}
