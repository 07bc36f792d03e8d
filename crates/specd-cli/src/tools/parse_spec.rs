use super::{language_arg, open_project, spec_properties, spec_text, SpecdTool};
use serde_json::Value;
use std::path::Path;

pub struct ParseSpecTool;

impl SpecdTool for ParseSpecTool {
    fn name(&self) -> &str {
        "specd_parse_spec"
    }

    fn description(&self) -> &str {
        "Parse a spec into its structured form, failing on the first structural error"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": spec_properties()
        })
    }

    fn call(&self, args: Value, root: &Path) -> Result<Value, String> {
        let markdown = spec_text(&args, root)?;
        let language = language_arg(&args)?;
        let project = open_project(root)?;

        let spec = project
            .parser(language)
            .parse(&markdown)
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "spec": spec,
            "context": spec.to_prompt_context(),
        }))
    }
}
