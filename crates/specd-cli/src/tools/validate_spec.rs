use super::{language_arg, open_project, spec_properties, spec_text, SpecdTool};
use serde_json::Value;
use std::path::Path;

pub struct ValidateSpecTool;

impl SpecdTool for ValidateSpecTool {
    fn name(&self) -> &str {
        "specd_validate_spec"
    }

    fn description(&self) -> &str {
        "Check a spec and report every structural error at once; never fails on a bad spec"
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

        let result = project.parser(language).validate(&markdown);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }
}
