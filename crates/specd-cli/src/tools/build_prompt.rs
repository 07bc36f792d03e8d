use super::{language_arg, open_project, spec_properties, spec_text, SpecdTool};
use serde_json::Value;
use specd_core::SpecPhaseRunner;
use std::path::Path;

pub struct BuildPromptTool;

impl SpecdTool for BuildPromptTool {
    fn name(&self) -> &str {
        "specd_build_prompt"
    }

    fn description(&self) -> &str {
        "Compile a spec into the implement-and-test prompt for a coding agent"
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
        if !result.is_valid {
            return Err(result.errors.join("; "));
        }
        let runner = SpecPhaseRunner::from_validation(result, root)
            .map_err(|e| e.to_string())?
            .with_builder(project.prompt_builder(language));

        serde_json::to_value(runner.get_request()).map_err(|e| e.to_string())
    }
}
