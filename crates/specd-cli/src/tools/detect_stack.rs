use super::{project_dir, SpecdTool};
use crate::stack::detect_stack;
use serde_json::Value;
use std::path::Path;

pub struct DetectStackTool;

impl SpecdTool for DetectStackTool {
    fn name(&self) -> &str {
        "specd_detect_stack"
    }

    fn description(&self) -> &str {
        "Detect a project's language, frameworks, tools and package manager from its config files"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Directory to inspect (default: project root)"
                }
            }
        })
    }

    fn call(&self, args: Value, root: &Path) -> Result<Value, String> {
        let path = project_dir(&args, root)?;
        serde_json::to_value(detect_stack(&path)).map_err(|e| e.to_string())
    }
}
