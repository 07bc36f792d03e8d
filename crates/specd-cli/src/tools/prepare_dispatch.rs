use super::{open_project, project_dir, SpecdTool};
use serde_json::Value;
use specd_core::dispatch::{AgentCli, DispatchHandler};
use std::path::Path;

pub struct PrepareDispatchTool;

impl SpecdTool for PrepareDispatchTool {
    fn name(&self) -> &str {
        "specd_prepare_dispatch"
    }

    fn description(&self) -> &str {
        "Classify a task as spec or prose and build the final prompt for an agent CLI (does not launch it)"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "A '## Spec:' document or free-form task text"
                },
                "project_path": {
                    "type": "string",
                    "description": "Directory the agent works in (default: project root)"
                },
                "cli": {
                    "type": "string",
                    "enum": ["claude", "gemini", "codex"],
                    "description": "Agent CLI (default: claude)"
                },
                "model": {
                    "type": "string",
                    "description": "Model passed through to the agent CLI"
                },
                "system_prompt": {
                    "type": "string",
                    "description": "Text appended after the task prompt"
                }
            },
            "required": ["content"]
        })
    }

    fn call(&self, args: Value, root: &Path) -> Result<Value, String> {
        let content = args["content"]
            .as_str()
            .ok_or_else(|| "missing required argument: content".to_string())?;
        let cli = match args["cli"].as_str() {
            Some(s) => s.parse::<AgentCli>().map_err(|e| e.to_string())?,
            None => AgentCli::default(),
        };
        let model = args["model"].as_str().map(str::to_string);
        let system_prompt = args["system_prompt"].as_str().unwrap_or("");

        let project_path = project_dir(&args, root)?;

        let project = open_project(&project_path)?;
        let handler = DispatchHandler::new(project.parser(None), project.prompt_builder(None));
        let request = handler
            .prepare(content, &project_path, cli, model)
            .map_err(|e| e.to_string())?;
        let prompt = handler
            .build_prompt(&request, system_prompt)
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "request": request,
            "agent": request.cli.display_name(),
            "prompt": prompt.trim_end(),
        }))
    }
}
