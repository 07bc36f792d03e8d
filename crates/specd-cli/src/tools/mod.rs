use crate::project::Project;
use serde_json::Value;
use specd_core::Language;
use std::path::{Component, Path, PathBuf};

pub mod build_prompt;
pub mod detect_stack;
pub mod parse_spec;
pub mod prepare_dispatch;
pub mod validate_spec;

pub trait SpecdTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    fn call(&self, args: Value, root: &Path) -> Result<Value, String>;
}

pub fn all_tools() -> Vec<Box<dyn SpecdTool>> {
    vec![
        Box::new(validate_spec::ValidateSpecTool),
        Box::new(parse_spec::ParseSpecTool),
        Box::new(build_prompt::BuildPromptTool),
        Box::new(prepare_dispatch::PrepareDispatchTool),
        Box::new(detect_stack::DetectStackTool),
    ]
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Schema properties shared by every tool that takes a spec.
fn spec_properties() -> serde_json::Map<String, Value> {
    let props = serde_json::json!({
        "markdown": {
            "type": "string",
            "description": "Spec markdown starting with '## Spec: Name [TIER]'"
        },
        "path": {
            "type": "string",
            "description": "Spec file relative to the project root (used when markdown is absent)"
        },
        "language": {
            "type": "string",
            "enum": ["python", "gdscript", "rust", "go", "javascript"],
            "description": "Override the project language"
        }
    });
    match props {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// Inline `markdown`, else the file named by `path` under `root`.
fn spec_text(args: &Value, root: &Path) -> Result<String, String> {
    if let Some(md) = args["markdown"].as_str() {
        return Ok(md.to_string());
    }
    let rel = args["path"]
        .as_str()
        .ok_or_else(|| "missing required argument: markdown or path".to_string())?;
    let path = within_root(root, rel)?;
    std::fs::read_to_string(&path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

/// Join a caller-supplied relative path onto `root`, refusing anything
/// that could escape it.
fn within_root(root: &Path, rel: &str) -> Result<PathBuf, String> {
    let rel_path = Path::new(rel);
    let escapes = rel_path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(format!("path must be relative to the project root: {rel}"));
    }
    Ok(root.join(rel_path))
}

/// `project_path` argument under `root`, or `root` itself; must exist.
fn project_dir(args: &Value, root: &Path) -> Result<PathBuf, String> {
    let path = match args["project_path"].as_str() {
        Some(p) => within_root(root, p)?,
        None => root.to_path_buf(),
    };
    if !path.is_dir() {
        return Err(format!("project path does not exist: {}", path.display()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn within_root_accepts_nested_paths() {
        let dir = TempDir::new().unwrap();
        let p = within_root(dir.path(), "specs/./a.md").unwrap();
        assert!(p.starts_with(dir.path()));
    }

    #[test]
    fn within_root_rejects_escapes() {
        let dir = TempDir::new().unwrap();
        for rel in ["../secret.md", "specs/../../x", "/etc/passwd"] {
            let err = within_root(dir.path(), rel).unwrap_err();
            assert!(err.contains("relative to the project root"), "{rel}");
        }
    }

    #[test]
    fn spec_text_refuses_outside_files() {
        let dir = TempDir::new().unwrap();
        let err = spec_text(&serde_json::json!({ "path": "../spec.md" }), dir.path()).unwrap_err();
        assert!(err.contains("relative to the project root"));
    }

    #[test]
    fn project_dir_defaults_to_root() {
        let dir = TempDir::new().unwrap();
        assert_eq!(project_dir(&serde_json::json!({}), dir.path()).unwrap(), dir.path());
        let err = project_dir(&serde_json::json!({ "project_path": ".." }), dir.path()).unwrap_err();
        assert!(err.contains("relative to the project root"));
    }
}

fn language_arg(args: &Value) -> Result<Option<Language>, String> {
    args["language"]
        .as_str()
        .map(|s| s.parse::<Language>().map_err(|e| e.to_string()))
        .transpose()
}

fn open_project(root: &Path) -> Result<Project, String> {
    Project::open(root).map_err(|e| format!("{e:#}"))
}
