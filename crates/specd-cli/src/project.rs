use crate::stack::{detect_stack, StackInfo};
use anyhow::Context;
use specd_core::config::{SpecdConfig, WarnLevel, CONFIG_FILE};
use specd_core::{Language, SpecParser, SpecPromptBuilder};
use std::path::{Path, PathBuf};

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load `.specd/config.yaml`; a missing file means all defaults.
pub fn load_config(root: &Path) -> anyhow::Result<SpecdConfig> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(SpecdConfig::default());
    }
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SpecdConfig::from_yaml(&data).with_context(|| format!("invalid config {}", path.display()))
}

/// Settings and detected stack for one project root.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: SpecdConfig,
    pub stack: StackInfo,
}

impl Project {
    pub fn open(root: &Path) -> anyhow::Result<Self> {
        let config = load_config(root)?;
        let mut errors = Vec::new();
        for w in config.validate() {
            match w.level {
                WarnLevel::Warning => tracing::warn!("{}", w.message),
                WarnLevel::Error => errors.push(w.message),
            }
        }
        if !errors.is_empty() {
            anyhow::bail!(
                "invalid config {}: {}",
                config_path(root).display(),
                errors.join("; ")
            );
        }
        Ok(Self {
            root: root.to_path_buf(),
            config,
            stack: detect_stack(root),
        })
    }

    /// Config with an explicit `--language` taking precedence.
    fn effective(&self, language: Option<Language>) -> SpecdConfig {
        let mut config = self.config.clone();
        if language.is_some() {
            config.language = language;
        }
        config
    }

    pub fn language(&self, language: Option<Language>) -> Language {
        self.effective(language)
            .language_or(self.stack.detected_language())
    }

    pub fn parser(&self, language: Option<Language>) -> SpecParser {
        self.effective(language)
            .parser(self.stack.detected_language())
    }

    pub fn prompt_builder(&self, language: Option<Language>) -> SpecPromptBuilder {
        self.effective(language)
            .prompt_builder(self.stack.detected_language())
    }
}

/// Read a spec from a file path, or from stdin when the path is `-`.
pub fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

/// Contents of an optional system prompt file, empty when none was given.
pub fn read_system_prompt(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read system prompt {}", p.display())),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, SpecdConfig::default());
    }

    #[test]
    fn invalid_config_names_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".specd")).unwrap();
        std::fs::write(config_path(dir.path()), "language: [").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("config.yaml"));
    }

    #[test]
    fn open_rejects_config_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".specd")).unwrap();
        std::fs::write(config_path(dir.path()), "default_test_command: \"\"\n").unwrap();

        let err = Project::open(dir.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("config.yaml"));
        assert!(msg.contains("default_test_command is empty"));
    }

    #[test]
    fn open_tolerates_config_warnings() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".specd")).unwrap();
        std::fs::write(config_path(dir.path()), "max_iterations: 50\n").unwrap();
        assert!(Project::open(dir.path()).is_ok());
    }

    #[test]
    fn language_precedence_flag_config_detected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("project.godot"), "").unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.language(None), Language::Gdscript);
        assert_eq!(project.language(Some(Language::Go)), Language::Go);

        std::fs::create_dir_all(dir.path().join(".specd")).unwrap();
        std::fs::write(config_path(dir.path()), "language: rust\n").unwrap();
        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.language(None), Language::Rust);
        assert_eq!(project.language(Some(Language::Python)), Language::Python);
    }

    #[test]
    fn parser_uses_detected_language_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("go.mod"), "module x").unwrap();
        let project = Project::open(dir.path()).unwrap();
        let spec = project.parser(None).parse("## Spec: X [HOTFIX]").unwrap();
        assert_eq!(spec.validation.tests, "go test ./...");
    }

    #[test]
    fn read_input_missing_file_errors() {
        let err = read_input("/definitely/not/here.md").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
