use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the slugged spec name in path templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

// ---------------------------------------------------------------------------
// Language defaults
// ---------------------------------------------------------------------------

impl Language {
    /// Test command assumed when a spec has no Validation section.
    pub fn default_test_command(self) -> &'static str {
        match self {
            Language::Python => "pytest tests/ -v",
            Language::Gdscript => "godot --headless -s addons/gut/gut_cmdln.gd -gexit",
            Language::Rust => "cargo test",
            Language::Go => "go test ./...",
            Language::Javascript => "npm test",
        }
    }

    pub fn impl_path_template(self) -> &'static str {
        match self {
            Language::Python => "src/{name}.py",
            Language::Gdscript => "scripts/{name}.gd",
            Language::Rust => "src/{name}.rs",
            Language::Go => "{name}.go",
            Language::Javascript => "src/{name}.js",
        }
    }

    pub fn test_path_template(self) -> &'static str {
        match self {
            Language::Python => "tests/test_{name}.py",
            Language::Gdscript => "tests/test_{name}.gd",
            Language::Rust => "tests/{name}.rs",
            Language::Go => "{name}_test.go",
            Language::Javascript => "tests/{name}.test.js",
        }
    }

    /// Test-framework guidance lines for the prompt.
    pub fn test_guidance(self) -> &'static str {
        match self {
            Language::Gdscript => concat!(
                "- Use GUT (Godot Unit Test) framework\n",
                "- Test class extends GutTest\n",
                "- Use assert_eq(), assert_true(), assert_false(), assert_null()\n",
                "- Use before_each() and after_each() for setup/teardown\n",
                "- Test files: res://tests/test_*.gd\n",
                "- Use descriptive test names (test_player_takes_damage)\n",
                "- Keep tests focused and independent",
            ),
            Language::Rust => concat!(
                "- Use the built-in test harness (#[test] functions run by cargo test)\n",
                "- Put integration tests under tests/, unit tests in a #[cfg(test)] module\n",
                "- Use assert!, assert_eq! and assert!(matches!(..)) for checks\n",
                "- Use descriptive test names\n",
                "- Keep tests focused and independent",
            ),
            Language::Go => concat!(
                "- Use the standard testing package (func TestXxx(t *testing.T))\n",
                "- Prefer table-driven tests with t.Run subtests\n",
                "- Use descriptive test names\n",
                "- Keep tests focused and independent",
            ),
            Language::Javascript => concat!(
                "- Use the test runner configured in package.json (npm test)\n",
                "- Group related cases with describe() and use beforeEach() for setup\n",
                "- Use descriptive test names\n",
                "- Keep tests focused and independent",
            ),
            Language::Python => concat!(
                "- Use pytest fixtures for shared setup\n",
                "- Include full type hints\n",
                "- Use descriptive test names\n",
                "- Keep tests focused and independent",
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Slugging
// ---------------------------------------------------------------------------

/// Lower-case `name` and map anything outside `[a-z0-9_]` to `_`.
///
/// `My Feature-Name` becomes `my_feature_name`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Conventions
// ---------------------------------------------------------------------------

/// Language-dependent defaults, with optional per-project overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conventions {
    pub language: Language,
    pub default_test_command: String,
    pub impl_path_template: String,
    pub test_path_template: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

impl Conventions {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            default_test_command: language.default_test_command().to_string(),
            impl_path_template: language.impl_path_template().to_string(),
            test_path_template: language.test_path_template().to_string(),
        }
    }

    /// A blank command leaves the language default in place.
    pub fn with_default_test_command(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        if !command.trim().is_empty() {
            self.default_test_command = command;
        }
        self
    }

    pub fn with_impl_path_template(mut self, template: impl Into<String>) -> Self {
        self.impl_path_template = template.into();
        self
    }

    pub fn with_test_path_template(mut self, template: impl Into<String>) -> Self {
        self.test_path_template = template.into();
        self
    }

    pub fn impl_path(&self, name: &str) -> String {
        self.impl_path_template
            .replace(NAME_PLACEHOLDER, &slugify(name))
    }

    pub fn test_path(&self, name: &str) -> String {
        self.test_path_template
            .replace(NAME_PLACEHOLDER, &slugify(name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_replaces() {
        assert_eq!(slugify("ReverseString"), "reversestring");
        assert_eq!(slugify("My Feature-Name"), "my_feature_name");
        assert_eq!(slugify("snake_case_ok"), "snake_case_ok");
        assert_eq!(slugify("a/b.c"), "a_b_c");
    }

    #[test]
    fn python_defaults() {
        let c = Conventions::default();
        assert_eq!(c.language, Language::Python);
        assert_eq!(c.default_test_command, "pytest tests/ -v");
        assert_eq!(c.impl_path("ReverseString"), "src/reversestring.py");
        assert_eq!(c.test_path("ReverseString"), "tests/test_reversestring.py");
    }

    #[test]
    fn gdscript_paths() {
        let c = Conventions::for_language(Language::Gdscript);
        assert_eq!(c.impl_path("Player"), "scripts/player.gd");
        assert_eq!(c.test_path("Player"), "tests/test_player.gd");
        assert!(!c.default_test_command.contains("pytest"));
    }

    #[test]
    fn overrides_apply() {
        let c = Conventions::for_language(Language::Rust)
            .with_impl_path_template("crates/core/src/{name}.rs")
            .with_test_path_template("crates/core/tests/{name}_test.rs")
            .with_default_test_command("cargo test -p core");
        assert_eq!(c.impl_path("Parser"), "crates/core/src/parser.rs");
        assert_eq!(c.test_path("Parser"), "crates/core/tests/parser_test.rs");
        assert_eq!(c.default_test_command, "cargo test -p core");
    }

    #[test]
    fn blank_test_command_override_is_ignored() {
        let c = Conventions::for_language(Language::Go).with_default_test_command("  ");
        assert_eq!(c.default_test_command, "go test ./...");
        let c = Conventions::default().with_default_test_command("");
        assert_eq!(c.default_test_command, "pytest tests/ -v");
    }

    #[test]
    fn gdscript_guidance_is_gut() {
        let g = Language::Gdscript.test_guidance();
        assert!(g.contains("GUT"));
        assert!(g.contains("extends GutTest"));
        assert!(g.contains("assert_eq"));
        assert!(g.contains("res://tests/test_*.gd"));
        assert!(!g.contains("pytest"));
    }

    #[test]
    fn python_guidance_is_pytest() {
        let g = Language::Python.test_guidance();
        assert!(g.contains("pytest"));
        assert!(!g.contains("GUT"));
    }

    #[test]
    fn every_template_has_placeholder() {
        for lang in Language::all() {
            assert!(lang.impl_path_template().contains(NAME_PLACEHOLDER));
            assert!(lang.test_path_template().contains(NAME_PLACEHOLDER));
        }
    }
}
