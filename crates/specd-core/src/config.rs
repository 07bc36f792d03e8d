use crate::conventions::{Conventions, NAME_PLACEHOLDER};
use crate::error::Result;
use crate::parser::SpecParser;
use crate::prompt::{SpecPromptBuilder, CIRCUIT_BREAKER_READS, MAX_ITERATIONS};
use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Location of the project config, relative to the project root.
pub const CONFIG_FILE: &str = ".specd/config.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SpecdConfig
// ---------------------------------------------------------------------------

/// Per-project settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecdConfig {
    /// Unset means "detect from the project".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_test_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impl_path_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_path_template: Option<String>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_circuit_breaker_reads")]
    pub circuit_breaker_reads: u32,
}

fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

fn default_circuit_breaker_reads() -> u32 {
    CIRCUIT_BREAKER_READS
}

impl Default for SpecdConfig {
    fn default() -> Self {
        Self {
            language: None,
            default_test_command: None,
            impl_path_template: None,
            test_path_template: None,
            max_iterations: default_max_iterations(),
            circuit_breaker_reads: default_circuit_breaker_reads(),
        }
    }
}

impl SpecdConfig {
    pub fn from_yaml(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The configured language, else `detected`, else python.
    pub fn language_or(&self, detected: Option<Language>) -> Language {
        self.language.or(detected).unwrap_or_default()
    }

    pub fn conventions(&self, detected: Option<Language>) -> Conventions {
        let mut c = Conventions::for_language(self.language_or(detected));
        if let Some(ref cmd) = self.default_test_command {
            c = c.with_default_test_command(cmd.as_str());
        }
        if let Some(ref t) = self.impl_path_template {
            c = c.with_impl_path_template(t.as_str());
        }
        if let Some(ref t) = self.test_path_template {
            c = c.with_test_path_template(t.as_str());
        }
        c
    }

    pub fn parser(&self, detected: Option<Language>) -> SpecParser {
        SpecParser::with_conventions(self.conventions(detected))
    }

    pub fn prompt_builder(&self, detected: Option<Language>) -> SpecPromptBuilder {
        SpecPromptBuilder::with_conventions(self.conventions(detected))
            .with_max_iterations(self.max_iterations)
            .with_circuit_breaker_reads(self.circuit_breaker_reads)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (key, template) in [
            ("impl_path_template", &self.impl_path_template),
            ("test_path_template", &self.test_path_template),
        ] {
            if let Some(t) = template {
                if !t.contains(NAME_PLACEHOLDER) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "{key} '{t}' has no {NAME_PLACEHOLDER} placeholder: every spec maps to the same file"
                        ),
                    });
                }
            }
        }

        if let Some(ref cmd) = self.default_test_command {
            if cmd.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "default_test_command is empty".to_string(),
                });
            }
        }

        if self.max_iterations == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "max_iterations must be at least 1".to_string(),
            });
        } else if self.max_iterations > 20 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("max_iterations={} (>20 is unusual)", self.max_iterations),
            });
        }

        if self.circuit_breaker_reads == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "circuit_breaker_reads must be at least 1".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
