use crate::error::{Result, SpecError};
use crate::grammar;
use crate::parser::SpecParser;
use crate::prompt::SpecPromptBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// AgentCli
// ---------------------------------------------------------------------------

/// External agent CLI a task is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCli {
    #[default]
    Claude,
    Gemini,
    Codex,
}

impl AgentCli {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentCli::Claude => "claude",
            AgentCli::Gemini => "gemini",
            AgentCli::Codex => "codex",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgentCli::Claude => "Claude Code",
            AgentCli::Gemini => "Gemini CLI",
            AgentCli::Codex => "OpenAI Codex",
        }
    }
}

impl fmt::Display for AgentCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentCli {
    type Err = SpecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" => Ok(AgentCli::Claude),
            "gemini" => Ok(AgentCli::Gemini),
            "codex" => Ok(AgentCli::Codex),
            _ => Err(SpecError::UnknownCli(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchMode / DispatchRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Content is a `## Spec:` document and gets compiled.
    Spec,
    /// Free-form task text, passed through as-is.
    Prose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub content: String,
    pub project_path: PathBuf,
    pub cli: AgentCli,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub mode: DispatchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_name: Option<String>,
}

// ---------------------------------------------------------------------------
// DispatchHandler
// ---------------------------------------------------------------------------

/// Decides whether a task is a spec or prose and builds the final prompt.
#[derive(Debug, Clone, Default)]
pub struct DispatchHandler {
    parser: SpecParser,
    builder: SpecPromptBuilder,
}

impl DispatchHandler {
    pub fn new(parser: SpecParser, builder: SpecPromptBuilder) -> Self {
        Self { parser, builder }
    }

    pub fn detect_mode(content: &str) -> DispatchMode {
        if grammar::looks_like_spec(content) {
            DispatchMode::Spec
        } else {
            DispatchMode::Prose
        }
    }

    /// Classify `content`. Specs are parsed here so a broken one is
    /// rejected before anything is dispatched.
    pub fn prepare(
        &self,
        content: &str,
        project_path: impl Into<PathBuf>,
        cli: AgentCli,
        model: Option<String>,
    ) -> Result<DispatchRequest> {
        let mode = Self::detect_mode(content);
        let spec_name = match mode {
            DispatchMode::Spec => Some(self.parser.parse(content)?.name),
            DispatchMode::Prose => None,
        };

        tracing::debug!(?mode, %cli, spec = ?spec_name, "prepared dispatch");

        Ok(DispatchRequest {
            content: content.to_string(),
            project_path: project_path.into(),
            cli,
            model,
            mode,
            spec_name,
        })
    }

    /// Task prompt followed by the caller's system prompt.
    pub fn build_prompt(&self, request: &DispatchRequest, system_prompt: &str) -> Result<String> {
        let prompt = match request.mode {
            DispatchMode::Spec => {
                let spec = self.parser.parse(&request.content)?;
                self.builder.build_prompt(&spec)
            }
            DispatchMode::Prose => request.content.clone(),
        };
        Ok(format!("{prompt}\n\n{system_prompt}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
