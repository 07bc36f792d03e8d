use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SpecTier
// ---------------------------------------------------------------------------

/// Scope of a spec. Controls how much testing the compiled prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecTier {
    Hotfix,
    Feature,
    System,
}

impl SpecTier {
    pub fn all() -> &'static [SpecTier] {
        &[SpecTier::Hotfix, SpecTier::Feature, SpecTier::System]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpecTier::Hotfix => "HOTFIX",
            SpecTier::Feature => "FEATURE",
            SpecTier::System => "SYSTEM",
        }
    }

    /// Comma-separated tier names, in declaration order.
    pub fn names() -> String {
        SpecTier::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SpecTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpecTier {
    type Err = crate::error::SpecError;

    /// Case-insensitive: `feature`, `Feature` and `FEATURE` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOTFIX" => Ok(SpecTier::Hotfix),
            "FEATURE" => Ok(SpecTier::Feature),
            "SYSTEM" => Ok(SpecTier::System),
            _ => Err(crate::error::SpecError::InvalidTier {
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Target language of the project a spec is implemented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Gdscript,
    Rust,
    Go,
    Javascript,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::Python,
            Language::Gdscript,
            Language::Rust,
            Language::Go,
            Language::Javascript,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Gdscript => "gdscript",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Javascript => "javascript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = crate::error::SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "gdscript" | "godot" => Ok(Language::Gdscript),
            "rust" | "rs" => Ok(Language::Rust),
            "go" | "golang" => Ok(Language::Go),
            "javascript" | "js" | "typescript" | "ts" => Ok(Language::Javascript),
            _ => Err(crate::error::SpecError::UnknownLanguage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Which half of the work a `PhaseRequest` asks for. The runner only ever
/// produces `Impl`, which covers implementation and tests together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Tests,
    Impl,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Tests => "tests",
            Phase::Impl => "impl",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
