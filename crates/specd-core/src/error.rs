use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid spec header: expected format '## Spec: FeatureName [TIER]'")]
    InvalidHeader,

    #[error("invalid tier '{value}': valid tiers are {valid}", valid = crate::types::SpecTier::names())]
    InvalidTier { value: String },

    #[error("validation block must specify a 'tests' command")]
    MissingTestsCommand,

    #[error("no spec document: validation reported errors")]
    MissingSpec,

    #[error("unknown language '{0}': expected python, gdscript, rust, go or javascript")]
    UnknownLanguage(String),

    #[error("unknown cli '{0}': expected claude, gemini or codex")]
    UnknownCli(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;
