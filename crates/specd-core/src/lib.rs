pub mod config;
pub mod conventions;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod prompt;
pub mod runner;
pub mod types;
pub mod validator;

pub use document::{EdgeCase, SpecDocument, ValidationConfig};
pub use error::{Result, SpecError};
pub use parser::SpecParser;
pub use prompt::SpecPromptBuilder;
pub use runner::{PhaseRequest, SpecPhaseRunner};
pub use types::{Language, Phase, SpecTier};
pub use validator::{validate_spec, SpecValidationResult};
