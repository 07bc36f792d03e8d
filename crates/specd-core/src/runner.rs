use crate::document::SpecDocument;
use crate::error::{Result, SpecError};
use crate::prompt::SpecPromptBuilder;
use crate::types::Phase;
use crate::validator::SpecValidationResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A prompt ready to hand to an agent, with the spec it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRequest {
    pub phase: Phase,
    pub prompt: String,
    pub spec: SpecDocument,
    pub test_path: Option<String>,
}

/// Prepares the single combined implement-and-test request for a spec.
///
/// Holds no phase state: every call to [`get_request`](Self::get_request)
/// yields the same request. Running the agent is the caller's job.
#[derive(Debug, Clone)]
pub struct SpecPhaseRunner {
    spec: SpecDocument,
    project_path: PathBuf,
    builder: SpecPromptBuilder,
}

impl SpecPhaseRunner {
    pub fn new(spec: SpecDocument, project_path: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            project_path: project_path.into(),
            builder: SpecPromptBuilder::new(),
        }
    }

    /// Start from a validation result. Fails if validation rejected the spec.
    pub fn from_validation(
        result: SpecValidationResult,
        project_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let spec = result.into_spec().ok_or(SpecError::MissingSpec)?;
        Ok(Self::new(spec, project_path))
    }

    pub fn with_builder(mut self, builder: SpecPromptBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn spec(&self) -> &SpecDocument {
        &self.spec
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn get_request(&self) -> PhaseRequest {
        PhaseRequest {
            phase: Phase::Impl,
            prompt: self.builder.build_prompt(&self.spec),
            spec: self.spec.clone(),
            test_path: None,
        }
    }

    /// Lifecycle hook for the caller to report the agent's outcome.
    pub fn complete(&self, success: bool) {
        tracing::debug!(
            spec = %self.spec.name,
            project = %self.project_path.display(),
            success,
            "spec execution complete"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
