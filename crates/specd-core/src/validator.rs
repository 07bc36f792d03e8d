use crate::document::SpecDocument;
use crate::grammar;
use crate::parser::{normalize, SpecParser};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SpecValidationResult
// ---------------------------------------------------------------------------

/// Outcome of [`validate_spec`]. Either `spec` is set and `errors` is empty,
/// or `spec` is `None` and `errors` explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValidationResult {
    pub is_valid: bool,
    pub spec: Option<SpecDocument>,
    pub errors: Vec<String>,
}

impl SpecValidationResult {
    pub fn valid(spec: SpecDocument) -> Self {
        Self {
            is_valid: true,
            spec: Some(spec),
            errors: Vec::new(),
        }
    }

    /// An empty `errors` list is replaced by a generic message so a
    /// rejected spec always says why.
    pub fn invalid(mut errors: Vec<String>) -> Self {
        if errors.is_empty() {
            errors.push("spec rejected without a specific error".to_string());
        }
        Self {
            is_valid: false,
            spec: None,
            errors,
        }
    }

    pub fn into_spec(self) -> Option<SpecDocument> {
        self.spec
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

impl SpecParser {
    /// Check `markdown` and report every structural problem at once.
    ///
    /// Never fails. Accepts exactly the documents [`SpecParser::parse`]
    /// accepts and yields the same document for them.
    pub fn validate(&self, markdown: &str) -> SpecValidationResult {
        let markdown = normalize(markdown);
        let scan = grammar::scan(&markdown);

        if !scan.errors.is_empty() {
            let errors = scan.errors.iter().map(|e| e.to_string()).collect();
            return SpecValidationResult::invalid(errors);
        }

        match self.build(&markdown, scan) {
            Ok(spec) => SpecValidationResult::valid(spec),
            Err(e) => SpecValidationResult::invalid(vec![e.to_string()]),
        }
    }
}

/// [`SpecParser::validate`] with the default (python) conventions.
pub fn validate_spec(markdown: &str) -> SpecValidationResult {
    SpecParser::new().validate(markdown)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
