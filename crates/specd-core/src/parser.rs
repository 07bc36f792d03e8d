use crate::conventions::Conventions;
use crate::document::{SpecDocument, ValidationConfig};
use crate::error::{Result, SpecError};
use crate::grammar::{self, Scan};
use std::borrow::Cow;

/// Turns compact markdown specs into [`SpecDocument`]s.
///
/// The only state is the conventions used for defaults, so one parser can
/// be shared freely.
#[derive(Debug, Clone, Default)]
pub struct SpecParser {
    conventions: Conventions,
}

impl SpecParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Parse `markdown`, failing on the first structural error.
    pub fn parse(&self, markdown: &str) -> Result<SpecDocument> {
        let markdown = normalize(markdown);
        let mut scan = grammar::scan(&markdown);
        if let Some(err) = std::mem::take(&mut scan.errors).into_iter().next() {
            return Err(err);
        }
        self.build(&markdown, scan)
    }

    /// Assemble a document from a scan that reported no errors.
    pub(crate) fn build(&self, markdown: &str, scan: Scan<'_>) -> Result<SpecDocument> {
        let header = scan.header.ok_or(SpecError::InvalidHeader)?;
        let sections = &scan.sections;

        for name in sections.unknown() {
            tracing::debug!(section = name, spec = %header.name, "ignoring unknown section");
        }

        let validation = match scan.validation {
            Some(fields) => {
                let tests = fields.tests.ok_or(SpecError::MissingTestsCommand)?;
                ValidationConfig {
                    typecheck: fields.typecheck.map(str::to_string),
                    lint: fields.lint.map(str::to_string),
                    ..ValidationConfig::new(tests)
                }
            }
            None => {
                let default = self.conventions.default_test_command.trim();
                if default.is_empty() {
                    return Err(SpecError::MissingTestsCommand);
                }
                ValidationConfig::new(default)
            }
        };

        let list = |name: &str| {
            sections
                .get(name)
                .map(grammar::bullets)
                .unwrap_or_default()
        };

        Ok(SpecDocument {
            description: grammar::description(markdown, &header, sections).to_string(),
            interface: list(grammar::INTERFACE),
            must_do: list(grammar::MUST_DO),
            must_not_do: list(grammar::MUST_NOT_DO),
            edge_cases: sections
                .get(grammar::EDGE_CASES)
                .map(grammar::edge_cases)
                .unwrap_or_default(),
            preconditions: list(grammar::PRECONDITIONS),
            postconditions: list(grammar::POSTCONDITIONS),
            invariants: list(grammar::INVARIANTS),
            validation,
            target_path: sections
                .get(grammar::TARGET_PATH)
                .and_then(grammar::target_path),
            name: header.name,
            tier: header.tier,
        })
    }
}

/// CRLF input parses the same as LF input.
pub(crate) fn normalize(markdown: &str) -> Cow<'_, str> {
    if markdown.contains('\r') {
        Cow::Owned(markdown.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(markdown)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
