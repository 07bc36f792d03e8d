use crate::types::SpecTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

/// Commands that confirm an implementation satisfies its spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub tests: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typecheck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<String>,
    /// Informational only; nothing evaluates these yet.
    #[serde(default = "default_success_criteria")]
    pub success_criteria: BTreeMap<String, serde_json::Value>,
}

fn default_success_criteria() -> BTreeMap<String, serde_json::Value> {
    let mut m = BTreeMap::new();
    m.insert("all_tests_pass".to_string(), serde_json::Value::Bool(true));
    m
}

impl ValidationConfig {
    pub fn new(tests: impl Into<String>) -> Self {
        Self {
            tests: tests.into(),
            typecheck: None,
            lint: None,
            success_criteria: default_success_criteria(),
        }
    }

    pub fn with_typecheck(mut self, command: impl Into<String>) -> Self {
        self.typecheck = Some(command.into());
        self
    }

    pub fn with_lint(mut self, command: impl Into<String>) -> Self {
        self.lint = Some(command.into());
        self
    }
}

// ---------------------------------------------------------------------------
// EdgeCase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCase {
    pub case: String,
    pub outcome: String,
}

impl EdgeCase {
    pub fn new(case: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            outcome: outcome.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpecDocument
// ---------------------------------------------------------------------------

/// A parsed spec. Built once by the parser and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub name: String,
    pub description: String,
    pub tier: SpecTier,
    #[serde(default)]
    pub interface: Vec<String>,
    #[serde(default)]
    pub must_do: Vec<String>,
    #[serde(default)]
    pub must_not_do: Vec<String>,
    /// Declaration order is kept so rendered prompts are reproducible.
    #[serde(default)]
    pub edge_cases: Vec<EdgeCase>,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub postconditions: Vec<String>,
    #[serde(default)]
    pub invariants: Vec<String>,
    pub validation: ValidationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

impl SpecDocument {
    /// A document with only the required parts filled in.
    pub fn new(
        name: impl Into<String>,
        tier: SpecTier,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tier,
            interface: Vec::new(),
            must_do: Vec::new(),
            must_not_do: Vec::new(),
            edge_cases: Vec::new(),
            preconditions: Vec::new(),
            postconditions: Vec::new(),
            invariants: Vec::new(),
            validation,
            target_path: None,
        }
    }

    pub fn edge_case(&self, case: &str) -> Option<&str> {
        self.edge_cases
            .iter()
            .find(|e| e.case == case)
            .map(|e| e.outcome.as_str())
    }

    /// Render the document as a markdown block for embedding in a prompt.
    ///
    /// Sections come out in a fixed order and empty ones are left out, so
    /// two renders of the same document are always byte-identical.
    pub fn to_prompt_context(&self) -> String {
        let mut doc = String::new();

        doc.push_str(&format!("# Specification: {}\n", self.name));
        doc.push_str(&format!("Tier: {}\n", self.tier));

        if !self.description.is_empty() {
            doc.push_str("\n## Description\n");
            doc.push_str(&self.description);
            doc.push('\n');
        }

        push_list(&mut doc, "Interface", &self.interface);
        push_list(&mut doc, "Must Do", &self.must_do);
        push_list(&mut doc, "Must Not Do", &self.must_not_do);

        if !self.edge_cases.is_empty() {
            doc.push_str("\n## Edge Cases\n");
            for e in &self.edge_cases {
                doc.push_str(&format!("- {} → {}\n", e.case, e.outcome));
            }
        }

        push_list(&mut doc, "Preconditions", &self.preconditions);
        push_list(&mut doc, "Postconditions", &self.postconditions);
        push_list(&mut doc, "Invariants", &self.invariants);

        doc.push_str("\n## Validation\n");
        doc.push_str(&format!("- Tests: {}\n", self.validation.tests));
        if let Some(ref typecheck) = self.validation.typecheck {
            doc.push_str(&format!("- Typecheck: {typecheck}\n"));
        }
        if let Some(ref lint) = self.validation.lint {
            doc.push_str(&format!("- Lint: {lint}\n"));
        }

        if let Some(ref target) = self.target_path {
            doc.push_str("\n## Target Path\n");
            doc.push_str(target);
            doc.push('\n');
        }

        // Callers join blocks with their own blank lines.
        doc.truncate(doc.trim_end().len());
        doc
    }
}

fn push_list(doc: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    doc.push_str(&format!("\n## {heading}\n"));
    for item in items {
        doc.push_str(&format!("- {item}\n"));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
