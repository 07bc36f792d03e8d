use crate::conventions::Conventions;
use crate::document::SpecDocument;
use crate::types::{Language, SpecTier};

/// Attempts the agent gets to make the tests pass.
pub const MAX_ITERATIONS: u32 = 5;

/// File reads without any code written before the agent is told to stop
/// exploring.
pub const CIRCUIT_BREAKER_READS: u32 = 8;

// ---------------------------------------------------------------------------
// SpecPromptBuilder
// ---------------------------------------------------------------------------

/// Compiles a [`SpecDocument`] into a single instruction document for an
/// autonomous coding agent: implement the interface, write tests for it,
/// then run the spec's test command until it passes.
#[derive(Debug, Clone)]
pub struct SpecPromptBuilder {
    conventions: Conventions,
    max_iterations: u32,
    circuit_breaker_reads: u32,
}

impl Default for SpecPromptBuilder {
    fn default() -> Self {
        Self::with_conventions(Conventions::default())
    }
}

impl SpecPromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_language(language: Language) -> Self {
        Self::with_conventions(Conventions::for_language(language))
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            max_iterations: MAX_ITERATIONS,
            circuit_breaker_reads: CIRCUIT_BREAKER_READS,
        }
    }

    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_circuit_breaker_reads(mut self, n: u32) -> Self {
        self.circuit_breaker_reads = n;
        self
    }

    pub fn language(&self) -> Language {
        self.conventions.language
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Where the implementation goes: the spec's target path if it names
    /// one, otherwise the language template.
    pub fn impl_path(&self, spec: &SpecDocument) -> String {
        match spec.target_path {
            Some(ref p) => p.clone(),
            None => self.conventions.impl_path(&spec.name),
        }
    }

    pub fn test_path(&self, spec: &SpecDocument) -> String {
        self.conventions.test_path(&spec.name)
    }

    pub fn test_guidance(&self) -> &'static str {
        self.conventions.language.test_guidance()
    }

    pub fn tier_guidance(tier: SpecTier) -> &'static str {
        match tier {
            SpecTier::Hotfix => concat!(
                "**Tier: HOTFIX** - Minimal scope, fast iteration.\n",
                "- Focus on the specific bug/issue only\n",
                "- 1-3 targeted tests maximum",
            ),
            SpecTier::Feature => concat!(
                "**Tier: FEATURE** - Standard feature implementation.\n",
                "- Full behavior test coverage\n",
                "- All edge cases must be tested\n",
                "- Contract tests for public interfaces",
            ),
            SpecTier::System => concat!(
                "**Tier: SYSTEM** - Comprehensive system component.\n",
                "- Exhaustive test coverage required\n",
                "- Integration tests if multiple modules involved\n",
                "- Full contract testing including invariants",
            ),
        }
    }

    pub fn build_prompt(&self, spec: &SpecDocument) -> String {
        let mut doc = String::new();

        doc.push_str("# Spec-Driven Implementation\n\n");

        doc.push_str("## CRITICAL: TRUST THE SPEC\n\n");
        doc.push_str("The specification below is COMPLETE. Do not:\n");
        doc.push_str("- Read README, ARCHITECTURE, or documentation files\n");
        doc.push_str("- Search for patterns or conventions in the codebase\n");
        doc.push_str("- Explore directory structures\n");
        doc.push_str("- Read files unrelated to your implementation\n\n");
        doc.push_str("Only read files that:\n");
        doc.push_str("1. You need to import from (check the target path's neighbors)\n");
        doc.push_str("2. Contain types/classes referenced in the interface\n\n");
        doc.push_str("The spec tells you exactly what to build. Trust it.\n\n");

        doc.push_str("## CIRCUIT BREAKER\n\n");
        doc.push_str(&format!(
            "If you have made {}+ file reads without writing any code, STOP.\n",
            self.circuit_breaker_reads
        ));
        doc.push_str("You are exploring instead of implementing. The spec is complete.\n");
        doc.push_str("Write the implementation now with what you know.\n\n");

        doc.push_str("## THE SPECIFICATION\n\n");
        doc.push_str(&spec.to_prompt_context());
        doc.push_str("\n\n");

        doc.push_str("## YOUR TASK\n\n");
        doc.push_str(Self::tier_guidance(spec.tier));
        doc.push_str("\n\n");

        doc.push_str("### Step 1: Implement the Interface\n\n");
        doc.push_str(&format!(
            "Implementation location: `{}`\n\n",
            self.impl_path(spec)
        ));
        doc.push_str("Implementation Rules:\n");
        doc.push_str("1. Follow interface signatures EXACTLY as specified\n");
        doc.push_str("2. Handle all edge cases as specified\n");
        doc.push_str("3. Ensure preconditions are checked\n");
        doc.push_str("4. Ensure postconditions are satisfied\n");
        doc.push_str("5. Respect all 'Must Not Do' constraints\n\n");

        doc.push_str("### Step 2: Write Tests\n\n");
        doc.push_str(&format!("Test file location: `{}`\n\n", self.test_path(spec)));
        doc.push_str("After implementing, write tests that verify contract and behavior:\n\n");
        doc.push_str("**Must Do Tests:**\n");
        doc.push_str("- Write one test for each item in the 'Must Do' section\n");
        doc.push_str("- Tests should verify the behavior/contract, not implementation details\n");
        if !spec.edge_cases.is_empty() {
            doc.push_str("\n**Edge Case Tests:**\n");
            doc.push_str("- Write one test for each edge case specified\n");
        }
        doc.push_str("\nTest Code Requirements:\n");
        doc.push_str(self.test_guidance());
        doc.push_str("\n\n");

        doc.push_str("### Step 3: Validate\n\n");
        doc.push_str(&format!("Run validation: `{}`\n\n", spec.validation.tests));
        doc.push_str("Iterate until all tests pass.\n");
        doc.push_str(&format!("Maximum iterations: {}", self.max_iterations));

        doc
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
