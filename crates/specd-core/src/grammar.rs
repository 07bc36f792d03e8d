//! The spec markdown grammar.
//!
//! Both the fail-fast parser and the fail-soft validator go through
//! [`scan`], so the two can never disagree about which documents are
//! well-formed.

use crate::document::EdgeCase;
use crate::error::SpecError;
use crate::types::SpecTier;
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Section names
// ---------------------------------------------------------------------------

pub const INTERFACE: &str = "Interface";
pub const MUST_DO: &str = "Must Do";
pub const MUST_NOT_DO: &str = "Must Not Do";
pub const EDGE_CASES: &str = "Edge Cases";
pub const PRECONDITIONS: &str = "Preconditions";
pub const POSTCONDITIONS: &str = "Postconditions";
pub const INVARIANTS: &str = "Invariants";
pub const VALIDATION: &str = "Validation";
pub const TARGET_PATH: &str = "Target Path";

pub const KNOWN_SECTIONS: &[&str] = &[
    INTERFACE,
    MUST_DO,
    MUST_NOT_DO,
    EDGE_CASES,
    PRECONDITIONS,
    POSTCONDITIONS,
    INVARIANTS,
    VALIDATION,
    TARGET_PATH,
];

/// Prefix that marks content as a spec rather than free prose.
pub const SPEC_MARKER: &str = "## Spec:";

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static HEADER_RE: OnceLock<Regex> = OnceLock::new();
static SECTION_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_RE: OnceLock<Regex> = OnceLock::new();
static EDGE_CASE_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| Regex::new(r"##\s*Spec:\s*(\w+)\s*\[(\w+)\]").unwrap())
}

fn section_re() -> &'static Regex {
    SECTION_RE.get_or_init(|| Regex::new(r"(?m)^###\s+(.+)$").unwrap())
}

fn bullet_re() -> &'static Regex {
    BULLET_RE.get_or_init(|| Regex::new(r"^-\s+(.+)$").unwrap())
}

fn edge_case_re() -> &'static Regex {
    EDGE_CASE_RE.get_or_init(|| Regex::new(r"^(.+?)\s*(?:→|->)+\s*(.+)$").unwrap())
}

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| Regex::new(r"(?s)```ya?ml\s*\n(.+?)```").unwrap())
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub tier: SpecTier,
    /// Byte offset just past the header match.
    pub end: usize,
}

/// Find `## Spec: <Name> [<TIER>]` anywhere in the document.
pub fn parse_header(markdown: &str) -> Result<Header, SpecError> {
    let caps = header_re()
        .captures(markdown)
        .ok_or(SpecError::InvalidHeader)?;
    let whole = caps.get(0).ok_or(SpecError::InvalidHeader)?;
    let tier = caps[2].parse::<SpecTier>()?;
    Ok(Header {
        name: caps[1].to_string(),
        tier,
        end: whole.end(),
    })
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub name: &'a str,
    pub body: &'a str,
    /// Byte offset of the `###` line.
    pub start: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Sections<'a> {
    items: Vec<Section<'a>>,
}

impl<'a> Sections<'a> {
    /// Split on `###` headings. Each body runs to the next heading or the
    /// end of the document and is trimmed.
    pub fn split(markdown: &'a str) -> Self {
        let matches: Vec<_> = section_re().captures_iter(markdown).collect();
        let mut items = Vec::with_capacity(matches.len());

        for (i, caps) in matches.iter().enumerate() {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(markdown.len());
            items.push(Section {
                name: name.as_str().trim(),
                body: markdown[whole.end()..end].trim(),
                start: whole.start(),
            });
        }

        Self { items }
    }

    /// Body of the named section. A repeated heading shadows earlier ones.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.items
            .iter()
            .rev()
            .find(|s| s.name == name)
            .map(|s| s.body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<'a>> {
        self.items.iter()
    }

    /// Offset of the first heading at or after `from`.
    pub fn first_start_after(&self, from: usize) -> Option<usize> {
        self.items.iter().map(|s| s.start).find(|&s| s >= from)
    }

    /// Headings the grammar does not know about; they are skipped.
    pub fn unknown(&self) -> Vec<&'a str> {
        self.items
            .iter()
            .filter(|s| !KNOWN_SECTIONS.contains(&s.name))
            .map(|s| s.name)
            .collect()
    }
}

/// Text between the header and the first section heading.
pub fn description<'a>(markdown: &'a str, header: &Header, sections: &Sections<'_>) -> &'a str {
    let end = sections
        .first_start_after(header.end)
        .unwrap_or(markdown.len());
    markdown[header.end..end].trim()
}

// ---------------------------------------------------------------------------
// Section bodies
// ---------------------------------------------------------------------------

/// Items of a `- item` list. Non-bullet lines are skipped.
pub fn bullets(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| bullet_re().captures(line.trim()))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// `- case → outcome` pairs; `->` works as well as `→`.
///
/// Lines without an arrow are dropped. A repeated case keeps its first
/// position and takes the later outcome.
pub fn edge_cases(body: &str) -> Vec<EdgeCase> {
    let mut out: Vec<EdgeCase> = Vec::new();

    for line in body.lines() {
        let Some(rest) = line.trim().strip_prefix('-') else {
            continue;
        };
        let Some(caps) = edge_case_re().captures(rest.trim()) else {
            tracing::debug!(line, "dropping edge case without an arrow");
            continue;
        };
        let case = caps[1].trim();
        let outcome = caps[2].trim();
        if case.is_empty() || outcome.is_empty() {
            tracing::debug!(line, "dropping edge case with an empty side");
            continue;
        }

        match out.iter_mut().find(|e| e.case == case) {
            Some(existing) => existing.outcome = outcome.to_string(),
            None => out.push(EdgeCase::new(case, outcome)),
        }
    }

    out
}

/// First non-empty line that is not a `#` comment.
pub fn target_path(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// Contents of a ```` ```yaml ```` / ```` ```yml ```` fence, or the whole
/// body when there is none.
pub fn unwrap_fence(body: &str) -> &str {
    fence_re()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(body)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFields<'a> {
    pub tests: Option<&'a str>,
    pub typecheck: Option<&'a str>,
    pub lint: Option<&'a str>,
}

/// Read `key: value` lines from a Validation body. Keys match
/// case-insensitively, the split is on the first colon, empty values count
/// as absent, and a repeated key replaces the earlier value.
pub fn validation_fields(body: &str) -> ValidationFields<'_> {
    let mut fields = ValidationFields::default();

    for line in unwrap_fence(body).lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let value = Some(value.trim()).filter(|v| !v.is_empty());
        match key.trim().to_lowercase().as_str() {
            "tests" => fields.tests = value,
            "typecheck" => fields.typecheck = value,
            "lint" => fields.lint = value,
            _ => {}
        }
    }

    fields
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Everything the structural checks learned about a document.
#[derive(Debug)]
pub struct Scan<'a> {
    pub header: Option<Header>,
    pub sections: Sections<'a>,
    /// `None` when there is no Validation section at all.
    pub validation: Option<ValidationFields<'a>>,
    /// Every structural error, header first.
    pub errors: Vec<SpecError>,
}

/// Run every structural check and collect all failures.
pub fn scan(markdown: &str) -> Scan<'_> {
    let mut errors = Vec::new();

    let header = match parse_header(markdown) {
        Ok(h) => Some(h),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let sections = Sections::split(markdown);
    let validation = sections.get(VALIDATION).map(validation_fields);
    if let Some(ref fields) = validation {
        if fields.tests.is_none() {
            errors.push(SpecError::MissingTestsCommand);
        }
    }

    Scan {
        header,
        sections,
        validation,
        errors,
    }
}

/// Whether content should be treated as a spec rather than prose.
pub fn looks_like_spec(content: &str) -> bool {
    content.trim().starts_with(SPEC_MARKER)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
