use serde::Serialize;
use specd_core::Language;
use std::collections::BTreeSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

struct Signal {
    file: &'static str,
    language: &'static str,
    package_manager: Option<&'static str>,
    /// Lower-case keyword found in the file → reported name.
    keywords: &'static [(&'static str, &'static str)],
}

const TOOLS: &[&str] = &["pytest", "ruff", "mypy"];

const PYTHON_KEYWORDS: &[(&str, &str)] = &[
    ("fastapi", "FastAPI"),
    ("flask", "Flask"),
    ("django", "Django"),
    ("pytest", "pytest"),
    ("ruff", "ruff"),
    ("mypy", "mypy"),
    ("pydantic", "Pydantic"),
];

/// In language priority order: the first file present decides the language.
const SIGNALS: &[Signal] = &[
    Signal {
        file: "project.godot",
        language: "gdscript",
        package_manager: None,
        keywords: &[],
    },
    Signal {
        file: "Cargo.toml",
        language: "rust",
        package_manager: Some("cargo"),
        keywords: &[],
    },
    Signal {
        file: "go.mod",
        language: "go",
        package_manager: Some("go"),
        keywords: &[],
    },
    Signal {
        file: "package.json",
        language: "javascript",
        package_manager: Some("npm"),
        keywords: &[
            ("react", "React"),
            ("vue", "Vue"),
            ("next", "Next.js"),
            ("express", "Express"),
            ("typescript", "TypeScript"),
        ],
    },
    Signal {
        file: "pyproject.toml",
        language: "python",
        package_manager: Some("pip"),
        keywords: PYTHON_KEYWORDS,
    },
    Signal {
        file: "requirements.txt",
        language: "python",
        package_manager: Some("pip"),
        keywords: PYTHON_KEYWORDS,
    },
];

// ---------------------------------------------------------------------------
// StackInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackInfo {
    /// `unknown` when no config file was recognised.
    pub language: String,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub package_manager: Option<String>,
}

impl StackInfo {
    pub fn detected_language(&self) -> Option<Language> {
        self.language.parse().ok()
    }
}

/// Look at well-known config files in `project` to guess its stack.
///
/// Only config files are read; unreadable ones still count for the language.
pub fn detect_stack(project: &Path) -> StackInfo {
    let mut language: Option<&str> = None;
    let mut package_manager: Option<&str> = None;
    let mut frameworks = BTreeSet::new();
    let mut tools = BTreeSet::new();

    for signal in SIGNALS {
        let path = project.join(signal.file);
        if !path.is_file() {
            continue;
        }
        if language.is_none() {
            language = Some(signal.language);
            package_manager = signal.package_manager;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c.to_lowercase(),
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "skipping unreadable config");
                continue;
            }
        };
        for (keyword, name) in signal.keywords {
            if content.contains(keyword) {
                if TOOLS.contains(name) {
                    tools.insert(name.to_string());
                } else {
                    frameworks.insert(name.to_string());
                }
            }
        }
    }

    StackInfo {
        language: language.unwrap_or("unknown").to_string(),
        frameworks: frameworks.into_iter().collect(),
        tools: tools.into_iter().collect(),
        package_manager: package_manager.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
