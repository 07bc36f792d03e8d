#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SPEC: &str = "\
## Spec: CalculateDamage [FEATURE]

Compute damage dealt after armor.

### Interface
- calculate_damage(base: int, armor: int) -> int

### Must Do
- Subtract armor from base damage

### Edge Cases
- armor exceeds base → 0

### Validation
```yaml
tests: pytest tests/test_calculate_damage.py -v
```
";

fn specd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("specd").unwrap();
    cmd.current_dir(dir.path()).env("SPECD_ROOT", dir.path());
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// ---------------------------------------------------------------------------
// specd parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_context() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    specd(&dir)
        .args(["parse", "damage.md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# Specification: CalculateDamage\nTier: FEATURE",
        ))
        .stdout(predicate::str::contains("- armor exceeds base → 0"));
}

#[test]
fn parse_json_output() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    let out = specd(&dir)
        .args(["--json", "parse", "damage.md"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["name"], "CalculateDamage");
    assert_eq!(value["validation"]["tests"], "pytest tests/test_calculate_damage.py -v");
}

#[test]
fn parse_reads_stdin() {
    let dir = TempDir::new().unwrap();
    specd(&dir)
        .args(["parse", "-"])
        .write_stdin("## Spec: Quick [HOTFIX]\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Tests: pytest tests/ -v"));
}

#[test]
fn parse_bad_tier_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.md", "## Spec: Thing [EPIC]\n");

    specd(&dir)
        .args(["parse", "bad.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: failed to parse bad.md"))
        .stderr(predicate::str::contains("EPIC"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    specd(&dir)
        .args(["parse", "nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.md"));
}

// ---------------------------------------------------------------------------
// specd validate
// ---------------------------------------------------------------------------

#[test]
fn validate_ok() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    specd(&dir)
        .args(["validate", "damage.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("damage.md: ok (CalculateDamage [FEATURE])"));
}

#[test]
fn validate_reports_every_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.md", "# Not a spec\n\n### Validation\nlint: ruff .\n");

    specd(&dir)
        .args(["validate", "bad.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("bad.md: invalid"))
        .stdout(predicate::str::contains("invalid spec header"))
        .stdout(predicate::str::contains("'tests' command"))
        .stderr(predicate::str::contains("1 of 1 spec(s) invalid"));
}

#[test]
fn validate_json_multiple_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.md", SPEC);
    write(&dir, "b.md", "## Spec: B [NOPE]");

    let out = specd(&dir)
        .args(["-j", "validate", "a.md", "b.md"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["file"], "a.md");
    assert_eq!(reports[0]["is_valid"], true);
    assert_eq!(reports[1]["is_valid"], false);
    assert!(reports[1]["spec"].is_null());
}

// ---------------------------------------------------------------------------
// specd prompt
// ---------------------------------------------------------------------------

#[test]
fn prompt_prints_compiled_prompt() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    specd(&dir)
        .args(["prompt", "damage.md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Spec-Driven Implementation"))
        .stdout(predicate::str::contains("`src/calculatedamage.py`"))
        .stdout(predicate::str::contains(
            "Run validation: `pytest tests/test_calculate_damage.py -v`",
        ))
        .stdout(predicate::str::contains("Maximum iterations: 5"));
}

#[test]
fn prompt_language_flag_and_system_prompt() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);
    write(&dir, "system.txt", "You are careful.\n");

    specd(&dir)
        .args([
            "prompt",
            "damage.md",
            "--language",
            "gdscript",
            "--system-prompt",
            "system.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("scripts/calculatedamage.gd"))
        .stdout(predicate::str::contains("extends GutTest"))
        .stdout(predicate::str::ends_with("Maximum iterations: 5\n\nYou are careful.\n"));
}

#[test]
fn prompt_uses_project_config() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);
    write(
        &dir,
        ".specd/config.yaml",
        "impl_path_template: game/{name}.py\nmax_iterations: 3\ncircuit_breaker_reads: 4\n",
    );

    specd(&dir)
        .args(["prompt", "damage.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`game/calculatedamage.py`"))
        .stdout(predicate::str::contains("If you have made 4+ file reads"))
        .stdout(predicate::str::contains("Maximum iterations: 3"));
}

#[test]
fn prompt_json_is_phase_request() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    let out = specd(&dir)
        .args(["--json", "prompt", "damage.md"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["phase"], "impl");
    assert_eq!(value["spec"]["name"], "CalculateDamage");
    assert!(value["test_path"].is_null());
}

#[test]
fn prompt_invalid_spec_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.md", "hello");

    specd(&dir)
        .args(["prompt", "bad.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid spec bad.md"));
}

// ---------------------------------------------------------------------------
// specd dispatch
// ---------------------------------------------------------------------------

#[test]
fn dispatch_prose_passes_through() {
    let dir = TempDir::new().unwrap();
    write(&dir, "task.txt", "Rename the config loader.\n");

    specd(&dir)
        .args(["dispatch", "task.txt", "--cli", "codex"])
        .assert()
        .success()
        .stdout("Rename the config loader.\n");
}

#[test]
fn dispatch_spec_json() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", SPEC);

    let out = specd(&dir)
        .args(["--json", "dispatch", "damage.md", "--model", "opus"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["request"]["mode"], "spec");
    assert_eq!(value["request"]["spec_name"], "CalculateDamage");
    assert_eq!(value["request"]["model"], "opus");
    assert_eq!(value["agent"], "Claude Code");
}

#[test]
fn dispatch_rejects_unknown_cli() {
    let dir = TempDir::new().unwrap();
    write(&dir, "task.txt", "x");

    specd(&dir)
        .args(["dispatch", "task.txt", "--cli", "copilot"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// specd detect / config
// ---------------------------------------------------------------------------

#[test]
fn detect_godot_project() {
    let dir = TempDir::new().unwrap();
    write(&dir, "project.godot", "[application]\n");

    specd(&dir)
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("gdscript"));
}

#[test]
fn detect_json() {
    let dir = TempDir::new().unwrap();
    write(&dir, "requirements.txt", "django\nmypy\n");

    let out = specd(&dir).args(["-j", "detect"]).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["language"], "python");
    assert_eq!(value["frameworks"], serde_json::json!(["Django"]));
    assert_eq!(value["tools"], serde_json::json!(["mypy"]));
}

#[test]
fn config_show_reports_effective_language() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Cargo.toml", "[package]\nname = \"x\"\n");

    specd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language:             rust"))
        .stdout(predicate::str::contains("cargo test"));
}

#[test]
fn parse_refuses_config_with_errors() {
    let dir = TempDir::new().unwrap();
    write(&dir, "damage.md", "## Spec: Quick [HOTFIX]\n");
    write(&dir, ".specd/config.yaml", "default_test_command: \"  \"\n");

    specd(&dir)
        .args(["parse", "damage.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_test_command is empty"));
}

#[test]
fn config_validate_clean() {
    let dir = TempDir::new().unwrap();
    specd(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_errors() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".specd/config.yaml", "max_iterations: 0\n");

    specd(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] max_iterations must be at least 1"));
}

// ---------------------------------------------------------------------------
// specd mcp
// ---------------------------------------------------------------------------

#[test]
fn mcp_round_trip_over_stdio() {
    let dir = TempDir::new().unwrap();
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r###"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"specd_validate_spec","arguments":{"markdown":"## Spec: A [HOTFIX]"}}}"###,
    ]
    .join("\n");

    let out = specd(&dir)
        .arg("mcp")
        .write_stdin(format!("{input}\n"))
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let init: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "specd");

    let call: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(call["id"], 2);
    assert_eq!(call["result"]["isError"], false);
}
