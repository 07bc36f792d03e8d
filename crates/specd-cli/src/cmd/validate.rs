use crate::output::print_json;
use crate::project::{read_input, Project};
use serde::Serialize;
use specd_core::{Language, SpecValidationResult};
use std::path::Path;

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    result: SpecValidationResult,
}

pub fn run(
    root: &Path,
    files: &[String],
    language: Option<Language>,
    json: bool,
) -> anyhow::Result<()> {
    let project = Project::open(root)?;
    let parser = project.parser(language);

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let markdown = read_input(file)?;
        reports.push(FileReport {
            file,
            result: parser.validate(&markdown),
        });
    }

    if json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            match &report.result.spec {
                Some(spec) => println!("{}: ok ({} [{}])", report.file, spec.name, spec.tier),
                None => {
                    println!("{}: invalid", report.file);
                    for e in &report.result.errors {
                        println!("  - {e}");
                    }
                }
            }
        }
    }

    let invalid = reports.iter().filter(|r| !r.result.is_valid).count();
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} spec(s) invalid", reports.len());
    }
    Ok(())
}
