use crate::output::print_json;
use crate::project::{read_input, Project};
use anyhow::Context;
use specd_core::Language;
use std::path::Path;

pub fn run(root: &Path, file: &str, language: Option<Language>, json: bool) -> anyhow::Result<()> {
    let project = Project::open(root)?;
    let markdown = read_input(file)?;
    let spec = project
        .parser(language)
        .parse(&markdown)
        .with_context(|| format!("failed to parse {file}"))?;

    if json {
        print_json(&spec)?;
    } else {
        println!("{}", spec.to_prompt_context());
    }
    Ok(())
}
