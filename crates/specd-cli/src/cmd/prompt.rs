use crate::output::print_json;
use crate::project::{read_input, read_system_prompt, Project};
use specd_core::{Language, SpecPhaseRunner};
use std::path::Path;

pub fn run(
    root: &Path,
    file: &str,
    language: Option<Language>,
    system_prompt: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let project = Project::open(root)?;
    let markdown = read_input(file)?;
    let system = read_system_prompt(system_prompt)?;

    let result = project.parser(language).validate(&markdown);
    if !result.is_valid {
        anyhow::bail!("invalid spec {file}: {}", result.errors.join("; "));
    }
    let runner = SpecPhaseRunner::from_validation(result, &project.root)?
        .with_builder(project.prompt_builder(language));

    let mut request = runner.get_request();
    if !system.trim().is_empty() {
        request.prompt = format!("{}\n\n{}", request.prompt, system.trim_end());
    }

    if json {
        print_json(&request)?;
    } else {
        println!("{}", request.prompt);
    }
    Ok(())
}
