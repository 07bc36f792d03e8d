use crate::output::print_json;
use crate::project::{read_input, read_system_prompt, Project};
use anyhow::Context;
use specd_core::dispatch::{AgentCli, DispatchHandler};
use std::path::Path;

pub fn run(
    root: &Path,
    file: &str,
    cli: AgentCli,
    model: Option<String>,
    system_prompt: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let project = Project::open(root)?;
    let content = read_input(file)?;
    let system = read_system_prompt(system_prompt)?;

    let handler = DispatchHandler::new(project.parser(None), project.prompt_builder(None));
    let request = handler
        .prepare(&content, &project.root, cli, model)
        .with_context(|| format!("cannot dispatch {file}"))?;
    let prompt = handler.build_prompt(&request, &system)?;
    let prompt = prompt.trim_end();

    tracing::info!(mode = ?request.mode, cli = %request.cli, "dispatch prepared");

    if json {
        print_json(&serde_json::json!({
            "request": request,
            "agent": request.cli.display_name(),
            "prompt": prompt,
        }))?;
    } else {
        println!("{prompt}");
    }
    Ok(())
}
