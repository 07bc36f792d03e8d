use crate::output::print_json;
use crate::stack::detect_stack;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let info = detect_stack(root);

    if json {
        return print_json(&info);
    }

    println!("language:        {}", info.language);
    println!(
        "package manager: {}",
        info.package_manager.as_deref().unwrap_or("-")
    );
    if !info.frameworks.is_empty() {
        println!("frameworks:      {}", info.frameworks.join(", "));
    }
    if !info.tools.is_empty() {
        println!("tools:           {}", info.tools.join(", "));
    }
    Ok(())
}
