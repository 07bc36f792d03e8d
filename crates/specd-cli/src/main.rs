mod cmd;
mod output;
mod project;
mod root;
mod stack;
mod tools;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use specd_core::dispatch::AgentCli;
use specd_core::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specd",
    about = "Parse, validate and compile structured feature specs into agent prompts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .specd/ or .git/)
    #[arg(long, global = true, env = "SPECD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a spec and print it (stops at the first error)
    Parse {
        /// Spec file, or - for stdin
        file: String,
        /// Override the project language
        #[arg(long)]
        language: Option<Language>,
    },

    /// Check specs and report every structural error
    Validate {
        /// Spec files, or - for stdin
        #[arg(required = true)]
        files: Vec<String>,
        /// Override the project language
        #[arg(long)]
        language: Option<Language>,
    },

    /// Compile a spec into an implementation prompt
    Prompt {
        /// Spec file, or - for stdin
        file: String,
        /// Override the project language
        #[arg(long)]
        language: Option<Language>,
        /// File whose contents are appended after the prompt
        #[arg(long)]
        system_prompt: Option<PathBuf>,
    },

    /// Prepare a task (spec or prose) for an agent CLI and print the final prompt
    Dispatch {
        /// Task file, or - for stdin
        file: String,
        /// Agent CLI: claude, gemini or codex
        #[arg(long, default_value = "claude")]
        cli: AgentCli,
        /// Model passed through to the agent CLI
        #[arg(long)]
        model: Option<String>,
        /// File whose contents are appended after the prompt
        #[arg(long)]
        system_prompt: Option<PathBuf>,
    },

    /// Detect the project's language, frameworks and tools
    Detect,

    /// Inspect the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run as an MCP stdio server
    Mcp,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Parse { file, language } => cmd::parse::run(&root, &file, language, cli.json),
        Commands::Validate { files, language } => {
            cmd::validate::run(&root, &files, language, cli.json)
        }
        Commands::Prompt {
            file,
            language,
            system_prompt,
        } => cmd::prompt::run(&root, &file, language, system_prompt.as_deref(), cli.json),
        Commands::Dispatch {
            file,
            cli: agent,
            model,
            system_prompt,
        } => cmd::dispatch::run(&root, &file, agent, model, system_prompt.as_deref(), cli.json),
        Commands::Detect => cmd::detect::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Mcp => cmd::mcp::run(&root),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
