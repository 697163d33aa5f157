use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use log::debug;
use npm_alfred::{Icon, Workflow, logging};
use npm_registry::{RegistryClient, RegistryConfig};

#[derive(Parser)]
#[command(name = "npm-alfred")]
#[command(about = "Search the npm registry and print Alfred feedback", long_about = None)]
#[command(version)]
struct Cli {
    /// Free-text search query
    #[arg(value_name = "QUERY", default_value = "", allow_hyphen_values = true)]
    query: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&logging::log_path());

    let registry = RegistryClient::new(RegistryConfig::from_env());
    debug!("registry: {}", registry.config().base_url);

    let workflow = Workflow::new(cli.query, registry, Icon::from_env());
    workflow
        .call(std::io::stdout().lock())
        .context("Failed to write feedback to stdout")?;

    Ok(())
}
