// crates/mintplan-cli/src/main.rs
//
// CLI entrypoint for mintplan.
//
// Initializes tracing, parses CLI arguments, loads the variable map and
// deploy overrides once, and dispatches to the selected command. Logs go to
// stderr so JSON on stdout can be piped straight into the toolchain.

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::check::CheckCmd;
use commands::governance::GovernanceCmd;
use output::OutputFormat;

/// mintplan: token deployment configuration builder.
#[derive(Parser, Debug)]
#[command(
    name = "mintplan",
    version,
    about = "Build, validate, and render token deployment configuration"
)]
struct Cli {
    /// Dotenv file to read before the process environment.
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Ignore the dotenv file and use only the process environment.
    #[arg(long, global = true)]
    no_env_file: bool,

    /// TOML file with network and compiler overrides.
    #[arg(long, global = true)]
    deploy_config: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Show token contract parameters.
    Token,

    /// Show the governance allocation graph.
    Governance(GovernanceCmd),

    /// Show ICO, ICO ATM, swap and DAI descriptors.
    Offerings,

    /// Show the network table and compiler settings.
    Networks,

    /// Build everything and report missing keys and allocation warnings.
    Check(CheckCmd),

    /// Print the complete configuration as JSON.
    Render,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let env_file = (!cli.no_env_file).then_some(cli.env_file.as_path());
    let env = context::load_env(env_file)?;
    let overrides = context::load_overrides(cli.deploy_config.as_deref())?;

    match &cli.command {
        Commands::Token => commands::token::run(&env, cli.format)?,
        Commands::Governance(cmd) => commands::governance::run(cmd, &env, cli.format)?,
        Commands::Offerings => commands::offerings::run(&env, cli.format)?,
        Commands::Networks => commands::networks::run(&env, &overrides, cli.format)?,
        Commands::Check(cmd) => commands::check::run(cmd, &env, &overrides, cli.format)?,
        Commands::Render => commands::render::run(&env, &overrides)?,
    }

    Ok(())
}
