use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: QuireCommand,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the blog in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "quire.yaml")]
    config_file: Option<PathBuf>,

    /// Date given to posts without one (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<String>,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "quire.yaml")]
    config_file: Option<PathBuf>,

    /// Only report what would be deleted
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum QuireCommand {
    /// Initialize a new blog
    Init(InitArgs),

    /// Build the blog
    Build(BuildArgs),

    /// Delete the generated site
    Clean(CleanArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        QuireCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        QuireCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        QuireCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
