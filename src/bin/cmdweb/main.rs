mod resolve;
mod tree;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cmdweb::commands::registry::Registry;
use cmdweb::host::HostConfig;
use cmdweb::load_config;

#[derive(Parser, Debug)]
#[command(name = "cmdweb", about = "Browse a tree of command-line operations")]
struct Cli {
    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// URL prefix the interface is mounted under (overrides CMDWEB_ROOT_PREFIX and the config file)
    #[arg(long)]
    root_prefix: Option<String>,

    /// Log file path (enables file logging in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the command tree document
    Tree(tree::TreeArgs),
    /// Show the node addressed by a path and the parameters declared above it
    Resolve(resolve::ResolveArgs),
    /// Print the JSON Schema of the tree document
    Schema,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    cmdweb::logger::init(log_file)?;

    match cli.command {
        Commands::Tree(ref args) => {
            let (registry, host) = open(&cli)?;
            tree::run(args, &registry, &host)
        }
        Commands::Resolve(ref args) => {
            let (registry, host) = open(&cli)?;
            resolve::run(args, &registry, &host)
        }
        Commands::Schema => {
            let schema = cmdweb::tree::document_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the registry and merge the root prefix sources: flag, environment, config file
fn open(cli: &Cli) -> Result<(Registry, HostConfig), Box<dyn std::error::Error>> {
    let (registry, file_host, _) = load_config(cli.config.as_deref())?;
    let host = HostConfig {
        root_prefix: cli.root_prefix.clone(),
    }
    .or(HostConfig::from_env())
    .or(file_host);
    Ok((registry, host))
}
