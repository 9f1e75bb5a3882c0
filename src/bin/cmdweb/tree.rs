use std::fmt::Write;
use std::process::ExitCode;

use clap::{Args, ValueEnum};

use cmdweb::commands::registry::Registry;
use cmdweb::host::HostConfig;
use cmdweb::tree::{TreeBuilder, TreeNode};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Json,
    Yaml,
    /// Indented outline for reading in a terminal
    Text,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Only print the subtree at this path, e.g. `/app/cli/sub`
    #[arg(long)]
    at: Option<String>,
}

/// Run the tree subcommand.
///
/// # Errors
///
/// Returns an error if no root prefix is configured, the path does not exist,
/// or the registry is malformed.
pub fn run(
    args: &TreeArgs,
    registry: &Registry,
    host: &HostConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let builder = TreeBuilder::new(registry, host)?;
    let tree = match args.at {
        Some(ref path) => builder.build_path(path)?,
        None => builder.build()?,
    };

    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&tree)?,
        Format::Yaml => serde_yaml::to_string(&tree)?,
        Format::Text => outline(&tree)?,
    };
    println!("{}", rendered.trim_end());
    Ok(ExitCode::SUCCESS)
}

fn outline(tree: &TreeNode) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_outline(tree, 0, &mut out)?;
    Ok(out)
}

fn write_outline(node: &TreeNode, depth: usize, out: &mut String) -> std::fmt::Result {
    let marker = if node.is_group { '+' } else { '-' };
    write!(out, "{}{marker} {}", "  ".repeat(depth), node.name)?;
    if !node.short_help.is_empty() {
        write!(out, ": {}", node.short_help)?;
    }
    writeln!(out, " [{}]", node.path)?;
    for child in node.children() {
        write_outline(child, depth + 1, out)?;
    }
    Ok(())
}
