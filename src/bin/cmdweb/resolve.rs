use std::process::ExitCode;

use clap::Args;
use serde::Serialize;

use cmdweb::commands::param::Param;
use cmdweb::commands::registry::Registry;
use cmdweb::host::HostConfig;
use cmdweb::tree::TreeError;
use cmdweb::tree::path::{compose, segments};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Full path of a command or group, e.g. `/app/cli/sub/nargs-test`
    path: String,
}

/// One level of a resolved invocation, root first
#[derive(Serialize)]
struct Level<'a> {
    name: &'a str,
    is_group: bool,
    path: String,
    params: &'a [Param],
}

/// Run the resolve subcommand.
///
/// # Errors
///
/// Returns an error if no root prefix is configured or the path names no node.
pub fn run(
    args: &ResolveArgs,
    registry: &Registry,
    host: &HostConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let root_prefix = host.root_prefix()?;
    let names = segments(root_prefix, &args.path).ok_or_else(|| TreeError::NotFound {
        path: args.path.clone(),
    })?;
    let invocation = registry.resolve(&names)?;

    let levels: Vec<Level<'_>> = invocation
        .chain()
        .iter()
        .enumerate()
        .map(|(depth, &(name, node))| Level {
            name,
            is_group: node.is_group(),
            path: compose(root_prefix, &names[..=depth]),
            params: node.params(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&levels)?);
    Ok(ExitCode::SUCCESS)
}
