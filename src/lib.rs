//! Core implementation of cmdweb
//!
//! cmdweb publishes a tree of command-line operations, commands nested in groups,
//! to a browser-navigable interface. This crate holds the registry those commands
//! are declared in, loads it from a configuration file, and turns it into a
//! serializable tree document in which every node carries the path used both for
//! navigation links and for routing an invocation.

use std::collections::HashSet;
use std::path::PathBuf;

use log::{debug, warn};
use regex::Regex;

use crate::commands::registry::{Node, Registry};
use crate::config_file::{Config, ConfigError};
use crate::host::HostConfig;

pub mod commands;
pub mod config_file;
pub mod host;
pub mod logger;
pub mod tree;

/// A node name must be usable as a single path segment
const NAME_PATTERN: &str = r"^[^/\s]+$";

/// Load configuration from a file (or auto-detect), returning the registry, the
/// hosting settings it declares, and the config file path.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found, cannot be parsed, or
/// describes an invalid registry.
pub fn load_config(
    config_file: Option<&str>,
) -> Result<(Registry, HostConfig, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    debug!("Loading registry from config file: {}", config_path.display());
    let parsed = Config::from_file(&config_path)?;
    validate_version(&parsed.cmdweb_version);
    let host = parsed.host();
    let registry = parsed.into_registry()?;
    validate_registry(&registry)?;
    Ok((registry, host, config_path))
}

/// Warn if the config's `cmdweb_version` doesn't match the binary version
fn validate_version(config_version: &str) {
    let binary_version = env!("CARGO_PKG_VERSION");
    if config_version != binary_version {
        warn!(
            "Config cmdweb_version '{config_version}' differs from binary version '{binary_version}'"
        );
    }
}

/// Validate names and sibling uniqueness from the registry root down.
///
/// # Errors
///
/// Returns `ConfigError::InvalidName` for names that cannot be a path segment,
/// `ConfigError::DuplicateName` for siblings sharing a name, or
/// `ConfigError::Tree` if the registry has no root or a dangling child.
pub fn validate_registry(registry: &Registry) -> Result<(), ConfigError> {
    let segment = Regex::new(NAME_PATTERN).map_err(|e| ConfigError::Regex {
        source: e,
        pattern: NAME_PATTERN.to_string(),
    })?;
    let root = registry
        .root()
        .and_then(|id| registry.get(id))
        .ok_or(tree::TreeError::MissingRoot)?;
    check_node(registry, root, root.name(), &[], &segment)
}

fn check_node(
    registry: &Registry,
    node: &Node,
    name: &str,
    ancestors: &[&str],
    segment: &Regex,
) -> Result<(), ConfigError> {
    let mut entry = ancestors.to_vec();
    entry.push(name);
    if !segment.is_match(name) {
        return Err(ConfigError::InvalidName {
            name: name.to_string(),
            entry: entry.join("."),
        });
    }
    if entry.len() > tree::MAX_DEPTH {
        return Err(tree::TreeError::TooDeep {
            path: entry.join("/"),
            limit: tree::MAX_DEPTH,
        }
        .into());
    }

    let Node::Group(group) = node else {
        return Ok(());
    };
    if group.children.is_empty() {
        warn!("Group '{}' has no commands", entry.join("."));
    }
    let mut seen = HashSet::new();
    for (child_name, child) in registry.list_children(group)? {
        if !seen.insert(child_name) {
            return Err(ConfigError::DuplicateName {
                group: entry.join("."),
                name: child_name.to_string(),
            });
        }
        check_node(registry, child, child_name, &entry, segment)?;
    }
    Ok(())
}
