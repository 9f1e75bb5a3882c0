//! Configuration file handling for cmdweb

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::command::Command;
use crate::commands::group::Group;
use crate::commands::param::Param;
use crate::commands::registry::{NodeId, Registry};
use crate::host::HostConfig;
use crate::tree::TreeError;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found in current directory or its parents: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid regex pattern `{pattern}`: {source}")]
    Regex {
        source: regex::Error,
        pattern: String,
    },
    #[error("Unknown mount `{mount}` (entry: {entry})")]
    UnknownMount { mount: String, entry: String },
    #[error("Duplicate name `{name}` in group `{group}`")]
    DuplicateName { group: String, name: String },
    #[error(
        "Invalid name `{name}` (entry: {entry}): names are path segments and cannot be empty or contain `/` or whitespace"
    )]
    InvalidName { name: String, entry: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Configuration for a single command or group.
///
/// An entry with a `commands` list is a group (possibly empty), anything else is a
/// command. An entry with `mount` lists a definition from the config's `library`,
/// optionally under a different `name`. Library definitions default their
/// `name` to their key in the library.
///
/// Keys not listed here end up in `unknown` and are rejected when the registry is
/// built, so a misspelled `commands` cannot turn a group into a command.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigNode {
    pub name: Option<String>,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub deprecated: Option<bool>,
    pub params: Option<Vec<Param>>,
    pub commands: Option<Vec<ConfigNode>>,
    pub mount: Option<String>,
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_yaml::Value>,
}

/// Root configuration structure for cmdweb
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub cmdweb_version: String,
    pub root_prefix: Option<String>,
    /// Definitions that can be mounted anywhere in the tree
    #[serde(default)]
    pub library: HashMap<String, ConfigNode>,
    #[serde(flatten)]
    pub root: ConfigNode,
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".cmdweb.json", ".cmdweb.yaml", ".cmdweb.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let config_path = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        let mut path = config_path.clone();
        debug!("Searching for config file in {}", config_path.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
        }
    }

    /// Hosting settings declared in the file
    #[must_use]
    pub fn host(&self) -> HostConfig {
        HostConfig {
            root_prefix: self.root_prefix.clone(),
        }
    }

    /// Build the registry described by this config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownMount` if an entry mounts a missing library
    /// definition, or `ConfigError::Validation` if an entry is incomplete.
    pub fn into_registry(self) -> Result<Registry, ConfigError> {
        let mut loader = RegistryLoader {
            registry: Registry::new(),
            library: self.library,
            mounted: HashMap::new(),
        };
        if self.root.mount.is_some() {
            return Err(ConfigError::Validation(
                "The root entry cannot be a mount".to_string(),
            ));
        }
        let (_, root) = loader.insert(self.root, &[], false)?;
        loader.registry.set_root(root);
        for unused in loader.library.keys() {
            debug!("Library entry `{unused}` is never mounted");
        }
        Ok(loader.registry)
    }
}

/// Inserts config entries bottom-up, sharing each mounted definition
struct RegistryLoader {
    registry: Registry,
    library: HashMap<String, ConfigNode>,
    mounted: HashMap<String, NodeId>,
}

impl RegistryLoader {
    fn insert(
        &mut self,
        node: ConfigNode,
        parent_entry: &[String],
        in_library: bool,
    ) -> Result<(String, NodeId), ConfigError> {
        let mut entry = parent_entry.to_vec();
        entry.push(node.name.clone().unwrap_or_else(|| "?".to_string()));

        if !node.unknown.is_empty() {
            let mut keys: Vec<&str> = node.unknown.keys().map(String::as_str).collect();
            keys.sort_unstable();
            return Err(ConfigError::Validation(format!(
                "Unknown key(s) `{}` (entry: {})",
                keys.join("`, `"),
                entry.join(".")
            )));
        }

        if let Some(mount) = node.mount {
            if in_library {
                return Err(ConfigError::Validation(format!(
                    "Library entries cannot mount other entries (entry: {}, mount: {mount})",
                    entry.join(".")
                )));
            }
            if node.commands.is_some() || node.params.is_some() {
                return Err(ConfigError::Validation(format!(
                    "A mount cannot declare its own commands or params (entry: {})",
                    entry.join(".")
                )));
            }
            let (intrinsic, id) = self.mount(&mount, &entry)?;
            return Ok((node.name.unwrap_or(intrinsic), id));
        }

        let name = node.name.ok_or_else(|| {
            ConfigError::Validation(format!("Entry {} has no name", entry.join(".")))
        })?;
        let id = match node.commands {
            None => self.registry.insert(Command {
                name: name.clone(),
                short_help: node.short_help,
                help: node.help,
                deprecated: node.deprecated.unwrap_or_default(),
                params: node.params.unwrap_or_default(),
            }),
            Some(children) => {
                let mut group = Group {
                    name: name.clone(),
                    short_help: node.short_help,
                    help: node.help,
                    deprecated: node.deprecated.unwrap_or_default(),
                    params: node.params.unwrap_or_default(),
                    children: Vec::with_capacity(children.len()),
                };
                for child in children {
                    let (child_name, child_id) = self.insert(child, &entry, in_library)?;
                    group.add_child(&child_name, child_id);
                }
                self.registry.insert(group)
            }
        };
        Ok((name, id))
    }

    /// Insert a library definition once and hand out its id for every mount
    fn mount(&mut self, mount: &str, entry: &[String]) -> Result<(String, NodeId), ConfigError> {
        let id = match self.mounted.get(mount) {
            Some(id) => *id,
            None => {
                let mut definition =
                    self.library
                        .remove(mount)
                        .ok_or_else(|| ConfigError::UnknownMount {
                            mount: mount.to_string(),
                            entry: entry.join("."),
                        })?;
                definition.name.get_or_insert_with(|| mount.to_string());
                let (_, id) = self.insert(definition, &["library".to_string()], true)?;
                self.mounted.insert(mount.to_string(), id);
                id
            }
        };
        let intrinsic = self
            .registry
            .get(id)
            .map(|node| node.name().to_string())
            .unwrap_or_default();
        Ok((intrinsic, id))
    }
}
