//! Serializable command tree
//!
//! The [`TreeBuilder`] walks the registry from any node and projects it into a
//! [`TreeNode`] document: one entry per command or group, with its summary, full
//! help and the path the web layer uses both for links and for routing an
//! invocation. Paths are composed during the same walk by threading the ancestor
//! names through the recursion, so a document and its addressing always agree.
//!
//! Documents are rebuilt for every request. Building is read-only over the
//! registry, so one registry can serve any number of concurrent builds.

pub mod path;

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::registry::{Invocation, Node, NodeId, Registry};
use crate::commands::short_help::strip_raw_block;
use crate::host::HostConfig;

/// Deepest nesting accepted before a build is aborted
pub const MAX_DEPTH: usize = 64;

/// Errors that can occur while building or addressing the command tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Malformed registry: child `{child}` of group `{parent}` has no definition")]
    MalformedRegistry { parent: String, child: String },
    #[error(
        "No root prefix configured (set `root_prefix` in the config file, pass --root-prefix or set CMDWEB_ROOT_PREFIX)"
    )]
    MissingConfiguration,
    #[error("Registry has no root command or group")]
    MissingRoot,
    #[error("Command tree is deeper than {limit} levels at {path}")]
    TooDeep { path: String, limit: usize },
    #[error("No command or group at {path}")]
    NotFound { path: String },
}

/// One command or group of the browsable tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeNode {
    pub is_group: bool,
    /// Name the node is listed under, not the full path
    pub name: String,
    pub short_help: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub path: String,
    /// Commands first, then groups. Never present as an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Children in display order, empty for commands and empty groups
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Pre-order walk over this node and all its descendants
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    #[must_use]
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.path == path)
    }
}

/// JSON Schema of the tree document, for consumers in other languages
#[must_use]
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(TreeNode)
}

/// Projects registry nodes into [`TreeNode`] documents under a root prefix
#[derive(Debug, Clone)]
pub struct TreeBuilder<'r> {
    registry: &'r Registry,
    root_prefix: String,
    /// Name the registry root is listed under, its intrinsic name if unset
    root_name: Option<String>,
}

impl<'r> TreeBuilder<'r> {
    /// Create a builder using the root prefix of the hosting configuration.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MissingConfiguration` if no root prefix is configured.
    pub fn new(registry: &'r Registry, host: &HostConfig) -> Result<Self, TreeError> {
        Ok(Self::with_root_prefix(registry, host.root_prefix()?))
    }

    #[must_use]
    pub fn with_root_prefix(registry: &'r Registry, root_prefix: &str) -> Self {
        TreeBuilder {
            registry,
            root_prefix: root_prefix.to_string(),
            root_name: None,
        }
    }

    /// List the registry root as `root_name`, for building and for resolving paths
    #[must_use]
    pub fn with_root_name(mut self, root_name: &str) -> Self {
        self.root_name = Some(root_name.to_string());
        self
    }

    #[must_use]
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// Build the whole tree from the registry root, under the builder's root name.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MissingRoot` if the registry has no root, or any error
    /// of [`TreeBuilder::build_tree`].
    pub fn build(&self) -> Result<TreeNode, TreeError> {
        let root = self.registry.root().ok_or(TreeError::MissingRoot)?;
        let node = self.registry.get(root).ok_or(TreeError::MissingRoot)?;
        self.build_tree(root, self.root_name.as_deref().unwrap_or(node.name()))
    }

    /// Build the tree rooted at `root`, listed as `root_name`.
    ///
    /// The paths route back through [`TreeBuilder::build_path`] when `root` is the
    /// registry root and `root_name` is the builder's root name (see
    /// [`TreeBuilder::with_root_name`]).
    ///
    /// # Errors
    ///
    /// Returns `TreeError::NotFound` if `root` is not in the registry,
    /// `TreeError::MalformedRegistry` if any descendant is dangling, or
    /// `TreeError::TooDeep` if the nesting exceeds [`MAX_DEPTH`].
    pub fn build_tree(&self, root: NodeId, root_name: &str) -> Result<TreeNode, TreeError> {
        let node = self
            .registry
            .get(root)
            .ok_or_else(|| TreeError::NotFound {
                path: path::compose(&self.root_prefix, &[root_name]),
            })?;
        debug!(
            "Building command tree for `{root_name}` under prefix {:?}",
            self.root_prefix
        );
        self.convert(node, root_name, &[])
    }

    /// Build the subtree of a resolved node, keeping the paths it has in the full tree.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::build_tree`].
    pub fn build_at(&self, invocation: &Invocation<'_>) -> Result<TreeNode, TreeError> {
        let (name, node) = invocation.target();
        let ancestors: Vec<&str> = invocation
            .ancestors()
            .iter()
            .map(|(ancestor, _)| *ancestor)
            .collect();
        self.convert(node, name, &ancestors)
    }

    /// Build the subtree addressed by a full path such as `/app/cli/sub`.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::NotFound` if the path is outside the root prefix or names
    /// no node, or any error of [`TreeBuilder::build_at`].
    pub fn build_path(&self, full_path: &str) -> Result<TreeNode, TreeError> {
        let names =
            path::segments(&self.root_prefix, full_path).ok_or_else(|| TreeError::NotFound {
                path: full_path.to_string(),
            })?;
        let invocation = match self.root_name {
            Some(ref root_name) => self.registry.resolve_as(root_name, &names)?,
            None => self.registry.resolve(&names)?,
        };
        self.build_at(&invocation)
    }

    fn convert(&self, node: &Node, name: &str, ancestors: &[&str]) -> Result<TreeNode, TreeError> {
        let mut names = ancestors.to_vec();
        names.push(name);
        let path = path::compose(&self.root_prefix, &names);
        if ancestors.len() >= MAX_DEPTH {
            return Err(TreeError::TooDeep {
                path,
                limit: MAX_DEPTH,
            });
        }

        let children = match node {
            Node::Command(_) => None,
            Node::Group(group) => {
                let mut listed = self.registry.list_children(group)?;
                // Stable: declared order survives inside each partition
                listed.sort_by_key(|(_, child)| child.is_group());
                let children = listed
                    .into_iter()
                    .map(|(child_name, child)| self.convert(child, child_name, &names))
                    .collect::<Result<Vec<TreeNode>, TreeError>>()?;
                (!children.is_empty()).then_some(children)
            }
        };

        Ok(TreeNode {
            is_group: node.is_group(),
            name: name.to_string(),
            short_help: strip_raw_block(&node.short_help()).to_string(),
            help: node.help().map(str::to_string),
            path,
            children,
        })
    }
}
