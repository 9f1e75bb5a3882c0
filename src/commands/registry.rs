use crate::commands::command::Command;
use crate::commands::group::Group;
use crate::commands::param::Param;
use crate::commands::short_help;
use crate::tree::TreeError;

/// Handle to a node stored in a [`Registry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A registry entry: either an invocable command or a group of further nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Command(Command),
    Group(Group),
}

impl Node {
    /// Intrinsic name, as declared on the definition
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Command(cmd) => &cmd.name,
            Node::Group(group) => &group.name,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    /// One-line summary, see [`short_help::summary`]
    #[must_use]
    pub fn short_help(&self) -> String {
        match self {
            Node::Command(cmd) => {
                short_help::summary(cmd.short_help.as_deref(), cmd.help.as_deref(), cmd.deprecated)
            }
            Node::Group(group) => short_help::summary(
                group.short_help.as_deref(),
                group.help.as_deref(),
                group.deprecated,
            ),
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&str> {
        match self {
            Node::Command(cmd) => cmd.help.as_deref(),
            Node::Group(group) => group.help.as_deref(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        match self {
            Node::Command(cmd) => &cmd.params,
            Node::Group(group) => &group.params,
        }
    }
}

impl From<Command> for Node {
    fn from(cmd: Command) -> Self {
        Node::Command(cmd)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

/// Arena holding every command and group definition.
///
/// Nodes are inserted bottom-up: a group refers to children that were inserted
/// before it, so a registry assembled through [`Registry::insert`] is acyclic.
/// The registry is never mutated once handed to the web layer.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<Node>) -> NodeId {
        self.nodes.push(node.into());
        NodeId(self.nodes.len() - 1)
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `group` in declared order, paired with their listing name.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MalformedRegistry` if a child id does not resolve to a node.
    pub fn list_children<'a>(
        &'a self,
        group: &'a Group,
    ) -> Result<Vec<(&'a str, &'a Node)>, TreeError> {
        group
            .children
            .iter()
            .map(|(name, id)| {
                self.get(*id)
                    .map(|node| (name.as_str(), node))
                    .ok_or_else(|| TreeError::MalformedRegistry {
                        parent: group.name.clone(),
                        child: name.clone(),
                    })
            })
            .collect()
    }

    /// Walk from the root along `names` and return the chain of visited nodes.
    ///
    /// The first name must be the root's intrinsic name.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MissingRoot` if the registry has no root,
    /// `TreeError::NotFound` if a name does not match a child of the current group,
    /// or `TreeError::MalformedRegistry` if a child id is dangling.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Invocation<'_>, TreeError> {
        let root_id = self.root.ok_or(TreeError::MissingRoot)?;
        let root = self.get(root_id).ok_or(TreeError::MissingRoot)?;
        self.resolve_as(root.name(), names)
    }

    /// Like [`Registry::resolve`], with the root listed as `root_name`.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::resolve`].
    pub fn resolve_as<'a, S: AsRef<str>>(
        &'a self,
        root_name: &'a str,
        names: &[S],
    ) -> Result<Invocation<'a>, TreeError> {
        let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        let not_found = || TreeError::NotFound {
            path: names.join("/"),
        };
        let root_id = self.root.ok_or(TreeError::MissingRoot)?;
        let root = self.get(root_id).ok_or(TreeError::MissingRoot)?;

        let (first, rest) = names.split_first().ok_or_else(not_found)?;
        if *first != root_name {
            return Err(not_found());
        }

        let mut chain = vec![(root_name, root)];
        for name in rest {
            let (_, current) = chain[chain.len() - 1];
            let Node::Group(group) = current else {
                return Err(not_found());
            };
            let (listed, id) = group
                .children
                .iter()
                .find(|(child_name, _)| child_name == name)
                .ok_or_else(not_found)?;
            let node = self.get(*id).ok_or_else(|| TreeError::MalformedRegistry {
                parent: group.name.clone(),
                child: listed.clone(),
            })?;
            chain.push((listed.as_str(), node));
        }
        Ok(Invocation { chain })
    }
}

/// A node addressed by path, together with every group above it.
///
/// Dispatchers use the chain to collect group-level parameters (like a global
/// `--debug` flag) into an explicit context for the invocation.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    chain: Vec<(&'a str, &'a Node)>,
}

impl<'a> Invocation<'a> {
    /// The addressed node and the name it is listed under
    #[must_use]
    pub fn target(&self) -> (&'a str, &'a Node) {
        // resolve() always pushes the root first
        self.chain[self.chain.len() - 1]
    }

    /// Groups from the root down to the target's parent
    #[must_use]
    pub fn ancestors(&self) -> &[(&'a str, &'a Node)] {
        &self.chain[..self.chain.len() - 1]
    }

    /// Every level from the root to the target, with the name it is listed under
    #[must_use]
    pub fn chain(&self) -> &[(&'a str, &'a Node)] {
        &self.chain
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.chain.iter().map(|(name, _)| *name).collect()
    }

    /// Declared parameters per level, root first
    pub fn scopes(&self) -> impl Iterator<Item = (&'a str, &'a [Param])> + '_ {
        self.chain.iter().map(|(name, node)| (*name, node.params()))
    }
}
